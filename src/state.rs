//! Game state and move application.
//!
//! A [`GameState`] is a value: once handed out it never changes. Applying a
//! move copies the board, edits the copy and returns a brand-new state with
//! the legal moves for the next turn already computed.
//!
//! Turn order follows the chain capture rule. After a capture, if the piece
//! that just captured can capture again from where it landed, the same side
//! moves again and only that piece may move. Otherwise the turn passes.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::board::{Board, PieceKind, Side};
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::movegen::{Move, generate_valid_moves};
use crate::position::Position;

/// Captures made by each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub blacks_score: usize,
    pub whites_score: usize,
}

impl Score {
    pub fn of(&self, side: Side) -> usize {
        match side {
            Side::Black => self.blacks_score,
            Side::White => self.whites_score,
        }
    }

    pub fn total(&self) -> usize {
        self.blacks_score + self.whites_score
    }

    fn credit(&mut self, side: Side) {
        match side {
            Side::Black => self.blacks_score += 1,
            Side::White => self.whites_score += 1,
        }
    }
}

/// The position a game started from. Undo replays history on top of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    pub board: Board,
    pub turn: Side,
    pub score: Score,
}

/// Complete, immutable state of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    size: usize,
    board: Board,
    turn: Side,
    score: Score,
    move_history: Vec<Move>,
    valid_moves: BTreeMap<Position, Vec<Move>>,
    pending_capture_count: usize,
    win_target: usize,
    setup: Arc<Setup>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl GameState {
    /// Fresh game with the standard starting layout. Black moves first.
    pub fn new(config: &GameConfig) -> Self {
        let setup = Setup {
            board: Board::initial(config),
            turn: Side::Black,
            score: Score::default(),
        };
        Self::from_setup(Arc::new(setup), config.pieces_per_side())
    }

    /// Fresh standard game on a `size`x`size` board.
    pub fn with_size(size: usize) -> Result<Self, ConfigError> {
        Ok(Self::new(&GameConfig::new(size)?))
    }

    /// Game starting from an arbitrary position.
    ///
    /// The win target is still the standard piece count for the board size,
    /// so `score` should account for pieces missing from `board`.
    pub fn from_position(board: Board, turn: Side, score: Score) -> Result<Self, ConfigError> {
        let config = GameConfig::new(board.size())?;
        let setup = Setup { board, turn, score };
        Ok(Self::from_setup(Arc::new(setup), config.pieces_per_side()))
    }

    pub(crate) fn from_setup(setup: Arc<Setup>, win_target: usize) -> Self {
        let valid = generate_valid_moves(&setup.board, setup.turn);
        Self {
            size: setup.board.size(),
            board: setup.board.clone(),
            turn: setup.turn,
            score: setup.score,
            move_history: Vec::new(),
            valid_moves: valid.moves,
            pending_capture_count: valid.n_found_captures,
            win_target,
            setup,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Side {
        self.turn
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    /// Applied moves, oldest first.
    #[inline]
    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    /// Legal moves for the side to move, by origin.
    #[inline]
    pub fn valid_moves(&self) -> &BTreeMap<Position, Vec<Move>> {
        &self.valid_moves
    }

    /// Captures available to the side to move.
    #[inline]
    pub fn pending_capture_count(&self) -> usize {
        self.pending_capture_count
    }

    /// Captures a side needs to win: the starting piece count per side.
    #[inline]
    pub fn win_target(&self) -> usize {
        self.win_target
    }

    pub fn setup(&self) -> &Arc<Setup> {
        &self.setup
    }

    /// Pieces on the board plus pieces already captured. Constant over a game.
    pub fn initial_piece_count(&self) -> usize {
        self.setup.board.count_pieces() + self.setup.score.total()
    }

    /// Legal moves starting at `from`; empty when `from` cannot move.
    pub fn moves_from(&self, from: Position) -> &[Move] {
        self.valid_moves.get(&from).map_or(&[], Vec::as_slice)
    }

    pub fn is_valid_move(&self, mv: &Move) -> bool {
        self.moves_from(mv.init_pos).contains(mv)
    }

    /// The piece that must keep capturing, when a capture chain is in progress.
    pub fn chain_origin(&self) -> Option<Position> {
        let last = self.move_history.last()?;
        let continuing = last.kind.is_capture()
            && self
                .board
                .get(last.final_pos)
                .is_some_and(|kind| kind.belongs_to(self.turn));
        continuing.then_some(last.final_pos)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(
            f,
            "turn: {}  score: black {} white {}",
            self.turn, self.score.blacks_score, self.score.whites_score
        )
    }
}

/// Produce the state after `mv`.
///
/// `mv` must come from `state.valid_moves()`; anything else is a caller bug
/// and panics. Validation of user input belongs to [`crate::game`].
pub fn apply_move(state: &GameState, mv: Move) -> GameState {
    assert!(
        state.is_valid_move(&mv),
        "{mv} is not a legal move for {}",
        state.turn
    );
    let mover = state.turn;
    let piece = match state.board.get(mv.init_pos) {
        Some(kind) if kind.belongs_to(mover) => kind,
        other => panic!("{mv} starts on {other:?}, not a {mover} piece"),
    };

    let mut board = state.board.clone();
    board.set_piece(mv.init_pos, PieceKind::Empty);
    let placed = if mv.kind.is_upgrade() {
        piece.promoted()
    } else {
        piece
    };
    board.set_piece(mv.final_pos, placed);

    let mut score = state.score;
    if mv.kind.is_capture() {
        board.set_piece(mv.init_pos.midpoint(mv.final_pos), PieceKind::Empty);
        score.credit(mover);
    }

    let mut move_history = state.move_history.clone();
    move_history.push(mv);

    // Chain test: moves for the same side, as if the turn had not passed.
    let chain = if mv.kind.is_capture() {
        let mut same_side = generate_valid_moves(&board, mover);
        same_side
            .moves
            .remove(&mv.final_pos)
            .map(|moves| moves.into_iter().filter(|m| m.kind.is_capture()).collect::<Vec<_>>())
            .filter(|captures| !captures.is_empty())
    } else {
        None
    };

    let (turn, valid_moves, pending_capture_count) = match chain {
        Some(captures) => {
            debug!("{mover} continues capturing from {}", mv.final_pos);
            let n = captures.len();
            (mover, BTreeMap::from([(mv.final_pos, captures)]), n)
        }
        None => {
            let next = mover.opponent();
            let valid = generate_valid_moves(&board, next);
            (next, valid.moves, valid.n_found_captures)
        }
    };

    debug!("{mover} played {mv}, {turn} to move");
    GameState {
        size: state.size,
        board,
        turn,
        score,
        move_history,
        valid_moves,
        pending_capture_count,
        win_target: state.win_target,
        setup: Arc::clone(&state.setup),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::MoveKind;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn custom(pieces: &[((usize, usize), PieceKind)], turn: Side) -> GameState {
        let mut board = Board::empty(8);
        for &((row, col), kind) in pieces {
            board.set_piece(pos(row, col), kind);
        }
        GameState::from_position(board, turn, Score::default()).unwrap()
    }

    fn find(state: &GameState, from: Position, to: Position) -> Move {
        *state
            .moves_from(from)
            .iter()
            .find(|m| m.final_pos == to)
            .unwrap()
    }

    #[test]
    fn test_new_game() {
        let state = GameState::default();
        assert_eq!(state.size(), 8);
        assert_eq!(state.turn(), Side::Black);
        assert_eq!(state.score(), Score::default());
        assert!(state.move_history().is_empty());
        assert_eq!(state.valid_moves().len(), 4);
        assert_eq!(state.pending_capture_count(), 0);
        assert_eq!(state.win_target(), 12);
        assert_eq!(state.initial_piece_count(), 24);
        assert_eq!(state.chain_origin(), None);
    }

    #[test]
    fn test_simple_move() {
        let state = GameState::default();
        let mv = find(&state, pos(2, 1), pos(3, 0));
        assert_eq!(mv.kind, MoveKind::Move);

        let next = apply_move(&state, mv);
        assert_eq!(next.turn(), Side::White);
        assert_eq!(next.board().get(pos(2, 1)), Some(PieceKind::Empty));
        assert_eq!(next.board().get(pos(3, 0)), Some(PieceKind::BlackMan));
        assert_eq!(next.move_history(), &[mv]);
        assert!(next.valid_moves().keys().all(|p| p.row == 5));

        // The original state is untouched.
        assert_eq!(state.turn(), Side::Black);
        assert_eq!(state.board().get(pos(2, 1)), Some(PieceKind::BlackMan));
        assert!(state.move_history().is_empty());
    }

    #[test]
    fn test_capture_removes_piece_and_scores() {
        let state = custom(
            &[
                ((2, 1), PieceKind::BlackMan),
                ((3, 2), PieceKind::WhiteMan),
                ((7, 0), PieceKind::WhiteMan),
            ],
            Side::Black,
        );
        assert_eq!(state.pending_capture_count(), 1);
        let mv = find(&state, pos(2, 1), pos(4, 3));
        let next = apply_move(&state, mv);

        assert_eq!(next.board().get(pos(3, 2)), Some(PieceKind::Empty));
        assert_eq!(next.board().get(pos(4, 3)), Some(PieceKind::BlackMan));
        assert_eq!(next.score().blacks_score, 1);
        assert_eq!(next.score().whites_score, 0);
        assert_eq!(next.turn(), Side::White);
        assert_eq!(
            next.board().count_pieces() + next.score().total(),
            state.initial_piece_count()
        );
    }

    #[test]
    fn test_chain_capture_keeps_turn_and_restricts_origin() {
        let state = custom(
            &[
                ((2, 1), PieceKind::BlackMan),
                ((3, 2), PieceKind::WhiteMan),
                ((5, 4), PieceKind::WhiteMan),
                ((2, 5), PieceKind::BlackMan),
                ((3, 6), PieceKind::WhiteMan),
            ],
            Side::Black,
        );
        assert_eq!(state.valid_moves().len(), 2);

        let next = apply_move(&state, find(&state, pos(2, 1), pos(4, 3)));
        assert_eq!(next.turn(), Side::Black);
        assert_eq!(next.chain_origin(), Some(pos(4, 3)));
        // (2,5) still has a capture, but only the chaining piece may move.
        assert_eq!(next.valid_moves().len(), 1);
        let moves = next.moves_from(pos(4, 3));
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].final_pos, pos(6, 5));
        assert_eq!(next.pending_capture_count(), 1);

        let last = apply_move(&next, moves[0]);
        assert_eq!(last.turn(), Side::White);
        assert_eq!(last.score().blacks_score, 2);
        assert_eq!(last.chain_origin(), None);
    }

    #[test]
    fn test_promotion_on_last_row() {
        let state = custom(
            &[((6, 1), PieceKind::BlackMan), ((0, 7), PieceKind::WhiteMan)],
            Side::Black,
        );
        let mv = find(&state, pos(6, 1), pos(7, 2));
        assert_eq!(mv.kind, MoveKind::MoveAndUpgrade);
        let next = apply_move(&state, mv);
        assert_eq!(next.board().get(pos(7, 2)), Some(PieceKind::BlackKing));
    }

    #[test]
    fn test_king_stays_king_on_promotion_row() {
        let state = custom(
            &[((6, 1), PieceKind::BlackKing), ((0, 7), PieceKind::WhiteMan)],
            Side::Black,
        );
        let mv = find(&state, pos(6, 1), pos(7, 0));
        assert_eq!(mv.kind, MoveKind::Move);
        let next = apply_move(&state, mv);
        assert_eq!(next.board().get(pos(7, 0)), Some(PieceKind::BlackKing));
    }

    #[test]
    #[should_panic]
    fn test_apply_unlisted_move_panics() {
        let state = GameState::default();
        let bogus = Move {
            init_pos: pos(1, 0),
            final_pos: pos(2, 1),
            kind: MoveKind::Move,
        };
        apply_move(&state, bogus);
    }

    #[test]
    fn test_from_position_rejects_odd_board() {
        let board = Board::empty(7);
        assert!(GameState::from_position(board, Side::Black, Score::default()).is_err());
    }
}
