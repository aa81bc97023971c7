//! Game controller.
//!
//! The safe surface a front end talks to. It validates raw cell choices
//! before anything reaches [`apply_move`], reports why a choice was refused,
//! undoes moves by replaying history, exposes the move list for replay, and
//! decides when the game is over.

use std::sync::Arc;

use log::{debug, info, trace};

use crate::board::{PieceKind, Side};
use crate::config;
use crate::error::{DestinationChoiceError, GameError, MoveChoiceError, PieceChoiceError};
use crate::movegen::Move;
use crate::position::Position;
use crate::state::GameState;

pub use crate::state::apply_move;

/// Whether the game is still being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Victory(Side),
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Victory(_))
    }
}

/// Check that `position` holds a piece of the side to move.
pub fn select_origin(state: &GameState, position: Position) -> Result<PieceKind, PieceChoiceError> {
    match state.board().get(position) {
        Some(kind) if kind.belongs_to(state.turn()) => Ok(kind),
        Some(kind) if kind.side().is_some() => Err(PieceChoiceError::WrongTurn),
        _ => Err(PieceChoiceError::NotAPiece),
    }
}

/// Check that `destination` is an empty playable cell on the board.
pub fn select_destination(
    state: &GameState,
    origin: Position,
    destination: Position,
) -> Result<(), DestinationChoiceError> {
    let result = match state.board().get(destination) {
        None => Err(DestinationChoiceError::NotACell),
        Some(_) if !config::is_playable(destination) => Err(DestinationChoiceError::WrongCellColor),
        Some(PieceKind::Empty) => Ok(()),
        Some(_) => Err(DestinationChoiceError::PieceInCell),
    };
    if let Err(err) = &result {
        trace!("{origin} -> {destination}: {err}");
    }
    result
}

/// Find the legal move from `origin` to `destination`.
///
/// When no such move exists and a capture is pending, the mandatory capture
/// is reported rather than a generic refusal.
pub fn resolve_move(
    state: &GameState,
    origin: Position,
    destination: Position,
) -> Result<Move, MoveChoiceError> {
    if game_status(state).is_terminal() {
        return Err(MoveChoiceError::GameOver);
    }
    if let Some(mv) = state
        .moves_from(origin)
        .iter()
        .find(|m| m.final_pos == destination)
    {
        return Ok(*mv);
    }
    if state.pending_capture_count() > 0 {
        Err(MoveChoiceError::CaptureAvailable)
    } else {
        Err(MoveChoiceError::InvalidMoveForPiece)
    }
}

/// Validate a raw origin/destination pair down to a legal move.
pub fn choose_move(
    state: &GameState,
    origin: Position,
    destination: Position,
) -> Result<Move, GameError> {
    if game_status(state).is_terminal() {
        return Err(MoveChoiceError::GameOver.into());
    }
    select_origin(state, origin)?;
    select_destination(state, origin, destination)?;
    Ok(resolve_move(state, origin, destination)?)
}

/// Validate a raw origin/destination pair and apply the resulting move.
pub fn play(
    state: &GameState,
    origin: Position,
    destination: Position,
) -> Result<GameState, GameError> {
    let mv = choose_move(state, origin, destination)?;
    let next = apply_move(state, mv);
    if let GameStatus::Victory(winner) = game_status(&next) {
        info!("{winner} wins after {} moves", next.move_history().len());
    }
    Ok(next)
}

/// Take back the last applied move.
///
/// The previous state is rebuilt by replaying every move but the last from
/// the game's setup. Returns `state` unchanged when there is nothing to undo.
pub fn undo(state: &GameState) -> GameState {
    let Some((popped, replayed)) = state.move_history().split_last() else {
        return state.clone();
    };
    let fresh = GameState::from_setup(Arc::clone(state.setup()), state.win_target());
    let previous = replayed.iter().fold(fresh, |s, &mv| apply_move(&s, mv));
    debug!("undo {popped}: replayed {} moves", replayed.len());
    previous
}

/// Terminal status of a state.
///
/// A side wins once it has captured the starting piece count of the
/// opponent, or when the opponent is to move and has no legal move.
pub fn game_status(state: &GameState) -> GameStatus {
    let target = state.win_target();
    let score = state.score();
    if score.blacks_score >= target {
        GameStatus::Victory(Side::Black)
    } else if score.whites_score >= target {
        GameStatus::Victory(Side::White)
    } else if state.valid_moves().is_empty() {
        GameStatus::Victory(state.turn().opponent())
    } else {
        GameStatus::Ongoing
    }
}

/// The most recently applied move, for animating it.
pub fn last_move(state: &GameState) -> Option<Move> {
    state.move_history().last().copied()
}

/// Cell emptied by a capturing move.
pub fn captured_position(mv: &Move) -> Option<Position> {
    mv.kind
        .is_capture()
        .then(|| mv.init_pos.midpoint(mv.final_pos))
}

/// Moves of a finished or ongoing game as `(origin, destination)` pairs,
/// oldest first. The sequence can be cloned or restarted at any point.
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    moves: &'a [Move],
    cursor: usize,
}

impl Replay<'_> {
    /// Rewind to the first move.
    pub fn restart(&mut self) {
        self.cursor = 0;
    }

    /// Moves already yielded.
    pub fn played(&self) -> usize {
        self.cursor
    }
}

impl Iterator for Replay<'_> {
    type Item = (Position, Position);

    fn next(&mut self) -> Option<Self::Item> {
        let mv = self.moves.get(self.cursor)?;
        self.cursor += 1;
        Some((mv.init_pos, mv.final_pos))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.moves.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Replay<'_> {}

/// Replay the moves of `state` in the order they were played.
pub fn replay(state: &GameState) -> Replay<'_> {
    Replay {
        moves: state.move_history(),
        cursor: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::state::Score;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_select_origin() {
        let state = GameState::default();
        assert_eq!(select_origin(&state, pos(2, 1)), Ok(PieceKind::BlackMan));
        assert_eq!(select_origin(&state, pos(5, 0)), Err(PieceChoiceError::WrongTurn));
        assert_eq!(select_origin(&state, pos(3, 0)), Err(PieceChoiceError::NotAPiece));
        assert_eq!(select_origin(&state, pos(0, 0)), Err(PieceChoiceError::NotAPiece));
        assert_eq!(select_origin(&state, pos(8, 1)), Err(PieceChoiceError::NotAPiece));
    }

    #[test]
    fn test_select_destination() {
        let state = GameState::default();
        let origin = pos(2, 1);
        assert_eq!(select_destination(&state, origin, pos(3, 0)), Ok(()));
        assert_eq!(
            select_destination(&state, origin, pos(1, 0)),
            Err(DestinationChoiceError::PieceInCell)
        );
        assert_eq!(
            select_destination(&state, origin, pos(3, 1)),
            Err(DestinationChoiceError::WrongCellColor)
        );
        assert_eq!(
            select_destination(&state, origin, pos(3, 8)),
            Err(DestinationChoiceError::NotACell)
        );
    }

    #[test]
    fn test_resolve_move() {
        let state = GameState::default();
        let mv = resolve_move(&state, pos(2, 1), pos(3, 0)).unwrap();
        assert_eq!(mv.final_pos, pos(3, 0));
        assert_eq!(
            resolve_move(&state, pos(2, 1), pos(4, 3)),
            Err(MoveChoiceError::InvalidMoveForPiece)
        );
        assert_eq!(
            resolve_move(&state, pos(1, 0), pos(2, 1)),
            Err(MoveChoiceError::InvalidMoveForPiece)
        );
    }

    #[test]
    fn test_play_rejects_without_changing_state() {
        let state = GameState::default();
        let err = play(&state, pos(5, 0), pos(4, 1)).unwrap_err();
        assert_eq!(err, GameError::Piece(PieceChoiceError::WrongTurn));
        assert!(state.move_history().is_empty());
    }

    #[test]
    fn test_undo() {
        let state = GameState::default();
        assert_eq!(undo(&state), state);

        let one = play(&state, pos(2, 1), pos(3, 0)).unwrap();
        let two = play(&one, pos(5, 2), pos(4, 1)).unwrap();
        assert_eq!(undo(&two), one);
        assert_eq!(undo(&undo(&two)), state);
    }

    #[test]
    fn test_replay_is_restartable() {
        let state = GameState::default();
        let one = play(&state, pos(2, 1), pos(3, 0)).unwrap();
        let two = play(&one, pos(5, 2), pos(4, 1)).unwrap();

        let mut frames = replay(&two);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames.next(), Some((pos(2, 1), pos(3, 0))));
        assert_eq!(frames.played(), 1);
        frames.restart();
        let all: Vec<_> = frames.collect();
        assert_eq!(all, vec![(pos(2, 1), pos(3, 0)), (pos(5, 2), pos(4, 1))]);
    }

    #[test]
    fn test_status_and_last_move() {
        let state = GameState::default();
        assert_eq!(game_status(&state), GameStatus::Ongoing);
        assert_eq!(last_move(&state), None);

        let mut board = Board::empty(8);
        board.set_piece(pos(2, 1), PieceKind::BlackMan);
        board.set_piece(pos(3, 2), PieceKind::WhiteMan);
        let score = Score {
            blacks_score: 11,
            whites_score: 3,
        };
        let state = GameState::from_position(board, Side::Black, score).unwrap();
        let won = play(&state, pos(2, 1), pos(4, 3)).unwrap();
        assert_eq!(game_status(&won), GameStatus::Victory(Side::Black));

        let mv = last_move(&won).unwrap();
        assert_eq!(captured_position(&mv), Some(pos(3, 2)));
        assert_eq!(
            play(&won, pos(4, 3), pos(5, 4)),
            Err(GameError::Move(MoveChoiceError::GameOver))
        );
        assert_eq!(
            resolve_move(&won, pos(4, 3), pos(5, 4)),
            Err(MoveChoiceError::GameOver)
        );
    }

    #[test]
    fn test_blockade_loses() {
        let mut board = Board::empty(8);
        board.set_piece(pos(7, 0), PieceKind::BlackMan);
        board.set_piece(pos(0, 1), PieceKind::WhiteMan);
        let state = GameState::from_position(board, Side::Black, Score::default()).unwrap();
        assert_eq!(game_status(&state), GameStatus::Victory(Side::White));
    }
}
