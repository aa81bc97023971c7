//! Legal move generation.
//!
//! Generation works piece by piece and direction by direction:
//! - men look along their two forward diagonals, kings along all four
//! - the adjacent cell is examined first: empty means a simple move, an enemy
//!   piece means a capture is possible if the cell beyond it is empty
//! - kings are short-range: one step to move, one jump to capture
//!
//! Captures are mandatory for the whole side. Once any piece of the side to
//! move has a capture, every origin keeps only its captures and origins left
//! without moves are dropped.

use std::collections::BTreeMap;

use log::trace;

use crate::board::{Board, PieceKind, Side};
use crate::config::promotion_row;
use crate::position::Position;

/// A diagonal direction. "Top" is toward increasing rows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

impl Direction {
    /// Scan order for kings.
    pub const ALL: [Direction; 4] = [
        Direction::TopRight,
        Direction::TopLeft,
        Direction::BottomRight,
        Direction::BottomLeft,
    ];

    /// `(d_row, d_col)` of a single step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::TopRight => (1, 1),
            Direction::TopLeft => (1, -1),
            Direction::BottomRight => (-1, 1),
            Direction::BottomLeft => (-1, -1),
        }
    }

    /// Directions available to a piece, in scan order.
    pub fn for_piece(kind: PieceKind) -> &'static [Direction] {
        match kind {
            PieceKind::BlackMan => &[Direction::TopRight, Direction::TopLeft],
            PieceKind::WhiteMan => &[Direction::BottomRight, Direction::BottomLeft],
            PieceKind::BlackKing | PieceKind::WhiteKing => &Direction::ALL,
            PieceKind::Empty => &[],
        }
    }
}

/// What a move does to the board besides relocating the piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Move,
    Capture,
    MoveAndUpgrade,
    CaptureAndUpgrade,
}

impl MoveKind {
    fn new(capture: bool, upgrade: bool) -> MoveKind {
        match (capture, upgrade) {
            (false, false) => MoveKind::Move,
            (true, false) => MoveKind::Capture,
            (false, true) => MoveKind::MoveAndUpgrade,
            (true, true) => MoveKind::CaptureAndUpgrade,
        }
    }

    #[inline]
    pub fn is_capture(self) -> bool {
        matches!(self, MoveKind::Capture | MoveKind::CaptureAndUpgrade)
    }

    #[inline]
    pub fn is_upgrade(self) -> bool {
        matches!(self, MoveKind::MoveAndUpgrade | MoveKind::CaptureAndUpgrade)
    }
}

/// A single step or jump of one piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub init_pos: Position,
    pub final_pos: Position,
    pub kind: MoveKind,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = if self.kind.is_capture() { 'x' } else { '-' };
        write!(f, "{}{sep}{}", self.init_pos, self.final_pos)?;
        if self.kind.is_upgrade() {
            f.write_str("=K")?;
        }
        Ok(())
    }
}

/// Legal moves for the side to move, grouped by origin.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidMoves {
    pub moves: BTreeMap<Position, Vec<Move>>,
    /// Captures found before filtering, across all origins.
    pub n_found_captures: usize,
}

/// Cells one and two steps from `from` in `direction`.
///
/// Stops early at the edge; never yields more than two positions.
fn ray(size: usize, from: Position, direction: Direction) -> impl Iterator<Item = Position> {
    let (d_row, d_col) = direction.delta();
    let mut cursor = Some(from);
    std::iter::from_fn(move || {
        let next = cursor?.offset(d_row, d_col).filter(|p| p.in_bounds(size));
        cursor = next;
        next
    })
    .take(2)
}

/// Moves for one piece along the given directions, with the number of
/// captures among them. Nothing is filtered here.
pub fn moves_in_directions(
    board: &Board,
    from: Position,
    directions: &[Direction],
    side: Side,
) -> (Vec<Move>, usize) {
    let Some(kind) = board.get(from).filter(|k| k.belongs_to(side)) else {
        return (Vec::new(), 0);
    };
    let upgrade_row = promotion_row(board.size(), side);
    let upgrades = |to: Position| !kind.is_king() && to.row == upgrade_row;

    let mut moves = Vec::new();
    let mut n_captures = 0;
    for &direction in directions {
        let mut cells = ray(board.size(), from, direction);
        let Some(adjacent) = cells.next() else {
            continue;
        };
        match board.get(adjacent) {
            Some(PieceKind::Empty) => moves.push(Move {
                init_pos: from,
                final_pos: adjacent,
                kind: MoveKind::new(false, upgrades(adjacent)),
            }),
            Some(occupant) if occupant.belongs_to(side.opponent()) => {
                let Some(landing) = cells.next() else {
                    continue;
                };
                if board.get(landing) == Some(PieceKind::Empty) {
                    n_captures += 1;
                    moves.push(Move {
                        init_pos: from,
                        final_pos: landing,
                        kind: MoveKind::new(true, upgrades(landing)),
                    });
                }
            }
            _ => {}
        }
    }
    (moves, n_captures)
}

/// Unfiltered moves for the piece standing on `from`, if it belongs to `side`.
pub fn moves_for_piece(board: &Board, from: Position, side: Side) -> (Vec<Move>, usize) {
    match board.get(from) {
        Some(kind) if kind.belongs_to(side) => {
            moves_in_directions(board, from, Direction::for_piece(kind), side)
        }
        _ => (Vec::new(), 0),
    }
}

/// Every legal move for `side`, applying the mandatory capture rule.
pub fn generate_valid_moves(board: &Board, side: Side) -> ValidMoves {
    let mut moves = BTreeMap::new();
    let mut n_found_captures = 0;

    for (from, kind) in board.pieces() {
        if !kind.belongs_to(side) {
            continue;
        }
        let (piece_moves, n_captures) = moves_for_piece(board, from, side);
        if piece_moves.is_empty() {
            continue;
        }
        n_found_captures += n_captures;
        moves.insert(from, piece_moves);
    }

    if n_found_captures > 0 {
        moves = moves
            .into_iter()
            .filter_map(|(from, piece_moves)| {
                let captures: Vec<Move> = piece_moves
                    .into_iter()
                    .filter(|m| m.kind.is_capture())
                    .collect();
                (!captures.is_empty()).then_some((from, captures))
            })
            .collect();
    }

    trace!(
        "{side}: {} origins, {} captures",
        moves.len(),
        n_found_captures
    );
    ValidMoves {
        moves,
        n_found_captures,
    }
}

/// Capture moves from a single origin, used to detect capture chains.
pub fn captures_from(board: &Board, from: Position, side: Side) -> Vec<Move> {
    let (moves, _) = moves_for_piece(board, from, side);
    moves.into_iter().filter(|m| m.kind.is_capture()).collect()
}
