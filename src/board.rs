use std::fmt;

use crate::config::{self, GameConfig};
use crate::position::Position;

/// A player. Black moves first and advances toward increasing rows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => f.write_str("black"),
            Side::White => f.write_str("white"),
        }
    }
}

/// Fixed checkerboard color of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellColor {
    Black,
    White,
}

/// Occupant of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    BlackMan,
    WhiteMan,
    BlackKing,
    WhiteKing,
    Empty,
}

impl PieceKind {
    pub fn man(side: Side) -> PieceKind {
        match side {
            Side::Black => PieceKind::BlackMan,
            Side::White => PieceKind::WhiteMan,
        }
    }

    pub fn king(side: Side) -> PieceKind {
        match side {
            Side::Black => PieceKind::BlackKing,
            Side::White => PieceKind::WhiteKing,
        }
    }

    /// Owner of the piece, `None` for an empty cell.
    pub fn side(self) -> Option<Side> {
        match self {
            PieceKind::BlackMan | PieceKind::BlackKing => Some(Side::Black),
            PieceKind::WhiteMan | PieceKind::WhiteKing => Some(Side::White),
            PieceKind::Empty => None,
        }
    }

    pub fn is_king(self) -> bool {
        matches!(self, PieceKind::BlackKing | PieceKind::WhiteKing)
    }

    #[inline]
    pub fn belongs_to(self, side: Side) -> bool {
        self.side() == Some(side)
    }

    /// The kind after promotion. Kings and empty cells are unchanged.
    pub fn promoted(self) -> PieceKind {
        match self {
            PieceKind::BlackMan => PieceKind::BlackKing,
            PieceKind::WhiteMan => PieceKind::WhiteKing,
            other => other,
        }
    }

    fn symbol(self) -> char {
        match self {
            PieceKind::BlackMan => 'b',
            PieceKind::WhiteMan => 'w',
            PieceKind::BlackKing => 'B',
            PieceKind::WhiteKing => 'W',
            PieceKind::Empty => '.',
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub color: CellColor,
    pub occupant: PieceKind,
}

/// Square grid of cells, indexed row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// An empty board with the fixed checkerboard coloring.
    pub fn empty(size: usize) -> Self {
        let cells = (0..size * size)
            .map(|i| Cell {
                color: config::cell_color(Position::new(i / size, i % size)),
                occupant: PieceKind::Empty,
            })
            .collect();
        Self { size, cells }
    }

    /// Standard starting layout: Black men on the first rows, White men on
    /// the last rows, playable cells only.
    pub fn initial(config: &GameConfig) -> Self {
        let size = config.size();
        let rows = config.starting_rows();
        assert!(2 * rows < size, "starting rows overlap on a {size}x{size} board");

        let mut board = Self::empty(size);
        for row in 0..size {
            let kind = if row < rows {
                PieceKind::BlackMan
            } else if row >= size - rows {
                PieceKind::WhiteMan
            } else {
                continue;
            };
            for col in 0..size {
                let pos = Position::new(row, col);
                if config::is_playable(pos) {
                    board.set_piece(pos, kind);
                }
            }
        }
        board
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn idx(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }

    /// Occupant of `pos`, or `None` when `pos` is off the board.
    ///
    /// Off-board lookups are not errors: the move generator relies on them
    /// reading as "nothing there" to end a direction scan.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<PieceKind> {
        if !pos.in_bounds(self.size) {
            return None;
        }
        Some(self.cells[self.idx(pos)].occupant)
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        pos.in_bounds(self.size).then(|| self.cells[self.idx(pos)])
    }

    /// Replace the occupant of one cell.
    ///
    /// Panics if `pos` is off the board, or if a piece is written onto a
    /// non-playable cell.
    pub fn set_piece(&mut self, pos: Position, kind: PieceKind) {
        assert!(pos.in_bounds(self.size), "{pos} is off a {0}x{0} board", self.size);
        assert!(
            kind == PieceKind::Empty || config::is_playable(pos),
            "{pos} is not a playable cell"
        );
        let i = self.idx(pos);
        self.cells[i].occupant = kind;
    }

    /// All occupied cells with their pieces, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, PieceKind)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.occupant != PieceKind::Empty)
            .map(move |(i, cell)| (Position::new(i / size, i % size), cell.occupant))
    }

    /// Number of pieces (men and kings) of `side`.
    pub fn count_side(&self, side: Side) -> usize {
        self.pieces().filter(|(_, kind)| kind.belongs_to(side)).count()
    }

    /// Number of pieces of both sides.
    pub fn count_pieces(&self) -> usize {
        self.pieces().count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.size).rev() {
            write!(f, "{:>2} ", row + 1)?;
            for col in 0..self.size {
                let cell = self.cells[self.idx(Position::new(row, col))];
                let ch = match cell.color {
                    CellColor::Black => cell.occupant.symbol(),
                    CellColor::White => ' ',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for col in 0..self.size.min(26) {
            write!(f, "{} ", (b'a' + col as u8) as char)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let board = Board::initial(&GameConfig::default());
        assert_eq!(board.count_side(Side::Black), 12);
        assert_eq!(board.count_side(Side::White), 12);

        for (pos, kind) in board.pieces() {
            assert!(config::is_playable(pos), "{pos} holds a piece but is not playable");
            match kind {
                PieceKind::BlackMan => assert!(pos.row <= 2),
                PieceKind::WhiteMan => assert!(pos.row >= 5),
                other => panic!("unexpected {other:?} at {pos}"),
            }
        }
        assert_eq!(board.get(Position::new(2, 1)), Some(PieceKind::BlackMan));
        assert_eq!(board.get(Position::new(3, 0)), Some(PieceKind::Empty));
        assert_eq!(board.get(Position::new(5, 0)), Some(PieceKind::WhiteMan));
    }

    #[test]
    fn test_get_off_board_is_none() {
        let board = Board::empty(8);
        assert_eq!(board.get(Position::new(8, 0)), None);
        assert_eq!(board.get(Position::new(0, 8)), None);
        assert_eq!(board.get(Position::new(7, 7)), Some(PieceKind::Empty));
        assert!(board.cell(Position::new(9, 9)).is_none());
    }

    #[test]
    fn test_cell_colors_never_change() {
        let mut board = Board::empty(8);
        let pos = Position::new(3, 4);
        let before = board.cell(pos).unwrap().color;
        board.set_piece(pos, PieceKind::WhiteKing);
        assert_eq!(board.cell(pos).unwrap().color, before);
        assert_eq!(before, CellColor::Black);
    }

    #[test]
    #[should_panic]
    fn test_set_piece_on_unplayable_cell_panics() {
        let mut board = Board::empty(8);
        board.set_piece(Position::new(0, 0), PieceKind::BlackMan);
    }

    #[test]
    fn test_promotion_is_idempotent() {
        assert_eq!(PieceKind::BlackMan.promoted(), PieceKind::BlackKing);
        assert_eq!(PieceKind::BlackKing.promoted(), PieceKind::BlackKing);
        assert_eq!(PieceKind::WhiteKing.promoted().promoted(), PieceKind::WhiteKing);
        assert_eq!(PieceKind::Empty.promoted(), PieceKind::Empty);
    }

    #[test]
    fn test_display() {
        let board = Board::initial(&GameConfig::new(4).unwrap());
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], " 4 w   w   ");
        assert_eq!(lines[3], " 1   b   b ");
        assert_eq!(lines[4], "   a b c d ");
    }
}
