//! Constants for board geometry, protocol identity, and self-play limits.
//!
//! Board size is chosen at runtime through [`crate::config::GameConfig`]; the
//! values here bound what a configuration may ask for.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). The standard English draughts board is 8x8.
pub const DEFAULT_SIZE: usize = 8;

/// Smallest accepted board size.
pub const MIN_SIZE: usize = 4;

/// Largest accepted board size. Columns are printed as letters `a..z`.
pub const MAX_SIZE: usize = 26;

/// Number of rows each side fills at the start of a game on a large enough board.
pub const STARTING_ROWS: usize = 3;

/// Rows that must stay empty between the two armies at the start.
pub const EMPTY_MIDDLE_ROWS: usize = 2;

// =============================================================================
// Text Protocol
// =============================================================================

/// Engine name reported by the `name` command.
pub const ENGINE_NAME: &str = "checkers-rust";

/// Version of the text protocol spoken by [`crate::protocol::ProtocolEngine`].
pub const PROTOCOL_VERSION: u32 = 1;

// =============================================================================
// Self-play
// =============================================================================

/// Default ply limit for random playouts. Games with kings shuffling back and
/// forth never end on their own, so playouts are always bounded.
pub const MAX_PLAYOUT_PLIES: usize = 400;
