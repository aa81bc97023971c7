//! Checkers-Rust: a turn-based checkers (draughts) rules engine.
//!
//! The engine is a pure state-transition system. Every operation takes a
//! [`GameState`](state::GameState) and returns a new one; nothing is mutated
//! in place and there is no global state. Rendering, input picking and
//! animation belong to an external front end that talks to the engine
//! through [`game`], [`session`] or the text [`protocol`].
//!
//! ## Modules
//!
//! - [`constants`] - Board size limits and protocol identity
//! - [`config`] - Validated board geometry and derived rules
//! - [`error`] - Recoverable validation errors
//! - [`position`] - Cell coordinates and notation
//! - [`board`] - Cells, pieces and the board grid
//! - [`movegen`] - Legal move generation with mandatory capture
//! - [`state`] - Game state and move application
//! - [`game`] - Validated moves, undo, replay and win detection
//! - [`session`] - Serialized access to a live game
//! - [`playout`] - Random self-play
//! - [`protocol`] - Line-oriented text protocol
//!
//! ## Example
//!
//! ```
//! use checkers_rust::board::{PieceKind, Side};
//! use checkers_rust::game::{self, GameStatus};
//! use checkers_rust::position::Position;
//! use checkers_rust::state::GameState;
//!
//! let state = GameState::default();
//! let next = game::play(&state, Position::new(2, 1), Position::new(3, 0)).unwrap();
//!
//! assert_eq!(next.turn(), Side::White);
//! assert_eq!(next.board().get(Position::new(3, 0)), Some(PieceKind::BlackMan));
//! assert_eq!(game::game_status(&next), GameStatus::Ongoing);
//! assert_eq!(game::undo(&next), state);
//! ```

pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod movegen;
pub mod playout;
pub mod position;
pub mod protocol;
pub mod session;
pub mod state;
