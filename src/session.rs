//! A live game shared by a front end and its input handlers.
//!
//! State transitions are not commutative, so every mutation goes through one
//! lock and is applied to the latest published state. Readers take an
//! [`Arc`] snapshot and inspect it without holding the lock.
//!
//! The session also implements the renderer's two-click interaction: pick a
//! piece, then pick where it goes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;

use crate::config::GameConfig;
use crate::error::{DestinationChoiceError, GameError, PieceChoiceError};
use crate::game::{self, GameStatus};
use crate::movegen::Move;
use crate::position::Position;
use crate::state::GameState;

/// Result of picking a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// A piece of the side to move is now selected.
    Selected(Position),
    /// The pick completed a move from the selected piece.
    Moved(Move),
    /// The pick was refused and the selection cleared.
    Rejected(GameError),
}

struct Inner {
    config: GameConfig,
    current: Arc<GameState>,
    selected: Option<Position>,
}

pub struct Session {
    inner: Mutex<Inner>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                config,
                current: Arc::new(GameState::new(&config)),
                selected: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic mid-update never publishes a half-built state, so the
        // guarded data is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The latest published state.
    pub fn snapshot(&self) -> Arc<GameState> {
        Arc::clone(&self.lock().current)
    }

    pub fn config(&self) -> GameConfig {
        self.lock().config
    }

    pub fn selected(&self) -> Option<Position> {
        self.lock().selected
    }

    pub fn status(&self) -> GameStatus {
        game::game_status(&self.snapshot())
    }

    /// Pick the cell with renderer index `index`.
    pub fn pick(&self, index: usize) -> PickOutcome {
        let mut inner = self.lock();
        match Position::from_index(index, inner.config.size()) {
            Some(position) => Self::pick_locked(&mut inner, position),
            None => {
                let err = match inner.selected.take() {
                    Some(_) => GameError::from(DestinationChoiceError::NotACell),
                    None => GameError::from(PieceChoiceError::NotAPiece),
                };
                PickOutcome::Rejected(err)
            }
        }
    }

    /// Pick a cell by position.
    pub fn pick_position(&self, position: Position) -> PickOutcome {
        let mut inner = self.lock();
        Self::pick_locked(&mut inner, position)
    }

    fn pick_locked(inner: &mut Inner, position: Position) -> PickOutcome {
        let state = Arc::clone(&inner.current);
        let own_piece = game::select_origin(&state, position);

        let Some(origin) = inner.selected.take() else {
            return match own_piece {
                Ok(_) => {
                    inner.selected = Some(position);
                    PickOutcome::Selected(position)
                }
                Err(err) => PickOutcome::Rejected(err.into()),
            };
        };

        if own_piece.is_ok() && !game::game_status(&state).is_terminal() {
            inner.selected = Some(position);
            return PickOutcome::Selected(position);
        }

        match game::choose_move(&state, origin, position) {
            Ok(mv) => {
                inner.current = Arc::new(game::apply_move(&state, mv));
                PickOutcome::Moved(mv)
            }
            Err(err) => PickOutcome::Rejected(err),
        }
    }

    /// Play a move from raw cells. On success the new state is published.
    pub fn play(&self, origin: Position, destination: Position) -> Result<Arc<GameState>, GameError> {
        let mut inner = self.lock();
        let next = Arc::new(game::play(&inner.current, origin, destination)?);
        inner.current = Arc::clone(&next);
        inner.selected = None;
        Ok(next)
    }

    /// Take back the last move.
    pub fn undo(&self) -> Arc<GameState> {
        let mut inner = self.lock();
        let previous = Arc::new(game::undo(&inner.current));
        inner.current = Arc::clone(&previous);
        inner.selected = None;
        previous
    }

    /// Start a new game, optionally on a differently sized board.
    pub fn reset(&self, config: Option<GameConfig>) -> Arc<GameState> {
        let mut inner = self.lock();
        if let Some(config) = config {
            inner.config = config;
        }
        let fresh = Arc::new(GameState::new(&inner.config));
        inner.current = Arc::clone(&fresh);
        inner.selected = None;
        debug!("new {0}x{0} game", inner.config.size());
        fresh
    }
}
