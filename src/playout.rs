//! Random self-play.
//!
//! A playout picks uniformly among the legal moves of the side to move until
//! the game ends or a ply limit is hit. All randomness comes from a caller
//! supplied [`fastrand::Rng`], so a seed reproduces a game exactly.

use log::debug;

use crate::game::{GameStatus, game_status};
use crate::movegen::Move;
use crate::state::{GameState, apply_move};

/// Pick a legal move uniformly at random. `None` when the side to move has
/// no legal move.
pub fn random_move(state: &GameState, rng: &mut fastrand::Rng) -> Option<Move> {
    let n = state.valid_moves().values().map(Vec::len).sum::<usize>();
    if n == 0 {
        return None;
    }
    state
        .valid_moves()
        .values()
        .flatten()
        .nth(rng.usize(..n))
        .copied()
}

/// Play random moves from `state` until the game is decided or `max_plies`
/// moves have been applied. Returns the final state.
pub fn playout(state: &GameState, rng: &mut fastrand::Rng, max_plies: usize) -> GameState {
    let mut current = state.clone();
    for _ in 0..max_plies {
        if game_status(&current) != GameStatus::Ongoing {
            break;
        }
        let Some(mv) = random_move(&current, rng) else {
            break;
        };
        current = apply_move(&current, mv);
    }
    debug!(
        "playout ended after {} moves: {:?}",
        current.move_history().len() - state.move_history().len(),
        game_status(&current)
    );
    current
}
