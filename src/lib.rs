//! boom-rs: rule engine and terminal front end for Boom, a turn-based
//! card-elimination game.
//!
//! Players hold a hand of cards valued 0 to 9 and defend accumulators, small
//! stores of life on a shared board. Each turn the acting player attacks,
//! swaps, discards or, holding nothing but face cards, goes boom. The last
//! player with life left wins.
//!
//! Goals:
//! - Deterministic state transitions with an injectable random source
//! - Rejected actions never change the game
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: play a turn
//! ```
//! use boom_rs::action::Action;
//! use boom_rs::engine::{GameEngine, GameStore};
//! use boom_rs::game::GameConfig;
//! use boom_rs::player::Player;
//!
//! let mut store = GameStore::with_seed(42);
//! let players = [Player::new("p1", "Paco"), Player::new("p2", "Quinn")];
//! store.start_game(&players, &GameConfig::default()).unwrap();
//!
//! let first = store.current_player_id().unwrap().to_string();
//! store.attempt_action(&first, &Action::discard(0)).unwrap();
//! assert_ne!(store.current_player_id(), Some(first.as_str()));
//! assert_eq!(store.game().unwrap().history_len(), 1);
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin boom-rs
//! ```

pub mod action;
pub mod agents;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod game;
pub mod history;
pub mod player;
pub mod rules;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
