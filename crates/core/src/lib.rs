//! Core simulation - pure, deterministic, and testable
//!
//! This crate holds every game rule of the crypt: the board and its tracking
//! sets, the level loader, and the resolvers that run on each tick or move. It
//! has no dependencies on the terminal, the runtime, or the clock, so the same
//! inputs always produce the same board.
//!
//! # Module Structure
//!
//! - [`board`]: grid of typed cells plus falling/enemy trackers, player position and orb count
//! - [`tracker`]: slot list with tombstones, safe to mutate during iteration
//! - [`loader`]: level file parsing, `Level` and `LevelSet`
//! - [`gravity`]: one-row-per-tick falling, landing explosions, portal delivery
//! - [`explosion`]: 3x3 blasts with chain reactions through bombs and mummies
//! - [`player`]: move/push resolution
//! - [`enemy`]: greedy mummy pursuit
//! - [`session`]: level state machine and outbound events
//! - [`snapshot`]: render-side copy of a session
//!
//! # Rules
//!
//! - **Gravity**: rocks, bombs and orbs drop one row per tick into background.
//!   An object that lands while falling explodes if the cell below is on its
//!   trigger list. Orbs falling into the portal are collected.
//! - **Explosions**: clear every destructible cell in the 3x3 block. Bombs and
//!   mummies inside the block detonate their own block. Hard walls and the
//!   portal survive.
//! - **Player**: walks on background, digs soft sand, and pushes a supported
//!   object one cell when the cell ahead accepts it.
//! - **Mummies**: step to the open neighbor that is strictly closest to the
//!   player; reaching the player detonates the mummy.
//!
//! # Example
//!
//! ```
//! use crypt_raider_core::{Board, Level, LevelSession, LevelSet};
//! use crypt_raider_core::types::{Direction, SessionState};
//!
//! let board = Board::from_rows(&["UOP", "GGG"]).unwrap();
//! let levels = LevelSet::new(vec![Level::new("demo", board)]).unwrap();
//!
//! let mut session = LevelSession::new(levels);
//! session.start();
//! session.try_move(Direction::Right);
//! assert_eq!(session.state(), SessionState::Transitioning);
//!
//! session.advance_level();
//! assert_eq!(session.state(), SessionState::GameWon);
//! ```

pub mod board;
pub mod enemy;
pub mod explosion;
pub mod gravity;
pub mod loader;
pub mod player;
pub mod session;
pub mod snapshot;
pub mod tracker;

pub use crypt_raider_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Signals};
pub use enemy::{tick_enemies, EnemyReport};
pub use explosion::{explode, ExplosionReport};
pub use gravity::{tick_gravity, GravityReport};
pub use loader::{format_level, parse_level, Level, LevelSet, LoadError};
pub use player::{try_move, MoveOutcome};
pub use session::{DefeatCause, LevelSession, SessionEvent, SessionObserver, TickReport};
pub use snapshot::BoardSnapshot;
pub use tracker::Tracker;
