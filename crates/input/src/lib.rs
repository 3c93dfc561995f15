//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Moves are
//! discrete steps, so there is no auto-repeat handling here: the terminal's own
//! key repeat is enough.

pub mod map;

pub use crypt_raider_types as types;

pub use map::{handle_key_event, is_press, should_quit};
