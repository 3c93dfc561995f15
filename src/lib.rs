//! Crypt Raider (workspace facade crate).
//!
//! Re-exports the workspace crates under short names so binaries, tests and
//! benches can write `crypt_raider::core::Board` and friends.

pub use crypt_raider_core as core;
pub use crypt_raider_input as input;
pub use crypt_raider_runtime as runtime;
pub use crypt_raider_term as term;
pub use crypt_raider_types as types;
