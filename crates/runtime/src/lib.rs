//! Runtime: configuration and the engine task that owns a level session.
//!
//! The terminal loop is synchronous; [`EngineHandle`] starts a tokio runtime,
//! spawns the engine on it, and exposes non-blocking send/poll methods.

pub mod config;
pub mod engine;

pub use crypt_raider_core as core;
pub use crypt_raider_types as types;

pub use config::GameConfig;
pub use engine::{run_engine, spawn_engine, Command, EngineChannels, EngineHandle, COMMAND_QUEUE};
