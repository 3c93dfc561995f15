//! Terminal front end.
//!
//! A small, game-oriented rendering layer: the view turns a `BoardSnapshot`
//! into a character framebuffer, and the renderer flushes framebuffers to the
//! terminal with crossterm, rewriting only what changed between frames.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use crypt_raider_core as core;
pub use crypt_raider_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
