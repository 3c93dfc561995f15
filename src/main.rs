//! Terminal Crypt Raider runner (default binary).
//!
//! The engine runs on its own tokio task (see `crypt_raider::runtime`). This
//! loop only reads keys, forwards them as commands, and redraws whenever a new
//! snapshot arrives.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use log::info;

use crypt_raider::core::{BoardSnapshot, DefeatCause, SessionObserver};
use crypt_raider::input::{handle_key_event, is_press, should_quit};
use crypt_raider::runtime::{EngineHandle, GameConfig};
use crypt_raider::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Input poll timeout; also bounds how stale a snapshot can get on screen.
const FRAME: Duration = Duration::from_millis(16);

/// Logs session milestones.
struct Milestones;

impl SessionObserver for Milestones {
    fn on_level_started(&mut self, index: usize) {
        info!("level {} started", index + 1);
    }

    fn on_level_complete(&mut self, index: usize) {
        info!("level {} cleared", index + 1);
    }

    fn on_game_over(&mut self, index: usize, cause: DefeatCause) {
        info!("game over on level {}: {:?}", index + 1, cause);
    }

    fn on_game_won(&mut self) {
        info!("every level cleared");
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Load levels before touching the terminal so errors print normally.
    let config = GameConfig::from_env();
    let mut engine = EngineHandle::start(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine);

    // Always try to restore terminal state.
    let _ = term.exit();
    engine.shutdown();
    result
}

fn run(term: &mut TerminalRenderer, engine: &mut EngineHandle) -> Result<()> {
    let view = GameView::default();
    let mut observer = Milestones;
    let mut snap: BoardSnapshot = engine.snapshot();
    let mut fb = FrameBuffer::new(0, 0);
    let mut size = (0, 0);
    let mut dirty = true;

    loop {
        dirty |= engine.poll_snapshot(&mut snap);
        while let Some(event) = engine.try_event() {
            event.notify(&mut observer);
        }

        let now = crossterm::terminal::size().unwrap_or((80, 24));
        if now != size {
            size = now;
            term.invalidate();
            dirty = true;
        }
        if dirty {
            view.render_into(&snap, Viewport::new(size.0, size.1), &mut fb);
            term.draw(&fb)?;
            dirty = false;
        }

        if !event::poll(FRAME)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if is_press(key) => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    engine.apply(action);
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
