//! Validate a level directory and print one JSON summary per level.
//!
//! Usage: `level-check [DIR]` (defaults to `CRYPT_LEVELS_DIR`, then `levels`).
//! Exits non-zero on the first level that fails to load.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crypt_raider::core::Level;
use crypt_raider::runtime::GameConfig;
use crypt_raider::types::TileKind;

#[derive(Debug, Serialize)]
struct LevelReport<'a> {
    index: usize,
    name: &'a str,
    width: usize,
    height: usize,
    orbs: u32,
    enemies: usize,
    falling: usize,
    portals: usize,
}

impl<'a> LevelReport<'a> {
    fn new(index: usize, level: &'a Level) -> Self {
        let board = level.board();
        Self {
            index,
            name: level.name(),
            width: board.width(),
            height: board.height(),
            orbs: board.remaining_orbs(),
            enemies: board.enemy_set().live_len(),
            falling: board.falling_set().live_len(),
            portals: board.count(TileKind::Portal),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = GameConfig::from_env();
    if let Some(dir) = std::env::args_os().nth(1) {
        config.levels_dir = PathBuf::from(dir);
    }

    let levels = config
        .load_levels()
        .with_context(|| format!("checking {}", config.levels_dir.display()))?;
    log::info!(
        "{} levels in {}",
        levels.len(),
        config.levels_dir.display()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (index, level) in levels.iter().enumerate() {
        let report = LevelReport::new(index, level);
        if report.portals == 0 {
            log::warn!("{} has no portal and cannot be cleared", level.name());
        }
        serde_json::to_writer(&mut out, &report)?;
        writeln!(out)?;
    }
    Ok(())
}
