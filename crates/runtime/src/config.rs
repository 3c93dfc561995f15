//! Runtime configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::core::{LevelSet, LoadError};
use crate::types::{
    DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_LEVELS_DIR, MIN_TICK_MS, TICK_MS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub levels_dir: PathBuf,
    pub tick_ms: u64,
    pub board_width: usize,
    pub board_height: usize,
    /// 1-based level to begin on.
    pub start_level: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            levels_dir: PathBuf::from(DEFAULT_LEVELS_DIR),
            tick_ms: TICK_MS,
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            start_level: 1,
        }
    }
}

impl GameConfig {
    /// Read `CRYPT_*` variables, falling back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let number = |key: &str| lookup(key).and_then(|s| s.trim().parse::<usize>().ok());

        let levels_dir = lookup("CRYPT_LEVELS_DIR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.levels_dir);

        let tick_ms = lookup("CRYPT_TICK_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(defaults.tick_ms)
            .max(MIN_TICK_MS);

        Self {
            levels_dir,
            tick_ms,
            board_width: number("CRYPT_BOARD_WIDTH")
                .filter(|&w| w > 0)
                .unwrap_or(defaults.board_width),
            board_height: number("CRYPT_BOARD_HEIGHT")
                .filter(|&h| h > 0)
                .unwrap_or(defaults.board_height),
            start_level: number("CRYPT_START_LEVEL")
                .unwrap_or(defaults.start_level)
                .max(1),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Zero-based index of the starting level (the session clamps it to the set).
    pub fn start_index(&self) -> usize {
        self.start_level.saturating_sub(1)
    }

    pub fn load_levels(&self) -> Result<LevelSet, LoadError> {
        LevelSet::load_dir(&self.levels_dir, self.board_width, self.board_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = GameConfig::from_lookup(lookup(&[]));
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        assert_eq!(config.start_index(), 0);
    }

    #[test]
    fn reads_every_variable() {
        let config = GameConfig::from_lookup(lookup(&[
            ("CRYPT_LEVELS_DIR", "/tmp/crypt"),
            ("CRYPT_TICK_MS", "100"),
            ("CRYPT_BOARD_WIDTH", "20"),
            ("CRYPT_BOARD_HEIGHT", " 14 "),
            ("CRYPT_START_LEVEL", "3"),
        ]));
        assert_eq!(config.levels_dir, PathBuf::from("/tmp/crypt"));
        assert_eq!(config.tick_ms, 100);
        assert_eq!((config.board_width, config.board_height), (20, 14));
        assert_eq!(config.start_index(), 2);
    }

    #[test]
    fn bad_values_fall_back_or_clamp() {
        let config = GameConfig::from_lookup(lookup(&[
            ("CRYPT_LEVELS_DIR", "  "),
            ("CRYPT_TICK_MS", "1"),
            ("CRYPT_BOARD_WIDTH", "0"),
            ("CRYPT_BOARD_HEIGHT", "tall"),
            ("CRYPT_START_LEVEL", "0"),
        ]));
        assert_eq!(config.levels_dir, PathBuf::from("levels"));
        assert_eq!(config.tick_ms, MIN_TICK_MS);
        assert_eq!(config.board_width, 18);
        assert_eq!(config.board_height, 12);
        assert_eq!(config.start_level, 1);
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = GameConfig::from_env();
    }
}
