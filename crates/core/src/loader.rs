//! Level loader.
//!
//! A level file is a flat whitespace-delimited token stream read two tokens per
//! cell, row-major (column fastest):
//!
//! ```text
//! /hardSand.png false /hardSand.png false /background.png true ...
//! ```
//!
//! The first token names the tile image; only its stem matters (`hardSand`,
//! `granite`, `softSand`, `background`, `bomb`, `orb`, `rock`, `portal`,
//! `guy`, `mummy`). The second token is a legacy walkability flag that the
//! simulation ignores. The file carries no header, so the caller supplies the
//! level's width and height.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::board::Board;
use crate::types::TileKind;

/// Fatal level loading errors. No board is produced when any of these occur.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unknown tile image {token:?} at row {row}, col {col}")]
    UnknownTile {
        token: String,
        row: usize,
        col: usize,
    },
    #[error("level data truncated: expected {expected} tokens, found {found}")]
    Truncated { expected: usize, found: usize },
    #[error("level data too long: expected {expected} tokens, found {found}")]
    TrailingTokens { expected: usize, found: usize },
    #[error("level dimensions must be non-zero (got {width}x{height})")]
    EmptyDimensions { width: usize, height: usize },
    #[error("level has no player cell")]
    MissingPlayer,
    #[error("level has {count} player cells, expected exactly one")]
    DuplicatePlayer { count: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown glyph {glyph:?} at row {row}, col {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid level file {}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<LoadError>,
    },
    #[error("no level files found in {}", dir.display())]
    NoLevels { dir: PathBuf },
    #[error("a level set needs at least one level")]
    EmptyLevelSet,
}

/// Strip directories and extension from an image token: `/images/bomb.png` -> `bomb`.
fn image_stem(token: &str) -> &str {
    let name = token.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(token);
    name.split_once('.').map_or(name, |(stem, _)| stem)
}

/// Parse level text into a board of the given dimensions.
///
/// # Examples
///
/// ```
/// use crypt_raider_core::loader::parse_level;
/// use crypt_raider_core::types::TileKind;
///
/// let src = "/guy.png true /orb.png false /background.png true /portal.png false";
/// let board = parse_level(src, 2, 2).unwrap();
/// assert_eq!(board.get(0, 0), Some(TileKind::Player));
/// assert_eq!(board.get(1, 1), Some(TileKind::Portal));
/// assert_eq!(board.remaining_orbs(), 1);
/// ```
pub fn parse_level(source: &str, width: usize, height: usize) -> Result<Board, LoadError> {
    if width == 0 || height == 0 {
        return Err(LoadError::EmptyDimensions { width, height });
    }

    let expected = 2 * width * height;
    let tokens: Vec<&str> = source.split_whitespace().collect();
    if tokens.len() < expected {
        return Err(LoadError::Truncated {
            expected,
            found: tokens.len(),
        });
    }
    if tokens.len() > expected {
        return Err(LoadError::TrailingTokens {
            expected,
            found: tokens.len(),
        });
    }

    let mut kinds = Vec::with_capacity(width * height);
    for (i, record) in tokens.chunks_exact(2).enumerate() {
        // record[1] is the legacy walkability flag; walkability now comes from the rules table.
        let token = record[0];
        let kind =
            TileKind::from_image_stem(image_stem(token)).ok_or_else(|| LoadError::UnknownTile {
                token: token.to_string(),
                row: i / width,
                col: i % width,
            })?;
        kinds.push(kind);
    }

    Board::from_kinds(width, height, &kinds)
}

/// Serialize a board back into level-file text (one row per line).
pub fn format_level(board: &Board) -> String {
    let mut out = String::new();
    for row in board.cells().chunks(board.width()) {
        let line: Vec<String> = row
            .iter()
            .map(|c| {
                let walkable = TileKind::Player.can_move_into(c.kind);
                format!("/{}.png {}", c.kind.image_stem(), walkable)
            })
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// An immutable, parsed level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    name: String,
    board: Board,
}

impl Level {
    pub fn new(name: impl Into<String>, board: Board) -> Self {
        Self {
            name: name.into(),
            board,
        }
    }

    pub fn parse(
        name: impl Into<String>,
        source: &str,
        width: usize,
        height: usize,
    ) -> Result<Self, LoadError> {
        Ok(Self::new(name, parse_level(source, width, height)?))
    }

    pub fn from_file(path: &Path, width: usize, height: usize) -> Result<Self, LoadError> {
        let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::parse(name, &source, width, height).map_err(|e| LoadError::InFile {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pristine board. Never mutated.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// A fresh working board with tracking state rebuilt from scratch.
    pub fn instantiate(&self) -> Board {
        let mut board = self.board.clone();
        let scanned = board.rescan();
        debug_assert!(scanned.is_ok(), "validated level failed to rescan: {scanned:?}");
        board
    }
}

/// Ordered, read-only sequence of levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSet {
    levels: Vec<Level>,
}

impl LevelSet {
    pub fn new(levels: Vec<Level>) -> Result<Self, LoadError> {
        if levels.is_empty() {
            return Err(LoadError::EmptyLevelSet);
        }
        Ok(Self { levels })
    }

    /// Load `level1.txt`, `level2.txt`, ... from `dir` until the first gap.
    pub fn load_dir(dir: &Path, width: usize, height: usize) -> Result<Self, LoadError> {
        let mut levels = Vec::new();
        for n in 1.. {
            let path = dir.join(format!("level{n}.txt"));
            if !path.is_file() {
                break;
            }
            let level = Level::from_file(&path, width, height)?;
            debug!(
                "loaded {} ({} orbs, {} enemies)",
                path.display(),
                level.board().remaining_orbs(),
                level.board().enemy_set().live_len()
            );
            levels.push(level);
        }

        if levels.is_empty() {
            return Err(LoadError::NoLevels {
                dir: dir.to_path_buf(),
            });
        }
        Ok(Self { levels })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The first level. A `LevelSet` is never empty.
    pub fn first(&self) -> &Level {
        &self.levels[0]
    }

    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }
}
