//! Board module - the grid of typed cells plus its tracking state
//!
//! The board is a `height x width` grid stored as a flat row-major vector.
//! Alongside the grid it keeps derived state that the resolvers update
//! incrementally: which cells gravity must look at, where the enemies are,
//! where the player stands, and how many orbs remain.
//!
//! Coordinates are `(row, col)` with row 0 at the top.

use arrayvec::ArrayVec;

use crate::loader::LoadError;
use crate::tracker::Tracker;
use crate::types::{Direction, Pos, TileKind};

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub kind: TileKind,
    pub pos: Pos,
    /// Set while the object is mid-fall; a falling object may detonate on landing.
    pub falling: bool,
}

impl Cell {
    pub fn new(kind: TileKind, pos: Pos) -> Self {
        Self {
            kind,
            pos,
            falling: false,
        }
    }
}

/// Outcome flags raised by resolvers and drained by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signals {
    /// The last orb reached the portal.
    pub level_complete: bool,
    /// The player was caught in an explosion.
    pub player_died: bool,
    /// The last orb was destroyed before reaching the portal.
    pub orbs_exhausted: bool,
}

impl Signals {
    /// The level is lost; resolvers stop mutating once this is set.
    pub fn defeat(&self) -> bool {
        self.player_died || self.orbs_exhausted
    }

    pub fn any(&self) -> bool {
        self.level_complete || self.defeat()
    }
}

/// The game board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Row-major cells (row * width + col)
    cells: Vec<Cell>,
    pub(crate) falling: Tracker,
    pub(crate) enemies: Tracker,
    player: Pos,
    remaining_orbs: u32,
    signals: Signals,
}

impl Board {
    /// Build a board from row-major kinds and run the tracking scan.
    pub fn from_kinds(width: usize, height: usize, kinds: &[TileKind]) -> Result<Self, LoadError> {
        if width == 0 || height == 0 {
            return Err(LoadError::EmptyDimensions { width, height });
        }
        let expected = width * height;
        if kinds.len() < expected {
            return Err(LoadError::Truncated {
                expected: expected * 2,
                found: kinds.len() * 2,
            });
        }
        if kinds.len() > expected {
            return Err(LoadError::TrailingTokens {
                expected: expected * 2,
                found: kinds.len() * 2,
            });
        }

        let cells = kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| Cell::new(kind, Pos::new(i / width, i % width)))
            .collect();

        let mut board = Self {
            width,
            height,
            cells,
            falling: Tracker::new(),
            enemies: Tracker::new(),
            player: Pos::new(0, 0),
            remaining_orbs: 0,
            signals: Signals::default(),
        };
        board.rescan()?;
        Ok(board)
    }

    /// Build a board from glyph rows (`H G S . B O R P U M`).
    ///
    /// # Examples
    ///
    /// ```
    /// use crypt_raider_core::Board;
    /// use crypt_raider_core::types::{Pos, TileKind};
    ///
    /// let board = Board::from_rows(&[
    ///     "HHHHH",
    ///     "H.O.H",
    ///     "H.U.H",
    ///     "HHPHH",
    /// ])
    /// .unwrap();
    /// assert_eq!(board.dimensions(), (4, 5));
    /// assert_eq!(board.player_pos(), Pos::new(2, 2));
    /// assert_eq!(board.remaining_orbs(), 1);
    /// assert_eq!(board.get(3, 2), Some(TileKind::Portal));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, LoadError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut kinds = Vec::with_capacity(width * height);

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LoadError::RaggedRows {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let kind =
                    TileKind::from_glyph(ch).ok_or(LoadError::UnknownGlyph { glyph: ch, row, col })?;
                kinds.push(kind);
            }
        }

        Self::from_kinds(width, height, &kinds)
    }

    /// Render the grid back into glyph rows.
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|c| c.kind.glyph()).collect())
            .collect()
    }

    /// Rebuild every tracking set from a full scan of the grid.
    ///
    /// Falling flags are cleared: a freshly scanned object is at rest.
    pub fn rescan(&mut self) -> Result<(), LoadError> {
        self.falling.clear();
        self.enemies.clear();
        self.remaining_orbs = 0;
        self.signals = Signals::default();

        let mut player = None;
        let mut players = 0usize;

        for cell in &mut self.cells {
            cell.falling = false;
            if cell.kind.can_fall() {
                self.falling.push(cell.pos);
            }
            match cell.kind {
                TileKind::Mummy => {
                    self.enemies.push(cell.pos);
                }
                TileKind::Player => {
                    players += 1;
                    player.get_or_insert(cell.pos);
                }
                TileKind::Orb => self.remaining_orbs += 1,
                _ => {}
            }
        }

        match (players, player) {
            (1, Some(pos)) => {
                self.player = pos;
                Ok(())
            }
            (0, _) | (_, None) => Err(LoadError::MissingPlayer),
            (count, _) => Err(LoadError::DuplicatePlayer { count }),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    #[inline(always)]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    #[inline(always)]
    pub(crate) fn index(&self, pos: Pos) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.width + pos.col)
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    /// Kind at `pos`, `None` if out of bounds.
    pub fn kind(&self, pos: Pos) -> Option<TileKind> {
        self.cell(pos).map(|c| c.kind)
    }

    /// Kind at `(row, col)`, `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<TileKind> {
        self.kind(Pos::new(row, col))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The in-bounds neighbor of `pos` in `dir`.
    pub fn neighbor(&self, pos: Pos, dir: Direction) -> Option<Pos> {
        pos.step(dir).filter(|p| self.contains(*p))
    }

    /// In-bounds neighbors of `pos`, in the order of `dirs`.
    pub fn neighbors(&self, pos: Pos, dirs: &[Direction]) -> ArrayVec<Pos, 4> {
        dirs.iter()
            .take(4)
            .filter_map(|&d| self.neighbor(pos, d))
            .collect()
    }

    /// In-bounds cells of the 3x3 block centered on `center`, row-major.
    pub fn neighborhood(&self, center: Pos) -> ArrayVec<Pos, 9> {
        let mut out = ArrayVec::new();
        for dr in -1..=1 {
            for dc in -1..=1 {
                if let Some(p) = center.offset(dr, dc).filter(|p| self.contains(*p)) {
                    out.push(p);
                }
            }
        }
        out
    }

    pub fn player_pos(&self) -> Pos {
        self.player
    }

    pub fn remaining_orbs(&self) -> u32 {
        self.remaining_orbs
    }

    /// Tracked fall-capable objects (may hold tombstones mid-pass).
    pub fn falling_set(&self) -> &Tracker {
        &self.falling
    }

    /// Tracked enemies (may hold tombstones mid-pass).
    pub fn enemy_set(&self) -> &Tracker {
        &self.enemies
    }

    pub fn signals(&self) -> Signals {
        self.signals
    }

    /// Take and clear pending signals.
    pub fn take_signals(&mut self) -> Signals {
        std::mem::take(&mut self.signals)
    }

    /// Count cells of a kind.
    pub fn count(&self, kind: TileKind) -> usize {
        self.cells.iter().filter(|c| c.kind == kind).count()
    }

    pub fn is_falling(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(|c| c.falling)
    }

    /// Overwrite a cell's kind and falling flag. Out-of-bounds writes are ignored.
    pub(crate) fn put(&mut self, pos: Pos, kind: TileKind, falling: bool) {
        if let Some(i) = self.index(pos) {
            let cell = &mut self.cells[i];
            cell.kind = kind;
            cell.falling = falling;
        }
    }

    pub(crate) fn set_falling(&mut self, pos: Pos, falling: bool) {
        if let Some(i) = self.index(pos) {
            self.cells[i].falling = falling;
        }
    }

    /// Move the player cell to `to`, leaving background behind.
    pub(crate) fn relocate_player(&mut self, to: Pos) {
        let from = self.player;
        self.put(to, TileKind::Player, false);
        self.put(from, TileKind::Background, false);
        self.player = to;
    }

    /// An orb reached the portal.
    pub(crate) fn orb_delivered(&mut self) {
        self.remaining_orbs = self.remaining_orbs.saturating_sub(1);
        if self.remaining_orbs == 0 {
            self.signals.level_complete = true;
        }
    }

    /// An orb was blown up. It still leaves the count, but can never win the level.
    pub(crate) fn orb_destroyed(&mut self) {
        self.remaining_orbs = self.remaining_orbs.saturating_sub(1);
        if self.remaining_orbs == 0 {
            self.signals.orbs_exhausted = true;
        }
    }

    pub(crate) fn kill_player(&mut self) {
        self.signals.player_died = true;
    }
}
