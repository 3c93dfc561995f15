use crate::board::Board;
use crate::types::{Pos, SessionState, TileKind};

/// Immutable view of a session, handed to renderers across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major tile kinds, `width * height` long.
    pub tiles: Vec<TileKind>,
    pub level_index: usize,
    pub level_count: usize,
    pub remaining_orbs: u32,
    pub state: SessionState,
    /// `None` once the player has been destroyed.
    pub player: Option<Pos>,
}

impl BoardSnapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.tiles.clear();
        self.level_index = 0;
        self.level_count = 0;
        self.remaining_orbs = 0;
        self.state = SessionState::Loading;
        self.player = None;
    }

    /// Copy `board` into this snapshot, reusing the tile buffer.
    pub fn fill_from(&mut self, board: &Board) {
        self.width = board.width();
        self.height = board.height();
        self.tiles.clear();
        self.tiles.extend(board.cells().iter().map(|c| c.kind));
        self.remaining_orbs = board.remaining_orbs();
        self.player = if board.signals().player_died {
            None
        } else {
            Some(board.player_pos())
        };
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<TileKind> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.tiles.get(row * self.width + col).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TileKind]> {
        self.tiles.chunks(self.width.max(1))
    }

    pub fn playable(&self) -> bool {
        self.state == SessionState::Active
    }

    /// FNV-1a hash over the grid, used to skip redundant redraws.
    pub fn fingerprint(&self) -> u64 {
        const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const PRIME: u64 = 0x0000_0100_0000_01b3;

        let mut hash = OFFSET;
        let mut feed = |byte: u8| {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(PRIME);
        };
        for tile in &self.tiles {
            feed(tile.glyph() as u8);
        }
        for byte in (self.width as u32).to_le_bytes() {
            feed(byte);
        }
        for byte in self.remaining_orbs.to_le_bytes() {
            feed(byte);
        }
        feed(self.state as u8);
        feed(self.level_index as u8);
        hash
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            tiles: Vec::new(),
            level_index: 0,
            level_count: 0,
            remaining_orbs: 0,
            state: SessionState::Loading,
            player: None,
        }
    }
}
