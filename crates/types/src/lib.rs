//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the game. All types
//! are plain data with no external dependencies, so they can be used by the
//! simulation, the terminal front end and the runtime alike.
//!
//! # Board Dimensions
//!
//! Shipped levels are 18 columns by 12 rows. The simulation never assumes
//! this: every board carries its own dimensions, these are only the defaults
//! the level loader uses when nothing else is configured.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 250 | Scheduler interval (gravity + enemy step) |
//! | `MIN_TICK_MS` | 10 | Lower clamp for configured tick intervals |
//!
//! # Examples
//!
//! ```
//! use crypt_raider_types::{Direction, GameAction, Pos, TileKind};
//!
//! let p = Pos::new(3, 4);
//! assert_eq!(p.step(Direction::Up), Some(Pos::new(2, 4)));
//! assert_eq!(Pos::new(0, 0).step(Direction::Left), None);
//!
//! assert_eq!(GameAction::from_str("up"), Some(GameAction::Move(Direction::Up)));
//! assert!(TileKind::Rock.can_fall());
//! ```

pub mod tile;

pub use tile::{rules, Capabilities, TileKind};

/// Default board width in cells (18 columns)
pub const DEFAULT_BOARD_WIDTH: usize = 18;

/// Default board height in cells (12 rows)
pub const DEFAULT_BOARD_HEIGHT: usize = 12;

/// Scheduler interval in milliseconds between gravity/enemy ticks.
pub const TICK_MS: u64 = 250;

/// Smallest tick interval the runtime accepts.
pub const MIN_TICK_MS: u64 = 10;

/// Default directory holding `level1.txt`, `level2.txt`, ...
pub const DEFAULT_LEVELS_DIR: &str = "levels";

/// A board coordinate. Rows grow downward, columns grow to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offset by a signed delta. `None` if either coordinate would go negative.
    ///
    /// The upper bound is the board's concern; see `Board::contains`.
    pub fn offset(self, drow: isize, dcol: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(drow)?,
            col: self.col.checked_add_signed(dcol)?,
        })
    }

    pub fn step(self, dir: Direction) -> Option<Self> {
        let (dr, dc) = dir.delta();
        self.offset(dr, dc)
    }

    /// Squared Euclidean distance. Ordering matches true distance exactly.
    pub fn dist_sq(self, other: Pos) -> usize {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr * dr + dc * dc
    }
}

/// Orthogonal movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// `(drow, dcol)` for this direction.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Inverse of [`Direction::delta`]; only unit orthogonal deltas map.
    pub const fn from_delta(drow: isize, dcol: isize) -> Option<Self> {
        match (drow, dcol) {
            (-1, 0) => Some(Direction::Up),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Actions the input collaborator can apply to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Step or push one cell in a direction
    Move(Direction),
    /// Enter the next level after the current one was cleared
    Advance,
    /// Reload the current level from its pristine copy
    Restart,
}

impl GameAction {
    /// Parse an action name (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use crypt_raider_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("LEFT"), Some(GameAction::Move(Direction::Left)));
    /// assert_eq!(GameAction::from_str("advance"), Some(GameAction::Advance));
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(GameAction::Move(Direction::Up)),
            "down" => Some(GameAction::Move(Direction::Down)),
            "left" => Some(GameAction::Move(Direction::Left)),
            "right" => Some(GameAction::Move(Direction::Right)),
            "advance" => Some(GameAction::Advance),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(dir) => dir.as_str(),
            GameAction::Advance => "advance",
            GameAction::Restart => "restart",
        }
    }
}

/// Level session lifecycle.
///
/// `Loading -> Active -> Transitioning -> Active -> ... -> GameWon`, with
/// `Active -> GameOver` on a player death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Loading,
    Active,
    /// The level was cleared; waiting for an explicit advance.
    Transitioning,
    GameOver,
    GameWon,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::GameOver | SessionState::GameWon)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Loading => "loading",
            SessionState::Active => "active",
            SessionState::Transitioning => "transitioning",
            SessionState::GameOver => "game_over",
            SessionState::GameWon => "game_won",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_level_defaults() {
        assert_eq!(DEFAULT_BOARD_WIDTH, 18);
        assert_eq!(DEFAULT_BOARD_HEIGHT, 12);
        assert_eq!(TICK_MS, 250);
    }

    #[test]
    fn direction_delta_roundtrip() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let (dr, dc) = dir.delta();
            assert_eq!(Direction::from_delta(dr, dc), Some(dir));
        }
        assert_eq!(Direction::from_delta(1, 1), None);
        assert_eq!(Direction::from_delta(0, 0), None);
    }

    #[test]
    fn pos_offset_never_goes_negative() {
        assert_eq!(Pos::new(0, 5).step(Direction::Up), None);
        assert_eq!(Pos::new(5, 0).step(Direction::Left), None);
        assert_eq!(Pos::new(5, 5).offset(2, -3), Some(Pos::new(7, 2)));
    }

    #[test]
    fn dist_sq_is_symmetric() {
        let a = Pos::new(1, 1);
        let b = Pos::new(4, 5);
        assert_eq!(a.dist_sq(b), 25);
        assert_eq!(b.dist_sq(a), 25);
        assert_eq!(a.dist_sq(a), 0);
    }

    #[test]
    fn terminal_states() {
        assert!(SessionState::GameOver.is_terminal());
        assert!(SessionState::GameWon.is_terminal());
        assert!(!SessionState::Transitioning.is_terminal());
        assert_eq!(SessionState::default(), SessionState::Loading);
    }
}
