//! Level session - the state machine that owns the working board.
//!
//! ```text
//! Loading --start--> Active --level cleared--> Transitioning --advance--> Active
//!                      |                                         \
//!                      +--player died / orbs lost--> GameOver     +--> GameWon (past last level)
//! ```
//!
//! `restart_level` reloads the current level from `Active` or `GameOver`.

use log::info;

use crate::board::Board;
use crate::enemy::{tick_enemies, EnemyReport};
use crate::gravity::{tick_gravity, GravityReport};
use crate::loader::LevelSet;
use crate::player::{self, MoveOutcome};
use crate::snapshot::BoardSnapshot;
use crate::types::{Direction, GameAction, SessionState, TileKind};

/// Why a run ended in `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefeatCause {
    PlayerDied,
    /// Every remaining orb was destroyed, so the level can no longer be won.
    OrbsLost,
}

/// Outbound notifications, queued until drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LevelStarted { index: usize },
    LevelComplete { index: usize },
    GameOver { index: usize, cause: DefeatCause },
    GameWon,
}

impl SessionEvent {
    /// Deliver this event to the matching observer hook.
    pub fn notify(self, observer: &mut dyn SessionObserver) {
        match self {
            SessionEvent::LevelStarted { index } => observer.on_level_started(index),
            SessionEvent::LevelComplete { index } => observer.on_level_complete(index),
            SessionEvent::GameOver { index, cause } => observer.on_game_over(index, cause),
            SessionEvent::GameWon => observer.on_game_won(),
        }
    }
}

/// Receiver for session notifications. Every hook defaults to a no-op.
pub trait SessionObserver {
    fn on_level_started(&mut self, _index: usize) {}
    fn on_level_complete(&mut self, _index: usize) {}
    fn on_game_over(&mut self, _index: usize, _cause: DefeatCause) {}
    fn on_game_won(&mut self) {}
}

/// What one scheduler tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub gravity: GravityReport,
    pub enemies: EnemyReport,
}

pub struct LevelSession {
    levels: LevelSet,
    index: usize,
    board: Board,
    state: SessionState,
    events: Vec<SessionEvent>,
    /// Ticks run on the current level.
    ticks: u64,
}

impl LevelSession {
    pub fn new(levels: LevelSet) -> Self {
        let board = levels.first().instantiate();
        Self {
            levels,
            index: 0,
            board,
            state: SessionState::Loading,
            events: Vec::new(),
            ticks: 0,
        }
    }

    /// Enter the first level.
    pub fn start(&mut self) -> bool {
        self.start_at(0)
    }

    /// Enter level `index` (clamped to the last level). Only valid while loading.
    pub fn start_at(&mut self, index: usize) -> bool {
        if self.state != SessionState::Loading {
            return false;
        }
        self.load(index.min(self.levels.len() - 1));
        true
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn level_index(&self) -> usize {
        self.index
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn level_name(&self) -> &str {
        self.levels.get(self.index).map_or("", |l| l.name())
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<TileKind> {
        self.board.get(row, col)
    }

    /// `(rows, cols)` of the working board.
    pub fn dimensions(&self) -> (usize, usize) {
        self.board.dimensions()
    }

    /// One scheduler step: gravity, then enemies.
    pub fn tick(&mut self) -> TickReport {
        if self.state != SessionState::Active {
            return TickReport::default();
        }
        self.ticks += 1;

        let gravity = tick_gravity(&mut self.board);
        let enemies = if self.board.signals().any() {
            EnemyReport::default()
        } else {
            tick_enemies(&mut self.board)
        };
        self.resolve_signals();
        TickReport { gravity, enemies }
    }

    pub fn try_move(&mut self, dir: Direction) -> MoveOutcome {
        if self.state != SessionState::Active {
            return MoveOutcome::Blocked;
        }
        let outcome = player::try_move(&mut self.board, dir);
        self.resolve_signals();
        outcome
    }

    /// Apply an input action. Returns whether anything changed.
    pub fn apply(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Move(dir) => self.try_move(dir).changed_board(),
            GameAction::Advance => self.advance_level(),
            GameAction::Restart => self.restart_level(),
        }
    }

    /// Move on from a cleared level. Past the last level the game is won.
    pub fn advance_level(&mut self) -> bool {
        if self.state != SessionState::Transitioning {
            return false;
        }
        let next = self.index + 1;
        if next >= self.levels.len() {
            info!("all {} levels cleared", self.levels.len());
            self.state = SessionState::GameWon;
            self.events.push(SessionEvent::GameWon);
        } else {
            self.load(next);
        }
        true
    }

    /// Reload the current level from its pristine copy.
    pub fn restart_level(&mut self) -> bool {
        if !matches!(self.state, SessionState::Active | SessionState::GameOver) {
            return false;
        }
        self.load(self.index);
        true
    }

    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drain pending events into `observer`, oldest first.
    pub fn dispatch(&mut self, observer: &mut dyn SessionObserver) {
        for event in self.take_events() {
            event.notify(observer);
        }
    }

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.fill_from(&self.board);
        out.level_index = self.index;
        out.level_count = self.levels.len();
        out.state = self.state;
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut snap = BoardSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    fn load(&mut self, index: usize) {
        let Some(level) = self.levels.get(index) else {
            return;
        };
        self.board = level.instantiate();
        self.index = index;
        self.ticks = 0;
        self.state = SessionState::Active;
        info!(
            "level {} ({}) started: {} orbs",
            index + 1,
            level.name(),
            self.board.remaining_orbs()
        );
        self.events.push(SessionEvent::LevelStarted { index });
    }

    fn resolve_signals(&mut self) {
        let signals = self.board.signals();
        // A death and a delivery in the same step count as a death.
        if signals.defeat() {
            let cause = if signals.player_died {
                DefeatCause::PlayerDied
            } else {
                DefeatCause::OrbsLost
            };
            info!("level {} lost: {:?}", self.index + 1, cause);
            self.state = SessionState::GameOver;
            self.events.push(SessionEvent::GameOver {
                index: self.index,
                cause,
            });
        } else if signals.level_complete {
            info!("level {} complete", self.index + 1);
            self.state = SessionState::Transitioning;
            self.events.push(SessionEvent::LevelComplete { index: self.index });
        }
    }
}
