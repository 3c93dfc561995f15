//! Engine actor.
//!
//! One tokio task owns the `LevelSession`. Scheduler ticks and player commands
//! both arrive through its `select!` loop, so they can never interleave inside
//! a single resolver pass. After each command or tick the task publishes a
//! fresh snapshot and forwards any session events.

use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::config::GameConfig;
use crate::core::{BoardSnapshot, LevelSession, SessionEvent};
use crate::types::{Direction, GameAction};

/// Bound on queued player commands.
pub const COMMAND_QUEUE: usize = 64;

/// Messages accepted by the engine task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Advance,
    Restart,
    /// Run one scheduler step now, outside the interval.
    Tick,
    Shutdown,
}

impl From<GameAction> for Command {
    fn from(action: GameAction) -> Self {
        match action {
            GameAction::Move(dir) => Command::Move(dir),
            GameAction::Advance => Command::Advance,
            GameAction::Restart => Command::Restart,
        }
    }
}

/// The caller's ends of a running engine task.
pub struct EngineChannels {
    pub commands: mpsc::Sender<Command>,
    pub snapshots: watch::Receiver<BoardSnapshot>,
    pub events: mpsc::UnboundedReceiver<SessionEvent>,
    pub task: JoinHandle<()>,
}

/// Spawn the engine on the current tokio runtime.
///
/// `session` should already be started. With `tick = None` the board only
/// advances on [`Command::Tick`].
pub fn spawn_engine(session: LevelSession, tick: Option<Duration>) -> EngineChannels {
    let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_QUEUE);
    let (snap_tx, snap_rx) = watch::channel(session.snapshot());
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let task = tokio::spawn(run_engine(session, tick, cmd_rx, snap_tx, event_tx));

    EngineChannels {
        commands: cmd_tx,
        snapshots: snap_rx,
        events: event_rx,
        task,
    }
}

pub async fn run_engine(
    mut session: LevelSession,
    tick: Option<Duration>,
    mut commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<BoardSnapshot>,
    events: mpsc::UnboundedSender<SessionEvent>,
) {
    let mut ticker = tick.map(|period| {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    });

    info!(
        "engine started on level {} of {}",
        session.level_index() + 1,
        session.level_count()
    );
    forward_events(&mut session, &events);

    loop {
        tokio::select! {
            _ = next_tick(&mut ticker) => {
                session.tick();
            }
            cmd = commands.recv() => {
                let Some(cmd) = cmd else { break };
                let applied = match cmd {
                    Command::Move(dir) => session.try_move(dir).changed_board(),
                    Command::Advance => session.advance_level(),
                    Command::Restart => session.restart_level(),
                    Command::Tick => {
                        session.tick();
                        true
                    }
                    Command::Shutdown => break,
                };
                if !applied {
                    debug!("{cmd:?} had no effect in state {}", session.state().as_str());
                }
            }
        }

        snapshots.send_if_modified(|snap| {
            let before = (snap.fingerprint(), snap.level_index, snap.state);
            session.snapshot_into(snap);
            before != (snap.fingerprint(), snap.level_index, snap.state)
        });
        forward_events(&mut session, &events);
    }

    info!("engine stopped after {} ticks on this level", session.ticks());
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

fn forward_events(session: &mut LevelSession, events: &mpsc::UnboundedSender<SessionEvent>) {
    for event in session.take_events() {
        // A dropped receiver only means nobody is listening any more.
        let _ = events.send(event);
    }
}

/// Runs the engine on its own runtime so a synchronous UI loop can drive it.
pub struct EngineHandle {
    rt: Runtime,
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<BoardSnapshot>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    task: JoinHandle<()>,
}

impl EngineHandle {
    /// Load the configured levels and start the engine.
    pub fn start(config: &GameConfig) -> Result<Self> {
        let levels = config
            .load_levels()
            .with_context(|| format!("loading levels from {}", config.levels_dir.display()))?;
        let mut session = LevelSession::new(levels);
        session.start_at(config.start_index());

        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let channels = {
            let _guard = rt.enter();
            spawn_engine(session, Some(config.tick_interval()))
        };

        Ok(Self {
            rt,
            commands: channels.commands,
            snapshots: channels.snapshots,
            events: channels.events,
            task: channels.task,
        })
    }

    /// Queue a command without blocking. Returns `false` if the queue is full or the engine stopped.
    pub fn send(&self, cmd: Command) -> bool {
        match self.commands.try_send(cmd) {
            Ok(()) => true,
            Err(err) => {
                warn!("dropping {cmd:?}: {err}");
                false
            }
        }
    }

    pub fn apply(&self, action: GameAction) -> bool {
        self.send(action.into())
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> BoardSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Copy the latest snapshot into `out` if it changed since the last call.
    pub fn poll_snapshot(&mut self, out: &mut BoardSnapshot) -> bool {
        if !self.snapshots.has_changed().unwrap_or(false) {
            return false;
        }
        out.clone_from(&self.snapshots.borrow_and_update());
        true
    }

    pub fn try_event(&mut self) -> Option<SessionEvent> {
        self.events.try_recv().ok()
    }

    /// Stop the engine task and wait for it to finish.
    pub fn shutdown(self) {
        let Self {
            rt, commands, task, ..
        } = self;
        if commands.try_send(Command::Shutdown).is_err() {
            debug!("command queue full at shutdown, closing it instead");
        }
        // A closed queue stops the engine even if the shutdown command was dropped.
        drop(commands);
        if let Err(err) = rt.block_on(task) {
            warn!("engine task ended abnormally: {err}");
        }
    }
}
