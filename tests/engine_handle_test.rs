//! The engine task behind the synchronous handle, and the async spawn API.

use std::path::Path;
use std::time::{Duration, Instant};

use crypt_raider::core::{BoardSnapshot, LevelSession, LevelSet, SessionEvent};
use crypt_raider::runtime::{spawn_engine, Command, EngineHandle, GameConfig};
use crypt_raider::types::{Direction, GameAction, SessionState, TileKind};

fn config() -> GameConfig {
    GameConfig {
        levels_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("levels"),
        // Long enough that the scheduler never fires during a test.
        tick_ms: 60_000,
        ..GameConfig::default()
    }
}

fn wait_for(engine: &mut EngineHandle, snap: &mut BoardSnapshot, done: impl Fn(&BoardSnapshot) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done(snap) {
        assert!(Instant::now() < deadline, "engine did not publish in time");
        if !engine.poll_snapshot(snap) {
            std::thread::sleep(Duration::from_millis(2));
        }
    }
}

#[test]
fn handle_applies_actions_and_publishes_snapshots() {
    let mut engine = EngineHandle::start(&config()).unwrap();
    let mut snap = engine.snapshot();
    assert_eq!(snap.state, SessionState::Active);
    assert_eq!(snap.tile(2, 2), Some(TileKind::Player));

    assert!(engine.apply(GameAction::Move(Direction::Right)));
    wait_for(&mut engine, &mut snap, |s| s.tile(2, 3) == Some(TileKind::Player));

    assert!(engine.send(Command::Restart));
    wait_for(&mut engine, &mut snap, |s| s.tile(2, 2) == Some(TileKind::Player));

    assert_eq!(engine.try_event(), Some(SessionEvent::LevelStarted { index: 0 }));
    engine.shutdown();
}

#[test]
fn handle_honors_the_start_level() {
    let config = GameConfig {
        start_level: 3,
        ..config()
    };
    let engine = EngineHandle::start(&config).unwrap();
    assert_eq!(engine.snapshot().level_index, 2);
    engine.shutdown();
}

#[test]
fn handle_reports_missing_levels() {
    let config = GameConfig {
        levels_dir: "/definitely/not/a/levels/dir".into(),
        ..config()
    };
    let err = EngineHandle::start(&config).err().unwrap();
    assert!(format!("{err:#}").contains("no level files"));
}

#[test]
fn spawned_engine_clears_a_level_on_a_test_runtime() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("levels");
    let mut session = LevelSession::new(LevelSet::load_dir(&dir, 18, 12).unwrap());
    session.start();

    tokio_test::block_on(async move {
        let mut engine = spawn_engine(session, None);
        for _ in 0..5 {
            engine.commands.send(Command::Move(Direction::Right)).await.unwrap();
        }
        for _ in 0..8 {
            engine.commands.send(Command::Tick).await.unwrap();
        }

        let mut seen = Vec::new();
        while let Some(event) = engine.events.recv().await {
            seen.push(event);
            if event == (SessionEvent::LevelComplete { index: 0 }) {
                break;
            }
        }
        assert_eq!(
            seen,
            vec![
                SessionEvent::LevelStarted { index: 0 },
                SessionEvent::LevelComplete { index: 0 },
            ]
        );

        engine.commands.send(Command::Shutdown).await.unwrap();
        tokio_test::assert_ok!(engine.task.await);
    });
}
