//! Level session driven through the shipped levels.

use std::path::Path;

use crypt_raider::core::{DefeatCause, LevelSession, LevelSet, MoveOutcome, SessionEvent};
use crypt_raider::types::{Direction, GameAction, SessionState, TileKind};

fn shipped() -> LevelSession {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("levels");
    LevelSession::new(LevelSet::load_dir(&dir, 18, 12).unwrap())
}

#[test]
fn first_level_can_be_cleared() {
    let mut session = shipped();
    session.start();
    assert_eq!(session.cell(2, 2), Some(TileKind::Player));

    for _ in 0..3 {
        assert_eq!(session.try_move(Direction::Right), MoveOutcome::Stepped);
    }
    assert_eq!(session.try_move(Direction::Right), MoveOutcome::Pushed);
    assert_eq!(session.try_move(Direction::Right), MoveOutcome::Pushed);
    assert_eq!(session.cell(2, 8), Some(TileKind::Orb));

    // The orb drops down the open shaft into the portal.
    let mut ticks = 0;
    while session.state() == SessionState::Active && ticks < 20 {
        session.tick();
        ticks += 1;
    }
    assert_eq!(session.state(), SessionState::Transitioning);
    assert_eq!(ticks, 8);
    assert_eq!(session.board().remaining_orbs(), 0);

    assert!(session.apply(GameAction::Advance));
    assert_eq!(session.level_index(), 1);
    assert_eq!(session.state(), SessionState::Active);
}

#[test]
fn idle_ticks_leave_resting_objects_alone() {
    let mut session = shipped();
    session.start();
    let before = session.board().to_rows();
    for _ in 0..5 {
        session.tick();
    }
    assert_eq!(session.board().to_rows(), before);
    assert_eq!(session.ticks(), 5);
}

#[test]
fn mummy_on_level_two_hunts_an_idle_player() {
    let mut session = shipped();
    session.start_at(1);
    assert_eq!(session.board().enemy_set().live_len(), 1);

    let mut ticks = 0;
    while session.state() == SessionState::Active && ticks < 200 {
        session.tick();
        ticks += 1;
    }
    // Either the mummy reaches the player or it gets stuck; it never wanders off.
    if session.state() == SessionState::GameOver {
        let events = session.take_events();
        assert!(events.contains(&SessionEvent::GameOver {
            index: 1,
            cause: DefeatCause::PlayerDied
        }));
        assert!(session.restart_level());
        assert_eq!(session.state(), SessionState::Active);
    } else {
        assert_eq!(session.state(), SessionState::Active);
    }
}

#[test]
fn snapshot_mirrors_the_working_board() {
    let mut session = shipped();
    session.start();
    session.try_move(Direction::Right);

    let snap = session.snapshot();
    let (rows, cols) = session.dimensions();
    assert_eq!((snap.height, snap.width), (rows, cols));
    for r in 0..rows {
        for c in 0..cols {
            assert_eq!(snap.tile(r, c), session.cell(r, c));
        }
    }
    assert_eq!(snap.level_count, 3);
    assert_eq!(snap.player.map(|p| (p.row, p.col)), Some((2, 3)));
}
