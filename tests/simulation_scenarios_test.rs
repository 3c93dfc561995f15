//! End-to-end resolver scenarios on small hand-built boards.

use crypt_raider::core::{explode, tick_enemies, tick_gravity, try_move, Board, MoveOutcome};
use crypt_raider::types::{Direction, Pos, TileKind};

#[test]
fn corner_mummy_steps_down_toward_a_centered_player() {
    let mut board = Board::from_rows(&[
        "M..", //
        ".U.", //
        "...", //
    ])
    .unwrap();
    let report = tick_enemies(&mut board);
    assert_eq!(report.moved, 1);
    // Down and right tie; down is checked first.
    assert_eq!(board.get(1, 0), Some(TileKind::Mummy));
    assert_eq!(board.get(0, 0), Some(TileKind::Background));
    assert_eq!(board.enemy_set().iter().collect::<Vec<_>>(), vec![Pos::new(1, 0)]);
}

#[test]
fn bomb_falls_and_detonates_on_granite() {
    let mut board = Board::from_rows(&[
        "B...", //
        "....", //
        "G...", //
        "...U", //
    ])
    .unwrap();

    let first = tick_gravity(&mut board);
    assert_eq!(first.moved, 1);
    assert_eq!(board.get(1, 0), Some(TileKind::Bomb));
    assert!(board.is_falling(Pos::new(1, 0)));

    let second = tick_gravity(&mut board);
    assert_eq!(second.explosions, 1);
    // The granite under the bomb is inside the blast.
    assert_eq!(board.get(2, 0), Some(TileKind::Background));
    assert_eq!(board.get(1, 0), Some(TileKind::Background));
    assert!(!board.signals().player_died);
    assert_eq!(board.falling_set().live_len(), 0);
}

#[test]
fn resting_bomb_on_granite_stays_put() {
    let mut board = Board::from_rows(&[
        "B..", //
        "G..", //
        "..U", //
    ])
    .unwrap();
    let report = tick_gravity(&mut board);
    assert_eq!(report.explosions, 0);
    assert_eq!(board.get(0, 0), Some(TileKind::Bomb));
}

#[test]
fn mummy_corners_the_player() {
    let mut board = Board::from_rows(&[
        "M..", //
        "...", //
        "..U", //
    ])
    .unwrap();

    tick_enemies(&mut board);
    assert_eq!(board.get(1, 0), Some(TileKind::Mummy));
    tick_enemies(&mut board);
    assert_eq!(board.get(1, 1), Some(TileKind::Mummy));
    // Down and right tie at distance 1; down is checked first.
    tick_enemies(&mut board);
    assert_eq!(board.get(2, 1), Some(TileKind::Mummy));

    let report = tick_enemies(&mut board);
    assert_eq!(report.attacks, 1);
    assert!(board.signals().player_died);
    assert_eq!(board.count(TileKind::Player), 0);
    assert_eq!(board.count(TileKind::Mummy), 0);
}

#[test]
fn chain_reaction_reaches_across_the_board() {
    let mut board = Board::from_rows(&[
        "B.B.B.B", //
        "GGGGGGG", //
        ".......", //
        "U......", //
    ])
    .unwrap();
    // Bombs two apart are not adjacent, so only the first block goes.
    let report = explode(&mut board, Pos::new(0, 0));
    assert_eq!(report.detonations, 1);
    assert_eq!(board.get(0, 2), Some(TileKind::Bomb));

    let mut board = Board::from_rows(&[
        "BBBBBBB", //
        "GGGGGGG", //
        ".......", //
        "U......", //
    ])
    .unwrap();
    let report = explode(&mut board, Pos::new(0, 0));
    assert_eq!(report.detonations, 7);
    assert_eq!(board.count(TileKind::Bomb), 0);
    assert_eq!(board.count(TileKind::Granite), 0);
    assert!(!board.signals().player_died);
}

#[test]
fn pushed_rock_then_falls_off_a_ledge() {
    let mut board = Board::from_rows(&[
        "UR..", //
        "GGG.", //
        "GGG.", //
    ])
    .unwrap();
    assert_eq!(try_move(&mut board, Direction::Right), MoveOutcome::Pushed);
    assert_eq!(board.get(0, 2), Some(TileKind::Rock));
    assert_eq!(try_move(&mut board, Direction::Right), MoveOutcome::Pushed);
    assert_eq!(board.get(0, 3), Some(TileKind::Rock));

    tick_gravity(&mut board);
    tick_gravity(&mut board);
    assert_eq!(board.get(2, 3), Some(TileKind::Rock));
    // Landing on the bottom edge is a rest, not an explosion.
    let report = tick_gravity(&mut board);
    assert_eq!(report.settled, 1);
    assert_eq!(board.count(TileKind::Rock), 1);
}

#[test]
fn falling_rock_kills_a_mummy_underneath() {
    let mut board = Board::from_rows(&[
        "R....", //
        ".....", //
        "MHHHH", //
        "HHHHU", //
    ])
    .unwrap();
    tick_gravity(&mut board);
    let report = tick_gravity(&mut board);
    assert_eq!(report.explosions, 1);
    assert_eq!(board.get(2, 0), Some(TileKind::Background));
    assert_eq!(board.enemy_set().live_len(), 0);
}
