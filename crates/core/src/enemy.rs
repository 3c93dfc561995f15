//! Enemy pursuit resolver.

use crate::board::Board;
use crate::explosion::explode;
use crate::types::{Direction, TileKind};

/// Neighbor order when several moves are equally good; the first one wins.
pub const PURSUIT_ORDER: [Direction; 4] =
    [Direction::Down, Direction::Up, Direction::Right, Direction::Left];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnemyReport {
    pub moved: usize,
    pub stayed: usize,
    /// Enemies that reached the player and blew up.
    pub attacks: usize,
}

/// Advance every live enemy one greedy step toward the player.
pub fn tick_enemies(board: &mut Board) -> EnemyReport {
    let mut report = EnemyReport::default();

    for slot in 0..board.enemies.len() {
        if board.signals().defeat() {
            break;
        }
        let Some(pos) = board.enemies.get(slot) else {
            continue;
        };
        if board.kind(pos) != Some(TileKind::Mummy) {
            board.enemies.tombstone(slot);
            continue;
        }

        let player = board.player_pos();
        let mut best_dist = pos.dist_sq(player);
        let mut best = None;
        for next in board.neighbors(pos, &PURSUIT_ORDER) {
            let Some(kind) = board.kind(next) else {
                continue;
            };
            if !TileKind::Mummy.can_move_into(kind) {
                continue;
            }
            let dist = next.dist_sq(player);
            if dist < best_dist {
                best_dist = dist;
                best = Some((next, kind));
            }
        }

        match best {
            Some((_, TileKind::Player)) => {
                explode(board, pos);
                report.attacks += 1;
            }
            Some((next, _)) => {
                board.put(next, TileKind::Mummy, false);
                board.put(pos, TileKind::Background, false);
                board.enemies.retarget(slot, next);
                report.moved += 1;
            }
            None => report.stayed += 1,
        }
    }

    board.enemies.compact();
    report
}
