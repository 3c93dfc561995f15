//! Gravity resolver - advances every fall-capable object by one row per tick.

use crate::board::Board;
use crate::explosion::explode;
use crate::types::{Direction, TileKind};

/// Summary of one gravity pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GravityReport {
    /// Objects that dropped one row.
    pub moved: usize,
    /// Orbs that fell into the portal.
    pub delivered: usize,
    /// Objects that landed hard enough to explode.
    pub explosions: usize,
    /// Objects that came to rest this tick.
    pub settled: usize,
}

/// Run one gravity step over the falling set.
///
/// Slots are visited last-registered first. Objects are registered in
/// row-major order, so lower objects move before the ones stacked on them and a
/// column of rocks falls together.
pub fn tick_gravity(board: &mut Board) -> GravityReport {
    let mut report = GravityReport::default();

    for slot in (0..board.falling.len()).rev() {
        if board.signals().defeat() {
            break;
        }
        let Some(pos) = board.falling.get(slot) else {
            continue;
        };
        let Some(obj) = board.cell(pos).copied() else {
            board.falling.tombstone(slot);
            continue;
        };
        if !obj.kind.can_fall() {
            // Stale slot: the object left this cell without retargeting.
            board.falling.tombstone(slot);
            continue;
        }

        let below = board
            .neighbor(pos, Direction::Down)
            .and_then(|p| board.cell(p).copied());

        match below {
            Some(below) if obj.kind.can_move_into(below.kind) => {
                if below.kind == TileKind::Portal {
                    board.falling.tombstone(slot);
                    board.orb_delivered();
                    report.delivered += 1;
                } else {
                    board.put(below.pos, obj.kind, true);
                    board.falling.retarget(slot, below.pos);
                    report.moved += 1;
                }
                board.put(pos, TileKind::Background, false);
            }
            Some(below) if obj.falling && obj.kind.explodes_on(below.kind) => {
                // Tombstoned slots keep their index, so the loop needs no adjustment.
                explode(board, pos);
                report.explosions += 1;
            }
            _ => {
                if obj.falling {
                    board.set_falling(pos, false);
                    report.settled += 1;
                }
            }
        }
    }

    board.falling.compact();
    report
}
