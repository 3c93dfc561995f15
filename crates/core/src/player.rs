//! Player action resolver - steps, pushes, and walking into trouble.

use crate::board::Board;
use crate::explosion::explode;
use crate::types::{Direction, Pos, TileKind};

/// Result of a single move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing changed (wall, blocked push, edge of the board).
    Blocked,
    /// The player walked onto background or dug through soft sand.
    Stepped,
    /// The player shoved an object one cell ahead.
    Pushed,
    /// The player pushed an orb straight into the portal.
    OrbConsumed,
    /// The player walked into a mummy.
    Died,
}

impl MoveOutcome {
    pub fn changed_board(self) -> bool {
        !matches!(self, MoveOutcome::Blocked)
    }
}

/// Try to move the player one cell in `dir`.
pub fn try_move(board: &mut Board, dir: Direction) -> MoveOutcome {
    if board.signals().defeat() {
        return MoveOutcome::Blocked;
    }

    let player = board.player_pos();
    let Some(target) = board.neighbor(player, dir) else {
        return MoveOutcome::Blocked;
    };
    let Some(target_kind) = board.kind(target) else {
        return MoveOutcome::Blocked;
    };
    if !TileKind::Player.can_move_into(target_kind) {
        return MoveOutcome::Blocked;
    }

    match target_kind {
        TileKind::SoftSand | TileKind::Background => {
            board.relocate_player(target);
            MoveOutcome::Stepped
        }
        TileKind::Mummy => {
            explode(board, player);
            // The mummy is spent on contact, even in the row the blast spared.
            if board.kind(target) == Some(TileKind::Mummy) {
                board.enemies.tombstone_at(target);
                board.put(target, TileKind::Background, false);
            }
            MoveOutcome::Died
        }
        _ => push(board, target, dir),
    }
}

fn push(board: &mut Board, target: Pos, dir: Direction) -> MoveOutcome {
    let Some(obj) = board.cell(target).copied() else {
        return MoveOutcome::Blocked;
    };
    let Some(ahead) = board.neighbor(target, dir) else {
        return MoveOutcome::Blocked;
    };
    let Some(ahead_kind) = board.kind(ahead) else {
        return MoveOutcome::Blocked;
    };

    // Gravity owns an unsupported object this tick; the player cannot shove it sideways.
    let unsupported = obj.kind.can_fall()
        && board
            .neighbor(target, Direction::Down)
            .and_then(|p| board.kind(p))
            .is_some_and(|below| obj.kind.can_move_into(below));

    if !obj.kind.can_move_into(ahead_kind) || obj.falling || unsupported {
        return MoveOutcome::Blocked;
    }

    let slot = board.falling.find(target);
    let outcome = if obj.kind == TileKind::Orb && ahead_kind == TileKind::Portal {
        if let Some(slot) = slot {
            board.falling.tombstone(slot);
        }
        board.orb_delivered();
        MoveOutcome::OrbConsumed
    } else {
        board.put(ahead, obj.kind, obj.falling);
        if let Some(slot) = slot {
            board.falling.retarget(slot, ahead);
        }
        MoveOutcome::Pushed
    };

    board.relocate_player(target);
    outcome
}
