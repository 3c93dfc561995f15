//! Explosion propagator.
//!
//! An explosion destroys every destructible cell in the 3x3 block around its
//! center. Bombs and mummies caught in the block (other than the center itself)
//! detonate in turn. The walk is depth-first: a chained detonation finishes its
//! own block before the parent block continues, the same order a recursive
//! implementation produces, but driven by an explicit frame stack.
//!
//! Hitting the player spares the rest of that row of the block, except the
//! block's own center. The rows below are still cleared.

use arrayvec::ArrayVec;
use log::debug;

use crate::board::Board;
use crate::types::{Pos, TileKind};

/// What a single call to [`explode`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExplosionReport {
    /// Cells turned to background (player included).
    pub destroyed: usize,
    /// Number of 3x3 blasts, the initial one included.
    pub detonations: usize,
    pub player_killed: bool,
    /// Orbs lost to the blast.
    pub orbs_destroyed: usize,
}

struct Frame {
    center: Pos,
    cells: ArrayVec<Pos, 9>,
    next: usize,
    /// Row cut short by the player; the center is never skipped.
    spared_row: Option<usize>,
}

impl Frame {
    fn new(board: &Board, center: Pos) -> Self {
        Self {
            center,
            cells: board.neighborhood(center),
            next: 0,
            spared_row: None,
        }
    }

    fn spares(&self, pos: Pos) -> bool {
        self.spared_row == Some(pos.row) && pos != self.center
    }
}

/// Detonate a 3x3 explosion centered on `center` and follow every chain.
pub fn explode(board: &mut Board, center: Pos) -> ExplosionReport {
    let mut report = ExplosionReport::default();
    let Some(center_idx) = board.index(center) else {
        return report;
    };

    let mut detonated = vec![false; board.width() * board.height()];
    detonated[center_idx] = true;
    report.detonations = 1;

    let mut stack = vec![Frame::new(board, center)];

    loop {
        let Some(frame) = stack.last_mut() else {
            break;
        };
        let frame_center = frame.center;
        let Some(pos) = frame.cells.get(frame.next).copied() else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        if frame.spares(pos) {
            continue;
        }

        let Some(cell) = board.cell(pos).copied() else {
            continue;
        };

        if cell.kind == TileKind::Player {
            board.put(pos, TileKind::Background, false);
            board.kill_player();
            report.player_killed = true;
            report.destroyed += 1;
            frame.spared_row = Some(pos.row);
            continue;
        }

        if !cell.kind.can_explode() {
            continue;
        }

        board.falling.tombstone_at(pos);
        board.enemies.tombstone_at(pos);
        if cell.kind == TileKind::Orb {
            board.orb_destroyed();
            report.orbs_destroyed += 1;
        }
        // Cleared before chaining so a detonator can never re-trigger itself.
        board.put(pos, TileKind::Background, false);
        report.destroyed += 1;

        if cell.kind.is_detonator() && pos != frame_center {
            if let Some(idx) = board.index(pos) {
                if !detonated[idx] {
                    detonated[idx] = true;
                    report.detonations += 1;
                    stack.push(Frame::new(board, pos));
                }
            }
        }
    }

    debug!(
        "explosion at ({}, {}): {} cells, {} detonations{}",
        center.row,
        center.col,
        report.destroyed,
        report.detonations,
        if report.player_killed { ", player killed" } else { "" }
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destroys_destructible_cells_in_the_block() {
        let mut board = Board::from_rows(&[
            "HHHHH", //
            "HGSRH", //
            "H.B.H", //
            "HPG.H", //
            "HHHHU", //
        ])
        .unwrap();

        let report = explode(&mut board, Pos::new(2, 2));
        assert_eq!(
            board.to_rows(),
            vec!["HHHHH", "H...H", "H...H", "HP..H", "HHHHU"]
        );
        // Granite, soft sand, rock, bomb (center), granite.
        assert_eq!(report.destroyed, 5);
        assert_eq!(report.detonations, 1);
        assert!(!report.player_killed);
    }

    #[test]
    fn bombs_chain_through_neighbors() {
        let mut board = Board::from_rows(&[
            "GGGGGGG", //
            "G.B.B.G", //
            "GGGGGGG", //
            "......U", //
        ])
        .unwrap();

        let report = explode(&mut board, Pos::new(1, 1));
        // The chained blast at (1,2) reaches col 3 only; the bomb at (1,4) survives.
        assert_eq!(report.detonations, 2);
        assert_eq!(board.get(1, 4), Some(TileKind::Bomb));
        assert_eq!(board.get(0, 3), Some(TileKind::Background));
        assert_eq!(board.get(0, 4), Some(TileKind::Granite));
    }

    #[test]
    fn mutual_neighbors_detonate_once_each() {
        let mut board = Board::from_rows(&[
            ".....", //
            ".BB..", //
            ".....", //
            "....U", //
        ])
        .unwrap();

        let report = explode(&mut board, Pos::new(1, 1));
        assert_eq!(report.detonations, 2);
        assert_eq!(board.count(TileKind::Bomb), 0);
        assert!(board.falling_set().iter().next().is_none());
    }

    #[test]
    fn mummies_are_detonators() {
        let mut board = Board::from_rows(&[
            "G.....", //
            ".M....", //
            "..M...", //
            "...G.U", //
        ])
        .unwrap();

        let report = explode(&mut board, Pos::new(1, 1));
        assert_eq!(report.detonations, 2);
        assert_eq!(board.get(0, 0), Some(TileKind::Background));
        assert_eq!(board.get(3, 3), Some(TileKind::Background));
        assert_eq!(board.enemy_set().live_len(), 0);
    }

    #[test]
    fn player_in_blast_dies_once() {
        let mut board = Board::from_rows(&[
            "B.B", //
            ".U.", //
            "...", //
        ])
        .unwrap();

        let report = explode(&mut board, Pos::new(0, 0));
        assert!(report.player_killed);
        assert!(board.signals().player_died);
        assert_eq!(board.get(1, 1), Some(TileKind::Background));
    }

    #[test]
    fn hard_walls_and_portals_survive() {
        let mut board = Board::from_rows(&[
            "HPH", //
            "HBH", //
            "HHH", //
            "..U", //
        ])
        .unwrap();
        explode(&mut board, Pos::new(1, 1));
        assert_eq!(board.to_rows(), vec!["HPH", "H.H", "HHH", "..U"]);
    }

    #[test]
    fn exploded_orbs_leave_the_count_without_winning() {
        let mut board = Board::from_rows(&[
            "O.O", //
            ".B.", //
            "...", //
            "..U", //
        ])
        .unwrap();
        assert_eq!(board.remaining_orbs(), 2);
        let report = explode(&mut board, Pos::new(1, 1));
        assert_eq!(report.orbs_destroyed, 2);
        assert_eq!(board.remaining_orbs(), 0);
        assert!(!board.signals().level_complete);
        assert!(board.signals().orbs_exhausted);
    }

    #[test]
    fn out_of_bounds_center_is_ignored() {
        let mut board = Board::from_rows(&["U.."]).unwrap();
        let report = explode(&mut board, Pos::new(5, 5));
        assert_eq!(report, ExplosionReport::default());
    }
}
