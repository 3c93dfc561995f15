//! GameView: maps a `BoardSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::BoardSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{SessionState, TileKind};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const FLOOR: Rgb = Rgb::new(24, 20, 16);
const PANEL_WIDTH: u16 = 14;

/// Two-column glyph and colors for a tile.
fn appearance(kind: TileKind) -> (&'static str, CellStyle) {
    let on_floor = |r, g, b| CellStyle::new(Rgb::new(r, g, b), FLOOR);
    match kind {
        TileKind::HardWall => ("██", on_floor(120, 120, 130)),
        TileKind::Granite => ("▓▓", on_floor(150, 110, 80)),
        TileKind::SoftSand => ("░░", on_floor(190, 160, 100)),
        TileKind::Background => ("  ", on_floor(0, 0, 0)),
        TileKind::Bomb => ("<>", on_floor(230, 70, 60).bold()),
        TileKind::Orb => ("()", on_floor(90, 220, 240).bold()),
        TileKind::Rock => ("@@", on_floor(170, 170, 160)),
        TileKind::Portal => ("[]", on_floor(200, 100, 230).bold()),
        TileKind::Player => ("}{", on_floor(250, 230, 90).bold()),
        TileKind::Mummy => ("&&", on_floor(120, 210, 110).bold()),
    }
}

/// Lays the board out centered in the viewport with a status panel on the right.
pub struct GameView {
    /// Terminal columns per board cell.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares the cells in most terminal fonts.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &BoardSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let cols = u16::try_from(snap.width).unwrap_or(u16::MAX);
        let rows = u16::try_from(snap.height).unwrap_or(u16::MAX);
        let frame_w = cols.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = rows.saturating_add(2);

        let total_w = frame_w.saturating_add(PANEL_WIDTH + 2);
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        fb.outline(start_x, start_y, frame_w, frame_h, CellStyle::default());

        for (r, tiles) in snap.rows().enumerate() {
            let y = start_y + 1 + r as u16;
            for (c, &kind) in tiles.iter().enumerate() {
                let x = start_x + 1 + c as u16 * self.cell_w;
                self.draw_tile(fb, x, y, kind);
            }
        }

        self.draw_panel(fb, snap, start_x.saturating_add(frame_w + 2), start_y);

        if let Some(text) = overlay_text(snap.state) {
            let text_w = text.chars().count() as u16;
            let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
            fb.text(x, start_y.saturating_add(frame_h / 2), text, style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &BoardSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: TileKind) {
        let (glyph, style) = appearance(kind);
        for (dx, ch) in glyph.chars().cycle().take(self.cell_w as usize).enumerate() {
            fb.set(x.saturating_add(dx as u16), y, ch, style);
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &BoardSnapshot, x: u16, y: u16) {
        if x.saturating_add(PANEL_WIDTH) > fb.width() {
            return;
        }
        let label = CellStyle::default().bold();
        let value = CellStyle::default();

        fb.text(x, y, "LEVEL", label);
        fb.text(
            x,
            y + 1,
            &format!("{}/{}", snap.level_index + 1, snap.level_count),
            value,
        );
        fb.text(x, y + 3, "ORBS", label);
        fb.text(x, y + 4, &snap.remaining_orbs.to_string(), value);
        fb.text(x, y + 6, "STATE", label);
        fb.text(x, y + 7, snap.state.as_str(), value);
    }
}

fn overlay_text(state: SessionState) -> Option<&'static str> {
    match state {
        SessionState::Loading => Some("LOADING"),
        SessionState::Active => None,
        SessionState::Transitioning => Some("LEVEL CLEAR - press SPACE"),
        SessionState::GameOver => Some("GAME OVER - press R"),
        SessionState::GameWon => Some("YOU WIN"),
    }
}
