//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

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

/// Session details drawn around the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hud<'a> {
    pub player: &'a str,
    /// Extra line on the game-over panel, e.g. whether the score was saved.
    pub notice: Option<&'a str>,
}

impl<'a> Hud<'a> {
    pub fn new(player: &'a str) -> Self {
        Self {
            player,
            notice: None,
        }
    }

    pub fn with_notice(mut self, notice: &'a str) -> Self {
        self.notice = Some(notice);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

pub(crate) const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
pub(crate) const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
pub(crate) const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
pub(crate) const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

const HELP: [&str; 6] = [
    "←→ move   ↑ rotate",
    "↓ soft    z ccw",
    "space hard drop",
    "p pause   b board",
    "r restart n player",
    "q quit",
];

/// Draws the board, the active and ghost piece, the side panel and overlays.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Callers can reuse one framebuffer across frames.
    pub fn render_into(&self, snap: &GameSnapshot, hud: &Hud<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + SIDE_PANEL_W) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG);
        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        fb.draw_box(start_x, start_y, frame_w, frame_h, BORDER);

        // Locked cells.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                let id = snap.board[y as usize][x as usize];
                match PieceKind::from_color_id(id) {
                    Some(kind) => self.draw_board_cell(fb, start_x, start_y, x, y, kind),
                    None => self.draw_empty_cell(fb, start_x, start_y, x, y),
                }
            }
        }

        if let (Some(active), Some(ghost_row)) = (snap.active, snap.ghost_row) {
            if ghost_row != active.row {
                let ghost = CellStyle::new(Rgb::new(140, 140, 140), PLAY_BG).dim();
                let mut piece = active.piece();
                piece.row = ghost_row;
                for (col, row) in piece.cells() {
                    if let Some((x, y)) = on_board(col, row) {
                        self.fill_cell_rect(fb, start_x, start_y, x, y, '░', ghost);
                    }
                }
            }
        }

        if let Some(active) = snap.active {
            for (col, row) in active.piece().cells() {
                if let Some((x, y)) = on_board(col, row) {
                    self.draw_board_cell(fb, start_x, start_y, x, y, active.kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, hud, viewport, start_x + frame_w + 2, start_y);

        if snap.paused() {
            self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, &["PAUSED", "p to resume"]);
        } else if snap.game_over() {
            let mut score_line = [0u8; 24];
            let score = format_score(&mut score_line, snap.score);
            let lines = [
                "GAME OVER",
                score,
                hud.notice.unwrap_or(""),
                "r new game",
                "n change player",
            ];
            self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, &lines);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &Hud<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle::new(piece_color(kind), PLAY_BG).bold();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &Hud<'_>,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width {
            return;
        }

        let mut y = start_y;
        fb.put_str(panel_x, y, "PLAYER", LABEL);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, hud.player, VALUE);
        y = y.saturating_add(2);

        for (label, value) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, label, LABEL);
            y = y.saturating_add(1);
            fb.put_u32(panel_x, y, value, VALUE);
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "NEXT", LABEL);
        y = y.saturating_add(1);
        let style = CellStyle::new(piece_color(snap.next), Rgb::new(0, 0, 0)).bold();
        for (dx, dy) in get_shape(snap.next, Rotation::North) {
            let x = panel_x.saturating_add(dx as u16 * 2);
            let row = y.saturating_add(dy as u16);
            fb.put_str(x, row, "██", style);
        }
        y = y.saturating_add(3);

        let help = VALUE.dim();
        for line in HELP {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        let box_h = lines.len() as u16 + 2;
        let box_y = start_y.saturating_add(frame_h.saturating_sub(box_h) / 2);
        let plain = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0));

        fb.fill_rect(start_x + 1, box_y, frame_w - 2, box_h, ' ', plain);
        fb.draw_box(start_x, box_y, frame_w, box_h, BORDER);
        for (i, line) in lines.iter().enumerate() {
            let style = if i == 0 { plain.bold() } else { plain };
            fb.put_str_centered(start_x, frame_w, box_y + 1 + i as u16, line, style);
        }
    }
}

/// Width reserved to the right of the board for the side panel.
const SIDE_PANEL_W: u16 = 22;

fn on_board(col: i8, row: i8) -> Option<(u16, u16)> {
    let inside = (0..BOARD_WIDTH as i8).contains(&col) && (0..BOARD_HEIGHT as i8).contains(&row);
    inside.then(|| (col as u16, row as u16))
}

pub(crate) fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

/// "SCORE <n>" into a stack buffer.
fn format_score(buf: &mut [u8; 24], score: u32) -> &str {
    use std::io::Write;

    let mut cursor = std::io::Cursor::new(&mut buf[..]);
    let _ = write!(cursor, "SCORE {score}");
    let len = cursor.position() as usize;
    std::str::from_utf8(&buf[..len]).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActiveSnapshot, GameState};
    use crate::types::GameStatus;

    #[test]
    fn side_panel_shows_player_and_stats() {
        let mut snap = GameSnapshot::default();
        snap.score = 1234;
        snap.level = 3;
        let fb = GameView::default().render(&snap, &Hud::new("Ada"), Viewport::new(80, 24));

        assert!(fb.contains_text("PLAYER"));
        assert!(fb.contains_text("Ada"));
        assert!(fb.contains_text("1234"));
        assert!(fb.contains_text("NEXT"));
    }

    #[test]
    fn active_piece_and_ghost_are_drawn() {
        let mut snap = GameState::new(1).snapshot();
        snap.active = Some(ActiveSnapshot {
            kind: PieceKind::O,
            rotation: Rotation::North,
            col: 0,
            row: 0,
        });
        snap.ghost_row = Some(18);
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let fb = view.render(&snap, &Hud::new("Ada"), Viewport::new(80, 24));

        let start_x = (80 - (22 + SIDE_PANEL_W)) / 2;
        // O occupies columns 1..=2 at rows 0..=1.
        assert_eq!(fb.get(start_x + 1 + 2, 1).unwrap().ch, '█');
        assert_eq!(fb.get(start_x + 1 + 2, 1 + 18).unwrap().ch, '░');
        assert_eq!(fb.get(start_x + 1, 1).unwrap().ch, '·');
    }

    #[test]
    fn game_over_overlay_shows_notice() {
        let mut snap = GameSnapshot::default();
        snap.status = GameStatus::GameOver;
        snap.score = 900;
        let hud = Hud::new("Bo").with_notice("score saved");
        let fb = GameView::default().render(&snap, &hud, Viewport::new(80, 24));

        assert!(fb.contains_text("GAME OVER"));
        assert!(fb.contains_text("SCORE 900"));
        assert!(fb.contains_text("score saved"));
    }

    #[test]
    fn paused_overlay() {
        let mut snap = GameSnapshot::default();
        snap.status = GameStatus::Paused;
        let fb = GameView::default().render(&snap, &Hud::new("Ada"), Viewport::new(80, 24));
        assert!(fb.contains_text("PAUSED"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = GameSnapshot::default();
        let fb = GameView::default().render(&snap, &Hud::new("Ada"), Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
