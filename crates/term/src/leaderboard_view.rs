//! LeaderboardView: ranked standings table.

use crate::fb::{text_width, CellStyle, FrameBuffer, Rgb};
use crate::game_view::{Viewport, BORDER, LABEL, VALUE};
use crate::session::Standing;

const COL_RANK: u16 = 2;
const COL_NAME: u16 = 7;
const COL_SCORE: u16 = 41;
const COL_GAMES: u16 = 51;
const COL_DATE: u16 = 59;
const TABLE_W: u16 = 72;

/// Draws standings; the current player's row is highlighted.
#[derive(Debug, Default)]
pub struct LeaderboardView;

impl LeaderboardView {
    pub fn render_into(
        &self,
        standings: &[Standing],
        current_player: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let w = TABLE_W.min(viewport.width);
        let x = viewport.width.saturating_sub(w) / 2;
        let h = viewport.height;
        fb.draw_box(x, 0, w, h, BORDER);
        fb.put_str_centered(x, w, 1, "LEADERBOARD", LABEL);

        let header_y = 3;
        for (col, label) in [
            (COL_RANK, "#"),
            (COL_NAME, "PLAYER"),
            (COL_SCORE, "BEST"),
            (COL_GAMES, "GAMES"),
            (COL_DATE, "DATE"),
        ] {
            fb.put_str(x + col, header_y, label, LABEL);
        }

        // Rows between the header and the footer line.
        let first_row = header_y + 1;
        let last_row = h.saturating_sub(3);
        if standings.is_empty() {
            fb.put_str_centered(x, w, first_row + 1, "no games recorded yet", VALUE.dim());
        }

        let highlight = CellStyle::new(Rgb::new(255, 220, 120), Rgb::new(0, 0, 0)).bold();
        for (i, standing) in standings.iter().enumerate() {
            let y = first_row + i as u16;
            if y > last_row {
                break;
            }
            let style = if current_player == Some(standing.name()) {
                highlight
            } else {
                VALUE
            };
            fb.put_u32(x + COL_RANK, y, standing.rank as u32, style);
            put_clipped(fb, x + COL_NAME, y, standing.name(), COL_SCORE - COL_NAME - 1, style);
            fb.put_u32(x + COL_SCORE, y, standing.score(), style);
            fb.put_u32(x + COL_GAMES, y, standing.plays as u32, style);
            let date = standing.best.played_at.format("%Y-%m-%d").to_string();
            fb.put_str(x + COL_DATE, y, &date, style);
        }

        fb.put_str_centered(x, w, h.saturating_sub(2), "press any key to return", VALUE.dim());
    }

    pub fn render(&self, standings: &[Standing], current_player: Option<&str>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(standings, current_player, viewport, &mut fb);
        fb
    }
}

/// Write at most `max` chars, ending with '…' when cut.
fn put_clipped(fb: &mut FrameBuffer, x: u16, y: u16, s: &str, max: u16, style: CellStyle) {
    if text_width(s) <= max {
        fb.put_str(x, y, s, style);
        return;
    }
    for (i, ch) in s.chars().take(max.saturating_sub(1) as usize).enumerate() {
        fb.put_char(x + i as u16, y, ch, style);
    }
    fb.put_char(x + max - 1, y, '…', style);
}
