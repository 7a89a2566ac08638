//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! A frame goes out as horizontal runs of cells. After a resize, a screen
//! switch or [`TerminalRenderer::invalidate`] every row is one run; otherwise
//! only the runs that differ from the frame on screen are sent.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Colors, Print, SetAttribute, SetColors},
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;

/// Cells `x..x + len` of row `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Frame currently on screen, if it can be diffed against.
    shown: Option<FrameBuffer>,
    runs: Vec<Run>,
    out: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            runs: Vec::new(),
            out: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(cursor::Hide)?;
        self.flush()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Current terminal size, falling back to 80x24.
    pub fn viewport(&self) -> Viewport {
        let (w, h) = terminal::size().unwrap_or((80, 24));
        Viewport::new(w, h)
    }

    /// Make the next draw repaint the whole screen.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Draw `fb` and keep it as the frame on screen.
    ///
    /// `fb` is swapped with the previously shown buffer, so on return it holds
    /// stale cells that the next `render_into` overwrites.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.runs.clear();
        self.out.clear();

        let diffable = self
            .shown
            .as_ref()
            .filter(|shown| shown.width() == fb.width() && shown.height() == fb.height());
        match diffable {
            Some(shown) => changed_runs(shown, fb, &mut self.runs),
            None => {
                self.out.queue(terminal::Clear(terminal::ClearType::All))?;
                row_runs(fb, &mut self.runs);
            }
        }

        if !self.out.is_empty() || !self.runs.is_empty() {
            encode_runs(fb, &self.runs, &mut self.out)?;
            self.flush()?;
        }

        let mut shown = self
            .shown
            .take()
            .unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        std::mem::swap(&mut shown, fb);
        self.shown = Some(shown);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

fn row_runs(fb: &FrameBuffer, runs: &mut Vec<Run>) {
    if fb.width() == 0 {
        return;
    }
    runs.extend((0..fb.height()).map(|y| Run {
        x: 0,
        y,
        len: fb.width(),
    }));
}

/// Maximal runs of cells that differ between two frames of the same size.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer, runs: &mut Vec<Run>) {
    let w = next.width() as usize;
    if w == 0 {
        return;
    }
    let rows = prev.cells().chunks(w).zip(next.cells().chunks(w));
    for (y, (old, new)) in rows.enumerate() {
        let mut x = 0;
        while x < w {
            if old[x] == new[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && old[x] != new[x] {
                x += 1;
            }
            runs.push(Run {
                x: start as u16,
                y: y as u16,
                len: (x - start) as u16,
            });
        }
    }
}

/// Queue the cells of `runs`, emitting style changes only between cells
/// that differ in style.
fn encode_runs(fb: &FrameBuffer, runs: &[Run], out: &mut Vec<u8>) -> io::Result<()> {
    let mut style = None;
    for run in runs {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        for x in run.x..run.x + run.len {
            let cell = fb.get(x, run.y).unwrap_or_default();
            if style != Some(cell.style) {
                queue_style(out, cell.style)?;
                style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// SGR reset clears colors too, so it has to come first.
fn queue_style(out: &mut Vec<u8>, style: CellStyle) -> io::Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetColors(Colors::new(color(style.fg), color(style.bg))))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs_between(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<Run> {
        let mut runs = Vec::new();
        changed_runs(prev, next, &mut runs);
        runs
    }

    #[test]
    fn identical_frames_have_no_runs() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_str(0, 0, "tet", CellStyle::default());
        assert!(runs_between(&fb, &fb.clone()).is_empty());
    }

    #[test]
    fn adjacent_changes_merge_into_one_run() {
        let prev = FrameBuffer::new(6, 2);
        let mut next = FrameBuffer::new(6, 2);
        next.put_str(1, 0, "XXX", CellStyle::default());
        next.put_char(5, 1, 'Y', CellStyle::default());

        assert_eq!(
            runs_between(&prev, &next),
            vec![Run { x: 1, y: 0, len: 3 }, Run { x: 5, y: 1, len: 1 }]
        );
    }

    #[test]
    fn style_only_change_is_a_run() {
        let prev = FrameBuffer::new(3, 1);
        let mut next = prev.clone();
        next.put_char(2, 0, ' ', CellStyle::default().bold());
        assert_eq!(runs_between(&prev, &next), vec![Run { x: 2, y: 0, len: 1 }]);
    }

    #[test]
    fn row_runs_cover_every_row() {
        let mut fb = FrameBuffer::new(2, 2);
        for (i, ch) in "ABCD".chars().enumerate() {
            fb.put_char(i as u16 % 2, i as u16 / 2, ch, CellStyle::default());
        }
        let mut runs = Vec::new();
        row_runs(&fb, &mut runs);
        assert_eq!(runs.len(), 2);

        let mut out = Vec::new();
        encode_runs(&fb, &runs, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("AB"));
        assert!(text.contains("CD"));
    }

    #[test]
    fn style_is_sent_once_per_change() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(0, 0, "ab", CellStyle::default());
        fb.put_str(2, 0, "cd", CellStyle::default().bold());
        let mut runs = Vec::new();
        row_runs(&fb, &mut runs);

        let mut out = Vec::new();
        encode_runs(&fb, &runs, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        // Two style switches plus the trailing reset.
        assert_eq!(text.matches("\x1b[0m").count(), 3);
        assert!(text.contains("ab"));
        assert!(text.contains("cd"));
    }
}
