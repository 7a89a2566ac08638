//! LoginView: name and password prompt shown before each game.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{Viewport, BORDER, LABEL, VALUE};

/// Which line of the prompt has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Name,
    Password,
    /// Only asked for names that are not registered yet.
    Confirm,
}

/// Everything the login screen shows. Passwords are passed as lengths only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginPrompt<'a> {
    pub field: LoginField,
    pub name: &'a str,
    pub password_len: usize,
    pub confirm_len: usize,
    pub new_player: bool,
    pub error: Option<&'a str>,
}

impl<'a> LoginPrompt<'a> {
    pub fn name(name: &'a str) -> Self {
        Self {
            field: LoginField::Name,
            name,
            password_len: 0,
            confirm_len: 0,
            new_player: false,
            error: None,
        }
    }
}

const BOX_W: u16 = 44;
const BOX_H: u16 = 13;
const MASK: char = '*';

#[derive(Debug, Default)]
pub struct LoginView;

impl LoginView {
    pub fn render_into(&self, prompt: &LoginPrompt<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let w = BOX_W.min(viewport.width);
        let x = viewport.width.saturating_sub(w) / 2;
        let y = viewport.height.saturating_sub(BOX_H) / 2;
        fb.draw_box(x, y, w, BOX_H, BORDER);
        fb.put_str_centered(x, w, y + 1, "TETRIS", LABEL);

        let focus = CellStyle::new(Rgb::new(255, 220, 120), Rgb::new(0, 0, 0)).bold();
        let field_x = x + 14;
        let mut row = y + 3;

        let rows = [
            (LoginField::Name, "Name", None),
            (LoginField::Password, "Password", Some(prompt.password_len)),
            (LoginField::Confirm, "Confirm", Some(prompt.confirm_len)),
        ];
        for (field, label, masked) in rows {
            if field == LoginField::Confirm && !prompt.new_player {
                continue;
            }
            if field != LoginField::Name && prompt.field == LoginField::Name {
                continue;
            }
            let style = if prompt.field == field { focus } else { LABEL };
            fb.put_str(x + 2, row, label, style);
            let end = match masked {
                Some(len) => {
                    for i in 0..len.min(w.saturating_sub(17) as usize) {
                        fb.put_char(field_x + i as u16, row, MASK, VALUE);
                    }
                    field_x + len as u16
                }
                None => {
                    fb.put_str(field_x, row, prompt.name, VALUE);
                    field_x + prompt.name.chars().count() as u16
                }
            };
            if prompt.field == field {
                fb.put_char(end.min((x + w).saturating_sub(2)), row, '_', focus);
            }
            row += 2;
        }

        let hint = match prompt.field {
            LoginField::Name => "enter to continue, esc to quit",
            LoginField::Password if prompt.new_player => "new player: choose a password",
            LoginField::Password => "enter to log in, esc to go back",
            LoginField::Confirm => "type the password again",
        };
        fb.put_str_centered(x, w, y + BOX_H - 3, hint, VALUE.dim());

        if let Some(error) = prompt.error {
            let style = CellStyle::new(Rgb::new(230, 90, 90), Rgb::new(0, 0, 0)).bold();
            fb.put_str_centered(x, w, y + BOX_H - 2, error, style);
        }
    }

    pub fn render(&self, prompt: &LoginPrompt<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(prompt, viewport, &mut fb);
        fb
    }
}
