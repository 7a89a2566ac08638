//! Login form: name, password and (for new players) confirmation.
//!
//! The form only collects input. Whether a name is registered is asked
//! through a callback, and the final check is done by
//! [`SessionManager::authenticate`](crate::session::SessionManager::authenticate);
//! a rejected attempt comes back through [`LoginForm::reject`].

use crossterm::event::KeyEvent;

use crate::input::{TextAction, TextField};
use crate::session::{validate_name, SessionError, MAX_NAME_LEN};
use crate::term::{LoginField, LoginPrompt};

const MAX_PASSWORD_LEN: usize = 64;

/// What the caller should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStep {
    /// Keep showing the form.
    Continue,
    /// Try to log in with these credentials.
    Submit { name: String, password: String },
    /// Esc on the name field.
    Cancel,
    /// Ctrl-C.
    Quit,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    field: LoginField,
    name: TextField,
    password: TextField,
    confirm: TextField,
    new_player: bool,
    error: Option<String>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            field: LoginField::Name,
            name: TextField::with_limit(MAX_NAME_LEN),
            password: TextField::with_limit(MAX_PASSWORD_LEN),
            confirm: TextField::with_limit(MAX_PASSWORD_LEN),
            new_player: false,
            error: None,
        }
    }

    pub fn field(&self) -> LoginField {
        self.field
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn prompt(&self) -> LoginPrompt<'_> {
        LoginPrompt {
            field: self.field,
            name: self.name.value(),
            password_len: self.password.len(),
            confirm_len: self.confirm.len(),
            new_player: self.new_player,
            error: self.error.as_deref(),
        }
    }

    /// Feed a key. `is_registered` is called when the name is submitted.
    pub fn handle_key<F>(&mut self, key: KeyEvent, is_registered: F) -> LoginStep
    where
        F: FnOnce(&str) -> Result<bool, SessionError>,
    {
        let field = match self.field {
            LoginField::Name => &mut self.name,
            LoginField::Password => &mut self.password,
            LoginField::Confirm => &mut self.confirm,
        };
        match field.handle_key(key) {
            TextAction::Edited => {
                self.error = None;
                LoginStep::Continue
            }
            TextAction::Ignored => LoginStep::Continue,
            TextAction::Quit => LoginStep::Quit,
            TextAction::Cancel => self.back(),
            TextAction::Submit => self.submit(is_registered),
        }
    }

    /// Show an authentication failure and ask for the password again.
    pub fn reject(&mut self, err: &SessionError) {
        self.password.clear();
        self.confirm.clear();
        self.error = Some(err.to_string());
        self.field = match err {
            SessionError::Auth(_) | SessionError::EmptyPassword => LoginField::Password,
            _ => LoginField::Name,
        };
    }

    fn back(&mut self) -> LoginStep {
        self.error = None;
        match self.field {
            LoginField::Name => LoginStep::Cancel,
            LoginField::Password | LoginField::Confirm => {
                self.password.clear();
                self.confirm.clear();
                self.field = LoginField::Name;
                LoginStep::Continue
            }
        }
    }

    fn submit<F>(&mut self, is_registered: F) -> LoginStep
    where
        F: FnOnce(&str) -> Result<bool, SessionError>,
    {
        match self.field {
            LoginField::Name => {
                let registered = validate_name(self.name.value()).and_then(is_registered);
                match registered {
                    Ok(registered) => {
                        self.new_player = !registered;
                        self.field = LoginField::Password;
                        self.error = None;
                    }
                    Err(err) => self.error = Some(err.to_string()),
                }
                LoginStep::Continue
            }
            LoginField::Password => {
                if self.password.is_empty() {
                    self.error = Some(SessionError::EmptyPassword.to_string());
                    return LoginStep::Continue;
                }
                if self.new_player {
                    self.field = LoginField::Confirm;
                    return LoginStep::Continue;
                }
                self.finish()
            }
            LoginField::Confirm => {
                if self.confirm.value() != self.password.value() {
                    self.password.clear();
                    self.confirm.clear();
                    self.field = LoginField::Password;
                    self.error = Some("passwords do not match".to_string());
                    return LoginStep::Continue;
                }
                self.finish()
            }
        }
    }

    fn finish(&mut self) -> LoginStep {
        self.confirm.clear();
        LoginStep::Submit {
            name: self.name.value().trim().to_string(),
            password: self.password.take(),
        }
    }
}
