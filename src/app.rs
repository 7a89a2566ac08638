//! App: screen state machine driving login, play and the leaderboard.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::{info, warn};

use tetris_arcade::cli::Args;
use tetris_arcade::core::KickPolicy;
use tetris_arcade::input::{handle_key_event, should_quit, Command};
use tetris_arcade::login::{LoginForm, LoginStep};
use tetris_arcade::session::{RecordOutcome, Session, SessionManager, Standing};
use tetris_arcade::store::{CredentialStore, HistoryStore};
use tetris_arcade::term::{
    FrameBuffer, GameView, Hud, LeaderboardView, LoginView, TerminalRenderer,
};
use tetris_arcade::types::{InputEvent, FRAME_MS};

/// A game on screen, with the game-over notice once it has been recorded.
struct Playing {
    session: Session,
    notice: Option<String>,
    /// Paused by the app (leaderboard, player change) rather than the player.
    auto_paused: bool,
}

impl Playing {
    fn new(session: Session) -> Self {
        Self {
            session,
            notice: None,
            auto_paused: false,
        }
    }

    fn suspend(&mut self) {
        self.auto_paused = self.session.game_mut().apply(InputEvent::Pause);
    }

    fn unsuspend(&mut self) {
        if std::mem::take(&mut self.auto_paused) {
            self.session.game_mut().apply(InputEvent::Resume);
        }
    }
}

enum Screen {
    Login {
        form: LoginForm,
        /// Game to go back to if the login is cancelled.
        back: Option<Playing>,
    },
    Playing(Playing),
    Leaderboard {
        standings: Vec<Standing>,
        back: Playing,
    },
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App<C, H> {
    sessions: SessionManager<C, H>,
    kick_policy: KickPolicy,
    next_seed: u32,
    leaderboard_size: usize,
    screen: Screen,
    fb: FrameBuffer,
}

impl<C: CredentialStore, H: HistoryStore> App<C, H> {
    pub fn new(args: &Args, sessions: SessionManager<C, H>) -> Self {
        Self {
            sessions,
            kick_policy: args.kick_policy(),
            next_seed: args.first_seed(),
            leaderboard_size: args.leaderboard_size,
            screen: Screen::Login {
                form: LoginForm::new(),
                back: None,
            },
            fb: FrameBuffer::new(0, 0),
        }
    }

    pub fn run(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        let frame = Duration::from_millis(FRAME_MS as u64);
        let mut last_frame = Instant::now();

        loop {
            self.draw(term)?;

            let timeout = frame.saturating_sub(last_frame.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.on_key(key) == Flow::Quit {
                            break;
                        }
                    }
                    Event::Resize(..) => term.invalidate(),
                    _ => {}
                }
            }

            let elapsed = last_frame.elapsed();
            if elapsed >= frame {
                last_frame = Instant::now();
                self.on_frame(elapsed.as_millis().min(u32::MAX as u128) as u32);
            }
        }

        self.shutdown();
        Ok(())
    }

    fn draw(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        let viewport = term.viewport();
        match &self.screen {
            Screen::Login { form, .. } => {
                LoginView.render_into(&form.prompt(), viewport, &mut self.fb);
            }
            Screen::Playing(playing) => {
                let snap = playing.session.game().snapshot();
                let mut hud = Hud::new(playing.session.player());
                if let Some(notice) = playing.notice.as_deref() {
                    hud = hud.with_notice(notice);
                }
                GameView::default().render_into(&snap, &hud, viewport, &mut self.fb);
            }
            Screen::Leaderboard { standings, back } => {
                let player = Some(back.session.player());
                LeaderboardView.render_into(standings, player, viewport, &mut self.fb);
            }
            Screen::Closed => return Ok(()),
        }
        term.draw_swap(&mut self.fb)
    }

    fn on_frame(&mut self, elapsed_ms: u32) {
        let Screen::Playing(playing) = &mut self.screen else {
            return;
        };
        playing.session.game_mut().advance(elapsed_ms);
        if playing.session.game().game_over() && !playing.session.is_finished() {
            playing.notice = finish(&mut self.sessions, &mut playing.session);
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Flow {
        let (screen, flow) = match std::mem::replace(&mut self.screen, Screen::Closed) {
            Screen::Login { form, back } => self.on_login_key(form, back, key),
            Screen::Playing(playing) => self.on_game_key(playing, key),
            Screen::Leaderboard { back, .. } if should_quit(key) => {
                discard(&back);
                (Screen::Closed, Flow::Quit)
            }
            Screen::Leaderboard { mut back, .. } => {
                back.unsuspend();
                (Screen::Playing(back), Flow::Continue)
            }
            Screen::Closed => (Screen::Closed, Flow::Quit),
        };
        self.screen = screen;
        flow
    }

    fn on_login_key(
        &mut self,
        mut form: LoginForm,
        back: Option<Playing>,
        key: KeyEvent,
    ) -> (Screen, Flow) {
        let sessions = &self.sessions;
        match form.handle_key(key, |name| sessions.is_registered(name)) {
            LoginStep::Continue => (Screen::Login { form, back }, Flow::Continue),
            LoginStep::Quit => (Screen::Closed, Flow::Quit),
            LoginStep::Cancel => match back {
                Some(mut playing) => {
                    playing.unsuspend();
                    (Screen::Playing(playing), Flow::Continue)
                }
                None => (Screen::Closed, Flow::Quit),
            },
            LoginStep::Submit { name, password } => {
                match self.sessions.authenticate(&name, &password) {
                    Ok(outcome) => {
                        if let Some(previous) = back {
                            discard(&previous);
                        }
                        let session = self.start(outcome.player());
                        (Screen::Playing(Playing::new(session)), Flow::Continue)
                    }
                    Err(err) => {
                        form.reject(&err);
                        (Screen::Login { form, back }, Flow::Continue)
                    }
                }
            }
        }
    }

    fn on_game_key(&mut self, mut playing: Playing, key: KeyEvent) -> (Screen, Flow) {
        let Some(command) = handle_key_event(key) else {
            return (Screen::Playing(playing), Flow::Continue);
        };

        match command {
            Command::Quit => {
                discard(&playing);
                (Screen::Closed, Flow::Quit)
            }
            Command::Restart => {
                discard(&playing);
                let session = self.start(playing.session.player());
                (Screen::Playing(Playing::new(session)), Flow::Continue)
            }
            Command::ChangePlayer => {
                playing.suspend();
                let screen = Screen::Login {
                    form: LoginForm::new(),
                    back: Some(playing),
                };
                (screen, Flow::Continue)
            }
            Command::Game(InputEvent::ShowLeaderboard) => {
                playing.suspend();
                let standings = self.standings();
                (Screen::Leaderboard { standings, back: playing }, Flow::Continue)
            }
            Command::Game(event) => {
                let game = playing.session.game_mut();
                game.apply(event);
                if game.game_over() && !playing.session.is_finished() {
                    playing.notice = finish(&mut self.sessions, &mut playing.session);
                }
                (Screen::Playing(playing), Flow::Continue)
            }
        }
    }

    fn start(&mut self, player: &str) -> Session {
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        self.sessions.start(player, seed, self.kick_policy)
    }

    fn standings(&self) -> Vec<Standing> {
        match self.sessions.leaderboard().standings(self.leaderboard_size) {
            Ok(standings) => standings,
            Err(err) => {
                warn!(error = %err, "could not read history for the leaderboard");
                Vec::new()
            }
        }
    }

    fn shutdown(&mut self) {
        if self.sessions.pending_len() == 0 {
            return;
        }
        match self.sessions.flush_pending() {
            Ok(written) => info!(written, "flushed pending scores on exit"),
            Err(err) => warn!(
                error = %err,
                lost = self.sessions.pending_len(),
                "pending scores could not be saved"
            ),
        }
    }
}

/// Record a finished game and describe the outcome for the game-over panel.
fn finish<C: CredentialStore, H: HistoryStore>(
    sessions: &mut SessionManager<C, H>,
    session: &mut Session,
) -> Option<String> {
    let (_, outcome) = sessions.finish(session)?;
    Some(match outcome {
        RecordOutcome::Saved => "score saved".to_string(),
        RecordOutcome::Deferred { pending, .. } => format!("not saved yet ({pending} queued)"),
    })
}

/// Running games left through restart, quit or a player change are not recorded.
fn discard(playing: &Playing) {
    let session = &playing.session;
    if !session.is_finished() {
        info!(
            player = %session.player(),
            score = session.game().score(),
            "game discarded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use crossterm::event::{KeyCode, KeyModifiers};
    use tetris_arcade::store::{MemoryCredentialStore, MemoryHistoryStore};

    type TestApp = App<MemoryCredentialStore, MemoryHistoryStore>;

    fn app_on_leaderboard() -> TestApp {
        let args = Args::try_parse_from(["tetris-arcade", "--seed", "7"]).unwrap();
        let sessions = SessionManager::new(MemoryCredentialStore::new(), MemoryHistoryStore::new());
        let mut app = App::new(&args, sessions);
        let session = app.start("Ada");
        app.screen = Screen::Playing(Playing::new(session));
        assert_eq!(app.on_key(KeyEvent::from(KeyCode::Char('b'))), Flow::Continue);
        assert!(matches!(app.screen, Screen::Leaderboard { .. }));
        app
    }

    #[test]
    fn any_key_leaves_the_leaderboard_and_resumes() {
        let mut app = app_on_leaderboard();
        assert_eq!(app.on_key(KeyEvent::from(KeyCode::Enter)), Flow::Continue);
        let Screen::Playing(playing) = &app.screen else {
            panic!("expected the game screen");
        };
        assert!(!playing.session.game().paused());
    }

    #[test]
    fn quit_keys_work_on_the_leaderboard() {
        let mut app = app_on_leaderboard();
        assert_eq!(app.on_key(KeyEvent::from(KeyCode::Char('q'))), Flow::Quit);
        assert!(matches!(app.screen, Screen::Closed));

        let mut app = app_on_leaderboard();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.on_key(ctrl_c), Flow::Quit);
        assert!(app.sessions.history().is_empty());
    }
}
