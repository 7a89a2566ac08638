//! Command line options.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, ValueEnum};

use crate::core::KickPolicy;
use crate::store::DataDir;

/// Terminal Tetris with player profiles and a leaderboard.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tetris-arcade",
    version,
    about = "Terminal Tetris with password-gated player profiles, game history and a leaderboard.",
    long_about = "Log in (unknown names are registered on first use), play, and compare best \
        scores on the leaderboard.\n\n\
        CONTROLS:\n  Left/Right h/l a/d  Move      Up k w     Rotate     z   Rotate CCW\n  \
        Down j s            Soft drop Space      Hard drop  p   Pause\n  \
        b  Leaderboard   r  Restart   n  Change player   q / Ctrl-C  Quit"
)]
pub struct Args {
    /// Directory holding users.json, history.jsonl and tetris.log.
    #[arg(long, env = "TETRIS_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Seed for the piece sequence. Each new game in a run uses the next seed.
    #[arg(long, value_name = "N")]
    pub seed: Option<u32>,

    /// What to do when a rotation does not fit in place.
    #[arg(long, default_value = "shift", value_name = "POLICY")]
    pub kicks: Kicks,

    /// Number of players shown on the leaderboard.
    #[arg(long, default_value = "50", value_name = "N")]
    pub leaderboard_size: usize,

    /// Print the leaderboard to stdout and exit.
    #[arg(long)]
    pub print_leaderboard: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kicks {
    /// Try shifting the piece sideways by 1 then 2 columns.
    Shift,
    /// Reject the rotation.
    None,
}

impl From<Kicks> for KickPolicy {
    fn from(value: Kicks) -> Self {
        match value {
            Kicks::Shift => KickPolicy::Shift,
            Kicks::None => KickPolicy::None,
        }
    }
}

impl Args {
    pub fn data_dir(&self) -> DataDir {
        match &self.data_dir {
            Some(root) => DataDir::new(root),
            None => DataDir::platform_default(),
        }
    }

    pub fn kick_policy(&self) -> KickPolicy {
        self.kicks.into()
    }

    /// Seed for the first game: `--seed`, or derived from the clock.
    pub fn first_seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}
