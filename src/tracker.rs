//! Asks the player which file it has loaded.

use std::fs;
use std::path::PathBuf;

use crate::error::CycleError;
use crate::process::{CommandRunner, CommandSpec};

/// Playback state as reported on the player's `status` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerStatus {
    Playing,
    Paused,
    Stopped,
    Other(String),
}

impl PlayerStatus {
    fn parse(s: &str) -> Self {
        match s.trim() {
            "playing" => Self::Playing,
            "paused" => Self::Paused,
            "stopped" => Self::Stopped,
            other => Self::Other(other.to_string()),
        }
    }
}

/// The parts of a player status dump we care about.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerQuery {
    pub status: Option<PlayerStatus>,
    /// Raw path after `file `, before home expansion.
    pub file: Option<String>,
}

impl PlayerQuery {
    /// Scan the status dump line by line; the first `file ` and `status ` lines win.
    pub fn parse(stdout: &str) -> Self {
        let mut query = Self::default();
        for line in stdout.lines() {
            if query.file.is_none() {
                if let Some(path) = line.strip_prefix("file ") {
                    query.file = Some(path.trim_end_matches('\r').to_string());
                    continue;
                }
            }
            if query.status.is_none() {
                if let Some(status) = line.strip_prefix("status ") {
                    query.status = Some(PlayerStatus::parse(status));
                }
            }
        }
        query
    }
}

pub struct NowPlayingTracker<'a> {
    runner: &'a dyn CommandRunner,
    query: CommandSpec,
}

impl<'a> NowPlayingTracker<'a> {
    pub fn new(runner: &'a dyn CommandRunner, query: CommandSpec) -> Self {
        Self { runner, query }
    }

    /// Path of the loaded file with `~` expanded. Whether it exists is not checked.
    pub fn current_file(&self) -> Result<PathBuf, CycleError> {
        let out = match self.runner.capture(&self.query) {
            Ok(out) if out.success => out,
            Ok(out) => {
                tracing::debug!(reason = %out.failure_reason(), "player query failed");
                return Err(CycleError::PlayerUnavailable);
            }
            Err(e) => {
                tracing::debug!(error = %e, "player query could not run");
                return Err(CycleError::PlayerUnavailable);
            }
        };

        let query = PlayerQuery::parse(&out.stdout);
        tracing::trace!(status = ?query.status, "player status");

        let raw = query.file.ok_or(CycleError::NoTrackPlaying)?;
        Ok(expand_home(&raw))
    }
}

const PASSWD: &str = "/etc/passwd";

/// `~` and `~/...` go to the current user's home; `~name/...` to that user's
/// home from the password database. Unknown users are left as-is.
fn expand_home(raw: &str) -> PathBuf {
    let Some(rest) = raw.strip_prefix('~') else {
        return PathBuf::from(raw);
    };
    let (user, tail) = rest.split_once('/').unwrap_or((rest, ""));
    if user.is_empty() {
        return PathBuf::from(shellexpand::tilde(raw).into_owned());
    }

    let home = fs::read_to_string(PASSWD)
        .ok()
        .and_then(|db| home_in_passwd(&db, user));
    match home {
        Some(home) if tail.is_empty() => PathBuf::from(home),
        Some(home) => PathBuf::from(home).join(tail),
        None => {
            tracing::debug!(user, "no home directory for user");
            PathBuf::from(raw)
        }
    }
}

/// Home directory field (sixth) of `user`'s entry in passwd-format text.
fn home_in_passwd(db: &str, user: &str) -> Option<String> {
    db.lines()
        .map(|line| line.split(':').collect::<Vec<_>>())
        .find(|fields| fields.first() == Some(&user))
        .and_then(|fields| fields.get(5).map(|home| home.to_string()))
        .filter(|home| !home.is_empty())
}
