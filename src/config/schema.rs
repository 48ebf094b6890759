use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/cmus-nowplaying/config.toml` or
/// `~/.config/cmus-nowplaying/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `NOWPLAYING__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub poll: PollSettings,
    pub commands: CommandSettings,
    pub player: PlayerSettings,
    pub analyzer: AnalyzerSettings,
    pub artwork: ArtworkSettings,
    pub terminal: TerminalSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    /// Delay between two poll cycles (milliseconds).
    pub interval_ms: u64,
}

impl PollSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self { interval_ms: 1000 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommandSettings {
    /// Upper bound for any single external command (milliseconds).
    /// Set to 0 to wait forever.
    pub timeout_ms: u64,
}

impl CommandSettings {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self { timeout_ms: 10_000 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Program queried for the player status.
    pub command: String,
    pub args: Vec<String>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            command: "cmus-remote".to_string(),
            args: vec!["-Q".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyzerSettings {
    /// Program that prints `Label : value` lines for a media file.
    /// The track path is appended after `args`.
    pub command: String,
    pub args: Vec<String>,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            command: "mediainfo".to_string(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtworkSettings {
    /// Whether to draw the cover image at all.
    pub enabled: bool,
    /// Terminal image renderer. The image path is appended after `args`.
    pub command: String,
    pub args: Vec<String>,
    /// File extensions treated as cover images (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// How to choose between several candidate images.
    pub selection: ArtworkSelection,
}

impl Default for ArtworkSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "chafa".to_string(),
            args: vec!["--align=center".to_string(), "--size=40x40".to_string()],
            extensions: vec!["png".into(), "jpg".into(), "jpeg".into()],
            selection: ArtworkSelection::FirstFound,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtworkSelection {
    /// First match in directory-listing order (filesystem defined).
    #[serde(alias = "first_found", alias = "first")]
    FirstFound,
    /// First match after sorting entries by file name.
    #[serde(alias = "sorted", alias = "name")]
    Lexical,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TerminalSettings {
    /// Run `font_command` once at startup.
    pub resize_font: bool,
    pub font_command: String,
    pub font_args: Vec<String>,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            resize_font: true,
            font_command: "kitty".to_string(),
            font_args: vec!["@".into(), "set-font-size".into(), "12".into()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}
