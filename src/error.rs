use std::path::PathBuf;

use thiserror::Error;

/// Everything that can end a single poll cycle early.
///
/// None of these are fatal: the loop prints the message in place of the
/// display and tries again on the next tick.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("cmus is not currently running")]
    PlayerUnavailable,
    #[error("No track currently playing")]
    NoTrackPlaying,
    #[error("File does not exist: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("mediainfo failed: {0}")]
    AnalysisFailure(String),
    #[error("Could not find album cover...")]
    ArtworkMissing,
    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

impl CycleError {
    /// Player-side conditions that simply mean "nothing to show yet".
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::PlayerUnavailable | Self::NoTrackPlaying)
    }
}

impl From<std::io::Error> for CycleError {
    fn from(e: std::io::Error) -> Self {
        Self::Unexpected(format!("{e:?}"))
    }
}
