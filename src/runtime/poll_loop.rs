use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::artwork::ArtworkLocator;
use crate::error::CycleError;
use crate::metadata::{MetadataExtractor, MetadataRecord};
use crate::render::{Renderer, StatusLine, Tone};
use crate::tracker::NowPlayingTracker;

pub const WAITING_MESSAGE: &str = "Waiting for song to play...";

/// Where the currently loaded file comes from.
pub trait TrackSource {
    fn current_file(&self) -> Result<PathBuf, CycleError>;
}

pub trait MetadataSource {
    fn extract(&self, path: &Path) -> Result<MetadataRecord, CycleError>;
}

pub trait CoverSource {
    fn find_cover(&self, track: &Path) -> Option<PathBuf>;
}

/// The terminal as seen by the loop.
pub trait Screen {
    fn render(&mut self, record: &MetadataRecord, artwork: Option<&Path>) -> Result<(), CycleError>;
    fn show_status(&mut self, lines: &[StatusLine]) -> Result<(), CycleError>;
}

impl TrackSource for NowPlayingTracker<'_> {
    fn current_file(&self) -> Result<PathBuf, CycleError> {
        NowPlayingTracker::current_file(self)
    }
}

impl MetadataSource for MetadataExtractor<'_> {
    fn extract(&self, path: &Path) -> Result<MetadataRecord, CycleError> {
        MetadataExtractor::extract(self, path)
    }
}

impl CoverSource for ArtworkLocator {
    fn find_cover(&self, track: &Path) -> Option<PathBuf> {
        ArtworkLocator::find_cover(self, track)
    }
}

impl<W: std::io::Write> Screen for Renderer<'_, W> {
    fn render(&mut self, record: &MetadataRecord, artwork: Option<&Path>) -> Result<(), CycleError> {
        Renderer::render(self, record, artwork)
    }

    fn show_status(&mut self, lines: &[StatusLine]) -> Result<(), CycleError> {
        Renderer::show_status(self, lines)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Nothing to show: player not running, nothing loaded, or file missing.
    #[default]
    Idle,
    /// The last cycle ended in an error other than the idle ones.
    Error,
    /// `path` is the track currently on screen.
    Playing(PathBuf),
}

/// What a single cycle did.
#[derive(Debug)]
pub enum CycleOutcome {
    /// Extract, locate and render all ran.
    Rendered,
    /// Same track as before; nothing ran.
    Unchanged,
    /// A path was reported but there is no such file.
    Waiting,
    /// The cycle ended early and the error is on screen.
    Reported(CycleError),
}

/// State carried from one cycle to the next. Only [`PollLoop`] touches it.
#[derive(Debug, Default)]
pub struct LoopState {
    /// Track most recently sent through the pipeline, whether or not it rendered.
    pub last_rendered_path: Option<PathBuf>,
    pub phase: Phase,
    /// A status screen has overwritten the display since the last pipeline run.
    screen_replaced: bool,
}

/// Fixed-cadence driver: asks for the current file and redraws when it changes.
pub struct PollLoop<T, M, C, S> {
    tracker: T,
    extractor: M,
    covers: C,
    screen: S,
    state: LoopState,
}

impl<T, M, C, S> PollLoop<T, M, C, S>
where
    T: TrackSource,
    M: MetadataSource,
    C: CoverSource,
    S: Screen,
{
    pub fn new(tracker: T, extractor: M, covers: C, screen: S) -> Self {
        Self {
            tracker,
            extractor,
            covers,
            screen,
            state: LoopState::default(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &LoopState {
        &self.state
    }

    #[cfg(test)]
    pub fn screen(&self) -> &S {
        &self.screen
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.state.phase != phase {
            tracing::info!(from = ?self.state.phase, to = ?phase, "phase change");
            self.state.phase = phase;
        }
    }

    fn show(&mut self, lines: &[StatusLine]) -> Result<(), CycleError> {
        self.state.screen_replaced = true;
        self.screen.show_status(lines)
    }

    /// Put `err` on screen in place of whatever was there.
    fn report(&mut self, err: CycleError) -> Result<CycleOutcome, CycleError> {
        let lines = status_lines(&err);
        self.show(&lines)?;
        self.set_phase(if err.is_idle() { Phase::Idle } else { Phase::Error });
        Ok(CycleOutcome::Reported(err))
    }

    /// Run one poll cycle. Expected failures are handled here and come back as
    /// [`CycleOutcome::Reported`]; an `Err` means the cycle could not even
    /// report its own state.
    pub fn tick(&mut self) -> Result<CycleOutcome, CycleError> {
        let path = match self.tracker.current_file() {
            Ok(path) => path,
            Err(err) => return self.report(err),
        };

        if !path.is_file() {
            tracing::debug!(path = %path.display(), "reported track is not a file");
            self.show(&[StatusLine::new(WAITING_MESSAGE, Tone::Info)])?;
            self.set_phase(Phase::Idle);
            return Ok(CycleOutcome::Waiting);
        }

        let same_track = self.state.last_rendered_path.as_deref() == Some(path.as_path());
        if same_track && !self.state.screen_replaced {
            return Ok(CycleOutcome::Unchanged);
        }

        self.state.last_rendered_path = Some(path.clone());
        if same_track {
            tracing::debug!(path = %path.display(), "redrawing after status screen");
        } else {
            tracing::info!(path = %path.display(), "track changed");
        }

        let record = match self.extractor.extract(&path) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(error = %err, path = %path.display(), "metadata extraction failed");
                let outcome = self.report(err)?;
                // Not retried until the track changes.
                self.state.screen_replaced = false;
                return Ok(outcome);
            }
        };

        let artwork = self.covers.find_cover(&path);
        self.screen.render(&record, artwork.as_deref())?;
        self.state.screen_replaced = false;
        self.set_phase(Phase::Playing(path));
        Ok(CycleOutcome::Rendered)
    }

    /// Top-level handler for a cycle that returned `Err`: log everything, try
    /// to show it, carry on.
    pub fn recover(&mut self, err: CycleError) {
        tracing::error!(error = ?err, "poll cycle failed");
        if let Err(again) = self.show(&status_lines(&err)) {
            tracing::error!(error = ?again, "could not report poll cycle failure");
        }
        self.set_phase(Phase::Error);
    }

    /// Poll forever, sleeping `interval` between cycles.
    pub fn run(&mut self, interval: Duration) -> ! {
        loop {
            match self.tick() {
                Ok(CycleOutcome::Reported(err)) => {
                    tracing::debug!(error = %err, idle = err.is_idle(), "cycle reported")
                }
                Ok(outcome) => tracing::trace!(?outcome, "cycle done"),
                Err(err) => self.recover(err),
            }
            thread::sleep(interval);
        }
    }
}

/// Screen content for an error. "Nothing loaded" also shows the waiting line.
pub fn status_lines(err: &CycleError) -> Vec<StatusLine> {
    match err {
        CycleError::NoTrackPlaying => vec![
            StatusLine::new(err.to_string(), Tone::Warning),
            StatusLine::new(WAITING_MESSAGE, Tone::Info),
        ],
        CycleError::ArtworkMissing => vec![StatusLine::new(err.to_string(), Tone::Warning)],
        _ => vec![StatusLine::new(err.to_string(), Tone::Error)],
    }
}
