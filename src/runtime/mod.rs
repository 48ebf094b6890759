use crate::artwork::ArtworkLocator;
use crate::metadata::MetadataExtractor;
use crate::process::{CommandSpec, SystemRunner};
use crate::render::Renderer;
use crate::tracker::NowPlayingTracker;

mod logging;
mod poll_loop;
mod settings;
mod startup;

pub use poll_loop::PollLoop;

/// Load settings, wire up the collaborators and poll until the process is killed.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, fallback) = settings::load_settings();
    logging::init(&settings.logging);
    if let Some(reason) = fallback {
        tracing::warn!(%reason, "using default settings");
    }

    let runner = SystemRunner::new(settings.commands.timeout());
    startup::resize_font(&runner, &settings.terminal);

    let tracker = NowPlayingTracker::new(
        &runner,
        CommandSpec::new(&settings.player.command).args(&settings.player.args),
    );
    let extractor = MetadataExtractor::new(
        &runner,
        CommandSpec::new(&settings.analyzer.command).args(&settings.analyzer.args),
    );
    let covers = ArtworkLocator::new(&settings.artwork);
    let image = settings
        .artwork
        .enabled
        .then(|| CommandSpec::new(&settings.artwork.command).args(&settings.artwork.args));
    let renderer = Renderer::new(std::io::stdout(), &runner, image);

    tracing::info!(
        player = %settings.player.command,
        analyzer = %settings.analyzer.command,
        interval_ms = settings.poll.interval_ms,
        "starting now-playing loop"
    );

    let mut poll = PollLoop::new(tracker, extractor, covers, renderer);
    poll.run(settings.poll.interval())
}
