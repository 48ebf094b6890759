use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Install the global `tracing` subscriber.
///
/// Stdout belongs to the display, so logs go to stderr or, when
/// `logging.file` is set, to that file. `RUST_LOG` overrides `logging.level`.
pub fn init(settings: &LoggingSettings) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = match settings.file.as_ref().map(|p| expand(p)) {
        Some(path) => match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).try_init(),
            Err(e) => {
                eprintln!(
                    "cmus-nowplaying: cannot open log file {}, logging to stderr: {e}",
                    path.display()
                );
                builder.with_writer(std::io::stderr).try_init()
            }
        },
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    if let Err(e) = result {
        eprintln!("cmus-nowplaying: logging disabled: {e}");
    }
}

fn expand(path: &std::path::Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
