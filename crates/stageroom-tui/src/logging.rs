//! Log output for the terminal client.
//!
//! The terminal owns stdout and stderr while the UI runs, so logs only go to
//! a file. Without `--log-file` no subscriber is installed. Lines are handed
//! to a background writer thread so the event loop never blocks on disk.

use std::{fs::OpenOptions, io, path::Path};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Returns `Ok(None)` when no file
/// was given and logging stays off. Otherwise the returned guard must live
/// until shutdown; dropping it flushes buffered lines.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init(level: &str, file: Option<&Path>) -> io::Result<Option<WorkerGuard>> {
    let Some(path) = file else {
        return Ok(None);
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let layer = fmt::layer().with_writer(writer).with_ansi(false).with_target(true);

    // A second init (tests) keeps the first subscriber
    if tracing_subscriber::registry().with(layer).with(filter).try_init().is_err() {
        tracing::debug!("subscriber already installed");
    }
    Ok(Some(guard))
}
