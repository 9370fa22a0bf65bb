// File-backed diagnostics, enabled via --debug.
// The TUI owns stdout/stderr, so tracing output goes to a log file.

use std::fs::File;
use std::io;
use std::sync::Mutex;

use tracing::Level;

const LOG_FILE_PATH: &str = "/tmp/netpong-debug.log";

/// Install a tracing subscriber writing to the log file. A no-op when
/// disabled: events are built but never recorded.
pub fn init(enabled: bool) -> io::Result<()> {
    if !enabled {
        return Ok(());
    }

    let file = File::create(LOG_FILE_PATH)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(Level::DEBUG)
        .init();

    tracing::info!(path = LOG_FILE_PATH, "debug logging enabled");
    Ok(())
}
