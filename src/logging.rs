//! Tracing setup. The TUI owns the terminal, so it logs to a file under the
//! cache dir; one-shot mode logs to stderr.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE: &str = "bmi-tui.log";

/// Log file inside `cache_dir`
pub fn log_path_in(cache_dir: &Path) -> PathBuf {
    cache_dir.join("bmi-tui").join(LOG_FILE)
}

/// Open (append) the log file, creating its directory
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

pub fn init(tui: bool) {
    if !tui {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
        return;
    }

    // Nothing may reach the terminal while the TUI is up; no file, no logs
    let Some(cache_dir) = dirs::cache_dir() else {
        return;
    };
    if let Ok(file) = open_log_file(&log_path_in(&cache_dir)) {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(EnvFilter::from_default_env())
            .init();
    }
}
