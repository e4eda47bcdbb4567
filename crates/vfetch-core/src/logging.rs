//! `tracing` subscriber setup.
//!
//! The CLI logs to `~/.local/state/vfetch/vfetch.log`; when that file cannot
//! be opened it falls back to [`init_logging_stderr`]. Filtering honours
//! `RUST_LOG` and otherwise uses [`DEFAULT_FILTER`].

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,vfetch=debug,vfetch_core=debug";

/// Log file shared by every event; each event holds the lock while it is
/// written, so lines from concurrent fetches never interleave.
#[derive(Clone)]
struct SharedLogFile(Arc<Mutex<File>>);

struct LockedLogFile<'a>(MutexGuard<'a, File>);

impl Write for LockedLogFile<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedLogFile {
    type Writer = LockedLogFile<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        // Poisoned only by a panic inside a write; keep logging.
        LockedLogFile(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn install<W>(writer: W) -> Result<()>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))
}

/// `~/.local/state/vfetch/vfetch.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("vfetch")?;
    Ok(dirs.get_state_home().join("vfetch.log"))
}

/// Open `path` for appending, creating missing parent directories.
fn open_append(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))
}

/// Log to the XDG state file. Returns the file's path.
///
/// Fails if the file cannot be opened or a global subscriber is already set;
/// the caller decides whether to fall back to stderr.
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    let file = open_append(&path)?;
    install(SharedLogFile(Arc::new(Mutex::new(file))))?;
    tracing::info!(path = %path.display(), "logging to file");
    Ok(path)
}

/// Log to stderr. Does nothing if a subscriber is already installed.
pub fn init_logging_stderr() {
    let _ = install(io::stderr);
}
