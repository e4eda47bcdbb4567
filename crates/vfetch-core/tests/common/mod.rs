//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod http_server;

use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use vfetch_core::downloader::{Download, DownloadError, DownloadOptions};

/// Downloader that fails the test if the network is ever touched.
pub struct Offline;

impl Download for Offline {
    fn download(
        &self,
        url: &str,
        _destination: &Path,
        _options: &DownloadOptions,
    ) -> Result<(), DownloadError> {
        panic!("network access attempted for {url}");
    }
}

/// In-memory log sink for asserting on emitted warnings.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Run `f` with a subscriber writing into this capture.
    pub fn run<T>(&self, f: impl FnOnce() -> T) -> T {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let f = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(f.path(), bytes).unwrap();
    vfetch_core::checksum::sha256_path(f.path()).unwrap()
}

/// Names of entries directly under `dir` (empty if `dir` is missing).
pub fn list_dir(dir: &Path) -> Vec<String> {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = rd
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
