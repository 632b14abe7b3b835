//! Byte sources the grid store reads its document from.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Where the raw grid document comes from.
pub trait GridSource: Send + Sync + 'static {
    /// Read the whole document.
    fn read(&self) -> impl Future<Output = io::Result<Vec<u8>>> + Send;

    /// Last modification stamp, if the source has one.
    /// Sources without a stamp are reloaded on every query.
    fn modified(&self) -> impl Future<Output = io::Result<Option<SystemTime>>> + Send {
        async { Ok(None) }
    }

    /// Short human-readable description used in log lines.
    fn describe(&self) -> String;
}

/// A JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GridSource for FileSource {
    async fn read(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }

    async fn modified(&self) -> io::Result<Option<SystemTime>> {
        let metadata = tokio::fs::metadata(&self.path).await?;
        metadata.modified().map(Some)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fixed in-memory bytes. Handy as a test double.
#[derive(Debug, Clone)]
pub struct MemorySource {
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into() }
    }
}

impl GridSource for MemorySource {
    async fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        format!("<memory, {} bytes>", self.bytes.len())
    }
}
