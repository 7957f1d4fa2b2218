//! Output numbering: suggested download filenames for generated catalogs.
//!
//! Two policies exist side by side: a monotonically increasing sequence number
//! (`Catalog_7.pdf`) or a UTC timestamp (`Catalog_20250101_120000.pdf`). The
//! sequence source is a `SequenceProvider` trait object carried in `AppState`.
//!
//! The file-backed provider holds its lock only across read → increment → write,
//! never across rendering.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("counter file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("counter file {path} holds an invalid value: {content:?}")]
    Corrupt { path: String, content: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Hands out unique, increasing numbers. Each call returns the pre-increment value.
#[async_trait]
pub trait SequenceProvider: Send + Sync {
    async fn next(&self) -> Result<u64, SequenceError>;
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory provider
// ────────────────────────────────────────────────────────────────────────────

pub struct InMemorySequence {
    next: AtomicU64,
}

impl InMemorySequence {
    pub fn new(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

#[async_trait]
impl SequenceProvider for InMemorySequence {
    async fn next(&self) -> Result<u64, SequenceError> {
        Ok(self.next.fetch_add(1, Ordering::SeqCst))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// File-backed provider
// ────────────────────────────────────────────────────────────────────────────

/// Persists the next number as decimal text in a single file.
/// A missing or empty file starts the sequence at `start`. Each update is written
/// to a sibling `.tmp` file and renamed over the counter.
pub struct FileSequence {
    path: PathBuf,
    start: u64,
    lock: Mutex<()>,
}

impl FileSequence {
    pub fn new(path: impl Into<PathBuf>, start: u64) -> Self {
        Self {
            path: path.into(),
            start,
            lock: Mutex::new(()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn corrupt(&self, content: impl Into<String>) -> SequenceError {
        SequenceError::Corrupt {
            path: self.path.display().to_string(),
            content: content.into(),
        }
    }

    async fn read_current(&self) -> Result<u64, SequenceError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(self.start),
            Err(e) => return Err(SequenceError::Io(e)),
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(self.start);
        }
        trimmed.parse::<u64>().map_err(|_| self.corrupt(trimmed))
    }
}

#[async_trait]
impl SequenceProvider for FileSequence {
    async fn next(&self) -> Result<u64, SequenceError> {
        let _guard = self.lock.lock().await;
        let current = self.read_current().await?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| self.corrupt(current.to_string()))?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, next.to_string()).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        debug!("Counter {} advanced to {next}", self.path.display());
        Ok(current)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Filename policy
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenamePolicy {
    Counter,
    Timestamp,
}

impl FromStr for FilenamePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "counter" => Ok(FilenamePolicy::Counter),
            "timestamp" => Ok(FilenamePolicy::Timestamp),
            other => Err(format!(
                "unknown filename policy '{other}' (expected 'counter' or 'timestamp')"
            )),
        }
    }
}

/// Builds the attachment filename. Only the counter policy touches `sequence`.
pub async fn suggest_filename(
    policy: FilenamePolicy,
    sequence: &dyn SequenceProvider,
) -> Result<String, SequenceError> {
    match policy {
        FilenamePolicy::Counter => Ok(counter_filename(sequence.next().await?)),
        FilenamePolicy::Timestamp => Ok(timestamp_filename(Utc::now())),
    }
}

fn counter_filename(number: u64) -> String {
    format!("Catalog_{number}.pdf")
}

fn timestamp_filename(at: DateTime<Utc>) -> String {
    format!("Catalog_{}.pdf", at.format("%Y%m%d_%H%M%S"))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;

    async fn drain_concurrently(provider: Arc<dyn SequenceProvider>, n: usize) -> Vec<u64> {
        let handles: Vec<_> = (0..n)
            .map(|_| {
                let provider = Arc::clone(&provider);
                tokio::spawn(async move { provider.next().await.unwrap() })
            })
            .collect();
        let mut values = Vec::with_capacity(n);
        for handle in handles {
            values.push(handle.await.unwrap());
        }
        values.sort_unstable();
        values
    }

    #[tokio::test]
    async fn test_in_memory_sequence_counts_up() {
        let seq = InMemorySequence::new(5);
        assert_eq!(seq.next().await.unwrap(), 5);
        assert_eq!(seq.next().await.unwrap(), 6);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_in_memory_sequence_concurrent_is_gapless() {
        let values = drain_concurrently(Arc::new(InMemorySequence::new(1)), 200).await;
        assert_eq!(values, (1..=200).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_file_sequence_initializes_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counter.txt");
        let seq = FileSequence::new(&path, 1);
        assert_eq!(seq.next().await.unwrap(), 1);
        assert_eq!(seq.next().await.unwrap(), 2);
        let stored = std::fs::read_to_string(&path).unwrap();
        assert_eq!(stored, "3");
    }

    #[tokio::test]
    async fn test_file_sequence_resumes_from_existing_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counter.txt");
        std::fs::write(&path, "41\n").unwrap();
        let seq = FileSequence::new(&path, 1);
        assert_eq!(seq.next().await.unwrap(), 41);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "42");
    }

    #[tokio::test]
    async fn test_file_sequence_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counter.txt");
        std::fs::write(&path, "seven").unwrap();
        let err = FileSequence::new(&path, 1).next().await.unwrap_err();
        assert!(matches!(err, SequenceError::Corrupt { .. }), "{err}");
    }

    #[tokio::test]
    async fn test_file_sequence_at_maximum_is_corrupt_and_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counter.txt");
        std::fs::write(&path, u64::MAX.to_string()).unwrap();
        let err = FileSequence::new(&path, 1).next().await.unwrap_err();
        assert!(matches!(err, SequenceError::Corrupt { .. }), "{err}");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), u64::MAX.to_string());
    }

    #[tokio::test]
    async fn test_file_sequence_replaces_counter_via_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counter.txt");
        std::fs::write(&path, "7").unwrap();
        let seq = FileSequence::new(&path, 1);
        // A temp file left behind by an interrupted update is overwritten.
        std::fs::write(seq.temp_path(), "").unwrap();

        assert_eq!(seq.next().await.unwrap(), 7);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "8");
        assert!(!seq.temp_path().exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_file_sequence_unwritable_location_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("counter.txt");
        let err = FileSequence::new(&path, 1).next().await.unwrap_err();
        assert!(matches!(err, SequenceError::Io(_)), "{err}");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_file_sequence_concurrent_is_linearizable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counter.txt");
        std::fs::write(&path, "10").unwrap();
        let values = drain_concurrently(Arc::new(FileSequence::new(&path, 1)), 64).await;
        assert_eq!(values, (10..74).collect::<Vec<u64>>());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "74");
    }

    #[test]
    fn test_filename_policy_parsing() {
        assert_eq!("counter".parse::<FilenamePolicy>(), Ok(FilenamePolicy::Counter));
        assert_eq!(" Timestamp ".parse::<FilenamePolicy>(), Ok(FilenamePolicy::Timestamp));
        assert!("uuid".parse::<FilenamePolicy>().is_err());
    }

    #[test]
    fn test_timestamp_filename_format() {
        let at = Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(timestamp_filename(at), "Catalog_20250309_140507.pdf");
    }

    #[tokio::test]
    async fn test_suggest_filename_counter_policy() {
        let seq = InMemorySequence::new(3);
        let name = suggest_filename(FilenamePolicy::Counter, &seq).await.unwrap();
        assert_eq!(name, "Catalog_3.pdf");
    }

    #[tokio::test]
    async fn test_suggest_filename_timestamp_does_not_consume_sequence() {
        let seq = InMemorySequence::new(3);
        let name = suggest_filename(FilenamePolicy::Timestamp, &seq).await.unwrap();
        assert!(name.starts_with("Catalog_2") && name.ends_with(".pdf"), "{name}");
        assert_eq!(seq.next().await.unwrap(), 3);
    }
}
