use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::cancel::CancellationSignal;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::transport::Transport;

use super::hash::{hash_file, HashAlgorithm};

/// One file that must exist locally with the given content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadEntry {
    pub url: String,
    pub dest: PathBuf,
    pub hash: Option<String>,
    pub size: Option<u64>,
    pub algorithm: HashAlgorithm,
}

impl DownloadEntry {
    pub fn new(url: impl Into<String>, dest: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            dest: dest.into(),
            hash: None,
            size: None,
            algorithm: HashAlgorithm::Sha1,
        }
    }

    pub fn with_sha1(mut self, sha1: Option<String>) -> Self {
        self.hash = sha1.filter(|h| !h.is_empty());
        self.algorithm = HashAlgorithm::Sha1;
        self
    }

    pub fn with_hash(mut self, algorithm: HashAlgorithm, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into()).filter(|h| !h.is_empty());
        self.algorithm = algorithm;
        self
    }

    pub fn with_size(mut self, size: Option<u64>) -> Self {
        self.size = size;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// The local file already satisfied every available check.
    Cached,
    Downloaded { bytes: u64 },
}

/// Makes one local file match its expected size and hash, touching the
/// network only when the cached copy is missing or invalid.
#[derive(Clone)]
pub struct ArtifactFetcher {
    transport: Arc<dyn Transport>,
}

impl ArtifactFetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Ensure `entry.dest` holds the expected content.
    ///
    /// A hash or size mismatch on the cached file triggers exactly one
    /// redownload; a mismatch after that is returned as an error. On every
    /// failure path the destination is removed.
    pub async fn ensure(
        &self,
        entry: &DownloadEntry,
        cancel: &CancellationSignal,
    ) -> LauncherResult<FetchStatus> {
        cancel.check()?;

        if self.cached_copy_is_valid(entry, cancel).await? {
            return Ok(FetchStatus::Cached);
        }

        if entry.url.is_empty() {
            return Err(LauncherError::Other(format!(
                "No download URL for {:?}",
                entry.dest
            )));
        }

        if let Some(parent) = entry.dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| LauncherError::io(parent, source))?;
        }

        match self.download_and_verify(entry, cancel).await {
            Ok(bytes) => Ok(FetchStatus::Downloaded { bytes }),
            Err(err) => {
                remove_if_present(&entry.dest).await;
                Err(err)
            }
        }
    }

    /// Checks the cached file, deleting it when a check fails.
    async fn cached_copy_is_valid(
        &self,
        entry: &DownloadEntry,
        cancel: &CancellationSignal,
    ) -> LauncherResult<bool> {
        let metadata = match tokio::fs::metadata(&entry.dest).await {
            Ok(metadata) if metadata.is_file() => metadata,
            _ => return Ok(false),
        };

        if let Some(expected) = entry.size {
            if metadata.len() != expected {
                debug!(
                    "Cached {:?} has size {} (expected {}), discarding",
                    entry.dest,
                    metadata.len(),
                    expected
                );
                remove_if_present(&entry.dest).await;
                return Ok(false);
            }
        }

        let Some(expected) = &entry.hash else {
            debug!("Trusting {:?} without hash verification", entry.dest);
            return Ok(true);
        };

        let actual = hash_file(&entry.dest, entry.algorithm, cancel).await?;
        if actual.eq_ignore_ascii_case(expected) {
            return Ok(true);
        }

        warn!(
            "Cached {:?} failed {} check (expected {}, got {}), redownloading",
            entry.dest, entry.algorithm, expected, actual
        );
        remove_if_present(&entry.dest).await;
        Ok(false)
    }

    async fn download_and_verify(
        &self,
        entry: &DownloadEntry,
        cancel: &CancellationSignal,
    ) -> LauncherResult<u64> {
        let outcome = self
            .transport
            .download_to_file(&entry.url, &entry.dest, cancel)
            .await?;

        if !outcome.is_success() {
            return Err(LauncherError::DownloadFailed {
                url: entry.url.clone(),
                status: outcome.status,
            });
        }

        if let Some(expected) = entry.size {
            let actual = tokio::fs::metadata(&entry.dest)
                .await
                .map_err(|source| LauncherError::io(&entry.dest, source))?
                .len();
            if actual != expected {
                return Err(LauncherError::SizeMismatch {
                    path: entry.dest.clone(),
                    expected,
                    actual,
                });
            }
        }

        if let Some(expected) = &entry.hash {
            let actual = hash_file(&entry.dest, entry.algorithm, cancel).await?;
            if !actual.eq_ignore_ascii_case(expected) {
                return Err(LauncherError::HashMismatch {
                    path: entry.dest.clone(),
                    algorithm: entry.algorithm,
                    expected: expected.clone(),
                    actual,
                });
            }
        }

        debug!("Fetched {} -> {:?}", entry.url, entry.dest);
        Ok(outcome.bytes_written)
    }
}

async fn remove_if_present(path: &Path) {
    if let Err(err) = tokio::fs::remove_file(path).await {
        if err.kind() != std::io::ErrorKind::NotFound {
            warn!("Could not remove {:?}: {}", path, err);
        }
    }
}
