// ─── Transport ───
// The byte-fetching seam. Resolvers receive a transport value instead of
// reaching for a process-wide client, so tests can swap in a double.

mod http;
#[cfg(test)]
pub mod memory;

use std::path::Path;

use async_trait::async_trait;

use crate::core::cancel::CancellationSignal;
use crate::core::error::LauncherResult;

pub use http::{build_http_client, HttpTransport};

/// Response of a buffered GET. Non-2xx statuses are data, not errors.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Result of streaming a body to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub status: u16,
    pub bytes_written: u64,
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url` into memory.
    ///
    /// `Err` means the request itself failed (DNS, connect, timeout) or was
    /// cancelled; an HTTP error status comes back as `Ok` with that status.
    async fn get(&self, url: &str, cancel: &CancellationSignal) -> LauncherResult<TransportResponse>;

    /// Stream `url` into `dest`, truncating it.
    ///
    /// On a non-2xx status nothing is written. After a cancelled or failed
    /// stream `dest` may hold a partial body; callers own cleanup.
    async fn download_to_file(
        &self,
        url: &str,
        dest: &Path,
        cancel: &CancellationSignal,
    ) -> LauncherResult<DownloadOutcome>;
}
