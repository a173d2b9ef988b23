// ─── Downloader ───
// Content verification and idempotent artifact fetching.

mod fetcher;
mod hash;

pub use fetcher::{ArtifactFetcher, DownloadEntry, FetchStatus};
pub use hash::{hash_bytes, hash_file, HashAlgorithm};
