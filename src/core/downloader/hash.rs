use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::core::cancel::CancellationSignal;
use crate::core::error::{LauncherError, LauncherResult};

const HASH_BUFFER: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Sha1 => write!(f, "SHA-1"),
            HashAlgorithm::Sha256 => write!(f, "SHA-256"),
        }
    }
}

enum Hasher {
    Sha1(Sha1),
    Sha256(Sha256),
}

impl Hasher {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Sha1 => Hasher::Sha1(Sha1::new()),
            HashAlgorithm::Sha256 => Hasher::Sha256(Sha256::new()),
        }
    }

    fn update(&mut self, bytes: &[u8]) {
        match self {
            Hasher::Sha1(h) => h.update(bytes),
            Hasher::Sha256(h) => h.update(bytes),
        }
    }

    fn finish(self) -> String {
        match self {
            Hasher::Sha1(h) => hex::encode(h.finalize()),
            Hasher::Sha256(h) => hex::encode(h.finalize()),
        }
    }
}

/// Lowercase hex digest of an in-memory buffer.
pub fn hash_bytes(algorithm: HashAlgorithm, bytes: &[u8]) -> String {
    let mut hasher = Hasher::new(algorithm);
    hasher.update(bytes);
    hasher.finish()
}

/// Lowercase hex digest of a file, read in fixed-size buffers on the
/// blocking pool. Cancellation is checked before every buffer.
pub async fn hash_file(
    path: &Path,
    algorithm: HashAlgorithm,
    cancel: &CancellationSignal,
) -> LauncherResult<String> {
    let path: PathBuf = path.to_path_buf();
    let cancel = cancel.clone();

    tokio::task::spawn_blocking(move || -> LauncherResult<String> {
        let mut file =
            std::fs::File::open(&path).map_err(|source| LauncherError::io(&path, source))?;
        let mut hasher = Hasher::new(algorithm);
        let mut buffer = vec![0u8; HASH_BUFFER];

        loop {
            cancel.check()?;
            let read = file
                .read(&mut buffer)
                .map_err(|source| LauncherError::io(&path, source))?;
            if read == 0 {
                break;
            }
            hasher.update(&buffer[..read]);
        }

        Ok(hasher.finish())
    })
    .await
    .map_err(|e| LauncherError::Other(format!("Task join error: {e}")))?
}
