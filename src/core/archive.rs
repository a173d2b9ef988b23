// ─── Archive Extraction ───
// Zip extraction for native bundles and runtime archives.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::cancel::CancellationSignal;
use crate::core::error::{LauncherError, LauncherResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Files written, each exactly once.
    pub written: usize,
    pub excluded: usize,
    pub directories: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Entry-name prefixes that are never written (e.g. `META-INF/`).
    pub exclusions: Vec<String>,
    /// Drop the first path component of every entry.
    pub strip_root: bool,
}

impl ExtractOptions {
    pub fn excluding(exclusions: &[String]) -> Self {
        Self {
            exclusions: exclusions.to_vec(),
            strip_root: false,
        }
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.exclusions
            .iter()
            .any(|prefix| !prefix.is_empty() && name.starts_with(prefix.as_str()))
    }
}

/// Extract `archive` into `dest` on the blocking pool.
///
/// Directory entries only create directories. Entries escaping `dest` are
/// skipped. Unix permission bits are preserved.
pub async fn extract_zip(
    archive: &Path,
    dest: &Path,
    options: ExtractOptions,
    cancel: &CancellationSignal,
) -> LauncherResult<ExtractionReport> {
    let archive = archive.to_path_buf();
    let dest = dest.to_path_buf();
    let cancel = cancel.clone();

    tokio::task::spawn_blocking(move || extract_zip_blocking(&archive, &dest, &options, &cancel))
        .await
        .map_err(|e| LauncherError::Other(format!("Task join error: {e}")))?
}

fn extract_zip_blocking(
    archive_path: &Path,
    dest: &Path,
    options: &ExtractOptions,
    cancel: &CancellationSignal,
) -> LauncherResult<ExtractionReport> {
    let file = std::fs::File::open(archive_path)
        .map_err(|source| LauncherError::io(archive_path, source))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| LauncherError::Extraction {
        archive: archive_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    std::fs::create_dir_all(dest).map_err(|source| LauncherError::io(dest, source))?;

    let mut report = ExtractionReport::default();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for index in 0..archive.len() {
        cancel.check()?;

        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();

        if options.is_excluded(&name) {
            report.excluded += 1;
            continue;
        }

        let Some(enclosed) = entry.enclosed_name() else {
            warn!("Skipping unsafe entry {:?} in {:?}", name, archive_path);
            continue;
        };
        let relative: PathBuf = if options.strip_root {
            enclosed.components().skip(1).collect()
        } else {
            enclosed
        };
        if relative.as_os_str().is_empty() {
            continue;
        }

        let out_path = dest.join(&relative);
        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)
                .map_err(|source| LauncherError::io(&out_path, source))?;
            report.directories += 1;
            continue;
        }

        if !seen.insert(relative) {
            debug!("Duplicate entry {:?} in {:?}, keeping first", name, archive_path);
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| LauncherError::io(parent, source))?;
        }

        {
            let mut out = std::fs::File::create(&out_path)
                .map_err(|source| LauncherError::io(&out_path, source))?;
            std::io::copy(&mut entry, &mut out)
                .map_err(|source| LauncherError::io(&out_path, source))?;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = entry.unix_mode().unwrap_or(0) & 0o7777;
            if mode != 0 {
                std::fs::set_permissions(&out_path, std::fs::Permissions::from_mode(mode))
                    .map_err(|source| LauncherError::io(&out_path, source))?;
            }
        }

        report.written += 1;
    }

    Ok(report)
}
