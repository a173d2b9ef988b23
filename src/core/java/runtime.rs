// ─── Java Runtime Store ───
// Installs zip runtime archives under `runtimes/<component>-<major>/` and
// records each install in a `runtime.json` sidecar. Lookups only ever read
// sidecars; directory names carry no meaning.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::core::archive::{extract_zip, ExtractOptions};
use crate::core::cancel::CancellationSignal;
use crate::core::downloader::{ArtifactFetcher, DownloadEntry, HashAlgorithm};
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::platform::{OsFamily, PlatformDescriptor};
use crate::core::version::JavaVersionInfo;

const SIDECAR_FILE: &str = "runtime.json";
const RUNTIME_SCHEMA_VERSION: u32 = 1;
const STAGING_DIR: &str = ".staging";

/// A downloadable runtime archive for one `{component, major}` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeArchive {
    pub component: String,
    pub major_version: u32,
    pub url: String,
    pub hash: String,
    pub algorithm: HashAlgorithm,
    pub size: Option<u64>,
}

impl RuntimeArchive {
    pub fn for_requirement(requirement: &JavaVersionInfo, url: impl Into<String>, sha1: impl Into<String>) -> Self {
        Self {
            component: requirement.component.clone(),
            major_version: requirement.major_version,
            url: url.into(),
            hash: sha1.into(),
            algorithm: HashAlgorithm::Sha1,
            size: None,
        }
    }

    fn directory_name(&self) -> String {
        let component: String = self
            .component
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        format!("{}-{}", component, self.major_version)
    }
}

/// Sidecar written next to an extracted runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeDescriptor {
    pub schema_version: u32,
    pub component: String,
    pub major_version: u32,
    pub source_url: String,
    pub archive_hash: String,
    pub hash_algorithm: HashAlgorithm,
    /// Java executable, relative to the runtime root.
    pub java_bin_rel: String,
    pub installed_at: String,
    pub launcher_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledRuntime {
    pub root: PathBuf,
    pub descriptor: RuntimeDescriptor,
}

impl InstalledRuntime {
    pub fn java_executable(&self) -> PathBuf {
        self.root.join(&self.descriptor.java_bin_rel)
    }
}

pub struct RuntimeStore {
    fetcher: ArtifactFetcher,
    runtimes_dir: PathBuf,
    platform: PlatformDescriptor,
}

impl RuntimeStore {
    pub fn new(fetcher: ArtifactFetcher, runtimes_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            runtimes_dir: runtimes_dir.into(),
            platform: PlatformDescriptor::current().clone(),
        }
    }

    pub fn with_platform(mut self, platform: PlatformDescriptor) -> Self {
        self.platform = platform;
        self
    }

    /// Every runtime with a readable sidecar and an existing executable.
    pub async fn installed(&self) -> LauncherResult<Vec<InstalledRuntime>> {
        let mut entries = match tokio::fs::read_dir(&self.runtimes_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(LauncherError::io(&self.runtimes_dir, source)),
        };

        let mut runtimes = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| LauncherError::io(&self.runtimes_dir, source))?
        {
            let root = entry.path();
            if !root.is_dir() || entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }

            match read_descriptor(&root).await {
                Some(descriptor) => {
                    let runtime = InstalledRuntime { root, descriptor };
                    if runtime.java_executable().is_file() {
                        runtimes.push(runtime);
                    } else {
                        warn!("Runtime at {:?} is missing its executable", runtime.root);
                    }
                }
                None => debug!("Ignoring {:?}: no runtime descriptor", root),
            }
        }

        runtimes.sort_by(|a, b| a.root.cmp(&b.root));
        Ok(runtimes)
    }

    pub async fn find(&self, component: &str, major_version: u32) -> LauncherResult<Option<InstalledRuntime>> {
        let mut matches: Vec<InstalledRuntime> = self
            .installed()
            .await?
            .into_iter()
            .filter(|rt| rt.descriptor.component == component && rt.descriptor.major_version == major_version)
            .collect();
        matches.sort_by(|a, b| b.descriptor.installed_at.cmp(&a.descriptor.installed_at));
        Ok(matches.into_iter().next())
    }

    /// Reuse an installed runtime for the archive's component and major
    /// version, installing it otherwise.
    pub async fn ensure(&self, archive: &RuntimeArchive, cancel: &CancellationSignal) -> LauncherResult<InstalledRuntime> {
        if let Some(existing) = self.find(&archive.component, archive.major_version).await? {
            debug!("Using installed runtime at {:?}", existing.root);
            return Ok(existing);
        }
        self.install(archive, cancel).await
    }

    #[instrument(skip(self, cancel), fields(component = %archive.component, major = archive.major_version))]
    pub async fn install(&self, archive: &RuntimeArchive, cancel: &CancellationSignal) -> LauncherResult<InstalledRuntime> {
        let staging_id = Uuid::new_v4().to_string();
        let staging_root = self.runtimes_dir.join(STAGING_DIR);
        let archive_path = staging_root.join(format!("{staging_id}.zip"));
        let temp_root = staging_root.join(format!("{staging_id}_dir"));

        info!("Installing runtime {} from {}", archive.directory_name(), archive.url);

        let result = self.install_staged(archive, &archive_path, &temp_root, cancel).await;
        remove_file_quietly(&archive_path).await;
        if result.is_err() && temp_root.exists() {
            let _ = tokio::fs::remove_dir_all(&temp_root).await;
        }
        result
    }

    async fn install_staged(
        &self,
        archive: &RuntimeArchive,
        archive_path: &Path,
        temp_root: &Path,
        cancel: &CancellationSignal,
    ) -> LauncherResult<InstalledRuntime> {
        let entry = DownloadEntry::new(archive.url.clone(), archive_path)
            .with_hash(archive.algorithm, archive.hash.clone())
            .with_size(archive.size);
        self.fetcher.ensure(&entry, cancel).await?;

        extract_zip(archive_path, temp_root, ExtractOptions::default(), cancel).await?;

        let java_bin = locate_java_executable(temp_root, self.platform.os).ok_or_else(|| {
            LauncherError::Extraction {
                archive: archive_path.to_path_buf(),
                reason: "no Java executable in runtime archive".into(),
            }
        })?;
        mark_executable(&java_bin).await?;

        let java_bin_rel = java_bin
            .strip_prefix(temp_root)
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .map_err(|_| LauncherError::Other(format!("Executable {:?} outside runtime root", java_bin)))?;

        let descriptor = RuntimeDescriptor {
            schema_version: RUNTIME_SCHEMA_VERSION,
            component: archive.component.clone(),
            major_version: archive.major_version,
            source_url: archive.url.clone(),
            archive_hash: archive.hash.to_ascii_lowercase(),
            hash_algorithm: archive.algorithm,
            java_bin_rel,
            installed_at: Utc::now().to_rfc3339(),
            launcher_version: env!("CARGO_PKG_VERSION").to_string(),
        };
        write_descriptor(temp_root, &descriptor).await?;

        let runtime_root = self.runtimes_dir.join(archive.directory_name());
        if runtime_root.exists() {
            tokio::fs::remove_dir_all(&runtime_root)
                .await
                .map_err(|source| LauncherError::io(&runtime_root, source))?;
        }
        tokio::fs::rename(temp_root, &runtime_root)
            .await
            .map_err(|source| LauncherError::io(&runtime_root, source))?;

        info!("Runtime installed at {:?}", runtime_root);
        Ok(InstalledRuntime {
            root: runtime_root,
            descriptor,
        })
    }
}

async fn read_descriptor(root: &Path) -> Option<RuntimeDescriptor> {
    let bytes = tokio::fs::read(root.join(SIDECAR_FILE)).await.ok()?;
    match serde_json::from_slice(&bytes) {
        Ok(descriptor) => Some(descriptor),
        Err(e) => {
            warn!("Unreadable runtime descriptor in {:?}: {}", root, e);
            None
        }
    }
}

async fn write_descriptor(root: &Path, descriptor: &RuntimeDescriptor) -> LauncherResult<()> {
    let path = root.join(SIDECAR_FILE);
    let payload = serde_json::to_vec_pretty(descriptor)?;
    tokio::fs::write(&path, payload)
        .await
        .map_err(|source| LauncherError::io(&path, source))
}

fn java_names(os: OsFamily) -> &'static [&'static str] {
    match os {
        OsFamily::Windows => &["javaw.exe", "java.exe"],
        _ => &["java"],
    }
}

fn java_in_home(home: &Path, os: OsFamily) -> Option<PathBuf> {
    for base in [home.to_path_buf(), home.join("Contents").join("Home")] {
        for name in java_names(os) {
            let candidate = base.join("bin").join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// `bin/java` at the root, a macOS bundle layout, or the same inside a
/// single top-level directory (`jdk-21.0.2+13/bin/java`).
pub fn locate_java_executable(root: &Path, os: OsFamily) -> Option<PathBuf> {
    if let Some(found) = java_in_home(root, os) {
        return Some(found);
    }

    let dirs: Vec<PathBuf> = std::fs::read_dir(root)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();

    match dirs.as_slice() {
        [single] => java_in_home(single, os),
        _ => None,
    }
}

async fn mark_executable(path: &Path) -> LauncherResult<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| LauncherError::io(path, source))?;
        let mut permissions = metadata.permissions();
        permissions.set_mode(permissions.mode() | 0o755);
        tokio::fs::set_permissions(path, permissions)
            .await
            .map_err(|source| LauncherError::io(path, source))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

async fn remove_file_quietly(path: &Path) {
    if path.exists() {
        let _ = tokio::fs::remove_file(path).await;
    }
}
