use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::launch::arguments::QuotingPolicy;
use crate::core::maven::MOJANG_LIBRARIES;
use crate::core::version::VERSION_MANIFEST_URL;

const APP_DIR_NAME: &str = "LaunchCore";
pub const RESOURCES_BASE_URL: &str = "https://resources.download.minecraft.net";

/// Launcher-wide settings, stored as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    pub data_dir: PathBuf,
    pub resources_base_url: String,
    pub libraries_base_url: String,
    pub version_manifest_url: String,
    /// `None` uses the host's logical parallelism.
    pub max_concurrent_downloads: Option<usize>,
    pub user_agent: String,
    pub connect_timeout_secs: Option<u64>,
    pub launcher_name: String,
    pub launcher_version: String,
    pub quoting: QuotingPolicy,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            resources_base_url: RESOURCES_BASE_URL.to_string(),
            libraries_base_url: MOJANG_LIBRARIES.to_string(),
            version_manifest_url: VERSION_MANIFEST_URL.to_string(),
            max_concurrent_downloads: None,
            user_agent: format!("LaunchCore/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout_secs: Some(30),
            launcher_name: "launch-core".to_string(),
            launcher_version: env!("CARGO_PKG_VERSION").to_string(),
            quoting: QuotingPolicy::default(),
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

impl LauncherConfig {
    /// A config rooted at `data_dir`, everything else default.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Reads `path`, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> LauncherResult<Self> {
        match std::fs::read(path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(source) => Err(LauncherError::io(path, source)),
        }
    }

    pub fn save(&self, path: &Path) -> LauncherResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| LauncherError::io(parent, source))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| LauncherError::io(path, source))
    }

    pub fn concurrency(&self) -> usize {
        self.max_concurrent_downloads
            .filter(|n| *n > 0)
            .unwrap_or_else(host_parallelism)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    // ── Layout ──────────────────────────────────────────

    pub fn libraries_dir(&self) -> PathBuf {
        self.data_dir.join("libraries")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.data_dir.join("assets")
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.assets_dir().join("objects")
    }

    pub fn indexes_dir(&self) -> PathBuf {
        self.assets_dir().join("indexes")
    }

    pub fn log_configs_dir(&self) -> PathBuf {
        self.assets_dir().join("log_configs")
    }

    pub fn versions_dir(&self) -> PathBuf {
        self.data_dir.join("versions")
    }

    pub fn version_dir(&self, version_id: &str) -> PathBuf {
        self.versions_dir().join(version_id)
    }

    pub fn natives_dir(&self, version_id: &str) -> PathBuf {
        self.version_dir(version_id).join("natives")
    }

    pub fn runtimes_dir(&self) -> PathBuf {
        self.data_dir.join("runtimes")
    }

    pub fn ensure_dirs(&self) -> LauncherResult<()> {
        for dir in [
            self.libraries_dir(),
            self.objects_dir(),
            self.indexes_dir(),
            self.versions_dir(),
            self.runtimes_dir(),
        ] {
            std::fs::create_dir_all(&dir).map_err(|source| LauncherError::io(&dir, source))?;
        }
        Ok(())
    }
}

pub fn host_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
