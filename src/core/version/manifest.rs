// ─── Version Manifest ───
// The list of published versions and where their version JSONs live.

use serde::Deserialize;
use tracing::info;

use crate::core::cancel::CancellationSignal;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::transport::Transport;

use super::version_file::VersionJson;

pub const VERSION_MANIFEST_URL: &str =
    "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";

#[derive(Debug, Deserialize)]
pub struct VersionManifest {
    #[serde(default)]
    pub latest: Option<LatestVersions>,
    pub versions: Vec<VersionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatestVersions {
    pub release: String,
    pub snapshot: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub version_type: String,
    pub url: String,
    #[serde(default)]
    pub release_time: Option<String>,
    #[serde(default)]
    pub sha1: Option<String>,
}

impl VersionManifest {
    pub async fn fetch(
        transport: &dyn Transport,
        url: &str,
        cancel: &CancellationSignal,
    ) -> LauncherResult<Self> {
        info!("Fetching version manifest from {}", url);
        let response = transport.get(url, cancel).await?;
        if !response.is_success() {
            return Err(LauncherError::DownloadFailed {
                url: url.to_string(),
                status: response.status,
            });
        }
        let manifest: VersionManifest = serde_json::from_slice(&response.body)?;
        info!("Loaded {} versions from manifest", manifest.versions.len());
        Ok(manifest)
    }

    pub fn find_version(&self, id: &str) -> Option<&VersionEntry> {
        self.versions.iter().find(|v| v.id == id)
    }

    pub fn latest_release(&self) -> Option<&VersionEntry> {
        match &self.latest {
            Some(latest) => self.find_version(&latest.release),
            None => self.versions.iter().find(|v| v.version_type == "release"),
        }
    }
}

impl VersionEntry {
    pub async fn fetch_version(
        &self,
        transport: &dyn Transport,
        cancel: &CancellationSignal,
    ) -> LauncherResult<VersionJson> {
        VersionJson::fetch(transport, &self.url, cancel).await
    }
}
