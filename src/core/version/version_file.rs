// ─── Version File ───
// Typed view of a version JSON: client download, libraries, asset index,
// arguments, Java requirement and logging configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::cancel::CancellationSignal;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::transport::Transport;

use super::arguments::{default_jvm_tokens, legacy_tokens, ArgumentToken, Arguments};
use super::library::Library;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionJson {
    pub id: String,
    #[serde(rename = "type", default)]
    pub version_type: Option<String>,
    pub main_class: String,
    #[serde(default)]
    pub assets: Option<String>,
    #[serde(default)]
    pub asset_index: Option<AssetIndexInfo>,
    #[serde(default)]
    pub downloads: BTreeMap<String, DownloadInfo>,
    #[serde(default)]
    pub libraries: Vec<Library>,
    #[serde(default)]
    pub arguments: Option<Arguments>,
    /// Legacy `minecraftArguments` field (pre-1.13).
    #[serde(default)]
    pub minecraft_arguments: Option<String>,
    #[serde(default)]
    pub java_version: Option<JavaVersionInfo>,
    #[serde(default)]
    pub logging: Option<LoggingInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadInfo {
    pub sha1: String,
    #[serde(default)]
    pub size: Option<u64>,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetIndexInfo {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub sha1: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub total_size: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaVersionInfo {
    #[serde(default = "default_java_component")]
    pub component: String,
    pub major_version: u32,
}

fn default_java_component() -> String {
    "jre-legacy".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingInfo {
    #[serde(default)]
    pub client: Option<ClientLogging>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientLogging {
    /// JVM argument template, e.g. `-Dlog4j.configurationFile=${path}`.
    pub argument: String,
    pub file: LoggingFile,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingFile {
    pub id: String,
    pub sha1: String,
    #[serde(default)]
    pub size: Option<u64>,
    pub url: String,
}

impl VersionJson {
    pub fn from_slice(bytes: &[u8]) -> LauncherResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Fetch and parse a version JSON through the transport.
    pub async fn fetch(
        transport: &dyn Transport,
        url: &str,
        cancel: &CancellationSignal,
    ) -> LauncherResult<Self> {
        let response = transport.get(url, cancel).await?;
        if !response.is_success() {
            return Err(LauncherError::DownloadFailed {
                url: url.to_string(),
                status: response.status,
            });
        }
        Self::from_slice(&response.body)
    }

    pub fn client_download(&self) -> Option<&DownloadInfo> {
        self.downloads.get("client")
    }

    /// Game argument tokens, falling back to the legacy argument string.
    pub fn game_tokens(&self) -> Vec<ArgumentToken> {
        match (&self.arguments, &self.minecraft_arguments) {
            (Some(args), _) if !args.game.is_empty() => args.game.clone(),
            (_, Some(legacy)) => legacy_tokens(legacy),
            _ => Vec::new(),
        }
    }

    /// JVM argument tokens; versions without `arguments.jvm` get the
    /// natives path and classpath switches every launcher has to pass.
    pub fn jvm_tokens(&self) -> Vec<ArgumentToken> {
        match &self.arguments {
            Some(args) if !args.jvm.is_empty() => args.jvm.clone(),
            _ => default_jvm_tokens(),
        }
    }

    pub fn asset_index_name(&self) -> String {
        self.asset_index
            .as_ref()
            .map(|info| info.id.clone())
            .or_else(|| self.assets.clone())
            .unwrap_or_else(|| "legacy".to_string())
    }

    pub fn required_java_major(&self) -> u32 {
        self.java_version
            .as_ref()
            .map(|j| j.major_version)
            .unwrap_or(8)
    }
}
