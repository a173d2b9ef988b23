// ─── Library Entry ───
// A declared library: main artifact, per-OS native classifiers, rules and
// extraction exclusions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::LauncherResult;
use crate::core::maven::MavenCoordinate;
use crate::core::platform::PlatformDescriptor;

use super::rules::Rule;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Library {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<LibraryDownloads>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
    /// OS name → classifier key, e.g. `"windows": "natives-windows-${arch}"`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub natives: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract: Option<ExtractRules>,
    /// Maven repository base for coordinate-only libraries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryDownloads {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<DownloadArtifact>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub classifiers: BTreeMap<String, DownloadArtifact>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractRules {
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// An artifact with its libraries-relative path settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    /// `/`-separated path under the libraries directory.
    pub path: String,
    pub url: String,
    pub sha1: Option<String>,
    pub size: Option<u64>,
}

impl Library {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            downloads: None,
            rules: Vec::new(),
            natives: BTreeMap::new(),
            extract: None,
            url: None,
        }
    }

    /// The main (classpath) artifact, if this library has one.
    ///
    /// Libraries without a `downloads` block fall back to their Maven
    /// coordinate under `url` (or `default_repository`).
    pub fn main_artifact(&self, default_repository: &str) -> LauncherResult<Option<ResolvedArtifact>> {
        match &self.downloads {
            Some(downloads) => match &downloads.artifact {
                Some(artifact) => self.settle(artifact, None).map(Some),
                None => Ok(None),
            },
            None => {
                let coordinate = MavenCoordinate::parse(&self.name)?;
                Ok(Some(self.from_coordinate(&coordinate, default_repository)))
            }
        }
    }

    /// Classifier key for `platform`, with `${arch}` substituted.
    pub fn native_classifier(&self, platform: &PlatformDescriptor) -> Option<String> {
        self.natives
            .get(platform.os_name())
            .map(|key| key.replace("${arch}", platform.arch_bits()))
    }

    /// The native bundle for `platform`, if the library declares one.
    pub fn native_artifact(
        &self,
        platform: &PlatformDescriptor,
        default_repository: &str,
    ) -> LauncherResult<Option<ResolvedArtifact>> {
        let Some(classifier) = self.native_classifier(platform) else {
            return Ok(None);
        };

        match &self.downloads {
            Some(downloads) => match downloads.classifiers.get(&classifier) {
                Some(artifact) => self.settle(artifact, Some(&classifier)).map(Some),
                None => Ok(None),
            },
            None => {
                let coordinate = MavenCoordinate::parse(&self.name)?.with_classifier(&classifier);
                Ok(Some(self.from_coordinate(&coordinate, default_repository)))
            }
        }
    }

    pub fn extract_exclusions(&self) -> &[String] {
        self.extract
            .as_ref()
            .map(|rules| rules.exclude.as_slice())
            .unwrap_or(&[])
    }

    fn settle(
        &self,
        artifact: &DownloadArtifact,
        classifier: Option<&str>,
    ) -> LauncherResult<ResolvedArtifact> {
        let path = match &artifact.path {
            Some(path) => path.clone(),
            None => {
                let coordinate = MavenCoordinate::parse(&self.name)?;
                match classifier {
                    Some(c) => coordinate.with_classifier(c).relative_path(),
                    None => coordinate.relative_path(),
                }
            }
        };

        Ok(ResolvedArtifact {
            path,
            url: artifact.url.clone(),
            sha1: artifact.sha1.clone(),
            size: artifact.size,
        })
    }

    fn from_coordinate(&self, coordinate: &MavenCoordinate, default_repository: &str) -> ResolvedArtifact {
        let repository = self.url.as_deref().unwrap_or(default_repository);
        ResolvedArtifact {
            path: coordinate.relative_path(),
            url: coordinate.url(repository),
            sha1: None,
            size: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::{Arch, OsFamily};

    fn lwjgl_platform() -> Library {
        serde_json::from_value(serde_json::json!({
            "name": "org.lwjgl.lwjgl:lwjgl-platform:2.9.4",
            "downloads": {
                "classifiers": {
                    "natives-linux": {
                        "path": "org/lwjgl/lwjgl/lwjgl-platform/2.9.4/lwjgl-platform-2.9.4-natives-linux.jar",
                        "sha1": "931074f46c795d2f7b30ed6395df5715cfd7675b",
                        "size": 578680,
                        "url": "https://libraries.minecraft.net/org/lwjgl/lwjgl/lwjgl-platform/2.9.4/lwjgl-platform-2.9.4-natives-linux.jar"
                    },
                    "natives-windows-64": {
                        "sha1": "b84d5102b9dbfabfeb5e43c7e2828d98a7fc80e0",
                        "size": 613748,
                        "url": "https://libraries.minecraft.net/x.jar"
                    }
                }
            },
            "extract": {"exclude": ["META-INF/"]},
            "natives": {"linux": "natives-linux", "windows": "natives-windows-${arch}"}
        }))
        .unwrap()
    }

    #[test]
    fn natives_only_library_has_no_main_artifact() {
        let lib = lwjgl_platform();
        assert_eq!(lib.main_artifact("https://repo").unwrap(), None);
        assert_eq!(lib.extract_exclusions(), ["META-INF/".to_string()]);
    }

    #[test]
    fn native_classifier_substitutes_arch() {
        let lib = lwjgl_platform();
        let win = PlatformDescriptor::new(OsFamily::Windows, Arch::X64);
        assert_eq!(lib.native_classifier(&win).as_deref(), Some("natives-windows-64"));

        let native = lib.native_artifact(&win, "https://repo").unwrap().unwrap();
        // No explicit path: derived from the coordinate plus classifier.
        assert_eq!(
            native.path,
            "org/lwjgl/lwjgl/lwjgl-platform/2.9.4/lwjgl-platform-2.9.4-natives-windows-64.jar"
        );
        assert_eq!(native.size, Some(613748));

        let mac = PlatformDescriptor::new(OsFamily::MacOs, Arch::X64);
        assert_eq!(lib.native_artifact(&mac, "https://repo").unwrap(), None);
    }

    #[test]
    fn coordinate_only_library_uses_its_repository() {
        let mut lib = Library::new("net.fabricmc:sponge-mixin:0.15.3+mixin.0.8.7");
        lib.url = Some("https://maven.fabricmc.net/".into());
        let artifact = lib.main_artifact("https://libraries.minecraft.net").unwrap().unwrap();
        assert_eq!(
            artifact.url,
            "https://maven.fabricmc.net/net/fabricmc/sponge-mixin/0.15.3+mixin.0.8.7/sponge-mixin-0.15.3+mixin.0.8.7.jar"
        );
        assert_eq!(artifact.sha1, None);
    }

    #[test]
    fn malformed_coordinate_surfaces_error() {
        let lib = Library::new("not-a-coordinate");
        assert!(lib.main_artifact("https://repo").is_err());
    }
}
