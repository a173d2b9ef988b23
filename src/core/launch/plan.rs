// ─── Materializer ───
// One resolution pass: client jar, libraries and natives, assets, logging
// configuration, classpath and composed arguments.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::core::assets::{AssetReport, AssetResolver};
use crate::core::auth::PlayerIdentity;
use crate::core::cancel::CancellationSignal;
use crate::core::config::LauncherConfig;
use crate::core::downloader::{ArtifactFetcher, DownloadEntry};
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::libraries::{LibraryReport, LibraryResolveOptions, LibraryResolver};
use crate::core::platform::PlatformDescriptor;
use crate::core::progress::{ProgressCounter, ProgressSink, Stage};
use crate::core::transport::Transport;
use crate::core::version::rules::{
    FEATURE_CUSTOM_RESOLUTION, FEATURE_DEMO_USER, FEATURE_QUICK_PLAYS_SUPPORT,
    FEATURE_QUICK_PLAY_MULTIPLAYER, FEATURE_QUICK_PLAY_REALMS, FEATURE_QUICK_PLAY_SINGLEPLAYER,
};
use crate::core::version::{FeatureFlags, VersionJson};

use super::arguments::{substitute, ArgumentComposer, LaunchContext, QuickPlay};
use super::classpath::{classpath_entries, safe_path_str};

/// Caller-owned choices for one launch.
#[derive(Clone)]
pub struct LaunchSession {
    pub player: PlayerIdentity,
    pub game_directory: PathBuf,
    pub demo: bool,
    pub resolution: Option<(u32, u32)>,
    pub quick_play: Option<QuickPlay>,
    pub quick_play_path: Option<PathBuf>,
    /// Prepended to the composed JVM arguments (heap size and the like).
    pub extra_jvm_args: Vec<String>,
    /// Flags beyond the ones derived from the fields above.
    pub features: FeatureFlags,
    pub library_options: LibraryResolveOptions,
    pub progress: Option<ProgressSink>,
}

impl LaunchSession {
    pub fn new(player: PlayerIdentity, game_directory: impl Into<PathBuf>) -> Self {
        Self {
            player,
            game_directory: game_directory.into(),
            demo: false,
            resolution: None,
            quick_play: None,
            quick_play_path: None,
            extra_jvm_args: Vec::new(),
            features: FeatureFlags::default(),
            library_options: LibraryResolveOptions::default(),
            progress: None,
        }
    }

    pub fn with_progress(mut self, sink: ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    pub fn feature_flags(&self) -> FeatureFlags {
        let mut flags = self.features.clone();
        flags.set(FEATURE_DEMO_USER, self.demo);
        flags.set(FEATURE_CUSTOM_RESOLUTION, self.resolution.is_some());
        flags.set(FEATURE_QUICK_PLAYS_SUPPORT, self.quick_play_path.is_some());
        flags.set(
            FEATURE_QUICK_PLAY_SINGLEPLAYER,
            matches!(self.quick_play, Some(QuickPlay::Singleplayer(_))),
        );
        flags.set(
            FEATURE_QUICK_PLAY_MULTIPLAYER,
            matches!(self.quick_play, Some(QuickPlay::Multiplayer(_))),
        );
        flags.set(
            FEATURE_QUICK_PLAY_REALMS,
            matches!(self.quick_play, Some(QuickPlay::Realms(_))),
        );
        flags
    }
}

/// Everything a pass put on disk.
#[derive(Debug, Clone)]
pub struct ResolvedArtifactSet {
    pub client_jar: PathBuf,
    /// Ordered, deduplicated classpath: libraries, then the client jar.
    pub classpath_entries: Vec<PathBuf>,
    pub natives_dir: PathBuf,
    pub libraries: LibraryReport,
    pub assets: AssetReport,
    pub logging_config: Option<PathBuf>,
}

impl ResolvedArtifactSet {
    pub fn verified_assets(&self) -> usize {
        self.assets.verified
    }
}

#[derive(Debug, Clone)]
pub struct MaterializedInstance {
    pub artifacts: ResolvedArtifactSet,
    pub main_class: String,
    pub jvm_args: Vec<String>,
    pub game_args: Vec<String>,
    pub classpath: String,
}

impl MaterializedInstance {
    /// Arguments after the Java executable: JVM args, main class, game args.
    ///
    /// Values are quoted per [`LauncherConfig::quoting`]. Callers passing this
    /// vector straight to `Command::args` should use
    /// [`QuotingPolicy::Verbatim`](super::arguments::QuotingPolicy::Verbatim);
    /// the default wraps whitespace-bearing paths in quotes for shell
    /// command lines.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.jvm_args.len() + self.game_args.len() + 1);
        argv.extend(self.jvm_args.iter().cloned());
        argv.push(self.main_class.clone());
        argv.extend(self.game_args.iter().cloned());
        argv
    }
}

pub struct Materializer {
    config: LauncherConfig,
    fetcher: ArtifactFetcher,
    platform: PlatformDescriptor,
}

impl Materializer {
    pub fn new(config: LauncherConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            fetcher: ArtifactFetcher::new(transport),
            platform: PlatformDescriptor::current().clone(),
        }
    }

    pub fn with_platform(mut self, platform: PlatformDescriptor) -> Self {
        self.platform = platform;
        self
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &ArtifactFetcher {
        &self.fetcher
    }

    pub async fn materialize(
        &self,
        version: &VersionJson,
        session: &LaunchSession,
        cancel: &CancellationSignal,
    ) -> LauncherResult<MaterializedInstance> {
        cancel.check()?;
        self.config.ensure_dirs()?;
        info!("Materializing {} for {}", version.id, self.platform);

        let features = session.feature_flags();

        // 1. Client jar
        let client_jar = self.ensure_client(version, session, cancel).await?;

        // 2. Libraries and natives (the natives directory is rebuilt every pass)
        let natives_dir = self.config.natives_dir(&version.id);
        if natives_dir.exists() {
            tokio::fs::remove_dir_all(&natives_dir)
                .await
                .map_err(|source| LauncherError::io(&natives_dir, source))?;
        }

        let libraries = LibraryResolver::new(
            self.fetcher.clone(),
            self.config.libraries_dir(),
            self.platform.clone(),
        )
        .with_features(features.clone())
        .with_repository(self.config.libraries_base_url.clone())
        .with_options(session.library_options)
        .with_progress(session.progress.clone())
        .resolve(&version.libraries, &natives_dir, cancel)
        .await?;

        if !libraries.is_success() {
            error!(
                "{} of {} libraries failed for {}",
                libraries.failed_count(),
                version.libraries.len(),
                version.id
            );
            return Err(LauncherError::ResolutionFailed {
                stage: "library",
                failed: libraries.failed_count(),
                total: version.libraries.len(),
            });
        }

        // 3. Assets
        let assets = self.ensure_assets(version, session, cancel).await?;

        // 4. Logging configuration
        let logging = self.ensure_logging_config(version, cancel).await?;

        // 5. Classpath and arguments
        let entries = classpath_entries(&libraries.classpath, Some(&client_jar), &self.platform);
        let classpath = entries.join(self.platform.classpath_separator());

        let context = LaunchContext {
            player: session.player.clone(),
            version_name: version.id.clone(),
            version_type: version
                .version_type
                .clone()
                .unwrap_or_else(|| "release".to_string()),
            game_directory: session.game_directory.clone(),
            assets_root: self.config.assets_dir(),
            assets_index_name: version.asset_index_name(),
            natives_directory: natives_dir.clone(),
            libraries_directory: self.config.libraries_dir(),
            classpath: classpath.clone(),
            classpath_separator: self.platform.classpath_separator().to_string(),
            launcher_name: self.config.launcher_name.clone(),
            launcher_version: self.config.launcher_version.clone(),
            resolution: session.resolution,
            quick_play: session.quick_play.clone(),
            quick_play_path: session.quick_play_path.clone(),
            extra: HashMap::new(),
        };

        let composer = ArgumentComposer::new(self.platform.clone(), features)
            .with_quoting(self.config.quoting);

        let mut jvm_args = session.extra_jvm_args.clone();
        jvm_args.extend(composer.compose(&version.jvm_tokens(), &context));
        if let Some((_, argument)) = &logging {
            jvm_args.push(argument.clone());
        }
        let game_args = composer.compose(&version.game_tokens(), &context);

        info!(
            "{} ready: {} classpath entries, {} assets verified",
            version.id,
            entries.len(),
            assets.verified
        );

        Ok(MaterializedInstance {
            artifacts: ResolvedArtifactSet {
                client_jar,
                classpath_entries: entries.into_iter().map(PathBuf::from).collect(),
                natives_dir,
                libraries,
                assets,
                logging_config: logging.map(|(path, _)| path),
            },
            main_class: version.main_class.clone(),
            jvm_args,
            game_args,
            classpath,
        })
    }

    async fn ensure_client(
        &self,
        version: &VersionJson,
        session: &LaunchSession,
        cancel: &CancellationSignal,
    ) -> LauncherResult<PathBuf> {
        let download = version.client_download().ok_or_else(|| {
            LauncherError::MissingMandatoryArtifact(format!("client jar for {}", version.id))
        })?;

        let dest = self
            .config
            .version_dir(&version.id)
            .join(format!("{}.jar", version.id));
        let entry = DownloadEntry::new(download.url.clone(), dest.clone())
            .with_sha1(Some(download.sha1.clone()))
            .with_size(download.size);

        let counter = ProgressCounter::new(Stage::Client, 1, session.progress.clone());
        let result = self.fetcher.ensure(&entry, cancel).await;
        counter.record(&version.id, result.is_ok());
        if let Err(err) = result {
            if !err.is_cancelled() {
                error!("Client jar for {} could not be fetched: {}", version.id, err);
            }
            return Err(err);
        }

        Ok(dest)
    }

    async fn ensure_assets(
        &self,
        version: &VersionJson,
        session: &LaunchSession,
        cancel: &CancellationSignal,
    ) -> LauncherResult<AssetReport> {
        let Some(info) = &version.asset_index else {
            warn!("{} declares no asset index", version.id);
            return Ok(AssetReport::default());
        };

        let resolver = AssetResolver::new(self.fetcher.clone(), self.config.assets_dir())
            .with_base_url(self.config.resources_base_url.clone())
            .with_concurrency(self.config.concurrency())
            .with_progress(session.progress.clone());

        let index = resolver.fetch_index(info, cancel).await?;
        resolver.resolve(&index, cancel).await?.into_result()
    }

    /// Ensures the logging config and returns it with its JVM argument.
    async fn ensure_logging_config(
        &self,
        version: &VersionJson,
        cancel: &CancellationSignal,
    ) -> LauncherResult<Option<(PathBuf, String)>> {
        let Some(client) = version.logging.as_ref().and_then(|l| l.client.as_ref()) else {
            return Ok(None);
        };

        let dest = self.config.log_configs_dir().join(&client.file.id);
        let entry = DownloadEntry::new(client.file.url.clone(), dest.clone())
            .with_sha1(Some(client.file.sha1.clone()))
            .with_size(client.file.size);
        self.fetcher.ensure(&entry, cancel).await?;

        let values = HashMap::from([("path".to_string(), safe_path_str(&dest))]);
        let argument = substitute(&client.argument, &values, self.config.quoting);
        Ok(Some((dest, argument)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Mutex;

    use crate::core::downloader::{hash_bytes, HashAlgorithm};
    use crate::core::launch::arguments::QuotingPolicy;
    use crate::core::platform::{Arch, OsFamily};
    use crate::core::progress::ProgressEvent;
    use crate::core::transport::memory::MemoryTransport;

    const CLIENT: &[u8] = b"client jar bytes";
    const LIB: &[u8] = b"library jar bytes";
    const LOG_CONFIG: &[u8] = b"<Configuration/>";

    fn sha1(bytes: &[u8]) -> String {
        hash_bytes(HashAlgorithm::Sha1, bytes)
    }

    fn object_url(body: &[u8]) -> String {
        let hash = sha1(body);
        format!("https://res.test/{}/{}", &hash[..2], hash)
    }

    fn fixture() -> (MemoryTransport, VersionJson) {
        let index = serde_json::json!({
            "objects": {
                "minecraft/sounds/a.ogg": {"hash": sha1(b"a"), "size": 1},
                "minecraft/sounds/b.ogg": {"hash": sha1(b"a"), "size": 1}
            }
        })
        .to_string();

        let transport = MemoryTransport::new()
            .with("https://piston.test/client.jar", CLIENT)
            .with("https://libs.test/com/mojang/brigadier/1.2.9/brigadier-1.2.9.jar", LIB)
            .with("https://meta.test/indexes/17.json", index.clone())
            .with(&object_url(b"a"), b"a".to_vec())
            .with("https://piston.test/client-1.12.xml", LOG_CONFIG);

        let version: VersionJson = serde_json::from_value(serde_json::json!({
            "id": "1.21.1",
            "type": "release",
            "mainClass": "net.minecraft.client.main.Main",
            "assetIndex": {
                "id": "17",
                "sha1": sha1(index.as_bytes()),
                "size": index.len(),
                "url": "https://meta.test/indexes/17.json"
            },
            "downloads": {
                "client": {"sha1": sha1(CLIENT), "size": CLIENT.len(), "url": "https://piston.test/client.jar"}
            },
            "libraries": [
                {
                    "name": "com.mojang:brigadier:1.2.9",
                    "downloads": {"artifact": {
                        "path": "com/mojang/brigadier/1.2.9/brigadier-1.2.9.jar",
                        "sha1": sha1(LIB),
                        "size": LIB.len(),
                        "url": "https://libs.test/com/mojang/brigadier/1.2.9/brigadier-1.2.9.jar"
                    }}
                },
                {
                    "name": "ca.weblite:java-objc-bridge:1.1",
                    "rules": [{"action": "allow", "os": {"name": "osx"}}],
                    "downloads": {"artifact": {"path": "ca/weblite/java-objc-bridge-1.1.jar", "url": "https://libs.test/never"}}
                }
            ],
            "arguments": {
                "game": [
                    "--username", "${auth_player_name}",
                    "--assetIndex", "${assets_index_name}",
                    {"rules": [{"action": "allow", "features": {"is_demo_user": true}}], "value": "--demo"},
                    {"rules": [{"action": "allow", "features": {"has_custom_resolution": true}}],
                     "value": ["--width", "${resolution_width}", "--height", "${resolution_height}"]}
                ],
                "jvm": [
                    {"rules": [{"action": "allow", "os": {"name": "osx"}}], "value": "-XstartOnFirstThread"},
                    "-Djava.library.path=${natives_directory}",
                    "-cp", "${classpath}"
                ]
            },
            "logging": {"client": {
                "argument": "-Dlog4j.configurationFile=${path}",
                "file": {"id": "client-1.12.xml", "sha1": sha1(LOG_CONFIG), "size": LOG_CONFIG.len(), "url": "https://piston.test/client-1.12.xml"},
                "type": "log4j2-xml"
            }}
        }))
        .unwrap();

        (transport, version)
    }

    fn materializer(root: &Path, transport: Arc<MemoryTransport>) -> Materializer {
        let mut config = LauncherConfig::with_data_dir(root);
        config.max_concurrent_downloads = Some(4);
        config.resources_base_url = "https://res.test".into();
        Materializer::new(config, transport).with_platform(PlatformDescriptor::new(OsFamily::Linux, Arch::X64))
    }

    #[tokio::test]
    async fn full_pass_composes_runnable_argv() {
        let dir = tempfile::tempdir().unwrap();
        let (transport, version) = fixture();
        let transport = Arc::new(transport);
        let materializer = materializer(dir.path(), transport.clone());

        let mut session = LaunchSession::new(PlayerIdentity::offline("Alex"), dir.path().join("game"));
        session.resolution = Some((854, 480));
        session.extra_jvm_args = vec!["-Xmx2G".into()];

        let instance = materializer
            .materialize(&version, &session, &CancellationSignal::new())
            .await
            .unwrap();

        let lib = dir.path().join("libraries/com/mojang/brigadier/1.2.9/brigadier-1.2.9.jar");
        let client = dir.path().join("versions/1.21.1/1.21.1.jar");
        assert_eq!(instance.artifacts.classpath_entries, vec![lib.clone(), client.clone()]);
        assert_eq!(
            instance.classpath,
            format!("{}:{}", lib.display(), client.display())
        );
        assert_eq!(instance.artifacts.verified_assets(), 1);
        assert_eq!(instance.artifacts.assets.satisfied, 2);
        assert_eq!(instance.artifacts.libraries.skipped_count(), 1);

        let natives = dir.path().join("versions/1.21.1/natives");
        let log_config = dir.path().join("assets/log_configs/client-1.12.xml");
        assert_eq!(
            instance.jvm_args,
            vec![
                "-Xmx2G".to_string(),
                format!("-Djava.library.path={}", natives.display()),
                "-cp".to_string(),
                instance.classpath.clone(),
                format!("-Dlog4j.configurationFile={}", log_config.display()),
            ]
        );
        assert_eq!(
            instance.game_args,
            vec!["--username", "Alex", "--assetIndex", "17", "--width", "854", "--height", "480"]
        );

        let argv = instance.argv();
        assert_eq!(argv[instance.jvm_args.len()], "net.minecraft.client.main.Main");
        assert_eq!(argv.len(), instance.jvm_args.len() + 1 + instance.game_args.len());
    }

    #[tokio::test]
    async fn second_pass_is_served_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let (transport, version) = fixture();
        let transport = Arc::new(transport);
        let materializer = materializer(dir.path(), transport.clone());
        let session = LaunchSession::new(PlayerIdentity::offline("Alex"), dir.path().join("game"));
        let cancel = CancellationSignal::new();

        let first = materializer.materialize(&version, &session, &cancel).await.unwrap();
        let fetched = transport.total_fetches();
        let second = materializer.materialize(&version, &session, &cancel).await.unwrap();

        assert_eq!(transport.total_fetches(), fetched);
        assert_eq!(first.classpath, second.classpath);
    }

    #[tokio::test]
    async fn natives_directory_is_rebuilt_each_pass() {
        let dir = tempfile::tempdir().unwrap();
        let (transport, version) = fixture();
        let materializer = materializer(dir.path(), Arc::new(transport));
        let stale = dir.path().join("versions/1.21.1/natives/stale.so");
        std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
        std::fs::write(&stale, b"old").unwrap();

        let session = LaunchSession::new(PlayerIdentity::offline("Alex"), dir.path().join("game"));
        materializer
            .materialize(&version, &session, &CancellationSignal::new())
            .await
            .unwrap();

        assert!(!stale.exists());
        assert!(stale.parent().unwrap().is_dir());
    }

    #[tokio::test]
    async fn missing_client_jar_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let (_, mut version) = fixture();
        version.downloads.clear();
        let materializer = materializer(dir.path(), Arc::new(MemoryTransport::new()));
        let session = LaunchSession::new(PlayerIdentity::offline("Alex"), dir.path().join("game"));

        let err = materializer
            .materialize(&version, &session, &CancellationSignal::new())
            .await
            .unwrap_err();
        assert!(matches!(err, LauncherError::MissingMandatoryArtifact(_)));
    }

    #[tokio::test]
    async fn failed_library_blocks_composition() {
        let dir = tempfile::tempdir().unwrap();
        let (_, version) = fixture();
        let transport = MemoryTransport::new().with("https://piston.test/client.jar", CLIENT);
        let materializer = materializer(dir.path(), Arc::new(transport));
        let session = LaunchSession::new(PlayerIdentity::offline("Alex"), dir.path().join("game"));

        let err = materializer
            .materialize(&version, &session, &CancellationSignal::new())
            .await
            .unwrap_err();
        assert!(matches!(err, LauncherError::ResolutionFailed { stage: "library", failed: 1, .. }));
        assert!(dir.path().join("versions/1.21.1/1.21.1.jar").is_file());
    }

    #[tokio::test]
    async fn quoting_policy_decides_argv_for_paths_with_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Application Support");
        let version: VersionJson = serde_json::from_value(serde_json::json!({
            "id": "1.8.9",
            "mainClass": "net.minecraft.client.main.Main",
            "downloads": {"client": {"sha1": sha1(CLIENT), "url": "https://piston.test/client.jar"}},
            "minecraftArguments": "--gameDir ${game_directory}"
        }))
        .unwrap();
        let session = LaunchSession::new(PlayerIdentity::offline("Steve"), root.join("game"));
        let cancel = CancellationSignal::new();

        let mut config = LauncherConfig::with_data_dir(&root);
        let transport = Arc::new(MemoryTransport::new().with("https://piston.test/client.jar", CLIENT));
        let linux = PlatformDescriptor::new(OsFamily::Linux, Arch::X64);

        let quoted = Materializer::new(config.clone(), transport.clone())
            .with_platform(linux.clone())
            .materialize(&version, &session, &cancel)
            .await
            .unwrap();
        assert_eq!(quoted.jvm_args[2], format!("\"{}\"", quoted.classpath));

        config.quoting = QuotingPolicy::Verbatim;
        let verbatim = Materializer::new(config, transport)
            .with_platform(linux)
            .materialize(&version, &session, &cancel)
            .await
            .unwrap();
        let argv = verbatim.argv();
        assert!(argv.iter().all(|arg| !arg.contains('"')));
        assert_eq!(argv[2], verbatim.classpath);
        assert_eq!(argv.last().unwrap(), &root.join("game").display().to_string());
    }

    #[tokio::test]
    async fn legacy_version_gets_default_jvm_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let transport = MemoryTransport::new().with("https://piston.test/client.jar", CLIENT);
        let version: VersionJson = serde_json::from_value(serde_json::json!({
            "id": "1.8.9",
            "mainClass": "net.minecraft.client.main.Main",
            "assets": "1.8",
            "downloads": {"client": {"sha1": sha1(CLIENT), "url": "https://piston.test/client.jar"}},
            "minecraftArguments": "--username ${auth_player_name} --gameDir ${game_directory} --userProperties ${user_properties}"
        }))
        .unwrap();

        let materializer = materializer(dir.path(), Arc::new(transport));
        let session = LaunchSession::new(PlayerIdentity::offline("Steve"), dir.path().join("game"));
        let instance = materializer
            .materialize(&version, &session, &CancellationSignal::new())
            .await
            .unwrap();

        assert_eq!(instance.jvm_args[1], "-cp");
        assert_eq!(instance.jvm_args[2], instance.classpath);
        assert_eq!(instance.game_args[1], "Steve");
        assert_eq!(instance.game_args[5], "{}");
    }

    #[tokio::test]
    async fn progress_covers_every_stage() {
        let dir = tempfile::tempdir().unwrap();
        let (transport, version) = fixture();
        let materializer = materializer(dir.path(), Arc::new(transport));

        let stages = Arc::new(Mutex::new(Vec::new()));
        let sink_stages = stages.clone();
        let session = LaunchSession::new(PlayerIdentity::offline("Alex"), dir.path().join("game"))
            .with_progress(Arc::new(move |event: ProgressEvent| {
                sink_stages.lock().unwrap().push(event.stage);
            }));

        materializer
            .materialize(&version, &session, &CancellationSignal::new())
            .await
            .unwrap();

        let stages = stages.lock().unwrap();
        assert_eq!(stages.first(), Some(&Stage::Client));
        assert_eq!(stages.iter().filter(|s| **s == Stage::Libraries).count(), 2);
        assert_eq!(stages.iter().filter(|s| **s == Stage::Assets).count(), 1);
    }

    #[test]
    fn session_derives_feature_flags() {
        let mut session = LaunchSession::new(PlayerIdentity::offline("Alex"), "/game");
        session.demo = true;
        session.quick_play = Some(QuickPlay::Realms("1234".into()));
        let flags = session.feature_flags();
        assert_eq!(flags.get(FEATURE_DEMO_USER), Some(true));
        assert_eq!(flags.get(FEATURE_QUICK_PLAY_REALMS), Some(true));
        assert_eq!(flags.get(FEATURE_QUICK_PLAY_SINGLEPLAYER), Some(false));
        assert_eq!(flags.get(FEATURE_CUSTOM_RESOLUTION), Some(false));
    }
}
