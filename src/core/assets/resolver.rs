// ─── Asset Resolver ───
// Content-addressed asset objects: `objects/<hh>/<hash>`, fetched from
// `<base>/<hh>/<hash>` under bounded concurrency.

use std::collections::BTreeMap;
use std::path::PathBuf;

use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};

use crate::core::cancel::CancellationSignal;
use crate::core::config::{host_parallelism, RESOURCES_BASE_URL};
use crate::core::downloader::{ArtifactFetcher, DownloadEntry, FetchStatus};
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::progress::{ProgressCounter, ProgressSink, Stage};
use crate::core::version::AssetIndexInfo;

use super::index::{object_path, AssetIndex, LegacyLayout};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetReport {
    /// Entries in the index (virtual paths).
    pub total: usize,
    /// Distinct objects after hash deduplication.
    pub unique: usize,
    /// Objects present and verified after the pass.
    pub verified: usize,
    /// Objects that needed a network fetch.
    pub downloaded: usize,
    /// Entries whose object verified.
    pub satisfied: usize,
    /// Objects that failed, plus entries with an unusable hash.
    pub failed: usize,
    /// Set when the index uses a legacy layout this resolver does not build.
    pub degraded: Option<LegacyLayout>,
}

impl AssetReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn into_result(self) -> LauncherResult<Self> {
        if self.failed > 0 {
            return Err(LauncherError::ResolutionFailed {
                stage: "asset",
                failed: self.failed,
                total: self.unique,
            });
        }
        Ok(self)
    }
}

pub struct AssetResolver {
    fetcher: ArtifactFetcher,
    assets_dir: PathBuf,
    base_url: String,
    concurrency: usize,
    progress: Option<ProgressSink>,
}

impl AssetResolver {
    pub fn new(fetcher: ArtifactFetcher, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            assets_dir: assets_dir.into(),
            base_url: RESOURCES_BASE_URL.to_string(),
            concurrency: host_parallelism(),
            progress: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_progress(mut self, sink: Option<ProgressSink>) -> Self {
        self.progress = sink;
        self
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.assets_dir.join("objects")
    }

    pub fn indexes_dir(&self) -> PathBuf {
        self.assets_dir.join("indexes")
    }

    /// Ensure `indexes/<id>.json` matches `info`, then parse it.
    pub async fn fetch_index(
        &self,
        info: &AssetIndexInfo,
        cancel: &CancellationSignal,
    ) -> LauncherResult<AssetIndex> {
        let dest = self.indexes_dir().join(format!("{}.json", info.id));
        let entry = DownloadEntry::new(info.url.clone(), dest.clone())
            .with_sha1(info.sha1.clone())
            .with_size(info.size);
        self.fetcher.ensure(&entry, cancel).await?;

        let bytes = tokio::fs::read(&dest)
            .await
            .map_err(|source| LauncherError::io(&dest, source))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Make every object of `index` present and verified.
    ///
    /// Object failures are counted in the report; the only `Err` is
    /// cancellation.
    pub async fn resolve(
        &self,
        index: &AssetIndex,
        cancel: &CancellationSignal,
    ) -> LauncherResult<AssetReport> {
        cancel.check()?;

        let mut report = AssetReport {
            total: index.objects.len(),
            ..AssetReport::default()
        };

        if let Some(layout) = index.legacy_layout() {
            warn!(
                "Asset index uses the {:?} layout, which is not materialized; {} entries left as-is",
                layout, report.total
            );
            report.degraded = Some(layout);
            return Ok(report);
        }

        // hh/hash -> (hash, size, entries sharing it)
        let mut unique: BTreeMap<String, (String, u64, usize)> = BTreeMap::new();
        for (virtual_path, object) in &index.objects {
            match object_path(&object.hash) {
                Some(path) => {
                    let slot = unique
                        .entry(path)
                        .or_insert_with(|| (object.hash.to_ascii_lowercase(), object.size, 0));
                    slot.2 += 1;
                }
                None => {
                    warn!("Asset {} has unusable hash {:?}", virtual_path, object.hash);
                    report.failed += 1;
                }
            }
        }
        report.unique = unique.len();

        info!(
            "Resolving {} asset objects ({} entries), concurrency={}",
            report.unique, report.total, self.concurrency
        );

        let counter = ProgressCounter::new(Stage::Assets, report.unique, self.progress.clone());
        let objects_dir = self.objects_dir();

        let mut results = stream::iter(unique)
            .map(|(path, (hash, size, shared))| {
                let entry = DownloadEntry::new(format!("{}/{}", self.base_url, path), objects_dir.join(&path))
                    .with_sha1(Some(hash))
                    .with_size(Some(size));
                async move {
                    let result = self.fetcher.ensure(&entry, cancel).await;
                    (path, shared, result)
                }
            })
            .buffer_unordered(self.concurrency);

        while let Some((path, shared, result)) = results.next().await {
            match result {
                Ok(status) => {
                    report.verified += 1;
                    report.satisfied += shared;
                    if matches!(status, FetchStatus::Downloaded { .. }) {
                        report.downloaded += 1;
                    }
                    counter.record(&path, true);
                }
                Err(err) => {
                    if !err.is_cancelled() {
                        warn!("Asset object {} failed: {}", path, err);
                    }
                    report.failed += 1;
                    counter.record(&path, false);
                }
            }
        }

        if cancel.is_cancelled() {
            return Err(LauncherError::Cancelled);
        }

        info!(
            "Assets: {} verified ({} downloaded), {} failed",
            report.verified, report.downloaded, report.failed
        );
        Ok(report)
    }
}
