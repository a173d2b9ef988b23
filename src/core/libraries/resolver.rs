// ─── Library Resolver ───
// Walks declared libraries: rule check, main artifact, native bundle and
// native extraction, one library per unit of work.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::core::archive::{extract_zip, ExtractOptions};
use crate::core::cancel::CancellationSignal;
use crate::core::config::host_parallelism;
use crate::core::downloader::{ArtifactFetcher, DownloadEntry};
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::maven::MOJANG_LIBRARIES;
use crate::core::platform::PlatformDescriptor;
use crate::core::progress::{ProgressCounter, ProgressSink, Stage};
use crate::core::version::library::ResolvedArtifact;
use crate::core::version::{evaluate, FeatureFlags, Library};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryResolveOptions {
    /// Libraries processed at once.
    pub concurrency: usize,
    /// Stop dispatching, and cancel in-flight work, after the first failure.
    pub fail_fast: bool,
}

impl Default for LibraryResolveOptions {
    fn default() -> Self {
        Self {
            concurrency: host_parallelism(),
            fail_fast: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryOutcome {
    /// Rules exclude the library on this platform. Not a failure.
    Skipped,
    Resolved {
        /// `None` for natives-only libraries.
        classpath_entry: Option<PathBuf>,
        natives_extracted: usize,
    },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryStatus {
    pub name: String,
    pub outcome: LibraryOutcome,
}

/// Result of one resolution pass, in declared library order.
#[derive(Debug, Clone, Default)]
pub struct LibraryReport {
    pub libraries: Vec<LibraryStatus>,
    /// Absolute jar paths, declared order, deduplicated.
    pub classpath: Vec<PathBuf>,
}

impl LibraryReport {
    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, LibraryOutcome::Failed { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, LibraryOutcome::Skipped))
    }

    pub fn resolved_count(&self) -> usize {
        self.count(|o| matches!(o, LibraryOutcome::Resolved { .. }))
    }

    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    /// The classpath if every applicable library resolved.
    pub fn into_classpath(self) -> LauncherResult<Vec<PathBuf>> {
        let failed = self.failed_count();
        if failed > 0 {
            return Err(LauncherError::ResolutionFailed {
                stage: "library",
                failed,
                total: self.libraries.len(),
            });
        }
        Ok(self.classpath)
    }

    fn count(&self, predicate: impl Fn(&LibraryOutcome) -> bool) -> usize {
        self.libraries.iter().filter(|s| predicate(&s.outcome)).count()
    }
}

pub struct LibraryResolver {
    fetcher: ArtifactFetcher,
    libraries_dir: PathBuf,
    default_repository: String,
    platform: PlatformDescriptor,
    features: FeatureFlags,
    options: LibraryResolveOptions,
    progress: Option<ProgressSink>,
}

impl LibraryResolver {
    pub fn new(fetcher: ArtifactFetcher, libraries_dir: impl Into<PathBuf>, platform: PlatformDescriptor) -> Self {
        Self {
            fetcher,
            libraries_dir: libraries_dir.into(),
            default_repository: MOJANG_LIBRARIES.to_string(),
            platform,
            features: FeatureFlags::default(),
            options: LibraryResolveOptions::default(),
            progress: None,
        }
    }

    pub fn with_features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.default_repository = repository.into();
        self
    }

    pub fn with_options(mut self, options: LibraryResolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_progress(mut self, sink: Option<ProgressSink>) -> Self {
        self.progress = sink;
        self
    }

    /// Resolve `libraries`, extracting natives into `natives_dir`.
    ///
    /// Fetches run concurrently; native archives are extracted one at a
    /// time in declared order, so a later library's entry replaces an
    /// earlier one deterministically. Per-library failures land in the
    /// report; the only `Err` is cancellation of `cancel` itself.
    pub async fn resolve(
        &self,
        libraries: &[Library],
        natives_dir: &Path,
        cancel: &CancellationSignal,
    ) -> LauncherResult<LibraryReport> {
        cancel.check()?;
        tokio::fs::create_dir_all(natives_dir)
            .await
            .map_err(|source| LauncherError::io(natives_dir, source))?;

        info!(
            "Resolving {} libraries for {}, concurrency={}",
            libraries.len(),
            self.platform,
            self.options.concurrency
        );

        // Fail-fast cancels this child; the caller's signal is left alone.
        let work_signal = cancel.child();
        let counter = ProgressCounter::new(Stage::Libraries, libraries.len(), self.progress.clone());

        let mut fetched = stream::iter(libraries)
            .map(|library| self.fetch_library(library, &work_signal))
            .buffered(self.options.concurrency.max(1));

        let mut report = LibraryReport::default();
        while let Some((library, fetch)) = fetched.next().await {
            let outcome = self.finish(library, fetch, natives_dir, &work_signal).await;
            let failed = matches!(outcome, LibraryOutcome::Failed { .. });
            counter.record(&library.name, !failed);
            if failed && self.options.fail_fast && !work_signal.is_cancelled() {
                warn!("Library {} failed, cancelling remaining work", library.name);
                work_signal.cancel();
            }
            report.libraries.push(LibraryStatus {
                name: library.name.clone(),
                outcome,
            });
        }

        if cancel.is_cancelled() {
            return Err(LauncherError::Cancelled);
        }

        let mut seen = HashSet::new();
        report.classpath = report
            .libraries
            .iter()
            .filter_map(|s| match &s.outcome {
                LibraryOutcome::Resolved {
                    classpath_entry: Some(entry),
                    ..
                } => Some(entry.clone()),
                _ => None,
            })
            .filter(|entry| seen.insert(entry.clone()))
            .collect();

        info!(
            "Libraries: {} resolved, {} skipped, {} failed",
            report.resolved_count(),
            report.skipped_count(),
            report.failed_count()
        );
        Ok(report)
    }

    async fn fetch_library<'a>(
        &self,
        library: &'a Library,
        cancel: &CancellationSignal,
    ) -> (&'a Library, LibraryFetch) {
        if !evaluate(&library.rules, &self.platform, &self.features) {
            debug!("Skipping {} (rules exclude {})", library.name, self.platform);
            return (library, LibraryFetch::Skipped);
        }

        let fetch = match self.fetch_artifacts(library, cancel).await {
            Ok((classpath_entry, native_archive)) => LibraryFetch::Fetched {
                classpath_entry,
                native_archive,
            },
            Err(err) => {
                if !err.is_cancelled() {
                    warn!("Library {} failed: {}", library.name, err);
                }
                LibraryFetch::Failed(err.to_string())
            }
        };
        (library, fetch)
    }

    async fn fetch_artifacts(
        &self,
        library: &Library,
        cancel: &CancellationSignal,
    ) -> LauncherResult<(Option<PathBuf>, Option<PathBuf>)> {
        cancel.check()?;

        let classpath_entry = match library.main_artifact(&self.default_repository)? {
            Some(artifact) => Some(self.fetch(&artifact, cancel).await?),
            None => None,
        };
        let native_archive = match library.native_artifact(&self.platform, &self.default_repository)? {
            Some(native) => Some(self.fetch(&native, cancel).await?),
            None => None,
        };

        Ok((classpath_entry, native_archive))
    }

    async fn finish(
        &self,
        library: &Library,
        fetch: LibraryFetch,
        natives_dir: &Path,
        cancel: &CancellationSignal,
    ) -> LibraryOutcome {
        let (classpath_entry, native_archive) = match fetch {
            LibraryFetch::Skipped => return LibraryOutcome::Skipped,
            LibraryFetch::Failed(reason) => return LibraryOutcome::Failed { reason },
            LibraryFetch::Fetched {
                classpath_entry,
                native_archive,
            } => (classpath_entry, native_archive),
        };

        let mut natives_extracted = 0;
        if let Some(archive) = native_archive {
            let options = ExtractOptions::excluding(library.extract_exclusions());
            match extract_zip(&archive, natives_dir, options, cancel).await {
                Ok(report) => {
                    debug!(
                        "Extracted {} natives from {} ({} excluded)",
                        report.written, library.name, report.excluded
                    );
                    natives_extracted = report.written;
                }
                Err(err) => {
                    if !err.is_cancelled() {
                        warn!("Natives of {} failed to extract: {}", library.name, err);
                    }
                    return LibraryOutcome::Failed {
                        reason: err.to_string(),
                    };
                }
            }
        }

        LibraryOutcome::Resolved {
            classpath_entry,
            natives_extracted,
        }
    }

    async fn fetch(&self, artifact: &ResolvedArtifact, cancel: &CancellationSignal) -> LauncherResult<PathBuf> {
        let dest = self.libraries_dir.join(&artifact.path);
        let entry = DownloadEntry::new(artifact.url.clone(), dest.clone())
            .with_sha1(artifact.sha1.clone())
            .with_size(artifact.size);
        self.fetcher.ensure(&entry, cancel).await?;
        Ok(dest)
    }
}

/// A library after its downloads, before native extraction.
enum LibraryFetch {
    Skipped,
    Fetched {
        classpath_entry: Option<PathBuf>,
        native_archive: Option<PathBuf>,
    },
    Failed(String),
}
