pub mod arguments;
pub mod library;
pub mod manifest;
pub mod rules;
pub mod version_file;

pub use arguments::{ArgumentToken, ArgumentValue, Arguments, ConditionalArgument};
pub use library::{DownloadArtifact, ExtractRules, Library, LibraryDownloads, ResolvedArtifact};
pub use manifest::{VersionEntry, VersionManifest, VERSION_MANIFEST_URL};
pub use rules::{evaluate, evaluate_with_diagnostics, FeatureFlags, OsConstraint, Rule, RuleAction};
pub use version_file::{
    AssetIndexInfo, ClientLogging, DownloadInfo, JavaVersionInfo, LoggingFile, LoggingInfo,
    VersionJson,
};
