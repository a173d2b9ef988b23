// ─── Launch Core ───
// Resolution and materialization pipeline for a Minecraft launcher.
//
// Architecture:
//   core/
//     version/     Version manifest, version JSON, arguments, OS/feature rules
//     maven/       Maven coordinate parsing and repository paths
//     transport/   Transport seam (reqwest-backed HTTP, in-memory for tests)
//     downloader/  Verified fetch-or-reuse of single artifacts
//     libraries/   Library resolution and native extraction
//     assets/      Asset index and content-addressed objects
//     java/        Managed Java runtimes with sidecar descriptors
//     launch/      Classpath, argument composition, materializer
//     auth/        Offline player identity

pub mod archive;
pub mod assets;
pub mod auth;
pub mod cancel;
pub mod config;
pub mod downloader;
pub mod error;
pub mod java;
pub mod launch;
pub mod libraries;
pub mod maven;
pub mod platform;
pub mod progress;
pub mod transport;
pub mod version;
