pub mod core;

use tracing_subscriber::EnvFilter;

pub use crate::core::auth::PlayerIdentity;
pub use crate::core::cancel::CancellationSignal;
pub use crate::core::config::LauncherConfig;
pub use crate::core::error::{LauncherError, LauncherResult};
pub use crate::core::launch::{LaunchSession, MaterializedInstance, Materializer};
pub use crate::core::platform::PlatformDescriptor;
pub use crate::core::transport::{HttpTransport, Transport};
pub use crate::core::version::{VersionJson, VersionManifest};

/// Install the structured logging subscriber. `RUST_LOG` overrides the
/// default filter. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,launch_core=debug")),
        )
        .try_init();
}
