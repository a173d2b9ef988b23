pub mod arguments;
pub mod classpath;
pub mod plan;

pub use arguments::{substitute, ArgumentComposer, LaunchContext, QuickPlay, QuotingPolicy};
pub use classpath::build_classpath;
pub use plan::{LaunchSession, MaterializedInstance, Materializer, ResolvedArtifactSet};
