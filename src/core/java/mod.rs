pub mod runtime;

pub use runtime::{
    locate_java_executable, InstalledRuntime, RuntimeArchive, RuntimeDescriptor, RuntimeStore,
};
