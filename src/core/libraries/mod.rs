mod resolver;

pub use resolver::{LibraryOutcome, LibraryReport, LibraryResolveOptions, LibraryResolver, LibraryStatus};
