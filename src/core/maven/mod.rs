mod artifact;

pub use artifact::MavenCoordinate;

/// Default repository for libraries that declare no `url` of their own.
pub const MOJANG_LIBRARIES: &str = "https://libraries.minecraft.net";
