mod index;
mod resolver;

pub use index::{object_path, AssetIndex, AssetObject, LegacyLayout};
pub use resolver::{AssetReport, AssetResolver};
