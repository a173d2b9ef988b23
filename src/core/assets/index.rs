use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Asset index JSON (`assets/indexes/<id>.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetIndex {
    #[serde(default)]
    pub objects: BTreeMap<String, AssetObject>,
    /// Pre-1.7 layout: objects are copied under `virtual/legacy/<path>`.
    #[serde(default, rename = "virtual")]
    pub is_virtual: bool,
    /// Pre-1.6 layout: objects are copied into the game's `resources/`.
    #[serde(default)]
    pub map_to_resources: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetObject {
    pub hash: String,
    pub size: u64,
}

/// Layouts that copy objects back to their virtual paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyLayout {
    Virtual,
    MapToResources,
}

impl AssetIndex {
    pub fn legacy_layout(&self) -> Option<LegacyLayout> {
        if self.map_to_resources {
            Some(LegacyLayout::MapToResources)
        } else if self.is_virtual {
            Some(LegacyLayout::Virtual)
        } else {
            None
        }
    }
}

/// `hh/hash` for a valid hex hash, `None` otherwise.
pub fn object_path(hash: &str) -> Option<String> {
    if hash.len() < 2 || !hash.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let hash = hash.to_ascii_lowercase();
    Some(format!("{}/{}", &hash[..2], hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_index_flags() {
        let index: AssetIndex = serde_json::from_str(
            r#"{"virtual": true, "objects": {"sounds/a.ogg": {"hash": "abcdef", "size": 3}}}"#,
        )
        .unwrap();
        assert_eq!(index.legacy_layout(), Some(LegacyLayout::Virtual));
        assert_eq!(index.objects["sounds/a.ogg"].size, 3);

        let modern: AssetIndex = serde_json::from_str(r#"{"objects": {}}"#).unwrap();
        assert_eq!(modern.legacy_layout(), None);
    }

    #[test]
    fn object_path_is_content_addressed() {
        assert_eq!(
            object_path("B62CA8EC10D07E6BF5AC8DAE0C8C1D2E6A1E3356").as_deref(),
            Some("b6/b62ca8ec10d07e6bf5ac8dae0c8c1d2e6a1e3356")
        );
        assert_eq!(object_path("x"), None);
        assert_eq!(object_path("../etc"), None);
    }
}
