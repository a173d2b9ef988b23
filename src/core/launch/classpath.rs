// ─── Classpath Builder ───
// Joins resolved library jars and the client jar into one classpath string.
//
// Order: libraries in declared order, then the client jar.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::core::platform::{OsFamily, PlatformDescriptor};

/// Build the classpath for `platform`.
///
/// Empty entries are dropped and duplicates keep their first position.
/// Windows paths compare case-insensitively.
pub fn build_classpath(
    libraries: &[PathBuf],
    client_jar: Option<&Path>,
    platform: &PlatformDescriptor,
) -> String {
    classpath_entries(libraries, client_jar, platform).join(platform.classpath_separator())
}

/// The deduplicated entries [`build_classpath`] joins.
pub fn classpath_entries(
    libraries: &[PathBuf],
    client_jar: Option<&Path>,
    platform: &PlatformDescriptor,
) -> Vec<String> {
    let mut entries: Vec<String> = libraries
        .iter()
        .map(|p| safe_path_str(p))
        .chain(client_jar.map(safe_path_str))
        .filter(|entry| !entry.trim().is_empty())
        .collect();

    dedup_preserving_order(&mut entries, platform.os == OsFamily::Windows);
    entries
}

fn dedup_preserving_order(entries: &mut Vec<String>, case_insensitive: bool) {
    let mut seen = HashSet::new();
    entries.retain(|entry| {
        let key = if case_insensitive {
            entry.to_lowercase()
        } else {
            entry.clone()
        };
        seen.insert(key)
    });
}

/// Path as a launch-argument string, without the Windows `\\?\` prefix
/// (Java's classpath handling rejects extended-length paths).
pub fn safe_path_str(path: &Path) -> String {
    let text = path.to_string_lossy().to_string();
    match text.strip_prefix(r"\\?\") {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}
