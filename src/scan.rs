use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::{Locations, name_matches};

/// Collect every immediate child of the configured parents whose name
/// contains the filter.
///
/// Parents are visited in declared order and entries within a parent in
/// file name order. Parents that cannot be listed are skipped. Nothing is
/// deduplicated, so overlapping parents may yield the same entry twice.
pub fn scan(locations: &Locations) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for parent in locations.expanded_parents() {
        found.extend(scan_parent(&parent, locations.filter()));
    }
    found
}

/// Matching children of a single parent, in file name order.
pub fn scan_parent(parent: &Path, filter: &str) -> Vec<PathBuf> {
    let entries = match fs::read_dir(parent) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Skipping {}: {}", parent.display(), e);
            return Vec::new();
        }
    };

    let mut names = entries
        .flatten()
        .map(|entry| entry.file_name())
        .filter(|name| name_matches(&name.to_string_lossy(), filter))
        .collect::<Vec<_>>();
    names.sort();

    tracing::debug!("{} match(es) in {}", names.len(), parent.display());
    names.into_iter().map(|name| parent.join(name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn locations(home: &Path, parents: &[&str]) -> Locations {
        Locations::new(
            parents.iter().map(|p| p.to_string()).collect(),
            "~/Applications",
            "phpstorm",
        )
        .with_home(home)
    }

    #[test]
    fn test_scan_matches_substring_case_insensitively() {
        let home = TempDir::new().unwrap();
        let caches = home.path().join("Library/Caches");
        fs::create_dir_all(caches.join("JetBrains-PhpStorm2023.1")).unwrap();
        fs::create_dir_all(caches.join("PHPSTORM")).unwrap();
        fs::create_dir_all(caches.join("PyCharm2023.1")).unwrap();
        File::create(caches.join("phpstorm.log")).unwrap();

        let found = scan(&locations(home.path(), &["~/Library/Caches"]));

        assert_eq!(
            found,
            vec![
                caches.join("JetBrains-PhpStorm2023.1"),
                caches.join("PHPSTORM"),
                caches.join("phpstorm.log"),
            ]
        );
    }

    #[test]
    fn test_scan_skips_missing_parents_and_keeps_going() {
        let home = TempDir::new().unwrap();
        let logs = home.path().join("Library/Logs");
        fs::create_dir_all(logs.join("PhpStorm2022.3")).unwrap();

        let found = scan(&locations(
            home.path(),
            &["~/does/not/exist", "~/Library/Logs", "~/also/missing"],
        ));

        assert_eq!(found, vec![logs.join("PhpStorm2022.3")]);
    }

    #[test]
    fn test_scan_keeps_parent_order_without_dedup() {
        let home = TempDir::new().unwrap();
        let apps = home.path().join("Applications");
        fs::create_dir_all(apps.join("PhpStorm.app")).unwrap();
        fs::create_dir_all(home.path().join("Library/Logs/PhpStorm2021.1")).unwrap();

        let found = scan(&locations(
            home.path(),
            &["~/Applications", "~/Library/Logs", "~/Applications"],
        ));

        assert_eq!(
            found,
            vec![
                apps.join("PhpStorm.app"),
                home.path().join("Library/Logs/PhpStorm2021.1"),
                apps.join("PhpStorm.app"),
            ]
        );
    }

    #[test]
    fn test_scan_does_not_recurse() {
        let home = TempDir::new().unwrap();
        fs::create_dir_all(home.path().join("Library/Caches/JetBrains/PhpStorm2024.1")).unwrap();

        let found = scan(&locations(home.path(), &["~/Library/Caches"]));

        assert!(found.is_empty());
    }
}
