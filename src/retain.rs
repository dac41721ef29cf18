use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::paths::{Locations, name_matches};

/// A directory that could be kept, with its modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetainCandidate {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Pick the installation to keep: the newest matching directory in the
/// retention parent.
pub fn select_retained(locations: &Locations) -> Option<PathBuf> {
    newest(&locations.expanded_retain_from(), locations.filter())
}

/// Newest matching directory directly under `parent`, if any.
pub fn newest(parent: &Path, filter: &str) -> Option<PathBuf> {
    let mut candidates = candidates(parent, filter);
    rank(&mut candidates);
    candidates.into_iter().next().map(|c| c.path)
}

/// Matching entries of `parent` that are directories (symlinks followed).
///
/// Entries whose metadata cannot be read are left out.
pub fn candidates(parent: &Path, filter: &str) -> Vec<RetainCandidate> {
    let entries = match fs::read_dir(parent) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("No retention candidates in {}: {}", parent.display(), e);
            return Vec::new();
        }
    };

    entries
        .flatten()
        .filter(|entry| name_matches(&entry.file_name().to_string_lossy(), filter))
        .filter_map(|entry| {
            let path = entry.path();
            let meta = match fs::metadata(&path) {
                Ok(meta) if meta.is_dir() => meta,
                Ok(_) => return None,
                Err(e) => {
                    tracing::debug!("Ignoring {}: {}", path.display(), e);
                    return None;
                }
            };
            match meta.modified() {
                Ok(modified) => Some(RetainCandidate { path, modified }),
                Err(e) => {
                    tracing::debug!("No mtime for {}: {}", path.display(), e);
                    None
                }
            }
        })
        .collect()
}

/// Order newest first; equal timestamps fall back to path order.
pub fn rank(candidates: &mut [RetainCandidate]) {
    candidates.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| a.path.cmp(&b.path))
    });
}
