use std::fs;
use std::path::{Path, PathBuf};

/// Everything found except the retained installation, in scan order.
///
/// Paths are compared both literally and after canonicalization, so a
/// candidate that reaches the retained directory through a symlink or a
/// differently spelled path is still kept.
pub fn deletion_set(candidates: &[PathBuf], retained: Option<&Path>) -> Vec<PathBuf> {
    let Some(retained) = retained else {
        return candidates.to_vec();
    };
    let retained_canonical = canonical(retained);

    candidates
        .iter()
        .filter(|path| {
            path.as_path() != retained && canonical(path) != retained_canonical
        })
        .cloned()
        .collect()
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
