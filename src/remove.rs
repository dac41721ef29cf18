use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// What happened to a single path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "cause", rename_all = "lowercase")]
pub enum Outcome {
    Deleted,
    /// Already gone by the time it was its turn.
    Skipped,
    Failed(String),
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Removal {
    #[serde(serialize_with = "crate::lossy::path")]
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Per-path outcomes of one batch, in the order they were attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub removals: Vec<Removal>,
}

impl Report {
    pub fn deleted(&self) -> usize {
        self.count(|o| *o == Outcome::Deleted)
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| *o == Outcome::Skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(Outcome::is_failed)
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.removals.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Remove one path and everything beneath it.
///
/// Symlinks are unlinked, never followed.
pub fn remove_path(path: &Path) -> Outcome {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Outcome::Skipped,
        Err(e) => return Outcome::Failed(e.to_string()),
    };

    let result = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match result {
        Ok(()) => Outcome::Deleted,
        Err(e) => Outcome::Failed(e.to_string()),
    }
}

/// Remove every path in order; a failure never stops the batch.
///
/// `on_each` sees every outcome as soon as it is known.
pub fn remove_all(paths: &[PathBuf], mut on_each: impl FnMut(&Removal)) -> Report {
    let mut report = Report::default();
    for path in paths {
        let outcome = remove_path(path);
        match &outcome {
            Outcome::Deleted => tracing::info!("Removed {}", path.display()),
            Outcome::Skipped => tracing::info!("Already gone: {}", path.display()),
            Outcome::Failed(cause) => {
                tracing::warn!("Failed to remove {}: {}", path.display(), cause)
            }
        }
        let removal = Removal {
            path: path.clone(),
            outcome,
        };
        on_each(&removal);
        report.removals.push(removal);
    }
    report
}
