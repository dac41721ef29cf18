use std::io::Write;
use std::path::PathBuf;

use anyhow::Context as _;
use serde::Serialize;

mod lossy;
pub mod paths;
pub mod plan;
pub mod prompt;
pub mod remove;
pub mod retain;
pub mod scan;

pub use paths::Locations;
pub use prompt::{Answer, Confirm, LinePrompt};
pub use remove::{Outcome, Removal, Report};

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Summary {
    NothingFound,
    NothingToDelete {
        #[serde(serialize_with = "lossy::opt_path")]
        retained: Option<PathBuf>,
    },
    Cancelled {
        #[serde(serialize_with = "lossy::opt_path")]
        retained: Option<PathBuf>,
        #[serde(serialize_with = "lossy::paths")]
        planned: Vec<PathBuf>,
    },
    Executed {
        #[serde(serialize_with = "lossy::opt_path")]
        retained: Option<PathBuf>,
        report: Report,
    },
}

impl Summary {
    pub fn has_failures(&self) -> bool {
        matches!(self, Summary::Executed { report, .. } if report.has_failures())
    }
}

/// Scan, pick the copy to keep, ask, and remove the rest.
///
/// Human readable progress goes to `out`. Errors are returned only for an
/// invalid `locations` or a failed write to `out`; everything on the
/// filesystem side is reported in the returned [`Summary`].
pub fn run(
    locations: &Locations,
    confirm: &mut dyn Confirm,
    out: &mut dyn Write,
) -> anyhow::Result<Summary> {
    locations.validate()?;
    tracing::debug!(
        "Locations: {}",
        serde_json::to_string(locations).unwrap_or_default()
    );
    run_inner(locations, confirm, out).context("failed to write output")
}

fn run_inner(
    locations: &Locations,
    confirm: &mut dyn Confirm,
    out: &mut dyn Write,
) -> std::io::Result<Summary> {
    writeln!(out, "🔍 Searching for {} folders...", locations.filter())?;

    let found = scan::scan(locations);
    tracing::debug!("Scan found {} candidate(s)", found.len());
    if found.is_empty() {
        writeln!(out, "🙈 Nothing found.")?;
        return Ok(Summary::NothingFound);
    }

    let retained = retain::select_retained(locations);
    match &retained {
        Some(path) => writeln!(out, "📌 Presumed current version: {}", path.display())?,
        None => writeln!(
            out,
            "📌 No installed version found in {}, nothing will be kept.",
            locations.expanded_retain_from().display()
        )?,
    }

    let planned = plan::deletion_set(&found, retained.as_deref());
    if planned.is_empty() {
        writeln!(out, "✅ Nothing to delete, only the current version is left.")?;
        return Ok(Summary::NothingToDelete { retained });
    }

    writeln!(out, "\nTo be deleted:")?;
    for path in &planned {
        writeln!(out, " - {}", path.display())?;
    }
    writeln!(out)?;
    out.flush()?;

    if !confirm.confirm("Delete these folders?") {
        writeln!(out, "❎ Cancelled.")?;
        return Ok(Summary::Cancelled { retained, planned });
    }

    let mut write_err = None;
    let report = remove::remove_all(&planned, |removal| {
        if write_err.is_some() {
            return;
        }
        let line = match &removal.outcome {
            Outcome::Deleted => format!("✅ Deleted: {}", removal.path.display()),
            Outcome::Skipped => format!("➖ Already gone: {}", removal.path.display()),
            Outcome::Failed(cause) => {
                format!("❌ Failed to delete {}: {}", removal.path.display(), cause)
            }
        };
        if let Err(e) = writeln!(out, "{}", line) {
            write_err = Some(e);
        }
    });
    if let Some(e) = write_err {
        return Err(e);
    }

    writeln!(
        out,
        "\n{} deleted, {} already gone, {} failed.",
        report.deleted(),
        report.skipped(),
        report.failed()
    )?;

    Ok(Summary::Executed { retained, report })
}
