use std::path::{Path, PathBuf};

use serde::Serialize;

/// Name fragment matched against directory entries when no filter is given.
pub const DEFAULT_FILTER: &str = "phpstorm";

/// Parent holding the application bundles, used to pick the copy to keep.
pub const DEFAULT_RETAIN_FROM: &str = "~/Applications";

/// Parent locations scanned for leftovers, in scan order.
pub const DEFAULT_PARENTS: &[&str] = &[
    "~/Library/Preferences",
    "~/Library/Caches",
    "~/Library/Logs",
    "~/Library/Application Support/JetBrains",
    "~/Applications",
    "~/Applications/JetBrains Toolbox",
];

/// Expand a leading `~` using the current user's home directory.
///
/// If the home directory cannot be determined the token is returned as-is;
/// listing it later will simply fail and the parent gets skipped.
pub fn expand_home(token: &str) -> PathBuf {
    let home = dirs::home_dir();
    if home.is_none() && token.starts_with('~') {
        tracing::warn!("Could not resolve home directory, using `{}` literally", token);
    }
    expand_home_with(token, home.as_deref())
}

/// Same as [`expand_home`] with an explicit home directory.
pub fn expand_home_with(token: &str, home: Option<&Path>) -> PathBuf {
    match (token.strip_prefix('~'), home) {
        (Some(rest), Some(home)) => {
            let rest = rest.trim_start_matches(['/', std::path::MAIN_SEPARATOR]);
            if rest.is_empty() {
                home.to_path_buf()
            } else {
                home.join(rest)
            }
        }
        _ => PathBuf::from(token),
    }
}

/// Case-insensitive substring match of an entry name against a filter.
///
/// `filter` is expected to be lowercase already, see [`Locations::filter`].
pub fn name_matches(name: &str, filter: &str) -> bool {
    name.to_lowercase().contains(filter)
}

/// Where to look for leftovers and where to find the copy worth keeping.
///
/// Paths are kept as unexpanded templates (`~/...`) and resolved against a
/// home directory at scan time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locations {
    parents: Vec<String>,
    retain_from: String,
    filter: String,
    #[serde(skip)]
    home: Option<PathBuf>,
}

impl Default for Locations {
    fn default() -> Self {
        Locations {
            parents: DEFAULT_PARENTS.iter().map(|p| p.to_string()).collect(),
            retain_from: DEFAULT_RETAIN_FROM.to_string(),
            filter: DEFAULT_FILTER.to_string(),
            home: None,
        }
    }
}

impl Locations {
    pub fn new(parents: Vec<String>, retain_from: impl Into<String>, filter: &str) -> Self {
        Locations {
            parents,
            retain_from: retain_from.into(),
            filter: filter.to_lowercase(),
            home: None,
        }
    }

    /// Resolve `~` against `home` instead of the real home directory.
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    pub fn retain_from(&self) -> &str {
        &self.retain_from
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn expand(&self, token: &str) -> PathBuf {
        match &self.home {
            Some(home) => expand_home_with(token, Some(home.as_path())),
            None => expand_home(token),
        }
    }

    pub fn expanded_parents(&self) -> Vec<PathBuf> {
        self.parents.iter().map(|p| self.expand(p)).collect()
    }

    pub fn expanded_retain_from(&self) -> PathBuf {
        self.expand(&self.retain_from)
    }

    /// Reject configurations that cannot produce a meaningful scan.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.filter.trim().is_empty() {
            anyhow::bail!("name filter must not be empty");
        }
        if self.parents.is_empty() {
            anyhow::bail!("at least one parent location is required");
        }
        Ok(())
    }
}
