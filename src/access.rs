//! The declarative access list and its per-repository form.
//!
//! The file is a JSON array of entries, each granting `teams` and `apps` to a set of `repos`:
//!
//! ```json
//! [{ "teams": { "team-a": "push" }, "apps": { "dependabot": true }, "repos": ["repo-a"] }]
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

#[cfg(test)]
#[path = "access_tests.rs"]
mod tests;

/// Permission level granted to a team, e.g. `pull`, `push` or `admin`.
pub type Permission = String;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccessEntry {
    #[serde(default)]
    pub teams: BTreeMap<String, Permission>,
    #[serde(default)]
    pub apps: BTreeMap<String, bool>,
    pub repos: Vec<String>,
}

/// Access granted to a single repository.
#[derive(serde::Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoAccess {
    pub teams: BTreeMap<String, Permission>,
    pub apps: BTreeMap<String, bool>,
}

impl RepoAccess {
    pub fn app_enabled(&self, app: &str) -> bool {
        self.apps.get(app).copied().unwrap_or(false)
    }
}

pub type NormalizedConfig = BTreeMap<String, RepoAccess>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read access file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse access file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The main team has access to every repository and must not be listed.
    #[error("Main team `{team}` should not be configured in the access file")]
    MainTeamConfigured { team: String },

    #[error("Repository `{repo}` is configured more than once")]
    DuplicateRepository { repo: String },
}

pub fn load_access_config(path: &Path) -> Result<Vec<AccessEntry>, ConfigError> {
    let data = std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&data)?)
}

pub fn validate(entries: &[AccessEntry], main_team: &str) -> Result<(), ConfigError> {
    let mut seen = BTreeSet::new();
    for entry in entries {
        if entry.teams.contains_key(main_team) {
            return Err(ConfigError::MainTeamConfigured {
                team: main_team.to_string(),
            });
        }
        for repo in &entry.repos {
            if !seen.insert(repo.as_str()) {
                return Err(ConfigError::DuplicateRepository { repo: repo.clone() });
            }
        }
    }
    Ok(())
}

/// Validates the entries and reshapes them into a lookup keyed by repository name.
pub fn normalize(
    entries: &[AccessEntry],
    main_team: &str,
) -> Result<NormalizedConfig, ConfigError> {
    validate(entries, main_team)?;

    let config = entries
        .iter()
        .flat_map(|entry| {
            entry.repos.iter().map(move |repo| {
                (
                    repo.clone(),
                    RepoAccess {
                        teams: entry.teams.clone(),
                        apps: entry.apps.clone(),
                    },
                )
            })
        })
        .collect();
    Ok(config)
}
