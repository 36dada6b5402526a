//! Grants the Dependabot app access to an organization's repositories and registers
//! update configs for the package ecosystems found in each repository root.

pub mod access;
pub mod app;
pub mod dependabot;
pub mod error;
pub mod github;
pub mod manifest;
pub mod report;

pub use access::{
    load_access_config, normalize, AccessEntry, ConfigError, NormalizedConfig, RepoAccess,
};
pub use app::{App, Settings};
pub use dependabot::{DependabotClient, RegistrationOutcome, UpdateRegistrar};
pub use error::Error;
pub use github::{GitHubGateway, RepositoryGateway};
pub use manifest::ManifestTable;
pub use report::{Failure, Report};

/// Snapshot of a repository as seen through the caller's token.
///
/// Only [`github::GitHubGateway`] builds these from API responses; absent upstream fields
/// default to `None` / `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub id: Option<u64>,
    pub name: String,
    pub archived: bool,
    pub admin: bool,
}

impl Repository {
    /// Unarchived and administered by the caller.
    pub fn is_manageable(&self) -> bool {
        !self.archived && self.admin
    }
}

/// Entry of a root directory listing. Only the name takes part in classification.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    pub name: String,
}

impl ContentEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
