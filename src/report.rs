//! Accumulates the non-fatal failures of a run.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Failure {
    #[error("Repository `{repo}` has no config")]
    MissingRepoConfig { repo: String },

    #[error("Failed to add repo {repo} to Dependabot app installation ({reason})")]
    Installation { repo: String, reason: String },

    #[error(
        "Failed to add repo {repo}. Dependabot Package Manager: {package_manager} failed. \
         (Status Code: {status}: {body})"
    )]
    Registration {
        repo: String,
        package_manager: String,
        status: u16,
        body: String,
    },
}

/// Collects every failure reported during a run. The caller decides the exit status from it.
#[derive(Debug, Default)]
pub struct Report {
    failures: Vec<Failure>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, failure: Failure) {
        tracing::error!("{failure}");
        self.failures.push(failure);
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }
}
