//! A single pass over the main team's repositories: install the Dependabot app where the
//! access file asks for it and register an update config per detected package manager.

use tracing::{debug, info, instrument};

use crate::access::{NormalizedConfig, RepoAccess};
use crate::dependabot::UpdateRegistrar;
use crate::github::RepositoryGateway;
use crate::manifest::ManifestTable;
use crate::report::{Failure, Report};
use crate::Error;

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

/// Key under `apps` that opts a repository in.
pub const DEPENDABOT_APP: &str = "dependabot";

#[derive(Debug, Clone)]
pub struct Settings {
    pub org: String,
    /// The main team. Its repositories are the ones visited.
    pub team: String,
    /// Installation id of the Dependabot app.
    pub app_id: u64,
}

pub struct App<G, R> {
    settings: Settings,
    gateway: G,
    registrar: R,
    manifests: ManifestTable,
}

impl<G: RepositoryGateway, R: UpdateRegistrar> App<G, R> {
    pub fn new(settings: Settings, gateway: G, registrar: R) -> Self {
        Self {
            settings,
            gateway,
            registrar,
            manifests: ManifestTable::default(),
        }
    }

    pub fn with_manifests(mut self, manifests: ManifestTable) -> Self {
        self.manifests = manifests;
        self
    }

    /// Visits every repository of the main team. Per-repository problems end up in the
    /// returned report; only transport and decoding errors abort the pass.
    #[instrument(skip_all, fields(org = %self.settings.org, team = %self.settings.team))]
    pub async fn configure(&self, config: &NormalizedConfig) -> Result<Report, Error> {
        let mut report = Report::new();
        let repos = self
            .gateway
            .list_team_repositories(&self.settings.team)
            .await?;

        for name in repos {
            match config.get(&name) {
                Some(access) => self.enforce_app_access(&name, access, &mut report).await?,
                None => report.record(Failure::MissingRepoConfig { repo: name }),
            }
        }

        info!(failures = report.failures().len(), "Finished configuring repositories");
        Ok(report)
    }

    async fn enforce_app_access(
        &self,
        name: &str,
        access: &RepoAccess,
        report: &mut Report,
    ) -> Result<(), Error> {
        if !access.app_enabled(DEPENDABOT_APP) {
            debug!(repo = name, "Dependabot not enabled");
            return Ok(());
        }

        let repo = self.gateway.get_repository(name).await?;
        if !repo.is_manageable() {
            debug!(
                repo = name,
                archived = repo.archived,
                admin = repo.admin,
                "Skipping repo"
            );
            return Ok(());
        }

        self.gateway
            .install_app(self.settings.app_id, &repo, report)
            .await?;

        let contents = self.gateway.get_contents(name).await?;
        for package_manager in self.manifests.classify(&contents) {
            self.registrar
                .register(&repo, &package_manager, report)
                .await?;
        }
        Ok(())
    }
}
