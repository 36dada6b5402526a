//! Thin client over the GitHub REST API.
//!
//! Requests go through `octocrab`'s raw `_get`/`_put` so that status codes stay visible:
//! a missing listing (404) and a failed installation (anything but 204) are expected
//! outcomes here, not errors. Retries are disabled: every call is issued exactly once.

use async_trait::async_trait;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::report::{Failure, Report};
use crate::{ContentEntry, Error, Repository};

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

const PER_PAGE: u32 = 100;

#[async_trait]
pub trait RepositoryGateway: Send + Sync {
    /// Names of the repositories the given team has access to.
    async fn list_team_repositories(&self, team: &str) -> Result<Vec<String>, Error>;

    async fn get_repository(&self, name: &str) -> Result<Repository, Error>;

    /// Root directory listing. A repository without any files yields an empty listing.
    async fn get_contents(&self, name: &str) -> Result<Vec<ContentEntry>, Error>;

    /// Adds `repo` to the app installation. A rejected request is recorded in `report`.
    async fn install_app(
        &self,
        app_id: u64,
        repo: &Repository,
        report: &mut Report,
    ) -> Result<(), Error>;
}

#[derive(Deserialize)]
struct TeamResponse {
    name: String,
    slug: String,
}

#[derive(Deserialize)]
struct TeamRepositoryResponse {
    name: String,
}

#[derive(Deserialize, Default)]
struct RepositoryResponse {
    id: Option<u64>,
    name: Option<String>,
    archived: Option<bool>,
    permissions: Option<PermissionsResponse>,
}

#[derive(Deserialize)]
struct PermissionsResponse {
    #[serde(default)]
    admin: bool,
}

pub struct GitHubGateway {
    client: Octocrab,
    base_url: String,
    org: String,
}

impl GitHubGateway {
    pub fn new(token: &str, org: &str) -> Result<Self, Error> {
        Self::with_base_url(token, org, DEFAULT_GITHUB_API_URL)
    }

    pub fn with_base_url(token: &str, org: &str, base_url: &str) -> Result<Self, Error> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let mut builder = octocrab::OctocrabBuilder::new();
        builder.add_retry_config(RetryConfig::None);
        let client = builder
            .base_uri(base_url.as_str())?
            .personal_token(token.to_string())
            .build()?;
        Ok(Self {
            client,
            base_url,
            org: org.to_string(),
        })
    }

    async fn fetch(&self, url: &str) -> Result<(u16, String), Error> {
        let response = self.client._get(url.to_string()).await?;
        let status = response.status().as_u16();
        let body = self.client.body_to_string(response).await?;
        Ok((status, body))
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        let (status, body) = self.fetch(url).await?;
        if !is_success(status) {
            return Err(Error::UnexpectedStatus {
                url: url.to_string(),
                status,
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl RepositoryGateway for GitHubGateway {
    #[instrument(skip(self), fields(org = %self.org))]
    async fn list_team_repositories(&self, team: &str) -> Result<Vec<String>, Error> {
        let teams: Vec<TeamResponse> = self
            .fetch_json(&format!(
                "{}/orgs/{}/teams?per_page={PER_PAGE}",
                self.base_url, self.org
            ))
            .await?;
        let team = teams
            .into_iter()
            .find(|t| t.name == team || t.slug == team)
            .ok_or_else(|| Error::TeamNotFound {
                org: self.org.clone(),
                team: team.to_string(),
            })?;

        let repos: Vec<TeamRepositoryResponse> = self
            .fetch_json(&format!(
                "{}/orgs/{}/teams/{}/repos?per_page={PER_PAGE}",
                self.base_url, self.org, team.slug
            ))
            .await?;
        info!(
            team = %team.name,
            repo_count = repos.len(),
            "Retrieved team repositories"
        );
        Ok(repos.into_iter().map(|repo| repo.name).collect())
    }

    async fn get_repository(&self, name: &str) -> Result<Repository, Error> {
        info!(repo = name, "Getting repo");
        let (status, body) = self
            .fetch(&format!("{}/repos/{}/{}", self.base_url, self.org, name))
            .await?;
        if !is_success(status) {
            warn!(repo = name, status, "Repository lookup was not successful");
        }
        let response: RepositoryResponse = if body.trim().is_empty() {
            RepositoryResponse::default()
        } else {
            serde_json::from_str(&body)?
        };

        Ok(Repository {
            id: response.id,
            name: response.name.unwrap_or_else(|| name.to_string()),
            archived: response.archived.unwrap_or(false),
            admin: response.permissions.map(|p| p.admin).unwrap_or(false),
        })
    }

    async fn get_contents(&self, name: &str) -> Result<Vec<ContentEntry>, Error> {
        let (status, body) = self
            .fetch(&format!(
                "{}/repos/{}/{}/contents",
                self.base_url, self.org, name
            ))
            .await?;
        match status {
            404 => {
                info!(repo = name, "Repo has no content");
                Ok(vec![])
            }
            status if is_success(status) => Ok(serde_json::from_str(&body)?),
            status => {
                warn!(repo = name, status, body = %body, "Failed to list repo contents");
                Ok(vec![])
            }
        }
    }

    async fn install_app(
        &self,
        app_id: u64,
        repo: &Repository,
        report: &mut Report,
    ) -> Result<(), Error> {
        let Some(repo_id) = repo.id else {
            report.record(Failure::Installation {
                repo: repo.name.clone(),
                reason: "repository has no id".to_string(),
            });
            return Ok(());
        };

        info!(repo = %repo.name, app_id, "Installing app on repo");
        let url = format!(
            "{}/user/installations/{app_id}/repositories/{repo_id}",
            self.base_url
        );
        let response = self.client._put(url, None::<&()>).await?;
        let status = response.status().as_u16();
        if status == 204 {
            debug!(repo = %repo.name, "App installed");
        } else {
            report.record(Failure::Installation {
                repo: repo.name.clone(),
                reason: format!("status {status}"),
            });
        }
        Ok(())
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
