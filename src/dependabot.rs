//! Registers update configs with the Dependabot API.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CACHE_CONTROL};
use serde::Serialize;
use tracing::info;

use crate::report::{Failure, Report};
use crate::{Error, Repository};

#[cfg(test)]
#[path = "dependabot_tests.rs"]
mod tests;

pub const DEFAULT_DEPENDABOT_API_URL: &str = "https://api.dependabot.com";

#[async_trait]
pub trait UpdateRegistrar: Send + Sync {
    /// Registers a daily update schedule for one package manager of `repo`.
    /// Rejections are recorded in `report`; an existing config counts as success.
    async fn register(
        &self,
        repo: &Repository,
        package_manager: &str,
        report: &mut Report,
    ) -> Result<(), Error>;
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct UpdateConfigRequest<'a> {
    #[serde(rename = "repo-id")]
    pub repo_id: Option<u64>,
    #[serde(rename = "package-manager")]
    pub package_manager: &'a str,
    #[serde(rename = "update-schedule")]
    pub update_schedule: &'a str,
    pub directory: &'a str,
    #[serde(rename = "account-id")]
    pub account_id: &'a str,
    #[serde(rename = "account-type")]
    pub account_type: &'a str,
}

impl<'a> UpdateConfigRequest<'a> {
    pub fn daily(repo: &Repository, package_manager: &'a str, account_id: &'a str) -> Self {
        Self {
            repo_id: repo.id,
            package_manager,
            update_schedule: "daily",
            directory: "/",
            account_id,
            account_type: "org",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Created,
    AlreadyExists,
    Rejected { status: u16, body: String },
}

impl RegistrationOutcome {
    pub fn from_response(status: u16, body: &str) -> Self {
        match status {
            201 => Self::Created,
            400 if body.contains("already exists") => Self::AlreadyExists,
            _ => Self::Rejected {
                status,
                body: body.to_string(),
            },
        }
    }
}

pub struct DependabotClient {
    client: reqwest::Client,
    url: String,
    account_id: String,
}

impl DependabotClient {
    pub fn new(token: &str, account_id: &str) -> Result<Self, Error> {
        Self::with_base_url(token, account_id, DEFAULT_DEPENDABOT_API_URL)
    }

    pub fn with_base_url(token: &str, account_id: &str, base_url: &str) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut authorization = HeaderValue::from_str(&format!("Personal {token}"))
            .map_err(|_| Error::InvalidToken)?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/update_configs", base_url.trim_end_matches('/')),
            account_id: account_id.to_string(),
        })
    }
}

#[async_trait]
impl UpdateRegistrar for DependabotClient {
    async fn register(
        &self,
        repo: &Repository,
        package_manager: &str,
        report: &mut Report,
    ) -> Result<(), Error> {
        info!(
            repo = %repo.name,
            package_manager,
            "Dependabot: Updating config"
        );
        let request = UpdateConfigRequest::daily(repo, package_manager, &self.account_id);
        let response = self.client.post(&self.url).json(&request).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        match RegistrationOutcome::from_response(status, &body) {
            RegistrationOutcome::Created => {
                info!(repo = %repo.name, package_manager, "Config added");
            }
            RegistrationOutcome::AlreadyExists => {
                info!(repo = %repo.name, package_manager, "Config already exists");
            }
            RegistrationOutcome::Rejected { status, body } => {
                report.record(Failure::Registration {
                    repo: repo.name.clone(),
                    package_manager: package_manager.to_string(),
                    status,
                    body,
                });
            }
        }
        Ok(())
    }
}
