//! Errors that abort a run.
//!
//! Expected per-repository problems are not errors; they are recorded as
//! [`crate::Failure`]s and the run carries on.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("GitHub request failed: {0}")]
    GitHub(#[from] octocrab::Error),

    #[error("Dependabot request failed: {0}")]
    Dependabot(#[from] reqwest::Error),

    #[error("Failed to deserialize response: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("Access token is not a valid header value")]
    InvalidToken,

    #[error("Team `{team}` not found in organization `{org}`")]
    TeamNotFound { org: String, team: String },

    #[error("Unexpected status {status} from {url}: {body}")]
    UnexpectedStatus { url: String, status: u16, body: String },
}
