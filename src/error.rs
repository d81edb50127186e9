use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The AWS CLI failed or could not be started.
    #[error("AWS CLI error: {0}")]
    Cli(String),

    /// The TFE API answered with a non-success status.
    #[error("TFE Client Error: {message}\nResponse code: {status}\nError: {body}")]
    Response {
        message: String,
        status: StatusCode,
        body: String,
    },

    #[error("Invalid attribute: {attribute}. Valid attributes are {}", .valid.join(", "))]
    InvalidAttribute {
        attribute: String,
        valid: &'static [&'static str],
    },

    #[error("API token cannot be used as an HTTP header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("TFEVariable {key}: {message}")]
    Validation { key: String, message: String },

    #[error("No workspace named '{workspace}' in '{organization}' ({results} search results)")]
    WorkspaceNotFound {
        organization: String,
        workspace: String,
        results: usize,
    },

    #[error("Workspace name '{workspace}' matches {matches} workspaces in '{organization}'")]
    AmbiguousWorkspace {
        organization: String,
        workspace: String,
        matches: usize,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode TFE response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn validation(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            key: key.into(),
            message: message.into(),
        }
    }
}
