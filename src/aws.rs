//! Reading credentials for a named profile out of the local AWS CLI
//! configuration.

use std::fmt;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

pub const ACCESS_KEY_ID: &str = "aws_access_key_id";
pub const SECRET_ACCESS_KEY: &str = "aws_secret_access_key";
pub const SESSION_TOKEN: &str = "aws_session_token";

/// Source of individual AWS configuration values.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Read a single configuration value for `profile`.
    async fn read_config(&self, profile: &str, key: &str) -> Result<String>;
}

/// Reads values with `aws --profile <profile> configure get <key>`.
#[derive(Debug, Clone)]
pub struct AwsCli {
    program: String,
}

impl AwsCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for AwsCli {
    fn default() -> Self {
        Self::new("aws")
    }
}

#[async_trait]
impl CredentialSource for AwsCli {
    async fn read_config(&self, profile: &str, key: &str) -> Result<String> {
        debug!(program = %self.program, %profile, %key, "Reading AWS configuration value");

        let output = Command::new(&self.program)
            .args(["--profile", profile, "configure", "get", key])
            .output()
            .await
            .map_err(|err| Error::Cli(format!("failed to run '{}': {err}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Cli(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// The three values making up a set of (usually temporary) AWS credentials.
#[derive(Clone)]
pub struct AwsCredentials {
    pub profile: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
}

impl AwsCredentials {
    pub async fn load(source: &dyn CredentialSource, profile: &str) -> Result<Self> {
        Ok(Self {
            profile: profile.to_string(),
            access_key_id: source.read_config(profile, ACCESS_KEY_ID).await?,
            secret_access_key: source.read_config(profile, SECRET_ACCESS_KEY).await?,
            session_token: source.read_config(profile, SESSION_TOKEN).await?,
        })
    }
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("profile", &self.profile)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .field("session_token", &"[REDACTED]")
            .finish()
    }
}
