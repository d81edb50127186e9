pub mod loader;

use std::time::Duration;

pub use loader::load;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://terraform.nimbis.io/api/v2";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TfeConfig {
    /// Base URL of the TFE API, including the `/api/v2` prefix.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout. Requests wait indefinitely when unset.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl TfeConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for TfeConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsConfig {
    /// AWS CLI executable used to read profile values.
    #[serde(default = "default_program")]
    pub program: String,
}

fn default_program() -> String {
    "aws".to_string()
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub tfe: TfeConfig,
    #[serde(default)]
    pub aws: AwsConfig,
}
