//! tfe-creds - copy AWS CLI profile credentials into Terraform Cloud/Enterprise
//! workspace variables.
//!
//! ```bash
//! # Plan, confirm, then write AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY and
//! # AWS_SESSION_TOKEN into the workspace
//! tfe-creds -o my-org -w my-workspace -p my-profile
//!
//! # Also write commercial account credentials as Terraform variables,
//! # without prompting
//! tfe-creds -o my-org -w my-workspace -p govcloud -s commercial --yes
//! ```

pub mod aws;
pub mod cli;
pub mod config;
pub mod error;
pub mod sync;
pub mod tfe;

pub use error::{Error, Result};
