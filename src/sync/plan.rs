use std::collections::BTreeSet;

use crate::aws::AwsCredentials;
use crate::tfe::{Category, Variable};

const PRIMARY_DESCRIPTION: &str = "AWS provider credentials.";
const SECONDARY_DESCRIPTION: &str = "AWS commercial account credentials.";

/// Environment variables read by the AWS provider during runs.
pub fn primary_variables(creds: &AwsCredentials) -> Vec<Variable> {
    vec![
        Variable::new("AWS_ACCESS_KEY_ID", &creds.access_key_id, Category::Env)
            .with_description(PRIMARY_DESCRIPTION),
        Variable::new("AWS_SECRET_ACCESS_KEY", &creds.secret_access_key, Category::Env)
            .with_description(PRIMARY_DESCRIPTION)
            .with_sensitive(true),
        Variable::new("AWS_SESSION_TOKEN", &creds.session_token, Category::Env)
            .with_description(PRIMARY_DESCRIPTION)
            .with_sensitive(true),
    ]
}

/// Terraform variables for a second provider configured against a commercial
/// account, used by GovCloud workspaces.
///
/// The access key and the secret key are both written to
/// `aws_commercial_access_key`; [`duplicate_keys`] reports it.
pub fn secondary_variables(creds: &AwsCredentials) -> Vec<Variable> {
    vec![
        Variable::new("aws_commercial_access_key", &creds.access_key_id, Category::Terraform)
            .with_description(SECONDARY_DESCRIPTION),
        Variable::new(
            "aws_commercial_access_key",
            &creds.secret_access_key,
            Category::Terraform,
        )
        .with_description(SECONDARY_DESCRIPTION)
        .with_sensitive(true),
        Variable::new("aws_commercial_session_token", &creds.session_token, Category::Terraform)
            .with_description(SECONDARY_DESCRIPTION)
            .with_sensitive(true),
    ]
}

/// Keys that appear more than once in `variables`, in sorted order.
pub fn duplicate_keys(variables: &[Variable]) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for var in variables {
        if !seen.insert(var.key.as_str()) {
            duplicates.insert(var.key.as_str());
        }
    }
    duplicates.into_iter().collect()
}

/// Copy the id of the first remote variable with a matching key onto each
/// desired variable. Desired variables without a remote counterpart keep
/// their current id.
pub fn reconcile(desired: &mut [Variable], remote: &[Variable]) {
    for var in desired {
        if let Some(existing) = remote.iter().find(|r| r.key == var.key) {
            var.id.clone_from(&existing.id);
        }
    }
}
