//! Mirrors local AWS credentials into TFE workspace variables.
//!
//! A sync reads the credentials, works out which variables already exist in
//! the workspace, optionally asks the operator to confirm, then creates or
//! updates each variable in order. Nothing is rolled back when a write fails
//! part way through.

pub mod plan;
pub mod prompt;

use std::io::Write;

use tracing::{info, warn};

use crate::aws::{AwsCredentials, CredentialSource};
use crate::error::Result;
use crate::tfe::{NewVariable, TfeClient, TfeSettings, Variable};
pub use prompt::{Prompter, RenderOptions, StdinPrompter};

/// One credential sync against one workspace.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub organization: String,
    pub workspace_name: String,
    pub primary_profile: String,
    pub secondary_profile: Option<String>,
    /// Ask for confirmation before writing.
    pub prompt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Cancelled,
    Applied { created: usize, updated: usize },
}

pub struct Syncer<W: Write> {
    settings: TfeSettings,
    credentials: Box<dyn CredentialSource>,
    prompter: Box<dyn Prompter>,
    render: RenderOptions,
    output: W,
}

impl<W: Write> Syncer<W> {
    pub fn new(
        settings: TfeSettings,
        credentials: Box<dyn CredentialSource>,
        prompter: Box<dyn Prompter>,
        render: RenderOptions,
        output: W,
    ) -> Self {
        Self {
            settings,
            credentials,
            prompter,
            render,
            output,
        }
    }

    /// Variables the workspace should end up with, none of them matched to a
    /// remote id yet.
    async fn desired_variables(&self, request: &SyncRequest) -> Result<Vec<Variable>> {
        let primary =
            AwsCredentials::load(self.credentials.as_ref(), &request.primary_profile).await?;
        let mut desired = plan::primary_variables(&primary);

        if let Some(profile) = &request.secondary_profile {
            let secondary = AwsCredentials::load(self.credentials.as_ref(), profile).await?;
            desired.extend(plan::secondary_variables(&secondary));
        }

        let duplicates = plan::duplicate_keys(&desired);
        if !duplicates.is_empty() {
            warn!(
                keys = ?duplicates,
                "Several credentials map to the same variable key"
            );
        }

        Ok(desired)
    }

    pub async fn update_tfe_credentials(&mut self, request: &SyncRequest) -> Result<SyncOutcome> {
        info!(
            organization = %request.organization,
            workspace = %request.workspace_name,
            profile = %request.primary_profile,
            secondary_profile = ?request.secondary_profile,
            "Starting credential sync"
        );

        let mut desired = self.desired_variables(request).await?;

        let mut tfe =
            TfeClient::connect(&self.settings, &request.organization, &request.workspace_name)
                .await?;
        plan::reconcile(&mut desired, tfe.variables().await?);

        // With a prompt the warning is part of the rendered plan.
        let warning = prompt::duplicate_warning(&desired).filter(|_| !request.prompt);
        if let Some(warning) = warning {
            self.output.write_all(warning.as_bytes())?;
        }

        if request.prompt {
            let question = prompt::render_plan(
                tfe.organization(),
                tfe.workspace_name(),
                &desired,
                self.render,
            );
            let answer = self.prompter.ask(&question)?;

            if !prompt::is_confirmation(&answer) {
                writeln!(self.output, "\nCanceling operations.")?;
                info!("Sync cancelled by operator");
                return Ok(SyncOutcome::Cancelled);
            }
        }

        writeln!(self.output)?;

        let mut created = 0;
        let mut updated = 0;
        for var in &desired {
            match var.id.as_deref().filter(|_| var.exists()) {
                Some(id) => {
                    let mut attributes = serde_json::Map::new();
                    attributes.insert("value".to_string(), var.value.clone().into());
                    tfe.update_variable(id, &attributes).await?;
                    writeln!(self.output, "Updated {}.", var.key)?;
                    updated += 1;
                }
                None => {
                    tfe.create_variable(&NewVariable::from(var)).await?;
                    writeln!(self.output, "Created {}.", var.key)?;
                    created += 1;
                }
            }
        }

        info!(created, updated, "Credential sync complete");
        Ok(SyncOutcome::Applied { created, updated })
    }
}
