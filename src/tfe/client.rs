use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::tfe::models::{
    CreateData, CreateRequest, Document, NewVariable, UpdateData, UpdateRequest, VARS_TYPE,
    VariableResource, WorkspaceResource,
};
use crate::tfe::variable::Variable;

const JSON_API: &str = "application/vnd.api+json";

/// Attributes `update_variable` accepts.
pub const UPDATABLE_ATTRIBUTES: &[&str] =
    &["key", "value", "description", "category", "hcl", "sensitive"];

/// Where and how to reach the TFE API.
#[derive(Clone)]
pub struct TfeSettings {
    pub api_url: String,
    pub token: String,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for TfeSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfeSettings")
            .field("api_url", &self.api_url)
            .field("token", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Client for the workspace variable subset of the Terraform Cloud/Enterprise
/// API, bound to a single workspace.
///
/// The underlying HTTP session is owned by this value and closed when it is
/// dropped.
#[derive(Debug)]
pub struct TfeClient {
    http: Client,
    api_url: String,
    organization: String,
    workspace_name: String,
    workspace_id: String,
    variables: Option<Vec<Variable>>,
}

impl TfeClient {
    /// Open a session and resolve `workspace_name` inside `organization`.
    pub async fn connect(
        settings: &TfeSettings,
        organization: impl Into<String>,
        workspace_name: impl Into<String>,
    ) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", settings.token))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_API));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        let mut client = Self {
            http: builder.build()?,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            organization: organization.into(),
            workspace_name: workspace_name.into(),
            workspace_id: String::new(),
            variables: None,
        };
        client.workspace_id = client.resolve_workspace().await?;
        info!(
            organization = %client.organization,
            workspace = %client.workspace_name,
            workspace_id = %client.workspace_id,
            "Resolved TFE workspace"
        );

        Ok(client)
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn workspace_name(&self) -> &str {
        &self.workspace_name
    }

    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    /// Search the organization and keep the single workspace whose name is an
    /// exact match. The search endpoint matches substrings, so the first
    /// result is not necessarily the requested workspace.
    async fn resolve_workspace(&self) -> Result<String> {
        let url = format!("{}/organizations/{}/workspaces", self.api_url, self.organization);
        debug!(%url, workspace = %self.workspace_name, "Searching workspaces");

        let response = self
            .http
            .get(&url)
            .query(&[("search[name]", self.workspace_name.as_str())])
            .send()
            .await?;
        let doc: Document<Vec<WorkspaceResource>> = read_json(
            response,
            || format!("Unable to list workspaces in '{}'", self.organization),
        )
        .await?;

        let results = doc.data.len();
        let mut matches: Vec<WorkspaceResource> = doc
            .data
            .into_iter()
            .filter(|ws| ws.attributes.name == self.workspace_name)
            .collect();

        match matches.len() {
            0 => Err(Error::WorkspaceNotFound {
                organization: self.organization.clone(),
                workspace: self.workspace_name.clone(),
                results,
            }),
            1 => Ok(matches.remove(0).id),
            n => Err(Error::AmbiguousWorkspace {
                organization: self.organization.clone(),
                workspace: self.workspace_name.clone(),
                matches: n,
            }),
        }
    }

    fn vars_url(&self) -> String {
        format!("{}/workspaces/{}/vars", self.api_url, self.workspace_id)
    }

    /// All variables in the workspace.
    ///
    /// Fetched on first access and cached; see [`Self::refresh_variables`].
    pub async fn variables(&mut self) -> Result<&[Variable]> {
        if self.variables.is_none() {
            self.variables = Some(self.load_variables().await?);
        }
        Ok(self.variables.as_deref().unwrap_or_default())
    }

    /// Drop the cached variable list and fetch it again.
    pub async fn refresh_variables(&mut self) -> Result<&[Variable]> {
        self.variables = None;
        self.variables().await
    }

    async fn load_variables(&self) -> Result<Vec<Variable>> {
        let url = self.vars_url();
        debug!(%url, "Listing workspace variables");

        let response = self.http.get(&url).send().await?;
        let doc: Document<Vec<VariableResource>> = read_json(response, || {
            format!(
                "Unable to get list of variables in workspace '{}' in '{}'",
                self.workspace_name, self.organization
            )
        })
        .await?;

        debug!(count = doc.data.len(), "Loaded workspace variables");
        Ok(doc.data.into_iter().map(Variable::from).collect())
    }

    /// Create a variable in the workspace.
    pub async fn create_variable(&self, attributes: &NewVariable) -> Result<Variable> {
        let url = self.vars_url();
        debug!(%url, key = %attributes.key, "Creating workspace variable");

        let body = serde_json::to_vec(&CreateRequest {
            data: CreateData {
                kind: VARS_TYPE,
                attributes,
            },
        })?;

        let response = self.http.post(&url).body(body).send().await?;
        let doc: Document<VariableResource> = read_json(response, || {
            format!(
                "Unable to create workspace variable '{}' in {}/{}",
                attributes.key, self.organization, self.workspace_name
            )
        })
        .await?;

        Ok(doc.data.into())
    }

    /// Update the variable `id` with a subset of attributes.
    ///
    /// Every key of `attributes` must be listed in [`UPDATABLE_ATTRIBUTES`];
    /// otherwise nothing is sent.
    pub async fn update_variable(
        &self,
        id: &str,
        attributes: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Variable> {
        if let Some(attribute) = attributes
            .keys()
            .find(|key| !UPDATABLE_ATTRIBUTES.contains(&key.as_str()))
        {
            return Err(Error::InvalidAttribute {
                attribute: attribute.clone(),
                valid: UPDATABLE_ATTRIBUTES,
            });
        }

        let url = format!("{}/{id}", self.vars_url());
        debug!(%url, "Updating workspace variable");

        let body = serde_json::to_vec(&UpdateRequest {
            data: UpdateData {
                id,
                kind: VARS_TYPE,
                attributes,
            },
        })?;

        let response = self.http.patch(&url).body(body).send().await?;
        let doc: Document<VariableResource> = read_json(response, || {
            format!(
                "Unable to update workspace variable '{id}' in '{}/{}'",
                self.organization, self.workspace_name
            )
        })
        .await?;

        Ok(doc.data.into())
    }
}

/// Decode a successful response body, or turn a failed one into
/// [`Error::Response`] carrying the status and body text.
async fn read_json<T, F>(response: Response, context: F) -> Result<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> String,
{
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(Error::Response {
            message: context(),
            status,
            body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}
