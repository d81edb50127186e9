//! JSON:API documents exchanged with the TFE workspace and variable endpoints.

use serde::{Deserialize, Serialize};

use crate::tfe::variable::{Category, Variable};

pub const VARS_TYPE: &str = "vars";

#[derive(Debug, Deserialize)]
pub struct Document<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct WorkspaceResource {
    pub id: String,
    pub attributes: WorkspaceAttributes,
}

#[derive(Debug, Deserialize)]
pub struct WorkspaceAttributes {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct VariableResource {
    pub id: String,
    pub attributes: VariableAttributes,
}

/// Attributes of a variable as returned by the API.
///
/// Sensitive variables are returned with a `null` value and descriptions are
/// `null` when never set.
#[derive(Debug, Deserialize)]
pub struct VariableAttributes {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default)]
    pub hcl: bool,
}

impl From<VariableResource> for Variable {
    fn from(resource: VariableResource) -> Self {
        let attrs = resource.attributes;
        Self {
            key: attrs.key,
            value: attrs.value.unwrap_or_default(),
            category: attrs.category,
            id: Some(resource.id),
            description: attrs.description.unwrap_or_default(),
            sensitive: attrs.sensitive,
            hcl: attrs.hcl,
        }
    }
}

/// Attributes for a new variable.
#[derive(Debug, Clone, Serialize)]
pub struct NewVariable {
    pub key: String,
    pub value: String,
    pub description: String,
    pub category: Category,
    pub hcl: bool,
    pub sensitive: bool,
}

impl From<&Variable> for NewVariable {
    fn from(var: &Variable) -> Self {
        Self {
            key: var.key.clone(),
            value: var.value.clone(),
            description: var.description.clone(),
            category: var.category,
            hcl: var.hcl,
            sensitive: var.sensitive,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateRequest<'a> {
    pub data: CreateData<'a>,
}

#[derive(Debug, Serialize)]
pub struct CreateData<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attributes: &'a NewVariable,
}

#[derive(Debug, Serialize)]
pub struct UpdateRequest<'a> {
    pub data: UpdateData<'a>,
}

#[derive(Debug, Serialize)]
pub struct UpdateData<'a> {
    pub id: &'a str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attributes: &'a serde_json::Map<String, serde_json::Value>,
}
