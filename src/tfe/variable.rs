use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Whether a workspace variable is exposed as a Terraform input or as a
/// process environment variable during runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Category {
    Terraform,
    Env,
}

impl Category {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Terraform => "terraform",
            Self::Env => "env",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "terraform" => Ok(Self::Terraform),
            "env" => Ok(Self::Env),
            other => Err(Error::validation(
                "<category>",
                format!("category must be one of 'terraform' or 'env'. Found '{other}'"),
            )),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Subset of the properties of a TFE workspace variable.
///
/// A variable without an `id` has not been matched to anything in the remote
/// workspace yet and will be created; one with an `id` will be updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub key: String,
    pub value: String,
    pub category: Category,
    pub id: Option<String>,
    pub description: String,
    pub sensitive: bool,
    pub hcl: bool,
}

impl Variable {
    pub fn new(key: impl Into<String>, value: impl Into<String>, category: Category) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            category,
            id: None,
            description: String::new(),
            sensitive: false,
            hcl: false,
        }
    }

    /// Build a variable from an untyped category name, failing with a
    /// validation error unless it is `terraform` or `env`.
    pub fn try_new(key: impl Into<String>, value: impl Into<String>, category: &str) -> Result<Self> {
        let key = key.into();
        let category = category.parse::<Category>().map_err(|err| match err {
            Error::Validation { message, .. } => Error::validation(key.clone(), message),
            other => other,
        })?;
        Ok(Self::new(key, value, category))
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn with_sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = sensitive;
        self
    }

    /// True once the variable carries a remote id.
    pub fn exists(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Identity comparison against the remote workspace.
    ///
    /// Two variables are the same remote object only when both carry an id and
    /// the ids are equal. Variables without ids never match, not even
    /// themselves, so this must not be used to deduplicate by key.
    pub fn same_remote(&self, other: &Self) -> bool {
        match (&self.id, &other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
