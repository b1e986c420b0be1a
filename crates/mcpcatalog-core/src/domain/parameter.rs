//! Parameter - a user-fillable slot within a transport template

use serde::{Deserialize, Serialize};

use crate::templating::TemplateError;

/// Where in the transport a placeholder was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterScope {
    Args,
    Env,
}

impl ParameterScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterScope::Args => "args",
            ParameterScope::Env => "env",
        }
    }
}

/// Value type of a parameter. Only strings exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    #[default]
    String,
}

/// A declared placeholder that must be given a value before a transport can run.
///
/// Extracted parameters are always required. Hand-authored entries may mark a
/// parameter optional, in which case a missing value resolves to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Lookup key for the user-supplied value
    pub name: String,
    pub scope: ParameterScope,
    /// Operator hint; for env parameters this is the template value (e.g. `<notion-token>`)
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub r#type: ParameterType,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl Parameter {
    /// Required args-scope parameter with an empty description
    pub fn args(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: ParameterScope::Args,
            description: String::new(),
            r#type: ParameterType::String,
            required: true,
        }
    }

    /// Required env-scope parameter
    pub fn env(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: ParameterScope::Env,
            description: description.into(),
            r#type: ParameterType::String,
            required: true,
        }
    }

    /// Mark as optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.name.trim().is_empty() {
            return Err(TemplateError::InvalidParameter {
                reason: format!("{} parameter has an empty name", self.scope.as_str()),
            });
        }
        Ok(())
    }
}
