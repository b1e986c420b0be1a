//! Entry entity - one catalog record per third-party MCP server

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::{Parameter, Transport};
use crate::templating::{extract_parameters, substitute_parameters, TemplateError};

/// A catalog entry: a transport template, its declared parameters, and
/// descriptive metadata.
///
/// Parameters are derived data. They are computed once at import (or
/// re-enrichment) time and persisted so installs never re-run extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,

    /// Unique slug, e.g. "github" or "io.github/notion-mcp"
    pub name: String,

    /// Display title
    pub title: String,

    pub description: Option<String>,

    /// Project homepage (used by enrichment to locate the README)
    pub homepage: Option<String>,

    /// Source repository URL
    pub repository: Option<String>,

    /// README markdown, filled in by enrichment
    pub readme: Option<String>,

    /// Transport template with placeholders
    pub transport: Transport,

    /// Declared parameters for `transport`
    #[serde(default)]
    pub parameters: Vec<Parameter>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Import payload for a new catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEntry {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
    pub transport: Transport,
    /// Hand-declared parameters. When absent they are extracted from `transport`.
    #[serde(default)]
    pub parameters: Option<Vec<Parameter>>,
}

impl NewEntry {
    pub fn new(name: impl Into<String>, transport: Transport) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            homepage: None,
            repository: None,
            transport,
            parameters: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_homepage(mut self, homepage: impl Into<String>) -> Self {
        self.homepage = Some(homepage.into());
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

impl Entry {
    /// Build an entry from an import payload, extracting parameters unless
    /// they were declared by hand.
    pub fn from_new(new: NewEntry) -> Self {
        let parameters = new
            .parameters
            .unwrap_or_else(|| extract_parameters(&new.transport));
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: new.title.unwrap_or_else(|| new.name.clone()),
            name: new.name,
            description: new.description,
            homepage: new.homepage,
            repository: new.repository,
            readme: None,
            transport: new.transport,
            parameters,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check the name and every declared parameter
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        for parameter in &self.parameters {
            parameter.validate().map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    /// Replace the transport template. Parameters are re-extracted unless
    /// `parameters` is given.
    pub fn set_transport(&mut self, transport: Transport, parameters: Option<Vec<Parameter>>) {
        self.parameters = parameters.unwrap_or_else(|| extract_parameters(&transport));
        self.transport = transport;
        self.touch();
    }

    /// Re-run extraction on the current template. HTTP templates keep their
    /// hand-declared parameters since extraction never finds any there.
    pub fn refresh_parameters(&mut self) {
        if matches!(self.transport, Transport::Stdio { .. }) {
            self.parameters = extract_parameters(&self.transport);
        }
        self.touch();
    }

    /// Resolve this entry's template with user-supplied values
    pub fn resolve(&self, values: &HashMap<String, String>) -> Result<Transport, TemplateError> {
        substitute_parameters(&self.transport, &self.parameters, values)
    }

    /// Names of parameters that must be supplied at install time
    pub fn required_parameters(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Entry names are lowercase slugs: `[a-z0-9._/-]`, not starting or ending with `/`
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("entry name must not be empty".to_string());
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-' | '/')))
    {
        return Err(format!("entry name '{}' contains invalid character '{}'", name, c));
    }
    if name.starts_with('/') || name.ends_with('/') {
        return Err(format!("entry name '{}' must not start or end with '/'", name));
    }
    Ok(())
}
