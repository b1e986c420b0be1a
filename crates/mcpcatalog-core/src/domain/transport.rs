//! Transport templates - how to launch or reach an MCP server

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::templating::placeholder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportType {
    Stdio,
    Http,
}

impl std::fmt::Display for TransportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportType::Stdio => write!(f, "stdio"),
            TransportType::Http => write!(f, "http"),
        }
    }
}

/// Launch or connection descriptor for an MCP server.
///
/// The same type carries both the catalog *template* (with placeholders such
/// as `<api-key>` or `YOUR_API_KEY`) and the *resolved* transport handed to a
/// workspace after substitution.
///
/// Environment variables and headers are kept in ordered maps so that
/// extraction walks them in a stable (key) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transport {
    Stdio {
        command: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default)]
        env: BTreeMap<String, String>,
    },
    Http {
        url: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        headers: BTreeMap<String, String>,
    },
}

impl Transport {
    /// Create a stdio transport with no environment
    pub fn stdio<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Transport::Stdio {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
            env: BTreeMap::new(),
        }
    }

    /// Create an HTTP transport with no headers
    pub fn http(url: impl Into<String>) -> Self {
        Transport::Http {
            url: url.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Add an environment variable (no-op for HTTP transports)
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Transport::Stdio { env, .. } = &mut self {
            env.insert(key.into(), value.into());
        }
        self
    }

    /// Add a header (no-op for stdio transports)
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Transport::Http { headers, .. } = &mut self {
            headers.insert(key.into(), value.into());
        }
        self
    }

    pub fn transport_type(&self) -> TransportType {
        match self {
            Transport::Stdio { .. } => TransportType::Stdio,
            Transport::Http { .. } => TransportType::Http,
        }
    }

    /// Get URL for HTTP transports
    pub fn url(&self) -> Option<&str> {
        match self {
            Transport::Http { url, .. } => Some(url),
            Transport::Stdio { .. } => None,
        }
    }

    /// Every bracketed placeholder (`<name>`) still present in the transport,
    /// in field order. An empty result means nothing bracketed is left to fill.
    pub fn placeholders(&self) -> Vec<String> {
        let mut found = Vec::new();
        match self {
            Transport::Stdio { command, args, env } => {
                found.extend(placeholder::bracketed_tokens(command));
                for arg in args {
                    found.extend(placeholder::bracketed_tokens(arg));
                }
                for value in env.values() {
                    found.extend(placeholder::bracketed_tokens(value));
                }
            }
            Transport::Http { url, headers } => {
                found.extend(placeholder::bracketed_tokens(url));
                for value in headers.values() {
                    found.extend(placeholder::bracketed_tokens(value));
                }
            }
        }
        found
    }

    /// Short description for logging
    pub fn description(&self) -> String {
        match self {
            Transport::Stdio { command, args, .. } => {
                format!("stdio: {} ({} args)", command, args.len())
            }
            Transport::Http { url, .. } => format!("http: {}", url),
        }
    }
}
