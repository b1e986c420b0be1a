use thiserror::Error;

/// Errors raised while resolving a transport template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A required parameter had no (or an empty) value
    #[error("missing required parameter '{name}'")]
    MissingParameter { name: String },

    /// A declared parameter is malformed
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },
}

impl TemplateError {
    /// Name of the parameter this error refers to, if any
    pub fn parameter_name(&self) -> Option<&str> {
        match self {
            TemplateError::MissingParameter { name } => Some(name),
            TemplateError::InvalidParameter { .. } => None,
        }
    }
}
