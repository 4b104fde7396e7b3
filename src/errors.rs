//! Error types for document import and export.

use thiserror::Error;

/// Result type alias for apidraft operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for apidraft operations
///
/// Mutation operations on the document are total and never produce an
/// error; everything here is raised at the import or export boundary and
/// leaves the current document untouched.
#[derive(Debug, Error)]
pub enum Error {
    /// Input is not syntactically valid YAML or JSON
    #[error("input is not valid YAML or JSON: {0}")]
    Parse(String),

    /// Input parsed but does not have the minimal OpenAPI document shape
    #[error("invalid OpenAPI document: field={field} message={message}")]
    InvalidShape { field: String, message: String },

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Creates a new parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse(message.into())
    }

    /// Creates a new shape error for the given top-level field
    pub fn invalid_shape(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidShape {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if the error is an import rejection (as opposed to a
    /// serializer failure)
    pub fn is_import_rejection(&self) -> bool {
        matches!(self, Error::Parse(_) | Error::InvalidShape { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::parse("unexpected end of stream");
        assert_eq!(
            err.to_string(),
            "input is not valid YAML or JSON: unexpected end of stream"
        );

        let err = Error::invalid_shape("paths", "must be a mapping");
        assert!(err.to_string().contains("field=paths"));
        assert!(err.to_string().contains("must be a mapping"));
    }

    #[test]
    fn test_import_rejection() {
        assert!(Error::parse("bad").is_import_rejection());
        assert!(Error::invalid_shape("info.title", "must be a string").is_import_rejection());
    }
}
