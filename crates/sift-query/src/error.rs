//! Error types for filter translation.

use thiserror::Error;

/// Errors produced while translating a filter document.
///
/// Translation is all-or-nothing: both variants are fatal to the current
/// call and no partial query tree is ever returned alongside them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The filter document, or one of its values, has the wrong shape.
    #[error("invalid filter format: {message}")]
    InvalidFormat { message: String },

    /// A constraint name with no registered handler.
    #[error("unsupported constraint `{name}`")]
    InvalidConstraint { name: String },
}

impl FilterError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    pub(crate) fn constraint(name: impl Into<String>) -> Self {
        Self::InvalidConstraint { name: name.into() }
    }
}

/// Result type for filter translation.
pub type Result<T> = std::result::Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_format_display() {
        let err = FilterError::format("age: expected an array of values, received string");
        assert_eq!(
            err.to_string(),
            "invalid filter format: age: expected an array of values, received string"
        );
    }

    #[test]
    fn test_invalid_constraint_display() {
        let err = FilterError::constraint("foo");
        assert_eq!(err.to_string(), "unsupported constraint `foo`");
    }
}
