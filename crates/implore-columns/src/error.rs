//! Error types for column selection
//!
//! Every error is raised at evaluation time. Selectors are schema-agnostic
//! until they meet a concrete schema view, so the same expression may fail
//! against one schema and succeed against another.

use thiserror::Error;

/// Errors raised while evaluating a selector against a schema view
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// A literal or range endpoint names a column the schema does not have
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A positional selector addresses a position past the end of the schema
    #[error("Position {index} out of bounds for schema of {size} columns")]
    OutOfBounds { index: usize, size: usize },

    /// A strict membership selector requested columns that do not exist
    #[error(
        "Selector `{selector}` called with non-existent columns: {}.",
        .missing.join(", ")
    )]
    MissingColumns {
        selector: &'static str,
        missing: Vec<String>,
    },

    /// A rename mapping references source columns that do not exist
    #[error(
        "Selector `rename` called with non-existent columns: {}.",
        .missing.join(", ")
    )]
    RenameMissing { missing: Vec<String> },

    /// A `matches` pattern is not a valid regular expression
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl SelectError {
    /// Names of the missing columns carried by this error, if any
    pub fn missing_columns(&self) -> &[String] {
        match self {
            SelectError::MissingColumns { missing, .. } | SelectError::RenameMissing { missing } => {
                missing
            }
            SelectError::ColumnNotFound(name) => std::slice::from_ref(name),
            _ => &[],
        }
    }
}

/// Result type for selection
pub type SelectResult<T> = Result<T, SelectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message() {
        let err = SelectError::MissingColumns {
            selector: "all_of",
            missing: vec!["z".to_string(), "q".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Selector `all_of` called with non-existent columns: z, q."
        );
        assert_eq!(err.missing_columns(), ["z".to_string(), "q".to_string()]);
    }

    #[test]
    fn test_rename_message() {
        let err = SelectError::RenameMissing {
            missing: vec!["z".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Selector `rename` called with non-existent columns: z."
        );
    }

    #[test]
    fn test_out_of_bounds_has_no_missing_columns() {
        let err = SelectError::OutOfBounds { index: 4, size: 4 };
        assert!(err.missing_columns().is_empty());
    }
}
