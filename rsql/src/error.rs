//! Error types for parser configuration and expression processing.

/// Raised while building a [`Parser`](crate::Parser), never during
/// processing. Configuration problems are fatal and surface before the
/// first expression is parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("AND-formatter is not defined")]
    MissingAndFormatter,

    #[error("OR-formatter is not defined")]
    MissingOrFormatter,

    #[error("invalid operator '{0}': operators must start with '=' or '!', end with '=', and contain no inner '=' or parentheses")]
    InvalidOperator(String),

    #[error("operator '{0}' is already registered")]
    DuplicateOperator(String),
}

/// Raised by [`Parser::process`](crate::Parser::process). Any failure aborts
/// the whole call with no partial result; the offending substring is carried
/// for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("number of opening and closing parentheses don't match in '{0}'")]
    MismatchedParentheses(String),

    #[error("'{0}' starts or ends with a separator")]
    EmptyBoundarySeparator(String),

    #[error("no separators given")]
    MissingSeparators,

    #[error("incomplete operation '{0}'")]
    IncompleteOperation(String),

    #[error("unknown operator '{operator}' in '{operation}'")]
    UnknownOperator { operator: String, operation: String },

    #[error("key '{0}' is not allowed")]
    KeyNotAllowed(String),
}
