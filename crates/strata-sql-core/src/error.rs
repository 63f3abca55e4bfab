//! Error types for query building and dialect translation.

/// Errors raised by the query builders and dialect drivers.
///
/// Every capability gap is a distinct, named failure so callers can tell
/// "this construct is not expressible in this dialect" apart from "the
/// database rejected valid SQL".
#[derive(Debug, thiserror::Error)]
pub enum SqlError {
    /// The dialect cannot express the requested construct.
    #[error("operation '{operation}' is not supported by the {dialect} dialect")]
    NotSupported {
        /// Dialect name.
        dialect: &'static str,
        /// The operation that was requested.
        operation: &'static str,
    },

    /// A declared type or argument does not match the operation's contract.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// A composite query was mutated in a way only its members support.
    #[error("cannot call '{operation}' on a UNION query; configure the member SELECTs instead")]
    CompositionMisuse {
        /// The operation that was rejected.
        operation: &'static str,
    },
}

impl SqlError {
    /// Creates a not-supported error.
    #[must_use]
    pub const fn not_supported(dialect: &'static str, operation: &'static str) -> Self {
        Self::NotSupported { dialect, operation }
    }

    /// Creates a precondition-violation error.
    #[must_use]
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }
}

/// Result type for query building and dialect translation.
pub type Result<T> = std::result::Result<T, SqlError>;
