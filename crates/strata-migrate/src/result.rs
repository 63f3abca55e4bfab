//! Migration run outcomes.

use crate::change::Change;
use crate::error::MigrateError;

/// Outcome of one migration run: success with the applied changes, or
/// failure with the changes applied so far, the change that failed, and the
/// underlying error.
///
/// Already-applied DDL is never rolled back — DDL is frequently
/// non-transactional — so a failed result enumerates exactly how far the
/// run got, letting the caller reconcile the partial state before retrying
/// the remainder.
#[derive(Debug)]
pub enum MigrationResult {
    /// Every change was applied.
    Success {
        /// Changes applied, in execution order.
        applied: Vec<Change>,
    },
    /// A change failed; nothing after it was attempted.
    Failure {
        /// Changes applied before the failure, in execution order.
        applied: Vec<Change>,
        /// The change that failed.
        failed: Change,
        /// The underlying error.
        error: MigrateError,
    },
}

impl MigrationResult {
    /// Returns whether the run applied every change.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the changes applied before the run ended.
    #[must_use]
    pub fn applied(&self) -> &[Change] {
        match self {
            Self::Success { applied } | Self::Failure { applied, .. } => applied,
        }
    }

    /// Returns the failing change, if the run failed.
    #[must_use]
    pub const fn failed_change(&self) -> Option<&Change> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { failed, .. } => Some(failed),
        }
    }

    /// Returns the underlying error, if the run failed.
    #[must_use]
    pub const fn error(&self) -> Option<&MigrateError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }
}
