//! Error types for dispatch-time failures.
//!
//! Only synchronous precondition failures live here. Faults raised by the
//! work itself are [`crate::TaskFault`] values and never leave the crate as errors.

use thiserror::Error;
use tokio::runtime::TryCurrentError;

/// Result alias for dispatcher operations.
pub type TaskResult<T> = Result<T, TaskError>;

/// Errors returned synchronously by the dispatcher.
#[derive(Debug, Error)]
pub enum TaskError {
    /// A required argument was absent or unusable.
    #[error("invalid argument")]
    InvalidArgument {
        /// Argument that failed validation.
        field: &'static str,
        /// Static reason for the failure.
        reason: &'static str,
    },
    /// No tokio runtime was available to dispatch onto.
    #[error("no async runtime available")]
    NoRuntime {
        /// Underlying tokio error.
        source: TryCurrentError,
    },
}
