//! Completion classification for detached work.

use std::any::Any;
use std::fmt::{self, Display, Formatter};

use tokio::task::JoinError;

/// Failure captured from a detached unit of work.
#[derive(Debug)]
pub enum TaskFault {
    /// The work returned an error.
    Error(anyhow::Error),
    /// The work panicked; `message` is the unwrapped panic payload.
    Panicked {
        /// Panic payload rendered as text.
        message: String,
    },
}

impl TaskFault {
    /// The original error, when the work returned one.
    #[must_use]
    pub const fn error(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Error(error) => Some(error),
            Self::Panicked { .. } => None,
        }
    }
}

impl Display for TaskFault {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(error) => write!(formatter, "{error:#}"),
            Self::Panicked { message } => write!(formatter, "panicked: {message}"),
        }
    }
}

/// How a detached unit of work finished.
#[derive(Debug)]
pub enum TaskOutcome {
    /// Completed without error.
    Succeeded,
    /// Returned an error or panicked.
    Faulted(TaskFault),
    /// Stopped by the runtime before completing.
    Cancelled,
}

impl TaskOutcome {
    /// Classify the joined result of a spawned task.
    ///
    /// A panic arrives wrapped in a [`JoinError`]; that single layer is
    /// removed so handlers see the panic payload itself.
    #[must_use]
    pub fn from_join(result: Result<anyhow::Result<()>, JoinError>) -> Self {
        match result {
            Ok(Ok(())) => Self::Succeeded,
            Ok(Err(error)) => Self::Faulted(TaskFault::Error(error)),
            Err(join) if join.is_panic() => Self::Faulted(TaskFault::Panicked {
                message: panic_message(join.into_panic()),
            }),
            Err(_) => Self::Cancelled,
        }
    }

    /// Stable label used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Faulted(_) => "faulted",
            Self::Cancelled => "cancelled",
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    payload
        .downcast::<String>()
        .map(|message| *message)
        .or_else(|payload| payload.downcast::<&'static str>().map(|message| (*message).to_string()))
        .unwrap_or_else(|_| "non-string panic payload".to_string())
}
