//! Process-level span context.

use tracing::{Span, field, span::Entered};

use crate::init::build_sha;

/// Keeps the command-level span entered for the lifetime of the guard.
pub struct GlobalContextGuard {
    _guard: Entered<'static>,
}

impl GlobalContextGuard {
    /// Enter a span carrying `command` and the build SHA.
    ///
    /// The span has an empty `outcome` field filled in by [`record_outcome`].
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        let command = command.into();
        let span: &'static Span = Box::leak(Box::new(tracing::info_span!(
            "ascend",
            command = %command,
            build_sha = %build_sha(),
            outcome = field::Empty,
        )));
        Self {
            _guard: span.enter(),
        }
    }
}

/// Record the command outcome on the active span.
pub fn record_outcome(outcome: &str) {
    Span::current().record("outcome", field::display(outcome));
}
