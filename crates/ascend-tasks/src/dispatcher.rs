//! Fire-and-forget dispatch onto a tokio runtime.
//!
//! # Design
//! - `run_detached` validates, spawns, and returns; it never awaits the work.
//! - A supervisor task owns the work's `JoinHandle` and routes the outcome:
//!   faults go to the caller's handler or, failing that, the diagnostic sink.
//! - Cancelled work is logged and otherwise ignored.

use std::borrow::Cow;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::error::{TaskError, TaskResult};
use crate::outcome::{TaskFault, TaskOutcome};
use crate::sink::{DiagnosticSink, StderrSink};
use crate::work::{Work, WorkKind};

/// Callback that receives a detached task's fault, at most once.
///
/// Runs on a runtime worker thread, not on the thread that dispatched the work.
pub type ErrorHandler = Box<dyn FnOnce(TaskFault) + Send + 'static>;

/// Spawns detached work on a runtime and contains its failures.
#[derive(Clone)]
pub struct TaskDispatcher {
    handle: Handle,
    sink: Arc<dyn DiagnosticSink>,
}

impl TaskDispatcher {
    /// Dispatcher on `handle` reporting unhandled faults to standard error.
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            sink: Arc::new(StderrSink),
        }
    }

    /// Dispatcher on the runtime the caller is running in.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NoRuntime`] when called outside a tokio runtime.
    pub fn current() -> TaskResult<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|source| TaskError::NoRuntime { source })
    }

    /// Replace the sink used for faults that have no handler.
    #[must_use]
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Schedule `work` without waiting for it.
    ///
    /// Returns as soon as the work is spawned. When the work faults, `on_error`
    /// is called exactly once with the unwrapped fault; without a handler one
    /// line is written to the diagnostic sink. Success produces no output.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidArgument`] when `work` is `None`; nothing is
    /// scheduled in that case.
    pub fn run_detached(
        &self,
        work: Option<Work>,
        on_error: Option<ErrorHandler>,
    ) -> TaskResult<()> {
        let Work { kind, label } = work.ok_or(TaskError::InvalidArgument {
            field: "work",
            reason: "a unit of work is required",
        })?;

        let join: JoinHandle<anyhow::Result<()>> = match kind {
            WorkKind::Async(start) => self.handle.spawn(async move { start().await }),
            WorkKind::Blocking(run) => self.handle.spawn_blocking(run),
        };
        trace!(task = %label, "detached task scheduled");

        let sink = Arc::clone(&self.sink);
        drop(self.handle.spawn(supervise(label, join, on_error, sink)));
        Ok(())
    }
}

impl Debug for TaskDispatcher {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TaskDispatcher")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

async fn supervise(
    label: Cow<'static, str>,
    join: JoinHandle<anyhow::Result<()>>,
    on_error: Option<ErrorHandler>,
    sink: Arc<dyn DiagnosticSink>,
) {
    let outcome = TaskOutcome::from_join(join.await);
    let state = outcome.as_str();
    match outcome {
        TaskOutcome::Succeeded => trace!(task = %label, outcome = state, "detached task finished"),
        TaskOutcome::Cancelled => {
            debug!(task = %label, outcome = state, "detached task stopped before completion");
        }
        TaskOutcome::Faulted(fault) => route_fault(&label, fault, on_error, sink.as_ref()),
    }
}

fn route_fault(
    label: &str,
    fault: TaskFault,
    on_error: Option<ErrorHandler>,
    sink: &dyn DiagnosticSink,
) {
    match on_error {
        Some(handler) => {
            debug!(task = %label, fault = %fault, "routing detached task fault to handler");
            handler(fault);
        }
        None => sink.report(&format!("background task {label} failed: {fault}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    #[derive(Default)]
    struct VecSink {
        lines: Mutex<Vec<String>>,
    }

    impl DiagnosticSink for Arc<VecSink> {
        fn report(&self, line: &str) {
            if let Ok(mut guard) = self.lines.lock() {
                guard.push(line.to_string());
            }
        }
    }

    #[test]
    fn current_requires_runtime() {
        assert!(matches!(
            TaskDispatcher::current(),
            Err(TaskError::NoRuntime { .. })
        ));
    }

    #[tokio::test]
    async fn absent_work_is_rejected_before_scheduling() -> anyhow::Result<()> {
        let dispatcher = TaskDispatcher::current()?;
        let (tx, rx) = oneshot::channel::<String>();
        let handler: ErrorHandler = Box::new(move |fault: TaskFault| {
            let _ = tx.send(fault.to_string());
        });

        let result = dispatcher.run_detached(None, Some(handler));

        assert!(matches!(
            result,
            Err(TaskError::InvalidArgument { field: "work", .. })
        ));
        assert!(rx.await.is_err(), "handler must be dropped unused");
        Ok(())
    }

    #[tokio::test]
    async fn handler_receives_original_error() -> anyhow::Result<()> {
        let dispatcher = TaskDispatcher::current()?;
        let (tx, rx) = oneshot::channel::<TaskFault>();
        dispatcher.run_detached(
            Some(Work::new(|| async {
                Err::<(), _>(std::io::Error::other("disk full"))
            })),
            Some(Box::new(move |fault: TaskFault| {
                let _ = tx.send(fault);
            })),
        )?;

        let fault = rx.await?;
        let error = fault.error().ok_or_else(|| anyhow!("expected error fault"))?;
        assert!(error.downcast_ref::<std::io::Error>().is_some());
        assert_eq!(fault.to_string(), "disk full");
        Ok(())
    }

    #[test]
    fn route_fault_without_handler_writes_one_line() {
        let sink = Arc::new(VecSink::default());
        route_fault(
            "indexer",
            TaskFault::Error(anyhow!("disk full")),
            None,
            &Arc::clone(&sink),
        );
        let lines = sink.lines.lock().map(|guard| guard.clone()).unwrap_or_default();
        assert_eq!(lines, vec!["background task indexer failed: disk full".to_string()]);
    }
}
