//! Diagnostic sink that captures lines for assertions.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use ascend_tasks::DiagnosticSink;
use tokio::sync::Notify;

/// Sink that stores every reported line and wakes waiters.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    lines: Mutex<Vec<String>>,
    notify: Notify,
}

impl RecordingSink {
    /// Empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines reported so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match self.inner.lines.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Wait until at least `count` lines arrived or `timeout` elapsed, then
    /// return whatever was captured.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> Vec<String> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let lines = self.lines();
            if lines.len() >= count {
                return lines;
            }
            if tokio::time::timeout_at(deadline, self.inner.notify.notified())
                .await
                .is_err()
            {
                return self.lines();
            }
        }
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, line: &str) {
        match self.inner.lines.lock() {
            Ok(mut guard) => guard.push(line.to_string()),
            Err(poisoned) => poisoned.into_inner().push(line.to_string()),
        }
        self.inner.notify.notify_one();
    }
}
