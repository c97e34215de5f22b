//! Default destinations for faults that arrive without a handler.

use std::io::{self, Write};

use tracing::{debug, error};

/// Line-oriented output for background diagnostics.
///
/// Called from runtime worker threads.
pub trait DiagnosticSink: Send + Sync {
    /// Write one diagnostic line.
    fn report(&self, line: &str);
}

/// Writes each line to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn report(&self, line: &str) {
        let mut stderr = io::stderr().lock();
        if let Err(err) = writeln!(stderr, "{line}") {
            debug!(error = %err, "failed to write diagnostic line");
        }
    }
}

/// Emits each line as a `tracing` error event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, line: &str) {
        error!(diagnostic = %line, "background task fault");
    }
}
