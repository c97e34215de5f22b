//! `ascend up` (alias `..`): move the session to its parent directory.

use std::io::Write;
use std::path::Path;

use ascend_nav::{
    ConfirmGate, DirEntrySummary, DirectoryLister, NavigationOutcome, NavigationSession,
};
use tracing::warn;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};
use crate::output::{UpReport, render_up};

/// Run one navigate-up attempt and render its outcome.
///
/// `lister` is only consulted after a successful move. A listing failure is
/// logged and the move is still reported.
pub(crate) fn handle_up(
    session: &mut NavigationSession,
    gate: &dyn ConfirmGate,
    lister: Option<&dyn DirectoryLister>,
    format: OutputFormat,
    out: &mut impl Write,
) -> CliResult<NavigationOutcome> {
    let from = session.current().to_path_buf();
    let outcome = session.navigate_up(gate).map_err(|err| {
        let target = err
            .path()
            .map_or_else(|| "its parent".to_string(), |path| path.display().to_string());
        let context = format!("cannot move from {} to {target}", from.display());
        CliError::failure(anyhow::Error::new(err).context(context))
    })?;

    let entries = match (&outcome, lister) {
        (NavigationOutcome::Navigated(location), Some(lister)) => list_quietly(lister, location),
        _ => None,
    };

    let report = UpReport {
        outcome: outcome.as_str(),
        from: &from,
        location: session.current(),
        entries: entries.as_deref(),
    };
    render_up(&report, format, out)?;
    Ok(outcome)
}

fn list_quietly(
    lister: &dyn DirectoryLister,
    location: &Path,
) -> Option<Vec<DirEntrySummary>> {
    match lister.list(location) {
        Ok(entries) => Some(entries),
        Err(err) => {
            warn!(error = %err, path = %location.display(), "failed to list new location");
            None
        }
    }
}
