//! Approval gate consulted before a session changes location.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

/// Action label attached to every location-change request.
pub const CHANGE_LOCATION_ACTION: &str = "Change location";

/// Human-readable description of a pending state change plus its action label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    /// Description of the change, e.g. `from '/a/b' to '/a'`.
    pub description: String,
    /// Short label naming the action being approved.
    pub action: &'static str,
}

impl ConfirmationRequest {
    /// Request approval to move from `from` to `to`.
    #[must_use]
    pub fn change_location(from: &Path, to: &Path) -> Self {
        Self {
            description: format!("from '{}' to '{}'", from.display(), to.display()),
            action: CHANGE_LOCATION_ACTION,
        }
    }
}

impl Display for ConfirmationRequest {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.action, self.description)
    }
}

/// Capability that approves or denies a state-changing action.
///
/// Hosts decide whether a real prompt is shown; batch and force modes supply
/// [`AutoApprove`].
pub trait ConfirmGate {
    /// Return `true` to let the action proceed.
    fn confirm(&self, request: &ConfirmationRequest) -> bool;
}

/// Gate that approves every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

impl ConfirmGate for AutoApprove {
    fn confirm(&self, _request: &ConfirmationRequest) -> bool {
        true
    }
}

/// Gate that denies every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoDeny;

impl ConfirmGate for AutoDeny {
    fn confirm(&self, _request: &ConfirmationRequest) -> bool {
        false
    }
}

impl<F> ConfirmGate for F
where
    F: Fn(&ConfirmationRequest) -> bool,
{
    fn confirm(&self, request: &ConfirmationRequest) -> bool {
        self(request)
    }
}
