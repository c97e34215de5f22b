//! Deterministic confirmation gate that records what it was asked.

use std::sync::{Arc, Mutex};

use ascend_nav::{ConfirmGate, ConfirmationRequest};

/// Gate with a fixed answer that remembers every request.
#[derive(Debug, Clone)]
pub struct RecordingGate {
    answer: bool,
    requests: Arc<Mutex<Vec<ConfirmationRequest>>>,
}

impl RecordingGate {
    /// Gate that approves everything.
    #[must_use]
    pub fn approving() -> Self {
        Self::answering(true)
    }

    /// Gate that denies everything.
    #[must_use]
    pub fn denying() -> Self {
        Self::answering(false)
    }

    fn answering(answer: bool) -> Self {
        Self {
            answer,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Requests seen so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ConfirmationRequest> {
        match self.requests.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ConfirmGate for RecordingGate {
    fn confirm(&self, request: &ConfirmationRequest) -> bool {
        match self.requests.lock() {
            Ok(mut guard) => guard.push(request.clone()),
            Err(poisoned) => poisoned.into_inner().push(request.clone()),
        }
        self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn records_requests_and_answers() {
        let gate = RecordingGate::denying();
        let request = ConfirmationRequest::change_location(Path::new("/a/b"), Path::new("/a"));
        assert!(!gate.confirm(&request));
        assert!(RecordingGate::approving().confirm(&request));
        assert_eq!(gate.requests(), vec![request]);
    }
}
