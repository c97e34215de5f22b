//! Terminal confirmation gate.

use std::io::{self, BufRead, IsTerminal, Write};

use ascend_nav::{ConfirmGate, ConfirmationRequest};
use tracing::debug;

/// Asks on standard error and reads the answer from standard input.
///
/// Declines without asking when standard input is not a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TerminalPrompt;

impl ConfirmGate for TerminalPrompt {
    fn confirm(&self, request: &ConfirmationRequest) -> bool {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            debug!(request = %request, "standard input is not a terminal; declining");
            return false;
        }
        let mut input = stdin.lock();
        let mut output = io::stderr().lock();
        match ask(request, &mut input, &mut output) {
            Ok(answer) => answer,
            Err(error) => {
                debug!(error = %error, "failed to read confirmation answer");
                false
            }
        }
    }
}

/// Write `<action>: <description>? [y/N] ` and read one line.
pub(crate) fn ask(
    request: &ConfirmationRequest,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<bool> {
    write!(output, "{request}? [y/N] ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(is_affirmative(&line))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
