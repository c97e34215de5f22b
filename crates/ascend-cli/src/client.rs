//! CLI error type and outcome telemetry.

use std::fmt::{self, Display, Formatter};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use reqwest::Client;
use serde::Serialize;
use url::Url;

const TELEMETRY_TIMEOUT: Duration = Duration::from_secs(2);

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Posts command outcomes to a collector.
#[derive(Debug, Clone)]
pub(crate) struct TelemetryEmitter {
    pub(crate) client: Client,
    pub(crate) endpoint: Url,
}

impl TelemetryEmitter {
    /// Emitter for `endpoint`, or `None` when telemetry is off or the client
    /// cannot be built.
    #[must_use]
    pub(crate) fn from_endpoint(endpoint: Option<Url>) -> Option<Self> {
        let endpoint = endpoint?;
        let client = Client::builder().timeout(TELEMETRY_TIMEOUT).build().ok()?;
        Some(Self { client, endpoint })
    }

    pub(crate) async fn send(&self, event: &TelemetryEvent) -> anyhow::Result<()> {
        self.client
            .post(self.endpoint.clone())
            .json(event)
            .send()
            .await
            .context("telemetry request failed")?
            .error_for_status()
            .context("telemetry collector rejected event")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TelemetryEvent {
    pub(crate) command: &'static str,
    pub(crate) outcome: &'static str,
    pub(crate) trace_id: String,
    pub(crate) exit_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
    pub(crate) timestamp_ms: u64,
}

/// Millisecond timestamp helper for telemetry.
#[must_use]
pub(crate) fn timestamp_now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use httpmock::MockServer;
    use httpmock::prelude::*;

    fn event() -> TelemetryEvent {
        TelemetryEvent {
            command: "up",
            outcome: "navigated",
            trace_id: "trace".to_string(),
            exit_code: 0,
            message: None,
            timestamp_ms: timestamp_now_ms(),
        }
    }

    #[test]
    fn cli_error_exit_codes_and_messages() {
        let validation = CliError::validation("bad flag");
        assert_eq!(validation.exit_code(), 2);
        assert_eq!(validation.display_message(), "bad flag");

        let failure = CliError::failure(anyhow!("inner").context("outer"));
        assert_eq!(failure.exit_code(), 3);
        assert_eq!(failure.display_message(), "outer: inner");
        assert_eq!(failure.to_string(), "cli error");
    }

    #[test]
    fn emitter_requires_endpoint() -> Result<()> {
        assert!(TelemetryEmitter::from_endpoint(None).is_none());
        let endpoint: Url = "http://127.0.0.1:9/events".parse()?;
        let emitter = TelemetryEmitter::from_endpoint(Some(endpoint.clone()))
            .ok_or_else(|| anyhow!("expected emitter"))?;
        assert_eq!(emitter.endpoint, endpoint);
        Ok(())
    }

    #[test]
    fn event_omits_absent_message() -> Result<()> {
        let value = serde_json::to_value(event())?;
        assert_eq!(value["command"], "up");
        assert_eq!(value["outcome"], "navigated");
        assert_eq!(value["exit_code"], 0);
        assert!(value.get("message").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn telemetry_emitter_posts_event() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/events")
                .header("content-type", "application/json");
            then.status(204);
        });

        let emitter = TelemetryEmitter {
            client: Client::new(),
            endpoint: format!("{}/events", server.base_url()).parse()?,
        };
        emitter.send(&event()).await?;

        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn collector_errors_surface() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/events");
            then.status(500);
        });

        let emitter = TelemetryEmitter {
            client: Client::new(),
            endpoint: format!("{}/events", server.base_url()).parse()?,
        };
        let err = emitter
            .send(&event())
            .await
            .err()
            .ok_or_else(|| anyhow!("expected collector error"))?;
        assert!(format!("{err:#}").contains("rejected"));
        Ok(())
    }
}
