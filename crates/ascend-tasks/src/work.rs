//! Units of detached work.

use std::borrow::Cow;
use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::pin::Pin;

type WorkFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

pub(crate) enum WorkKind {
    Async(Box<dyn FnOnce() -> WorkFuture + Send>),
    Blocking(Box<dyn FnOnce() -> anyhow::Result<()> + Send>),
}

/// A unit of work the dispatcher runs without blocking its caller.
///
/// Nothing runs until the work is dispatched; the closure body executes on a
/// runtime worker (or the blocking pool for [`Work::blocking`]).
pub struct Work {
    pub(crate) kind: WorkKind,
    pub(crate) label: Cow<'static, str>,
}

impl Work {
    const DEFAULT_LABEL: &'static str = "detached";

    /// Async work: `f` produces the future to run.
    pub fn new<F, Fut, E>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<anyhow::Error> + Send + 'static,
    {
        Self {
            kind: WorkKind::Async(Box::new(move || -> WorkFuture {
                Box::pin(async move { f().await.map_err(Into::<anyhow::Error>::into) })
            })),
            label: Cow::Borrowed(Self::DEFAULT_LABEL),
        }
    }

    /// Synchronous work executed on the runtime's blocking pool.
    pub fn blocking<F, E>(f: F) -> Self
    where
        F: FnOnce() -> Result<(), E> + Send + 'static,
        E: Into<anyhow::Error> + Send + 'static,
    {
        Self {
            kind: WorkKind::Blocking(Box::new(move || -> anyhow::Result<()> {
                f().map_err(Into::into)
            })),
            label: Cow::Borrowed(Self::DEFAULT_LABEL),
        }
    }

    /// Attach a label used in logs and default diagnostics.
    #[must_use]
    pub fn named(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    /// Label attached to this work.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Debug for Work {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            WorkKind::Async(_) => "async",
            WorkKind::Blocking(_) => "blocking",
        };
        formatter
            .debug_struct("Work")
            .field("label", &self.label)
            .field("kind", &kind)
            .finish_non_exhaustive()
    }
}
