#![forbid(unsafe_code)]
#![deny(
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Detached background work that never fails into its caller.
//!
//! Layout: `work.rs` (units of work), `outcome.rs` (fault classification),
//! `sink.rs` (diagnostic sinks), `dispatcher.rs` (`TaskDispatcher`).
//!
//! # Threading
//!
//! Error handlers and sinks run on whichever runtime worker finishes the
//! supervising task. They are never guaranteed to run on the thread that
//! called [`TaskDispatcher::run_detached`]; anything they touch must be
//! `Send + Sync` safe.
//!
//! # Limits
//!
//! There is no join point: tasks cannot be awaited or cancelled, run in no
//! particular order, and may be dropped if the runtime shuts down first.
//! Callers that need completion must hold a `JoinHandle` themselves.

pub mod dispatcher;
pub mod error;
pub mod outcome;
pub mod sink;
pub mod work;

pub use dispatcher::{ErrorHandler, TaskDispatcher};
pub use error::{TaskError, TaskResult};
pub use outcome::{TaskFault, TaskOutcome};
pub use sink::{DiagnosticSink, StderrSink, TracingSink};
pub use work::Work;
