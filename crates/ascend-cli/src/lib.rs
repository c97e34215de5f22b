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
#![allow(clippy::redundant_pub_crate)]

//! Command line front end for parent-directory navigation.
//!
//! Layout:
//! - `cli.rs`: argument parsing, configuration, dispatch, outcome telemetry
//! - `commands/`: command handlers
//! - `client.rs`: CLI error type and the telemetry emitter
//! - `prompt.rs`: terminal confirmation gate
//! - `output.rs`: table and JSON renderers
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod commands;
pub(crate) mod output;
pub(crate) mod prompt;

pub use cli::run;
