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

//! Parent-directory navigation for a single session.
//!
//! Layout: `path.rs` (lexical parent computation), `confirm.rs` (approval
//! gate), `location.rs` (backends that apply a location change),
//! `session.rs` (`NavigationSession::navigate_up`), `listing.rs` (directory
//! listing collaborator invoked by hosts after a successful move).
//!
//! The session owns its current location. Nothing here reads or writes the
//! process working directory unless the host opts into [`ProcessLocation`].

pub mod confirm;
pub mod error;
pub mod listing;
pub mod location;
pub mod path;
pub mod session;

pub use confirm::{AutoApprove, AutoDeny, CHANGE_LOCATION_ACTION, ConfirmGate, ConfirmationRequest};
pub use error::{NavError, NavResult};
pub use listing::{DirEntrySummary, DirectoryLister, EntryKind, WalkdirLister};
pub use location::{LocationBackend, ProcessLocation, VerifiedLocation};
pub use path::{normalize, parent_of};
pub use session::{NavigationOutcome, NavigationSession};
