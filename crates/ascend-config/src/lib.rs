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

//! Layered configuration for `ascend`.
//!
//! Layout: `defaults.rs` (built-in values), `model.rs` (typed settings and the
//! on-disk document), `validate.rs` (parsing helpers shared by the file and
//! environment layers), `loader.rs` (`ConfigLoader` applying defaults, file,
//! then environment).

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    ConfigLoader, ENV_ASSUME_YES, ENV_CONFIG, ENV_LIST, ENV_LOG_FORMAT, ENV_LOG_LEVEL,
    ENV_SHOW_HIDDEN, ENV_TELEMETRY_ENDPOINT,
};
pub use model::{
    AppConfig, ConfigDocument, ConfirmPolicy, ListingSettings, LogFormatSetting, LoggingSettings,
};
pub use validate::flag_value;
