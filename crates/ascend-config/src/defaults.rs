//! Built-in configuration values.

/// Log level applied when neither file nor environment set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Listing after a successful move is on unless disabled.
pub const DEFAULT_LISTING_ENABLED: bool = true;
/// Dot-files are skipped unless requested.
pub const DEFAULT_SHOW_HIDDEN: bool = false;
