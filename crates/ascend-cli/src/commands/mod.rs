//! Command handlers.

pub(crate) mod up;
