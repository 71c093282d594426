//! Shared plumbing for the two binaries.

pub mod envelope;
pub mod exit;
pub mod logging;
pub mod query;
pub mod request;
pub mod settings;
pub mod signal;
