//! Logging utilities.
//!
//! Centralizes logger initialization. Everything else in the crate logs
//! through the standard `log` facade; script console output lands under
//! the `script` target.

mod init;

pub use init::{init_default, init_logging, LoggingConfig};
