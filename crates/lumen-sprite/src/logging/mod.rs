//! Logging utilities.
//!
//! Renderers only talk to the `log` facade; this module owns the one place
//! where an `env_logger` backend gets installed.

mod init;

pub use init::{init_logging, LoggingConfig};
