//! Logging setup.
//!
//! Extraction reports degraded attributes through the `log` facade
//! (`warn` for substituted defaults and rejected values, `debug` for cache
//! and registry activity). Hosts without a backend of their own can install
//! `env_logger` here.

mod init;

pub use init::{init_logging, LoggingConfig};
