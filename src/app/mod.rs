//! Application wiring: configuration and logging setup. Kept thin: the
//! orchestrator and its adapters don't depend on anything in here.

mod config;

pub use config::{Config, LoggingConfig};
