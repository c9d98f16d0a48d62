// Shared utilities: errors, configuration, logging and version handling
pub mod config;
pub mod error;
pub mod logging;
pub mod version;
