//! Logging utilities
//!
//! This module provides logging setup using the `log` crate with
//! `env_logger` as the backend.
//!
//! # Example
//!
//! ```rust
//! use gpkg_rows::utils::Logger;
//!
//! Logger::init();
//! log::info!("catalog loaded");
//! ```

use log::LevelFilter;

/// Logging setup
pub struct Logger;

impl Logger {
    /// Initialize the logger at `Info`
    ///
    /// `RUST_LOG` still applies on top of the default level. Calling this
    /// more than once is harmless; only the first call installs a logger.
    pub fn init() {
        Self::init_with_level(LevelFilter::Info);
    }

    /// Initialize logger with custom log level
    ///
    /// # Arguments
    /// * `level` - Log level filter
    pub fn init_with_level(level: LevelFilter) {
        let result = env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .try_init();
        if let Err(e) = result {
            // A logger is already installed; keep it
            log::debug!("Logger already initialized: {}", e);
        }
    }

    /// Log level for a CLI verbosity count
    ///
    /// # Arguments
    /// * `verbose` - Number of `-v` flags
    pub fn level_for(verbose: u8) -> LevelFilter {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
