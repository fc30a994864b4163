//! Utilities module
//!
//! - `logger`: Logging setup for the library and CLI

pub mod logger;

// Re-export main types for convenience
pub use logger::Logger;
