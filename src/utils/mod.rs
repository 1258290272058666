//! Utility modules for common functionality
//!
//! - `progress`: progress bars whose fill is colored by log level

pub mod progress;
