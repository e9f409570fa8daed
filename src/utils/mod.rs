//! Utility module for BVPlayer
//!
//! This module provides common utilities used throughout the application:
//! - Error handling with custom error types
//! - Configuration management
//! - Common helper functions

pub mod config;
pub mod error;

// Re-export commonly used items
pub use config::{Config, GeneralConfig, PlaybackConfig, WindowConfig};
pub use error::{PlayerError, Result};

/// Format a duration for display
///
/// Returns "HH:MM:SS" or "MM:SS" for durations under an hour.
pub fn format_duration(duration: std::time::Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Format a media timestamp given in milliseconds
pub fn format_timestamp_ms(ms: u64) -> String {
    format_duration(std::time::Duration::from_millis(ms))
}
