//! Error types for BVPlayer
//!
//! This module defines custom error types used throughout the application.
//! We use thiserror for convenient error type definitions and anyhow for
//! application-level error handling.

use thiserror::Error;

/// Main error type for BVPlayer
#[derive(Error, Debug)]
pub enum PlayerError {
    /// Window-related errors
    #[error("Window error: {0}")]
    Window(String),

    /// Media backend errors
    #[error("Backend error: {0}")]
    Backend(String),

    /// Playlist errors
    #[error("Playlist error: {0}")]
    Playlist(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("File error: {0}")]
    FileIO(#[from] std::io::Error),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),
}

/// Convenience type alias for Results in BVPlayer
pub type Result<T> = std::result::Result<T, PlayerError>;

/// Extension trait for converting other errors to PlayerError
pub trait IntoPlayerError<T> {
    /// Convert this error into a PlayerError with the given context
    fn window_err(self, context: &str) -> Result<T>;
    fn backend_err(self, context: &str) -> Result<T>;
    fn config_err(self, context: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> IntoPlayerError<T> for std::result::Result<T, E> {
    fn window_err(self, context: &str) -> Result<T> {
        self.map_err(|e| PlayerError::Window(format!("{}: {}", context, e)))
    }

    fn backend_err(self, context: &str) -> Result<T> {
        self.map_err(|e| PlayerError::Backend(format!("{}: {}", context, e)))
    }

    fn config_err(self, context: &str) -> Result<T> {
        self.map_err(|e| PlayerError::Config(format!("{}: {}", context, e)))
    }
}
