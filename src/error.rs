// src/error.rs

//! Unified error handling for the crawler application.

use std::fmt;

use thiserror::Error;

/// Result type alias for crawler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed (network error, timeout, or non-2xx status)
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Structured payload could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An expected structural element was absent from the source
    #[error("Not found: {0}")]
    NotFound(String),

    /// Extraction produced zero usable records
    #[error("No usable records extracted from source")]
    EmptyResult,

    /// Store scan, delete, or insert failed
    #[error("Store write error: {0}")]
    Write(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a store write error.
    pub fn write(message: impl fmt::Display) -> Self {
        Self::Write(message.to_string())
    }

    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// HTTP-style status code surfaced to the trigger caller.
    ///
    /// Missing source content maps to 404; everything else is a 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) | Self::EmptyResult => 404,
            _ => 500,
        }
    }
}
