// src/error.rs

//! Unified error handling for the feed.

use std::fmt;

use thiserror::Error;

/// Result type alias for feed operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
///
/// Every variant except a failed token attempt aborts the run.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the vendor API
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Token acquisition gave up after the configured attempts
    #[error("Authentication failed after {attempts} attempt(s)")]
    Auth { attempts: u32 },

    /// Vendor status outside AVAILABLE / BOOKED / SOLD
    #[error("Unknown sale status '{0}'")]
    UnknownStatus(String),

    /// Apartment attribute not covered by the feature rules
    #[error("New feature '{name}'")]
    UnknownFeature { name: String },

    /// Listing references a house missing from the commissioning index
    #[error("No commissioning entry for house {house_id} (listing {listing_id})")]
    MissingCommissioning { house_id: u64, listing_id: u64 },

    /// A page came back empty before the reported total was reached
    #[error(
        "Pagination stalled for '{alias}' at offset {offset}: fetched {fetched} of {expected}"
    )]
    StalledPagination {
        alias: String,
        offset: usize,
        fetched: usize,
        expected: usize,
    },

    /// Price text that cannot be read as a decimal amount
    #[error("Invalid price '{value}' in field '{field}'")]
    InvalidPrice { field: String, value: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an invalid price error.
    pub fn invalid_price(field: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::InvalidPrice {
            field: field.into(),
            value: value.to_string(),
        }
    }
}
