//! Error types for shelfseed operations

use thiserror::Error;

/// Result type alias using shelfseed's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for shelfseed operations
#[derive(Error, Debug)]
pub enum Error {
    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// Font could not be loaded or parsed
    #[error("Font error: {0}")]
    Font(String),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The catalog store cannot be used at all
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A single book record is malformed
    #[error("Invalid record {isbn:?}: {reason}")]
    InvalidRecord {
        /// ISBN of the offending record
        isbn: String,
        /// What is wrong with it
        reason: String,
    },

    /// Seed list could not be read or parsed
    #[error("Seed data error: {0}")]
    SeedData(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(format!("JSON error: {}", e))
    }
}
