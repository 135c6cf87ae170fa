//! Error types for the event study

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// PNG encoding failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Configuration file could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Configuration values out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A required column is absent from the header
    #[error("Missing column '{column}' in {}", path.display())]
    MissingColumn { column: String, path: PathBuf },

    /// A date cell could not be parsed
    #[error("Line {line}: cannot parse date '{value}'")]
    InvalidDate { line: u64, value: String },

    /// A close cell could not be parsed
    #[error("Line {line}: cannot parse close price '{value}'")]
    InvalidClose { line: u64, value: String },

    /// Input file has no data rows
    #[error("No data rows in {}", .0.display())]
    EmptyInput(PathBuf),

    /// Derived column does not line up with the table
    #[error("Column length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

impl Error {
    /// Check if the error comes from malformed input data rather than the environment
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Error::MissingColumn { .. }
                | Error::InvalidDate { .. }
                | Error::InvalidClose { .. }
                | Error::EmptyInput(_)
        )
    }
}
