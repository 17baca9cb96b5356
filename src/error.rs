//! Error types for the booth_scan library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for booth_scan operations
pub type Result<T> = std::result::Result<T, DetectionError>;

/// Error types for booth detection operations
///
/// Finding zero booths is not an error: the pipeline returns an empty
/// [`DetectionResult`](crate::DetectionResult) in that case.
#[derive(Error, Debug)]
pub enum DetectionError {
    /// Input bytes could not be decoded as a raster image
    #[error("Failed to decode image: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Image file could not be read from disk
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded or holds invalid values
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// OpenCV operation failed
    #[cfg(feature = "opencv")]
    #[error("OpenCV error: {operation}")]
    OpenCv {
        operation: String,
        #[source]
        source: opencv::Error,
    },
}

impl DetectionError {
    /// Create a decode error with an underlying cause
    pub fn decode<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a decode error without an underlying cause
    pub fn decode_msg(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error without an underlying cause
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with an underlying cause
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an OpenCV error with context
    #[cfg(feature = "opencv")]
    pub fn opencv(operation: impl Into<String>, source: opencv::Error) -> Self {
        Self::OpenCv {
            operation: operation.into(),
            source,
        }
    }

    /// Check if this error means the input bytes were not a usable image
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, DetectionError::Decode { .. })
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            DetectionError::Decode { .. } => {
                "Could not read the floor plan. Please upload a PNG or JPEG image.".to_string()
            }
            DetectionError::Io { path, .. } => {
                format!("Could not open '{}'. Please check the path.", path.display())
            }
            DetectionError::Config { message, .. } => {
                format!("Detection settings are invalid: {}", message)
            }
            #[cfg(feature = "opencv")]
            DetectionError::OpenCv { .. } => {
                "Booth detection failed. Please try with a different image.".to_string()
            }
        }
    }
}
