use std::path::PathBuf;

/// Errors that can occur in client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Actuator addressing validation failed.
    #[error(transparent)]
    Map(#[from] vestlink_proto::MapError),

    /// Transport-level error (connection establishment).
    #[error("transport error: {0}")]
    Transport(#[from] vestlink_transport::TransportError),

    /// No live connection to the driver.
    #[error("not connected to the driver")]
    NotConnected,

    /// Message encoding failed.
    #[error("message encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// A pattern file could not be read.
    #[error("failed to read pattern file {path}: {source}")]
    PatternFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A pattern file is not valid JSON.
    #[error("pattern file {path} is not valid JSON: {source}")]
    PatternParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A pattern file parses but lacks a required section.
    #[error("pattern file {path} has no {missing} section")]
    PatternShape { path: PathBuf, missing: &'static str },
}

pub type Result<T> = std::result::Result<T, ClientError>;
