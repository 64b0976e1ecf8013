use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to bind {endpoint}: {source}")]
    Bind {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Pipe endpoint {0} exists and is not a socket")]
    EndpointNotSocket(String),

    #[error("Pipe endpoint {0} is already served by another process")]
    EndpointInUse(String),

    #[error("Failed to read data file {path}: {source}")]
    DataFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn bind(endpoint: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Bind {
            endpoint: endpoint.into(),
            source,
        }
    }
}
