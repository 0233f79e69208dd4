use thiserror::Error;

/// Ошибки проекции P909
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("Cannot read data source {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data source format: {0}")]
    InvalidFormat(String),

    #[error("Projection data not loaded: {0}")]
    NotLoaded(String),

    #[error("Record not found: {0}")]
    UnknownRecord(String),

    #[error("No date selected")]
    NoDateSelected,
}
