use thiserror::Error;

#[derive(Error, Debug)]
pub enum MixError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    /// Infeasible pool count or pool size. Raised before any partition exists.
    #[error("Clustering Error: {0}")]
    Clustering(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type MixResult<T> = Result<T, MixError>;
