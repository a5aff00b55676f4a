use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Store error at '{path}': {details}")]
    Store { path: String, details: String },

    #[error("Import error: {0}")]
    Import(String),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
