use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatagenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("either 'scenario_id' or 'template_id' column is required for group-based splitting (found: {available})")]
    MissingGroupColumn { available: String },
    #[error("dataset is missing required column '{0}'")]
    MissingColumn(String),
    #[error("{left} and {right} share {column} '{key}'")]
    GroupOverlap {
        left: &'static str,
        right: &'static str,
        column: String,
        key: String,
    },
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: String, value: f64 },
    #[error("invalid split settings: {0}")]
    InvalidSplit(String),
    #[error("label must be 0 or 1, got '{0}'")]
    BadLabel(String),
}

pub type Result<T> = std::result::Result<T, DatagenError>;
