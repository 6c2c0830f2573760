use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeylistError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing Column: '{0}' not found in header")]
    MissingColumn(String),

    #[error("Malformed Record: row {row}, column '{column}' has non-numeric value '{value}'")]
    MalformedRecord {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Weight Error: factor weights sum to {0}, expected 1.0")]
    Weights(f64),

    #[error("No keywords available. Please check input file and keywords.")]
    NoKeywords,
}

pub type KlResult<T> = Result<T, KeylistError>;
