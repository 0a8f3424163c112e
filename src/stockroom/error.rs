use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Code already registered: {0}")]
    DuplicateKey(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Insufficient quantity for {code}: requested {requested}, available {available}")]
    InsufficientQuantity {
        code: String,
        requested: i64,
        available: i64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StockError>;
