use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecipherError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Decryptor has no ciphertext loaded (call start_from first)")]
    NotInitialized,

    #[error("Acceptance rate is undefined before any step has run")]
    EmptyHistory,

    #[error("Language Model Error: {0}")]
    Model(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

impl DecipherError {
    /// True for errors a front end should report back to the user as "bad input".
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, DecipherError::InvalidInput(_))
    }
}

pub type DfResult<T> = Result<T, DecipherError>;
