use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("{field}: expected exactly 5 matches, got {len}")]
    InvalidHistoryLength { field: &'static str, len: usize },

    #[error("invalid match record: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
