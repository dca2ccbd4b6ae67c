use thiserror::Error;

#[derive(Error, Debug)]
pub enum StemevalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Audio error: {0}")]
    Audio(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("Preset error: {0}")]
    Preset(String),

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("Metrics error: {0}")]
    Metrics(String),

    #[error("Metric comparison failed:\n{0}")]
    Mismatch(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, StemevalError>;
