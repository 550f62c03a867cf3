use thiserror::Error;

pub type Result<T> = std::result::Result<T, StreaksError>;

#[derive(Error, Debug)]
pub enum StreaksError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid time zone: {0}")]
    InvalidZone(String),
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}
