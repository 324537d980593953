use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid record: missing attribute {0}")]
    MissingAttribute(&'static str),
}
