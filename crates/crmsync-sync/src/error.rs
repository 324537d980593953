use crmsync_core::time::TimeParseError;
use crmsync_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid contact {id}: {source}")]
    InvalidRecord {
        id: String,
        #[source]
        source: CoreError,
    },
    #[error("invalid create date for contact {record}: {source}")]
    InvalidCreateDate {
        record: String,
        #[source]
        source: TimeParseError,
    },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("url error: {0}")]
    Url(#[from] url::ParseError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("upload aborted after {sent} of {total} batches: {source}")]
    UploadAborted {
        sent: usize,
        total: usize,
        #[source]
        source: Box<SyncError>,
    },
}

pub type Result<T> = std::result::Result<T, SyncError>;
