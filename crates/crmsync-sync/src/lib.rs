pub mod error;
pub mod fetch;
pub mod hubspot;
pub mod pipeline;
pub mod source;
pub mod upload;
pub mod wire;

pub use error::{Result, SyncError};
