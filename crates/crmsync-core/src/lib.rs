pub mod domain;
pub mod error;
pub mod merge;
pub mod normalize;
pub mod time;

pub use domain::*;
pub use error::CoreError;
pub use merge::{MergeEngine, MergeOutcome, MergeStats};
pub use normalize::{extract_email, CallingCodes, Locality, LocalityTable, Normalizer};
