pub mod attribute;
pub mod canonical;
pub mod industry;
pub mod record;

pub use attribute::Attribute;
pub use canonical::{full_name, CanonicalRecord, FilledKeys};
pub use industry::{Industry, IndustryMatch, INDUSTRY_DELIMITER};
pub use record::{ContactRecord, RawContactRecord, CONSENT_GRANTED};
