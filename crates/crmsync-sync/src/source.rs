use crate::wire::{BatchCreateRequest, SearchResponse};
use crate::Result;

/// Paginated search over remote contacts.
pub trait ContactSource {
    fn source_name(&self) -> &'static str;
    fn search_page(&self, after: Option<&str>) -> Result<SearchResponse>;
}

/// Batch creation of contacts on the remote side.
pub trait ContactSink {
    fn sink_name(&self) -> &'static str;
    fn batch_create(&self, batch: &BatchCreateRequest) -> Result<()>;
}
