use crate::source::{ContactSink, ContactSource};
use crate::wire::{BatchCreateRequest, SearchRequest, SearchResponse};
use crate::{Result, SyncError};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const SEARCH_PATH: &str = "crm/v3/objects/contacts/search";
const BATCH_CREATE_PATH: &str = "crm/v3/objects/contacts/batch/create";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HubSpotOptions {
    pub api_base: String,
    pub token: String,
    pub page_size: u32,
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

/// Blocking client for the HubSpot contacts search and batch-create endpoints.
pub struct HubSpotClient {
    client: Client,
    search_url: Url,
    batch_create_url: Url,
    token: String,
    page_size: u32,
}

impl HubSpotClient {
    pub fn new(options: HubSpotOptions) -> Result<Self> {
        let (search_url, batch_create_url) = endpoint_urls(&options.api_base)?;
        if options.token.trim().is_empty() {
            return Err(SyncError::Parse("hubspot token cannot be empty".to_string()));
        }
        let client = Client::builder()
            .user_agent(options.user_agent.as_deref().unwrap_or("crmsync"))
            .timeout(options.timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            search_url,
            batch_create_url,
            token: options.token,
            page_size: options.page_size,
        })
    }
}

impl ContactSource for HubSpotClient {
    fn source_name(&self) -> &'static str {
        "hubspot"
    }

    #[instrument(level = "debug", skip(self))]
    fn search_page(&self, after: Option<&str>) -> Result<SearchResponse> {
        let body = SearchRequest::consented(self.page_size, after);
        let response = self
            .client
            .post(self.search_url.clone())
            .bearer_auth(&self.token)
            .json(&body)
            .send()?
            .error_for_status()?;
        let page: SearchResponse = response.json()?;
        debug!(results = page.results.len(), "search page received");
        Ok(page)
    }
}

impl ContactSink for HubSpotClient {
    fn sink_name(&self) -> &'static str {
        "hubspot"
    }

    #[instrument(level = "debug", skip(self, batch), fields(inputs = batch.inputs.len()))]
    fn batch_create(&self, batch: &BatchCreateRequest) -> Result<()> {
        self.client
            .post(self.batch_create_url.clone())
            .bearer_auth(&self.token)
            .json(batch)
            .send()?
            .error_for_status()?;
        Ok(())
    }
}

fn endpoint_urls(api_base: &str) -> Result<(Url, Url)> {
    let base = Url::parse(&format!("{}/", api_base.trim().trim_end_matches('/')))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(SyncError::Parse(format!(
            "hubspot api base must use http or https: {api_base}"
        )));
    }
    Ok((base.join(SEARCH_PATH)?, base.join(BATCH_CREATE_PATH)?))
}

#[cfg(test)]
mod tests {
    use super::{endpoint_urls, HubSpotClient, HubSpotOptions};
    use crate::SyncError;
    use std::time::Duration;

    fn options(api_base: &str, token: &str) -> HubSpotOptions {
        HubSpotOptions {
            api_base: api_base.to_string(),
            token: token.to_string(),
            page_size: 100,
            timeout: Duration::from_secs(5),
            user_agent: None,
        }
    }

    #[test]
    fn endpoint_urls_join_api_base() {
        let (search, create) = endpoint_urls("https://api.hubapi.com").expect("urls");
        assert_eq!(
            search.as_str(),
            "https://api.hubapi.com/crm/v3/objects/contacts/search"
        );
        assert_eq!(
            create.as_str(),
            "https://api.hubapi.com/crm/v3/objects/contacts/batch/create"
        );
    }

    #[test]
    fn endpoint_urls_keep_path_prefix() {
        let (search, _) = endpoint_urls("http://localhost:8080/proxy/").expect("urls");
        assert_eq!(
            search.as_str(),
            "http://localhost:8080/proxy/crm/v3/objects/contacts/search"
        );
    }

    #[test]
    fn endpoint_urls_reject_other_schemes() {
        assert!(matches!(
            endpoint_urls("file:///tmp"),
            Err(SyncError::Parse(_))
        ));
        assert!(matches!(endpoint_urls("not a url"), Err(SyncError::Url(_))));
    }

    #[test]
    fn client_requires_token() {
        let result = HubSpotClient::new(options("https://api.hubapi.com", "  "));
        assert!(matches!(result, Err(SyncError::Parse(_))));
        assert!(HubSpotClient::new(options("https://api.hubapi.com", "token")).is_ok());
    }
}
