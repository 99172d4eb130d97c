use crate::config::AppConfig;
use crate::domain::model::{PageRequest, PageResult, Posting};
use crate::domain::ports::ListingSource;
use crate::utils::error::{DigestError, Result};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct ListingResponse {
    #[serde(default)]
    data: Vec<Posting>,
}

/// Client for the Wanted job-listing API.
pub struct WantedClient {
    client: Client,
    endpoint: Url,
    country: String,
    sort: String,
}

impl WantedClient {
    pub fn new(app_config: &AppConfig) -> Result<Self> {
        let config = &app_config.source;
        let endpoint =
            Url::parse(&config.endpoint).map_err(|e| DigestError::InvalidConfigValueError {
                field: "source.endpoint".to_string(),
                value: config.endpoint.clone(),
                reason: e.to_string(),
            })?;

        let client = Client::builder()
            .timeout(app_config.request_timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            country: config.country.clone(),
            sort: config.sort.clone(),
        })
    }

    pub fn page_url(&self, request: &PageRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("country", &self.country)
            .append_pair("limit", &request.limit.to_string())
            .append_pair("job_sort", &self.sort)
            .append_pair("job_category_ids", &request.category_id.to_string())
            .append_pair("offset", &request.offset.to_string());
        url
    }
}

#[async_trait::async_trait]
impl ListingSource for WantedClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult> {
        let url = self.page_url(request);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Ok(PageResult::Rejected {
                status: status.as_u16(),
            });
        }

        let body: ListingResponse = response.json().await?;
        Ok(PageResult::Postings(body.data))
    }
}
