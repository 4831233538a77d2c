use async_trait::async_trait;
use reqwest::{Client, Request};
use shared::{Error, Result};
use tracing::{debug, warn};
use trailhead::Params;
use trailhead::ports::Fetcher;

const USER_AGENT: &str = concat!("trailhead/", env!("CARGO_PKG_VERSION"));

/// Network transport for the request cache. Bodies are returned whatever the
/// HTTP status; the caller decides what a body means.
#[derive(Clone, Debug)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// GET `endpoint` with `params` appended as a URL-encoded query string.
    pub fn build_request(&self, endpoint: &str, params: Option<&Params>) -> Result<Request> {
        let mut builder = self.client.get(endpoint);
        if let Some(params) = params {
            builder = builder.query(params.pairs());
        }
        builder
            .build()
            .map_err(|e| Error::Request(format!("Invalid request to {}: {}", endpoint, e)))
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, endpoint: &str, params: Option<&Params>) -> Result<String> {
        let request = self.build_request(endpoint, params)?;
        // params carry the API key, so only the endpoint is logged
        debug!("GET {}", endpoint);

        let response = self.client.execute(request).await.map_err(|e| {
            warn!("Request to {} failed: {}", endpoint, e);
            Error::Request(format!("GET {} failed: {}", endpoint, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("GET {} returned {}", endpoint, status);
        }

        response
            .text()
            .await
            .map_err(|e| Error::Request(format!("Failed to read body from {}: {}", endpoint, e)))
    }
}
