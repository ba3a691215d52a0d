use std::time::{Duration, Instant};

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode, Url};
use tokio::time::timeout;
use tracing::Instrument;

use crate::config::RegistryConfig;
use crate::store::BoxFuture;

use super::error::RegistryError;
use super::types::{PackageSummary, SearchResponse};
use super::PackageLookup;

/// Longest response body excerpt carried in a status error.
const MAX_ERROR_EXCERPT_CHARS: usize = 200;

/// HTTP client for the registry search endpoint (`/-/v1/search`).
pub struct RegistryClient {
    client: Client,
    endpoint: Url,
    page_size: u32,
    request_timeout: Duration,
}

impl RegistryClient {
    /// Build a client from registry configuration.
    ///
    /// # Errors
    /// Returns [`RegistryError::InvalidUrl`] if the base URL is not an
    /// http(s) URL, or a transport error if the TLS backend cannot start.
    pub fn new(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let endpoint = search_endpoint(&config.base_url)?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .user_agent(concat!("pkgsearch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| RegistryError::Transport { source })?;

        Ok(Self {
            client,
            endpoint,
            page_size: config.page_size,
            request_timeout: Duration::from_secs(config.timeout_seconds.into()),
        })
    }

    /// Override the total request timeout.
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Full search URL for `term`.
    pub fn search_url(&self, term: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("text", term)
            .append_pair("size", &self.page_size.to_string());
        url
    }

    /// Search the registry, returning packages in the order the registry ranked them.
    pub async fn search(&self, term: &str) -> Result<Vec<PackageSummary>, RegistryError> {
        let span = tracing::debug_span!("registry_search", term = %term);
        async {
            let started = Instant::now();
            let result = match timeout(self.request_timeout, self.do_search(term)).await {
                Ok(result) => result,
                Err(_) => Err(RegistryError::Timeout {
                    duration_ms: u64::try_from(self.request_timeout.as_millis()).unwrap_or(u64::MAX),
                }),
            };
            let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(packages) => {
                    tracing::debug!(count = packages.len(), latency_ms, "registry search completed");
                }
                Err(err) => {
                    tracing::warn!(kind = err.kind(), error = %err, latency_ms, "registry search failed");
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn do_search(&self, term: &str) -> Result<Vec<PackageSummary>, RegistryError> {
        let response = self
            .client
            .get(self.search_url(term))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(RegistryError::from_request)?;

        let status = response.status();
        let body = response.bytes().await.map_err(RegistryError::from_request)?;

        if !status.is_success() {
            return Err(RegistryError::Status {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let parsed: SearchResponse =
            serde_json::from_slice(&body).map_err(|source| RegistryError::Decode { source })?;
        tracing::trace!(total = parsed.total, returned = parsed.objects.len(), "decoded search page");

        Ok(parsed.objects.into_iter().map(|object| object.package).collect())
    }
}

impl PackageLookup for RegistryClient {
    fn lookup<'a>(
        &'a self,
        term: &'a str,
    ) -> BoxFuture<'a, Result<Vec<PackageSummary>, RegistryError>> {
        Box::pin(self.search(term))
    }
}

/// Resolve `<base_url>/-/v1/search`, keeping any path prefix of the base.
fn search_endpoint(base_url: &str) -> Result<Url, RegistryError> {
    let invalid = |reason: String| RegistryError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("-/v1/search").map_err(|e| invalid(e.to_string()))
}

/// Best description of a failed response: the registry's `error` field,
/// else a body excerpt, else the canonical reason phrase.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    let from_json = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error")?.as_str().map(str::to_string));
    if let Some(message) = from_json {
        return message;
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if !text.is_empty() {
        return text.chars().take(MAX_ERROR_EXCERPT_CHARS).collect();
    }

    status
        .canonical_reason()
        .unwrap_or("unknown status")
        .to_string()
}
