//! Remote service client: authentication, throttling, status mapping

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use tio_common::{TenableIoError, TioResult};

use crate::config::ClientConfig;
use crate::rate_limiter::RateLimiter;
use crate::resources::{AgentGroups, Agents, Scanners, Tags};

const API_KEYS_HEADER: &str = "X-ApiKeys";

/// Authenticated handle to one Tenable.io account.
///
/// Helpers and references borrow it; it is never mutated after
/// construction, so one instance can be shared freely.
pub struct TenableIoClient {
    http: Client,
    base_url: String,
    config: ClientConfig,
    limiter: Option<RateLimiter>,
}

impl TenableIoClient {
    pub fn new(config: ClientConfig) -> TioResult<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        let keys = HeaderValue::from_str(&config.api_keys_header())
            .map_err(|_| TenableIoError::Config("API keys contain invalid characters".into()))?;
        headers.insert(API_KEYS_HEADER, keys);
        let agent = HeaderValue::from_str(&config.user_agent())
            .map_err(|_| TenableIoError::Config("user agent contains invalid characters".into()))?;
        headers.insert(USER_AGENT, agent);

        let http = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| TenableIoError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            limiter: config.max_requests_per_second.map(RateLimiter::new),
            config,
        })
    }

    /// Build a client from `TENABLEIO_*` environment variables.
    pub fn from_env() -> TioResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn scanners(&self) -> Scanners<'_> {
        Scanners::new(self)
    }

    #[must_use]
    pub fn agents(&self) -> Agents<'_> {
        Agents::new(self)
    }

    #[must_use]
    pub fn agent_groups(&self) -> AgentGroups<'_> {
        AgentGroups::new(self)
    }

    #[must_use]
    pub fn tags(&self) -> Tags<'_> {
        Tags::new(self)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> TioResult<T> {
        let response = self.send(self.http.get(self.url(path)), path).await?;
        decode(response, path).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> TioResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.http.get(self.url(path)).query(query);
        let response = self.send(request, path).await?;
        decode(response, path).await
    }

    pub(crate) async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> TioResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.http.request(method, self.url(path)).json(body);
        let response = self.send(request, path).await?;
        decode(response, path).await
    }

    /// Send a request whose response body carries nothing of interest.
    pub(crate) async fn execute<B>(&self, method: Method, path: &str, body: Option<&B>) -> TioResult<()>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.http.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send(request, path).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> TioResult<()> {
        self.execute::<()>(Method::DELETE, path, None).await
    }

    #[instrument(level = "debug", skip(self, request))]
    async fn send(&self, request: RequestBuilder, path: &str) -> TioResult<Response> {
        if let Some(limiter) = &self.limiter {
            limiter.acquire().await;
        }

        let response = request
            .send()
            .await
            .map_err(|e| TenableIoError::Network(format!("{path}: {e}")))?;

        let status = response.status();
        debug!(%status, "response received");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, path, &body))
    }
}

async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> TioResult<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| TenableIoError::Network(format!("{path}: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| TenableIoError::Parse(format!("{path}: {e}")))
}

/// Map a non-success response onto an error kind. The service reports
/// failures as `{"error": "..."}`; anything else is used verbatim.
pub(crate) fn status_error(status: StatusCode, path: &str, body: &str) -> TenableIoError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                trimmed.to_string()
            }
        });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            TenableIoError::NotAuthorized(format!("{path}: {message}"))
        }
        StatusCode::NOT_FOUND => TenableIoError::NotFound(format!("{path}: {message}")),
        _ => TenableIoError::Api {
            status: status.as_u16(),
            message: format!("{path}: {message}"),
        },
    }
}
