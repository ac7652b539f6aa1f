use std::time::Duration;

use applause_domain::{ApplauseError, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

const API_KEY_HEADER: &str = "X-Api-Key";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client with shared defaults for the Applause APIs.
///
/// Attaches the `X-Api-Key` header to every request and applies a uniform
/// timeout. No retries happen at this layer: a failed lifecycle call
/// surfaces to the caller, and the heartbeat scheduler drops failed ticks.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder
            .build()
            .map_err(|err| ApplauseError::Internal(format!("failed to build request: {err}")))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %url, %status, "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(ApplauseError::Network(err.to_string()))
            }
        }
    }
}

/// Convert a non-2xx response into an [`ApplauseError::Api`].
///
/// The Applause APIs report failures as a JSON body with a `message` field;
/// when the body is not JSON (or carries no message) the raw body text is
/// used instead.
pub(crate) async fn error_from_response(response: Response) -> ApplauseError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(String::from))
        .unwrap_or(body);
    ApplauseError::Api { status, message }
}

/// Builder for [`HttpClient`].
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    timeout: Option<Duration>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// API key attached to every request as `X-Api-Key`.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let mut builder = ReqwestClient::builder().timeout(timeout);

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(api_key) = self.api_key {
            let mut headers = HeaderMap::new();
            let value = HeaderValue::from_str(&api_key)
                .map_err(|_| ApplauseError::Config("API key is not a valid header value".into()))?;
            headers.insert(API_KEY_HEADER, value);
            builder = builder.default_headers(headers);
        }

        let client = builder
            .build()
            .map_err(|err| ApplauseError::Internal(format!("failed to build HTTP client: {err}")))?;

        Ok(HttpClient { client })
    }
}
