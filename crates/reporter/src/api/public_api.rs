//! HTTP client for the Applause Public API.

use applause_domain::{ApplauseConfig, Result, TestRunAutoResult};
use reqwest::Method;
use tracing::debug;

use crate::http::client::error_from_response;
use crate::http::HttpClient;

/// HTTP client for the Applause Public API.
///
/// The Public API accepts standalone test case results addressed by a
/// pre-existing test case id, outside the Automation API run lifecycle.
#[derive(Clone)]
pub struct PublicApi {
    http: HttpClient,
    base_url: String,
}

impl PublicApi {
    /// Create a new Public API client from the shared configuration.
    pub fn new(config: &ApplauseConfig) -> Result<Self> {
        let http = HttpClient::builder().api_key(&config.api_key).build()?;
        Ok(Self {
            http,
            base_url: config.public_api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit a result for an existing test case.
    pub async fn submit_result(&self, test_case_id: i64, result: &TestRunAutoResult) -> Result<()> {
        let url = format!("{}/v2/test-case-results/{}/submit", self.base_url, test_case_id);

        let response =
            self.http.send(self.http.request(Method::POST, &url).json(result)).await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        debug!(test_case_id, status = ?result.status, "Submitted public API result");
        Ok(())
    }
}
