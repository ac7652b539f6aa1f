//! HTTP client for the Applause Automation API.
//!
//! The Automation API drives the test run lifecycle: create a run, create
//! per-case results, submit their terminal statuses, upload assets, and end
//! the run. It also receives the SDK heartbeat that keeps a run alive.

use applause_domain::{
    ApplauseConfig, ApplauseError, CreateTestCaseResultRequest, CreateTestCaseResultResponse,
    EmailAddressResponse, EmailFetchRequest, Result, SubmitTestCaseResultRequest,
    TestResultProviderInfo, TestRunCreateRequest, TestRunCreateResponse,
};
use applause_domain::types::AssetType;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, info};

use crate::http::client::error_from_response;
use crate::http::HttpClient;
use crate::scheduling::HeartbeatTransport;

/// SDK identifier reported to the Automation API on run creation.
const SDK_VERSION: &str = concat!("rust:", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Applause Automation API.
#[derive(Clone)]
pub struct AutoApi {
    config: ApplauseConfig,
    http: HttpClient,
    base_url: String,
}

/// Full wire body of a run creation request. The caller supplies the test
/// names; product, SDK version, cycle, and TestRail settings come from the
/// configuration.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTestRunBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    tests: Option<&'a Vec<String>>,
    product_id: i64,
    sdk_version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    itw_test_cycle_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_rail_reporting_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    add_all_tests_to_plan: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_rail_project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_rail_suite_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_rail_plan_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_rail_run_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    override_test_rail_run_name_uniqueness: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HeartbeatBody {
    test_run_id: i64,
}

impl AutoApi {
    /// Create a new Automation API client from the shared configuration.
    pub fn new(config: &ApplauseConfig) -> Result<Self> {
        let http = HttpClient::builder().api_key(&config.api_key).build()?;
        Ok(Self {
            config: config.clone(),
            http,
            base_url: config.auto_api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Start a test run.
    ///
    /// Pre-creates result placeholders for the provided test names. When
    /// TestRail options are configured, TestRail cross-reporting is enabled
    /// for the whole run; when a test cycle id is configured, the run is
    /// associated with that cycle.
    pub async fn start_test_run(
        &self,
        params: &TestRunCreateRequest,
    ) -> Result<TestRunCreateResponse> {
        let url = format!("{}/api/v1.0/test-run/create", self.base_url);

        let test_rail = self.config.test_rail_options.as_ref();
        let body = CreateTestRunBody {
            tests: params.tests.as_ref(),
            product_id: self.config.product_id,
            sdk_version: SDK_VERSION,
            itw_test_cycle_id: self.config.applause_test_cycle_id,
            test_rail_reporting_enabled: test_rail.map(|_| true),
            add_all_tests_to_plan: test_rail.and_then(|options| options.add_all_tests_to_plan),
            test_rail_project_id: test_rail.map(|options| options.project_id),
            test_rail_suite_id: test_rail.map(|options| options.suite_id),
            test_rail_plan_name: test_rail.map(|options| options.plan_name.as_str()),
            test_rail_run_name: test_rail.map(|options| options.run_name.as_str()),
            override_test_rail_run_name_uniqueness: test_rail
                .and_then(|options| options.override_test_rail_run_uniqueness),
        };

        let response =
            self.http.send(self.http.request(Method::POST, &url).json(&body)).await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let created: TestRunCreateResponse = parse_json(response).await?;
        info!(run_id = created.run_id, "Created Applause test run");
        Ok(created)
    }

    /// End a test run. The ending status is always `COMPLETE`; results for
    /// the run become available for fetching afterwards.
    pub async fn end_test_run(&self, test_run_id: i64) -> Result<()> {
        let url = format!("{}/api/v1.0/test-run/{}", self.base_url, test_run_id);
        let request = self
            .http
            .request(Method::DELETE, &url)
            .query(&[("endingStatus", "COMPLETE")]);

        let response = self.http.send(request).await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        info!(run_id = test_run_id, "Ended Applause test run");
        Ok(())
    }

    /// Create a test case result, marking it `IN_PROGRESS` server-side.
    pub async fn start_test_case(
        &self,
        params: &CreateTestCaseResultRequest,
    ) -> Result<CreateTestCaseResultResponse> {
        let url = format!("{}/api/v1.0/test-result/create-result", self.base_url);

        let response =
            self.http.send(self.http.request(Method::POST, &url).json(params)).await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let created: CreateTestCaseResultResponse = parse_json(response).await?;
        debug!(
            result_id = created.test_result_id,
            test_case = %params.test_case_name,
            "Created test case result"
        );
        Ok(created)
    }

    /// Submit the terminal status of a previously created test case result.
    pub async fn submit_test_case_result(
        &self,
        params: &SubmitTestCaseResultRequest,
    ) -> Result<()> {
        let url = format!("{}/api/v1.0/test-result", self.base_url);

        let response =
            self.http.send(self.http.request(Method::POST, &url).json(params)).await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        debug!(result_id = params.test_result_id, status = ?params.status, "Submitted test case result");
        Ok(())
    }

    /// Fetch provider session links for the given result ids. The ids must
    /// belong to the same test run.
    pub async fn get_provider_session_links(
        &self,
        result_ids: &[i64],
    ) -> Result<Vec<TestResultProviderInfo>> {
        let url = format!("{}/api/v1.0/test-result/provider-info", self.base_url);

        // The endpoint takes a bare JSON array of result ids, not an object.
        let response =
            self.http.send(self.http.request(Method::POST, &url).json(&result_ids)).await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        parse_json(response).await
    }

    /// Send an SDK heartbeat keeping the test run from being marked inactive.
    pub async fn send_sdk_heartbeat(&self, test_run_id: i64) -> Result<()> {
        let url = format!("{}/api/v2.0/sdk-heartbeat", self.base_url);
        let body = HeartbeatBody { test_run_id };

        let response =
            self.http.send(self.http.request(Method::POST, &url).json(&body)).await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        debug!(run_id = test_run_id, "Sent SDK heartbeat");
        Ok(())
    }

    /// Generate an email address with the provided prefix.
    pub async fn get_email_address(&self, prefix: &str) -> Result<EmailAddressResponse> {
        let url = format!("{}/api/v1.0/email/get-address", self.base_url);
        let request = self.http.request(Method::GET, &url).query(&[("prefix", prefix)]);

        let response = self.http.send(request).await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        parse_json(response).await
    }

    /// Download the raw RFC 822 content of the latest email sent to a
    /// generated address.
    pub async fn get_email_content(&self, request: &EmailFetchRequest) -> Result<Vec<u8>> {
        let url = format!("{}/api/v1.0/email/download-email", self.base_url);

        let response =
            self.http.send(self.http.request(Method::POST, &url).json(request)).await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApplauseError::Network(format!("failed to read email body: {err}")))?;
        Ok(bytes.to_vec())
    }

    /// Upload an asset for a test result. A single best-effort call: no
    /// retry, no chunking.
    pub async fn upload_asset(
        &self,
        result_id: i64,
        asset: Vec<u8>,
        asset_name: &str,
        provider_session_guid: &str,
        asset_type: AssetType,
    ) -> Result<()> {
        let url = format!("{}/api/v1.0/test-result/{}/upload", self.base_url, result_id);

        let file_part = Part::bytes(asset)
            .file_name(asset_name.to_string())
            .mime_str("application/octet-stream")
            .map_err(|err| ApplauseError::Internal(format!("failed to build file part: {err}")))?;
        let form = Form::new()
            .text("providerSessionGuid", provider_session_guid.to_string())
            .text("assetType", asset_type.as_str())
            .text("assetName", asset_name.to_string())
            .part("file", file_part);

        let response =
            self.http.send(self.http.request(Method::POST, &url).multipart(form)).await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        debug!(result_id, asset_name, asset_type = asset_type.as_str(), "Uploaded asset");
        Ok(())
    }
}

#[async_trait]
impl HeartbeatTransport for AutoApi {
    async fn send_heartbeat(&self, test_run_id: i64) -> Result<()> {
        self.send_sdk_heartbeat(test_run_id).await
    }
}

async fn parse_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    response
        .json()
        .await
        .map_err(|err| ApplauseError::Internal(format!("failed to parse API response: {err}")))
}

#[cfg(test)]
mod tests {
    use applause_domain::TestRailOptions;
    use applause_domain::TestResultStatus;
    use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn config_for(server: &MockServer) -> ApplauseConfig {
        ApplauseConfig {
            auto_api_base_url: server.uri(),
            ..ApplauseConfig::new("test-key", 12345)
        }
    }

    #[tokio::test]
    async fn start_test_run_sends_product_and_sdk_version() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1.0/test-run/create"))
            .and(header("X-Api-Key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "tests": ["test1", "test2"],
                "productId": 12345,
                "sdkVersion": SDK_VERSION,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "runId": 123
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = AutoApi::new(&config_for(&server)).expect("client");
        let response = api
            .start_test_run(&TestRunCreateRequest {
                tests: Some(vec!["test1".to_string(), "test2".to_string()]),
            })
            .await
            .expect("run created");

        assert_eq!(response.run_id, 123);
    }

    #[tokio::test]
    async fn start_test_run_omits_test_rail_fields_without_options() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1.0/test-run/create"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "runId": 1
            })))
            .mount(&server)
            .await;

        let api = AutoApi::new(&config_for(&server)).expect("client");
        api.start_test_run(&TestRunCreateRequest::default()).await.expect("run created");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = requests[0].body_json().unwrap();
        assert!(body.get("testRailReportingEnabled").is_none());
        assert!(body.get("testRailProjectId").is_none());
        assert!(body.get("tests").is_none());
    }

    #[tokio::test]
    async fn start_test_run_enables_test_rail_reporting_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1.0/test-run/create"))
            .and(body_partial_json(serde_json::json!({
                "testRailReportingEnabled": true,
                "testRailProjectId": 10,
                "testRailSuiteId": 20,
                "testRailPlanName": "Plan",
                "testRailRunName": "Run",
                "itwTestCycleId": 99,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "runId": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config.test_rail_options = Some(TestRailOptions {
            project_id: 10,
            suite_id: 20,
            plan_name: "Plan".to_string(),
            run_name: "Run".to_string(),
            add_all_tests_to_plan: None,
            override_test_rail_run_uniqueness: None,
        });
        config.applause_test_cycle_id = Some(99);

        let api = AutoApi::new(&config).expect("client");
        api.start_test_run(&TestRunCreateRequest::default()).await.expect("run created");
    }

    #[tokio::test]
    async fn end_test_run_deletes_with_complete_status() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1.0/test-run/123"))
            .and(query_param("endingStatus", "COMPLETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let api = AutoApi::new(&config_for(&server)).expect("client");
        api.end_test_run(123).await.expect("run ended");
    }

    #[tokio::test]
    async fn submit_result_posts_status_and_result_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1.0/test-result"))
            .and(body_partial_json(serde_json::json!({
                "testResultId": 456,
                "status": "PASSED",
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let api = AutoApi::new(&config_for(&server)).expect("client");
        api.submit_test_case_result(&SubmitTestCaseResultRequest {
            test_result_id: 456,
            status: TestResultStatus::Passed,
            provider_session_guids: vec![],
            test_rail_case_id: None,
            itw_case_id: None,
            failure_reason: None,
        })
        .await
        .expect("result submitted");
    }

    #[tokio::test]
    async fn provider_info_posts_bare_id_array() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1.0/test-result/provider-info"))
            .and(body_json(serde_json::json!([456, 789])))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"testResultId": 456, "providerUrl": "https://provider/session-1"},
                {"testResultId": 789}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let api = AutoApi::new(&config_for(&server)).expect("client");
        let links = api.get_provider_session_links(&[456, 789]).await.expect("links");

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].test_result_id, 456);
        assert_eq!(links[0].provider_url.as_deref(), Some("https://provider/session-1"));
        assert!(links[1].provider_url.is_none());
    }

    #[tokio::test]
    async fn heartbeat_posts_test_run_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2.0/sdk-heartbeat"))
            .and(body_json(serde_json::json!({"testRunId": 77})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let api = AutoApi::new(&config_for(&server)).expect("client");
        api.send_sdk_heartbeat(77).await.expect("heartbeat sent");
    }

    #[tokio::test]
    async fn upload_asset_posts_multipart_to_result_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1.0/test-result/456/upload"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let api = AutoApi::new(&config_for(&server)).expect("client");
        api.upload_asset(
            456,
            b"PNG bytes".to_vec(),
            "failure.png",
            "session-guid",
            AssetType::FailureScreenshot,
        )
        .await
        .expect("asset uploaded");

        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0]
            .headers
            .get("content-type")
            .expect("content type header")
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("multipart/form-data"));
    }

    #[tokio::test]
    async fn email_address_request_carries_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1.0/email/get-address"))
            .and(query_param("prefix", "signup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "emailAddress": "signup-1@example.test"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = AutoApi::new(&config_for(&server)).expect("client");
        let response = api.get_email_address("signup").await.expect("address");
        assert_eq!(response.email_address, "signup-1@example.test");
    }

    #[tokio::test]
    async fn failed_lifecycle_call_surfaces_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1.0/test-run/create"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"message": "invalid api key"})),
            )
            .mount(&server)
            .await;

        let api = AutoApi::new(&config_for(&server)).expect("client");
        let err = api
            .start_test_run(&TestRunCreateRequest::default())
            .await
            .expect_err("call fails");

        match err {
            ApplauseError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid api key");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }
}
