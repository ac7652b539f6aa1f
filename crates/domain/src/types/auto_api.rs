//! Request and response models for the Automation API.

use serde::{Deserialize, Serialize};

/// Parameters for creating a test run.
///
/// The Automation API pre-creates a result placeholder for every test name
/// listed here, so results submitted later attach to the right slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunCreateRequest {
    /// Test names to include in the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests: Option<Vec<String>>,
}

/// Response for a test run creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunCreateResponse {
    /// Server-issued id of the created test run.
    pub run_id: i64,
}

/// Parameters for creating a test case result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestCaseResultRequest {
    /// Id of the owning test run.
    pub test_run_id: i64,
    /// Name of the test case.
    pub test_case_name: String,
    /// Provider sessions used to execute the test case.
    pub provider_session_ids: Vec<String>,
    /// TestRail case id, when cross-reporting is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_case_id: Option<String>,
    /// Applause (ITW) test case id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itw_test_case_id: Option<String>,
}

/// Response for a test case result creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestCaseResultResponse {
    /// Server-issued id of the created test case result.
    pub test_result_id: i64,
}

/// Parameters for submitting a finished test case result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTestCaseResultRequest {
    /// Id returned when the result was created.
    pub test_result_id: i64,
    /// Terminal status of the test case.
    pub status: TestResultStatus,
    /// Provider session GUIDs associated with the result.
    pub provider_session_guids: Vec<String>,
    /// TestRail case id, when cross-reporting is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_rail_case_id: Option<String>,
    /// Applause (ITW) case id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itw_case_id: Option<String>,
    /// Reason for a failed or skipped result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

/// Allowed statuses of a test case result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestResultStatus {
    /// The test has not been run.
    NotRun,
    /// The test is in progress.
    InProgress,
    /// The test has passed.
    Passed,
    /// The test has failed.
    Failed,
    /// The test has been skipped.
    Skipped,
    /// The test has been canceled.
    Canceled,
    /// The test has encountered an error.
    Error,
}

/// Provider session information attached to a test result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultProviderInfo {
    /// Id of the test result.
    pub test_result_id: i64,
    /// Link to the provider session, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_url: Option<String>,
    /// Id of the provider session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_session_id: Option<String>,
}

/// Response of an email address generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAddressResponse {
    /// The generated email address.
    pub email_address: String,
}

/// Request for downloading email content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailFetchRequest {
    /// The email address to fetch content for.
    pub email_address: String,
}

/// Allowed asset types for test result uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Screenshot,
    FailureScreenshot,
    Video,
    NetworkHar,
    VitalsLog,
    ConsoleLog,
    NetworkLog,
    DeviceLog,
    SeleniumLogJson,
    BrowserLog,
    FrameworkLog,
    Email,
    PageSource,
    Unknown,
}

impl AssetType {
    /// Wire representation of the asset type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Screenshot => "SCREENSHOT",
            Self::FailureScreenshot => "FAILURE_SCREENSHOT",
            Self::Video => "VIDEO",
            Self::NetworkHar => "NETWORK_HAR",
            Self::VitalsLog => "VITALS_LOG",
            Self::ConsoleLog => "CONSOLE_LOG",
            Self::NetworkLog => "NETWORK_LOG",
            Self::DeviceLog => "DEVICE_LOG",
            Self::SeleniumLogJson => "SELENIUM_LOG_JSON",
            Self::BrowserLog => "BROWSER_LOG",
            Self::FrameworkLog => "FRAMEWORK_LOG",
            Self::Email => "EMAIL",
            Self::PageSource => "PAGE_SOURCE",
            Self::Unknown => "UNKNOWN",
        }
    }
}
