//! Request models for the Public API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Valid statuses of a test result in the Public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestRunAutoResultStatus {
    Passed,
    Failed,
    Skipped,
    Canceled,
    Error,
}

/// Details about the session a test case executed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetailsValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_version: Option<String>,
}

/// Nested wrapper the Public API expects around session details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetails {
    pub value: SessionDetailsValue,
}

/// An automated test run result submitted to the Public API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunAutoResult {
    /// Id of the test cycle the result belongs to.
    pub test_cycle_id: i64,
    /// Outcome of the test run.
    pub status: TestRunAutoResultStatus,
    /// Reason for a failed result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// Session details for the execution environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_details_json: Option<SessionDetails>,
    /// When the test run started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// When the test run ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}
