//! Configuration values used to construct the Applause clients.
//!
//! The configuration is an explicit immutable value passed by reference into
//! each component constructor. There is no process-wide singleton.

use serde::{Deserialize, Serialize};

/// Production Automation API endpoint.
pub const DEFAULT_AUTO_API_BASE_URL: &str = "https://prod-auto-api.cloud.applause.com:443/";
/// Production Public API endpoint.
pub const DEFAULT_PUBLIC_API_BASE_URL: &str = "https://prod-public-api.cloud.applause.com:443/";

/// Configuration used to build the Applause API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplauseConfig {
    /// Base URL for the Automation API client.
    #[serde(default = "default_auto_api_base_url")]
    pub auto_api_base_url: String,
    /// Base URL for the Public API client.
    #[serde(default = "default_public_api_base_url")]
    pub public_api_base_url: String,
    /// API key used to authenticate every request.
    pub api_key: String,
    /// The product under test.
    pub product_id: i64,
    /// Enables TestRail cross-reporting when present.
    #[serde(default)]
    pub test_rail_options: Option<TestRailOptions>,
    /// Associates created runs with an Applause test cycle.
    #[serde(default)]
    pub applause_test_cycle_id: Option<i64>,
}

impl ApplauseConfig {
    /// Build a configuration with default endpoints.
    pub fn new(api_key: impl Into<String>, product_id: i64) -> Self {
        Self {
            auto_api_base_url: default_auto_api_base_url(),
            public_api_base_url: default_public_api_base_url(),
            api_key: api_key.into(),
            product_id,
            test_rail_options: None,
            applause_test_cycle_id: None,
        }
    }
}

/// Configuration options for a TestRail connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRailOptions {
    /// TestRail project id.
    pub project_id: i64,
    /// TestRail suite id.
    pub suite_id: i64,
    /// Name of the TestRail plan to report into.
    pub plan_name: String,
    /// Name of the TestRail run to create.
    pub run_name: String,
    /// Add every test in the suite to the plan, not just the reported ones.
    #[serde(default)]
    pub add_all_tests_to_plan: Option<bool>,
    /// Skip the TestRail run name uniqueness check.
    #[serde(default)]
    pub override_test_rail_run_uniqueness: Option<bool>,
}

fn default_auto_api_base_url() -> String {
    DEFAULT_AUTO_API_BASE_URL.to_string()
}

fn default_public_api_base_url() -> String {
    DEFAULT_PUBLIC_API_BASE_URL.to_string()
}
