//! Per-run result tracking.

use std::collections::HashMap;
use std::sync::Arc;

use applause_domain::types::AssetType;
use applause_domain::{
    parse_test_case_name, ApplauseError, CreateTestCaseResultRequest, Result,
    SubmitTestCaseResultRequest, TestResultProviderInfo, TestResultStatus,
};
use tracing::{debug, info, warn};

use crate::api::AutoApi;
use crate::reporter::links::ProviderSessionLinkWriter;
use crate::scheduling::HeartbeatService;

/// Optional parameters for starting a test case result.
///
/// Explicitly supplied case ids take precedence over ids parsed from the
/// test case name.
#[derive(Debug, Clone, Default)]
pub struct StartTestCaseOptions {
    /// Provider sessions the test case executes in.
    pub provider_session_ids: Vec<String>,
    /// Explicit TestRail case id.
    pub test_case_id: Option<String>,
    /// Explicit Applause case id.
    pub itw_test_case_id: Option<String>,
}

/// Optional parameters for submitting a test case result.
#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    /// Provider session GUIDs to attach to the result.
    pub provider_session_guids: Vec<String>,
    /// Explicit TestRail case id.
    pub test_rail_case_id: Option<String>,
    /// Explicit Applause case id.
    pub itw_case_id: Option<String>,
    /// Reason for a failed or skipped result.
    pub failure_reason: Option<String>,
}

/// Tracks the results of a single active test run.
///
/// Callers address test case results by a local id of their choosing; the
/// reporter maps those to the server-issued result ids. Submitting or
/// attaching to an unknown local id fails without touching the network.
pub struct RunReporter {
    test_run_id: i64,
    auto_api: Arc<AutoApi>,
    heartbeat: HeartbeatService,
    link_writer: Arc<dyn ProviderSessionLinkWriter>,
    result_map: HashMap<String, i64>,
}

impl RunReporter {
    pub(crate) fn new(
        test_run_id: i64,
        auto_api: Arc<AutoApi>,
        heartbeat: HeartbeatService,
        link_writer: Arc<dyn ProviderSessionLinkWriter>,
    ) -> Self {
        Self { test_run_id, auto_api, heartbeat, link_writer, result_map: HashMap::new() }
    }

    /// Id of the underlying test run.
    pub fn test_run_id(&self) -> i64 {
        self.test_run_id
    }

    /// Create a result for a test case and remember its server id under
    /// `local_id`. Reusing a local id replaces the earlier mapping.
    pub async fn start_test_case(
        &mut self,
        local_id: &str,
        test_case_name: &str,
        options: StartTestCaseOptions,
    ) -> Result<i64> {
        let parsed = parse_test_case_name(test_case_name);
        let request = CreateTestCaseResultRequest {
            test_run_id: self.test_run_id,
            test_case_name: parsed.test_case_name,
            provider_session_ids: options.provider_session_ids,
            test_case_id: options
                .test_case_id
                .or_else(|| parsed.test_rail_case_id.map(|id| id.to_string())),
            itw_test_case_id: options
                .itw_test_case_id
                .or_else(|| parsed.applause_case_id.map(|id| id.to_string())),
        };

        let response = self.auto_api.start_test_case(&request).await?;
        if let Some(previous) =
            self.result_map.insert(local_id.to_string(), response.test_result_id)
        {
            warn!(local_id, previous, "Local id reused; replacing earlier result mapping");
        }
        Ok(response.test_result_id)
    }

    /// Submit the terminal status of a previously started test case.
    pub async fn submit_test_case_result(
        &self,
        local_id: &str,
        status: TestResultStatus,
        options: SubmitOptions,
    ) -> Result<()> {
        let test_result_id = self.result_id_for(local_id)?;
        let request = SubmitTestCaseResultRequest {
            test_result_id,
            status,
            provider_session_guids: options.provider_session_guids,
            test_rail_case_id: options.test_rail_case_id,
            itw_case_id: options.itw_case_id,
            failure_reason: options.failure_reason,
        };

        self.auto_api.submit_test_case_result(&request).await
    }

    /// Upload an asset for a previously started test case.
    pub async fn attach_asset(
        &self,
        local_id: &str,
        asset: Vec<u8>,
        asset_name: &str,
        provider_session_guid: &str,
        asset_type: AssetType,
    ) -> Result<()> {
        let test_result_id = self.result_id_for(local_id)?;
        self.auto_api
            .upload_asset(test_result_id, asset, asset_name, provider_session_guid, asset_type)
            .await
    }

    /// End the run.
    ///
    /// Stops the heartbeat first so that no heartbeat races the run
    /// deletion, then ends the run server-side and persists the provider
    /// session links for every result created in this run.
    pub async fn end_run(mut self) -> Result<Vec<TestResultProviderInfo>> {
        self.heartbeat.stop().await?;
        self.auto_api.end_test_run(self.test_run_id).await?;

        let mut result_ids: Vec<i64> = self.result_map.values().copied().collect();
        result_ids.sort_unstable();

        let links = if result_ids.is_empty() {
            Vec::new()
        } else {
            self.auto_api.get_provider_session_links(&result_ids).await?
        };

        for link in &links {
            match &link.provider_url {
                Some(url) => info!(result_id = link.test_result_id, url = %url, "Provider session"),
                None => debug!(result_id = link.test_result_id, "No provider session link"),
            }
        }
        self.link_writer.write_links(&links).await?;

        Ok(links)
    }

    fn result_id_for(&self, local_id: &str) -> Result<i64> {
        self.result_map.get(local_id).copied().ok_or_else(|| {
            ApplauseError::NotFound(format!("no test case result registered for '{local_id}'"))
        })
    }
}
