//! Top-level reporting façade.

use std::sync::Arc;

use applause_domain::types::AssetType;
use applause_domain::{
    parse_test_case_name, ApplauseConfig, ApplauseError, Result, TestResultProviderInfo,
    TestResultStatus, TestRunCreateRequest,
};
use tracing::{info, instrument};

use crate::api::AutoApi;
use crate::reporter::links::{FileLinkWriter, ProviderSessionLinkWriter};
use crate::reporter::run::{RunReporter, StartTestCaseOptions, SubmitOptions};
use crate::scheduling::{HeartbeatConfig, HeartbeatService};

/// Entry point for reporting automated test results.
///
/// Holds at most one active test run. `runner_start` opens a run and
/// starts its heartbeat; `runner_end` closes it and returns the façade to
/// the idle state, from which a new run may be started. Reporting calls
/// between the two are delegated to the active run.
pub struct ApplauseReporter {
    auto_api: Arc<AutoApi>,
    link_writer: Arc<dyn ProviderSessionLinkWriter>,
    heartbeat_config: HeartbeatConfig,
    reporter: Option<RunReporter>,
}

impl ApplauseReporter {
    pub fn new(config: &ApplauseConfig) -> Result<Self> {
        Ok(Self {
            auto_api: Arc::new(AutoApi::new(config)?),
            link_writer: Arc::new(FileLinkWriter::default()),
            heartbeat_config: HeartbeatConfig::default(),
            reporter: None,
        })
    }

    /// Replace the provider session link sink.
    pub fn with_link_writer(mut self, writer: Arc<dyn ProviderSessionLinkWriter>) -> Self {
        self.link_writer = writer;
        self
    }

    /// Replace the heartbeat configuration.
    pub fn with_heartbeat_config(mut self, config: HeartbeatConfig) -> Self {
        self.heartbeat_config = config;
        self
    }

    /// Whether a test run is currently active.
    pub fn has_active_run(&self) -> bool {
        self.reporter.is_some()
    }

    /// Start a test run and its heartbeat.
    ///
    /// Test names are cleaned of embedded case id markers before being sent
    /// so server-side placeholders match the names reported later.
    #[instrument(skip(self, tests))]
    pub async fn runner_start(&mut self, tests: Option<Vec<String>>) -> Result<()> {
        if self.reporter.is_some() {
            return Err(ApplauseError::InvalidState("a test run is already active".into()));
        }

        let cleaned = tests.map(|names| {
            names.iter().map(|name| parse_test_case_name(name).test_case_name).collect()
        });
        let created = self.auto_api.start_test_run(&TestRunCreateRequest { tests: cleaned }).await?;

        let mut heartbeat = HeartbeatService::new(
            Arc::clone(&self.auto_api) as Arc<dyn crate::scheduling::HeartbeatTransport>,
            created.run_id,
            self.heartbeat_config.clone(),
        );
        heartbeat.start().await.map_err(ApplauseError::from)?;

        info!(run_id = created.run_id, "Test run started");
        self.reporter = Some(RunReporter::new(
            created.run_id,
            Arc::clone(&self.auto_api),
            heartbeat,
            Arc::clone(&self.link_writer),
        ));
        Ok(())
    }

    /// Create a result for a test case in the active run.
    pub async fn start_test_case(
        &mut self,
        local_id: &str,
        test_case_name: &str,
        options: StartTestCaseOptions,
    ) -> Result<i64> {
        self.active_run_mut()?.start_test_case(local_id, test_case_name, options).await
    }

    /// Submit the terminal status of a test case in the active run.
    pub async fn submit_test_case_result(
        &mut self,
        local_id: &str,
        status: TestResultStatus,
        options: SubmitOptions,
    ) -> Result<()> {
        self.active_run_mut()?.submit_test_case_result(local_id, status, options).await
    }

    /// Upload an asset for a test case in the active run.
    pub async fn attach_test_case_asset(
        &mut self,
        local_id: &str,
        asset: Vec<u8>,
        asset_name: &str,
        provider_session_guid: &str,
        asset_type: AssetType,
    ) -> Result<()> {
        self.active_run_mut()?
            .attach_asset(local_id, asset, asset_name, provider_session_guid, asset_type)
            .await
    }

    /// End the active run, returning the provider session links collected
    /// for its results. The façade becomes idle again.
    #[instrument(skip(self))]
    pub async fn runner_end(&mut self) -> Result<Vec<TestResultProviderInfo>> {
        let reporter = self
            .reporter
            .take()
            .ok_or_else(|| ApplauseError::InvalidState("no test run is active".into()))?;
        reporter.end_run().await
    }

    fn active_run_mut(&mut self) -> Result<&mut RunReporter> {
        self.reporter
            .as_mut()
            .ok_or_else(|| ApplauseError::InvalidState("no test run is active".into()))
    }
}
