//! Periodic SDK heartbeat keeping an active test run alive.
//!
//! The Automation API marks a run inactive when heartbeats stop arriving,
//! so the service runs for exactly as long as a run is open: started by
//! `runner_start`, stopped synchronously before the run is ended.

use std::sync::Arc;
use std::time::Duration;

use applause_domain::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::error::SchedulerError;

/// Default interval between heartbeats.
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);

/// How long `stop` waits for the heartbeat task to wind down.
const DEFAULT_JOIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Transport used to deliver a single heartbeat.
///
/// Implemented by the Automation API client; mocked in tests.
#[async_trait]
pub trait HeartbeatTransport: Send + Sync {
    async fn send_heartbeat(&self, test_run_id: i64) -> Result<()>;
}

/// Configuration for the heartbeat service.
#[derive(Debug, Clone)]
pub struct HeartbeatConfig {
    /// Time between consecutive heartbeats.
    pub interval: Duration,
    /// Maximum time `stop` waits for the background task to finish.
    pub join_timeout: Duration,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self { interval: DEFAULT_HEARTBEAT_INTERVAL, join_timeout: DEFAULT_JOIN_TIMEOUT }
    }
}

/// Periodically sends heartbeats for a test run on a background task.
///
/// `start` and `stop` are exactly-once per cycle: starting a running
/// service or stopping a stopped one fails. A stopped service can be
/// started again.
pub struct HeartbeatService {
    transport: Arc<dyn HeartbeatTransport>,
    test_run_id: i64,
    config: HeartbeatConfig,
    cancellation_token: CancellationToken,
    task_handle: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl HeartbeatService {
    pub fn new(
        transport: Arc<dyn HeartbeatTransport>,
        test_run_id: i64,
        config: HeartbeatConfig,
    ) -> Self {
        Self {
            transport,
            test_run_id,
            config,
            cancellation_token: CancellationToken::new(),
            task_handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Start sending heartbeats on a background task.
    pub async fn start(&mut self) -> std::result::Result<(), SchedulerError> {
        let mut handle_guard = self.task_handle.lock().await;
        if handle_guard.is_some() {
            return Err(SchedulerError::AlreadyRunning);
        }

        // Fresh token each cycle so a stopped service can be restarted.
        self.cancellation_token = CancellationToken::new();
        let token = self.cancellation_token.clone();
        let transport = Arc::clone(&self.transport);
        let test_run_id = self.test_run_id;
        let interval = self.config.interval;

        info!(run_id = test_run_id, interval_secs = interval.as_secs_f64(), "Starting heartbeat");

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!(run_id = test_run_id, "Heartbeat cancelled");
                        break;
                    }
                    _ = tokio::time::sleep(interval) => {
                        // A failed tick never stops the loop; the next tick
                        // may succeed.
                        if let Err(err) = transport.send_heartbeat(test_run_id).await {
                            warn!(run_id = test_run_id, error = %err, "Heartbeat failed");
                        }
                    }
                }
            }
        });

        *handle_guard = Some(handle);
        Ok(())
    }

    /// Stop the heartbeat and wait for the background task to finish.
    ///
    /// When this returns `Ok`, no further heartbeat will be sent.
    pub async fn stop(&mut self) -> std::result::Result<(), SchedulerError> {
        let handle = {
            let mut handle_guard = self.task_handle.lock().await;
            handle_guard.take().ok_or(SchedulerError::NotRunning)?
        };

        self.cancellation_token.cancel();

        match tokio::time::timeout(self.config.join_timeout, handle).await {
            Ok(Ok(())) => {
                info!(run_id = self.test_run_id, "Heartbeat stopped");
                Ok(())
            }
            Ok(Err(err)) => Err(SchedulerError::TaskJoinFailed(err.to_string())),
            Err(_) => Err(SchedulerError::Timeout { seconds: self.config.join_timeout.as_secs() }),
        }
    }

    /// Whether a heartbeat task is currently active.
    pub async fn is_running(&self) -> bool {
        self.task_handle.lock().await.is_some()
    }
}

impl Drop for HeartbeatService {
    fn drop(&mut self) {
        // Cannot join in a sync context; cancelling is enough for the
        // detached task to exit on its next select.
        self.cancellation_token.cancel();
    }
}
