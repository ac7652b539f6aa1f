//! Error types for the heartbeat scheduler.

use applause_domain::ApplauseError;
use thiserror::Error;

/// Errors from heartbeat scheduler lifecycle operations.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Scheduler is already running")]
    AlreadyRunning,

    #[error("Scheduler is not running")]
    NotRunning,

    #[error("Scheduler did not shut down within {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Scheduler task failed to join: {0}")]
    TaskJoinFailed(String),
}

impl From<SchedulerError> for ApplauseError {
    fn from(err: SchedulerError) -> Self {
        match err {
            SchedulerError::AlreadyRunning | SchedulerError::NotRunning => {
                ApplauseError::InvalidState(err.to_string())
            }
            other => ApplauseError::Internal(other.to_string()),
        }
    }
}
