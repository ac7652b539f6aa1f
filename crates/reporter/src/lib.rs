//! # Applause Reporter
//!
//! Client SDK for reporting automated test results to the Applause platform.
//!
//! This crate contains:
//! - HTTP clients for the Automation API and Public API
//! - A heartbeat scheduler that keeps active test runs alive
//! - The [`ApplauseReporter`] façade that tracks run and result ids on
//!   behalf of the caller
//! - Email inbox helpers for email-based test flows
//!
//! ## Architecture
//! - Domain types live in `applause-domain`
//! - This crate contains all "impure" code (HTTP, filesystem, timers)
//!
//! ## Example
//!
//! ```no_run
//! use applause_domain::{ApplauseConfig, TestResultStatus};
//! use applause_reporter::reporter::{ApplauseReporter, StartTestCaseOptions, SubmitOptions};
//!
//! # async fn example() -> applause_domain::Result<()> {
//! let config = ApplauseConfig::new("api-key", 12345);
//! let mut reporter = ApplauseReporter::new(&config)?;
//!
//! reporter.runner_start(Some(vec!["test1".into(), "test2".into()])).await?;
//! reporter.start_test_case("test1", "test1", StartTestCaseOptions::default()).await?;
//! reporter
//!     .submit_test_case_result("test1", TestResultStatus::Passed, SubmitOptions::default())
//!     .await?;
//! reporter.runner_end().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod email;
pub mod http;
pub mod reporter;
pub mod scheduling;

// Re-export commonly used items
pub use api::{AutoApi, PublicApi};
pub use email::{EmailHelper, Inbox};
pub use reporter::ApplauseReporter;
pub use scheduling::{HeartbeatConfig, HeartbeatService, HeartbeatTransport};
