//! Run tracking and the top-level reporting façade.

pub mod facade;
pub mod links;
pub mod run;

pub use facade::ApplauseReporter;
pub use links::{FileLinkWriter, ProviderSessionLinkWriter};
pub use run::{RunReporter, StartTestCaseOptions, SubmitOptions};
