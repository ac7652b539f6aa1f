//! # Applause Domain
//!
//! Domain types and models for the Applause reporter SDK.
//!
//! This crate contains:
//! - Wire DTOs for the Automation API and Public API
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Test case name parsing utilities
//!
//! ## Architecture
//! - No dependencies on other Applause crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures, no I/O

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
// Re-export test case name parser utilities
pub use utils::test_case_parser::{parse_test_case_name, ParsedTestCaseName};
