//! Typed clients for the Applause REST APIs.

pub mod auto_api;
pub mod public_api;

pub use auto_api::AutoApi;
pub use public_api::PublicApi;
