//! Wire DTOs for the Applause APIs.
//!
//! Field names are camelCase over the wire; internal names stay snake_case
//! with the mapping applied uniformly through serde at the serialize and
//! deserialize boundaries.

pub mod auto_api;
pub mod public_api;

pub use auto_api::*;
pub use public_api::*;
