//! Background scheduling for the SDK heartbeat.

pub mod error;
pub mod heartbeat;

pub use error::SchedulerError;
pub use heartbeat::{HeartbeatConfig, HeartbeatService, HeartbeatTransport};
