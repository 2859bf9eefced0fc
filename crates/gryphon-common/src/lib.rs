//! Common types and utilities shared across Gryphon components.

pub mod error;
pub mod metrics;

pub use error::{Error, Result};

/// Re-export commonly used external types
pub use bytes::Bytes;
pub use uuid::Uuid;
