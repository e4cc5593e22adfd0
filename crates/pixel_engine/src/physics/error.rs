//! Error types for the physics proxy world

use super::ProxyHandle;
use thiserror::Error;

/// Physics system errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhysicsError {
    /// The handle does not name a live proxy body
    #[error("Proxy body not found: {0:?}")]
    UnknownProxy(ProxyHandle),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
