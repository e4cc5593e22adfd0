//! Scene error types

use crate::ecs::Entity;
use crate::physics::PhysicsError;
use thiserror::Error;

/// Errors raised by scene editing and persistence
#[derive(Debug, Error)]
pub enum SceneError {
    /// Reading or writing the scene file failed
    #[error("Scene IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The scene file is not a valid snapshot
    #[error("Malformed scene file: {0}")]
    Json(#[from] serde_json::Error),

    /// `Scene.names` lists an entity that has no record
    #[error("Scene lists entity '{0}' but has no record for it")]
    MissingEntity(String),

    /// The entity is not alive or lacks the facet the operation needs
    #[error("{0} is not an editable scene entity")]
    UnknownEntity(Entity),

    /// The physics proxy could not be updated
    #[error(transparent)]
    Physics(#[from] PhysicsError),
}

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, SceneError>;
