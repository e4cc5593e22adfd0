//! Edits requested by the editor panels

use super::DisplayFlags;
use crate::foundation::math::Vec3;
use crate::render::ModelId;

/// One editor action
///
/// Pose and color edits target the current selection and are ignored when
/// nothing is selected.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    /// Select the first entity with this name
    Select(String),
    /// Clear the selection
    Deselect,
    /// Create an entity at the origin with a generated name
    Create(ModelId),
    /// Destroy the selected entity
    DestroySelected,
    /// Rename the selected entity
    Rename(String),
    /// Move the selected entity
    SetPosition(Vec3),
    /// Rotate the selected entity (radians per axis)
    SetRotation(Vec3),
    /// Rescale the selected entity
    SetScale(Vec3),
    /// Recolor the selected entity
    SetColor(Vec3),
    /// Flip one or more overlay flags
    Toggle(DisplayFlags),
    /// Write the scene snapshot
    Save,
    /// Replace the scene with the snapshot on disk
    Load,
    /// Destroy every entity
    ClearScene,
}
