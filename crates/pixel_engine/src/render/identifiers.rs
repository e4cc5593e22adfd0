//! Identifiers for the built-in models and shader programs
//!
//! Both enums are persisted as small integers in the scene file, so the
//! discriminants are part of the file format and must not be reordered.

use std::fmt;

/// A discriminant read from a file did not name a known resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} id {value}")]
pub struct UnknownIdentifier {
    /// Which enum was being decoded
    pub kind: &'static str,
    /// The rejected value
    pub value: u8,
}

/// Built-in meshes an entity can be drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ModelId {
    /// Unit cube, half-extent 1
    Cube = 0,
    /// Unit sphere, radius 1
    Sphere = 1,
    /// Cylinder along Y, half-height 1, radius 1
    Cylinder = 2,
    /// Capsule along Y, half-height 0.5, radius 0.5
    Capsule = 3,
}

impl ModelId {
    /// Every model in discriminant order
    pub const ALL: [Self; 4] = [Self::Cube, Self::Sphere, Self::Cylinder, Self::Capsule];

    /// Display name, also used as the prefix for generated entity names
    pub fn name(self) -> &'static str {
        match self {
            Self::Cube => "Cube",
            Self::Sphere => "Sphere",
            Self::Cylinder => "Cylinder",
            Self::Capsule => "Capsule",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ModelId> for u8 {
    fn from(model: ModelId) -> Self {
        model as Self
    }
}

impl TryFrom<u8> for ModelId {
    type Error = UnknownIdentifier;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(UnknownIdentifier { kind: "model", value })
    }
}

/// Shader programs known to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderId {
    /// Lit entity shading
    Phong,
    /// Unlit colored lines (physics wireframes)
    Debug,
    /// Ground grid
    Grid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_ids_match_file_format() {
        assert_eq!(u8::from(ModelId::Cube), 0);
        assert_eq!(u8::from(ModelId::Capsule), 3);
        assert_eq!(ModelId::try_from(2), Ok(ModelId::Cylinder));
        assert_eq!(
            ModelId::try_from(7),
            Err(UnknownIdentifier { kind: "model", value: 7 })
        );
    }
}
