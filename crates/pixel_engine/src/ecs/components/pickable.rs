//! Pickable component for mouse selection
//!
//! Marks an entity as selectable by mouse ray and links it to the pick-only
//! proxy body that mirrors its pose in the physics world.

use crate::ecs::Component;
use crate::physics::ProxyHandle;
use crate::render::identifiers::UnknownIdentifier;

/// Collision shape used for the picking proxy
///
/// Persisted as an integer, so discriminants are part of the scene format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PickingType {
    /// Oriented box
    Box = 0,
    /// Sphere
    Sphere = 1,
    /// Capsule along local Y
    Capsule = 2,
    /// Cylinder along local Y
    Cylinder = 3,
}

impl PickingType {
    /// Every picking type in discriminant order
    pub const ALL: [Self; 4] = [Self::Box, Self::Sphere, Self::Capsule, Self::Cylinder];
}

impl From<PickingType> for u8 {
    fn from(kind: PickingType) -> Self {
        kind as Self
    }
}

impl TryFrom<u8> for PickingType {
    type Error = UnknownIdentifier;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(UnknownIdentifier { kind: "picking type", value })
    }
}

/// Component marking an entity as pickable (selectable via mouse)
#[derive(Debug, Clone, PartialEq)]
pub struct PickableComponent {
    /// Shape of the picking proxy
    pub kind: PickingType,

    /// Proxy body in the physics world, once created
    pub proxy: Option<ProxyHandle>,

    /// Transform revision the proxy pose was last synchronized to
    pub synced_revision: Option<u64>,
}

impl PickableComponent {
    /// Create a pickable component without a proxy body yet
    pub fn new(kind: PickingType) -> Self {
        Self {
            kind,
            proxy: None,
            synced_revision: None,
        }
    }

    /// Whether the proxy lags behind the given transform revision
    pub fn is_stale(&self, revision: u64) -> bool {
        self.synced_revision != Some(revision)
    }
}

impl Component for PickableComponent {}
