//! Scene snapshot file
//!
//! The snapshot is a single JSON object:
//!
//! ```json
//! {
//!   "Scene":  { "count": 1, "names": ["Cube0"] },
//!   "Camera": { "count": 1, "position": [0, 5, 10], "yaw": -90, "pitch": -26.5 },
//!   "Cube0":  { "position": [0, 0, 0], "rotation": [0, 0, 0], "scale": [1, 1, 1],
//!               "pickingType": 0, "model": 0 }
//! }
//! ```
//!
//! Entity records share the top level with the two header objects and are
//! keyed by entity name. Rotation is stored as per-axis angles in radians.

use super::error::{Result, SceneError};
use super::store::Scene;
use crate::ecs::components::{PickingType, TransformComponent};
use crate::foundation::math::utils::{vec3_from_array, vec3_to_array};
use crate::render::{Camera, CameraSettings, ModelId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Top-level keys that cannot be used as entity names
pub const RESERVED_NAMES: [&str; 2] = ["Scene", "Camera"];

/// `"Scene"` header: entity count and names in reconstruction order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneHeader {
    /// Number of entities written
    pub count: usize,
    /// Entity names, in the order they are rebuilt
    #[serde(default)]
    pub names: Vec<String>,
}

/// `"Camera"` header
///
/// A `count` other than 1 means "no saved camera".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRecord {
    /// 1 when a camera pose is present
    pub count: u32,
    /// Camera position
    pub position: [f32; 3],
    /// Yaw in degrees
    pub yaw: f32,
    /// Pitch in degrees
    pub pitch: f32,
}

/// One entity record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// World position
    pub position: [f32; 3],
    /// Per-axis rotation angles in radians
    pub rotation: [f32; 3],
    /// Per-axis scale
    pub scale: [f32; 3],
    /// Proxy shape id
    #[serde(rename = "pickingType", default = "default_picking")]
    pub picking_type: PickingType,
    /// Model id
    #[serde(default = "default_model")]
    pub model: ModelId,
}

fn default_picking() -> PickingType {
    PickingType::Box
}

fn default_model() -> ModelId {
    ModelId::Cube
}

/// The whole snapshot document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Scene header
    #[serde(rename = "Scene")]
    pub scene: SceneHeader,
    /// Camera header
    #[serde(rename = "Camera", default)]
    pub camera: CameraRecord,
    /// Entity records keyed by name
    #[serde(flatten)]
    pub entities: BTreeMap<String, EntityRecord>,
}

impl SceneDocument {
    /// Capture the live scene and camera
    ///
    /// Entities are listed in creation order. An entity whose name is reserved
    /// or already used by an earlier entity cannot get its own record and is
    /// left out with a warning.
    pub fn capture(scene: &Scene, camera: &Camera) -> Self {
        let mut document = Self {
            camera: CameraRecord {
                count: 1,
                position: vec3_to_array(&camera.position()),
                yaw: camera.yaw(),
                pitch: camera.pitch(),
            },
            ..Self::default()
        };

        let mut seen = HashSet::new();
        for info in scene.entity_infos() {
            if RESERVED_NAMES.contains(&info.name.as_str()) || !seen.insert(info.name.clone()) {
                log::warn!("Not saving {} : name '{}' is reserved or duplicated", info.entity, info.name);
                continue;
            }
            let picking_type = scene
                .pickable(info.entity)
                .map_or(PickingType::Box, |pickable| pickable.kind);

            document.entities.insert(
                info.name.clone(),
                EntityRecord {
                    position: vec3_to_array(&info.position),
                    rotation: vec3_to_array(&info.rotation),
                    scale: vec3_to_array(&info.scale),
                    picking_type,
                    model: info.model,
                },
            );
            document.scene.names.push(info.name);
        }
        document.scene.count = document.scene.names.len();
        document
    }

    /// Replace the contents of `scene` and `camera` with this snapshot
    ///
    /// Every listed name is checked before anything is touched, so a document
    /// that fails validation leaves the scene as it was. A camera record with
    /// `count != 1` resets the camera to `defaults`, keeping the viewport.
    pub fn restore(&self, scene: &mut Scene, camera: &mut Camera, defaults: &CameraSettings) -> Result<()> {
        let records = self
            .scene
            .names
            .iter()
            .map(|name| {
                self.entities
                    .get(name)
                    .map(|record| (name, record))
                    .ok_or_else(|| SceneError::MissingEntity(name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        if self.camera.count == 1 {
            camera.set_position(vec3_from_array(self.camera.position));
            camera.set_yaw(self.camera.yaw);
            camera.set_pitch(self.camera.pitch);
        } else {
            log::info!("Scene has no camera record, using default camera");
            let (width, height) = camera.viewport();
            *camera = Camera::new(defaults, width, height);
        }

        scene.clear();
        for (name, record) in records {
            let transform = TransformComponent::identity()
                .with_position(vec3_from_array(record.position))
                .with_rotation_angles(vec3_from_array(record.rotation))
                .with_scale(vec3_from_array(record.scale));
            scene.create_entity_with_picking(record.model, record.picking_type, name.as_str(), transform);
        }
        Ok(())
    }

    /// Parse a document from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Render the document as indented JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Load the snapshot at `path` into `scene` and `camera`
pub fn load_scene(
    path: impl AsRef<Path>,
    scene: &mut Scene,
    camera: &mut Camera,
    defaults: &CameraSettings,
) -> Result<()> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let document = SceneDocument::from_json(&text)?;
    document.restore(scene, camera, defaults)?;
    log::info!("Loaded {} entities from {}", scene.len(), path.display());
    Ok(())
}

/// Write `scene` and `camera` to `path`, creating parent directories
pub fn save_scene(path: impl AsRef<Path>, scene: &Scene, camera: &Camera) -> Result<()> {
    let path = path.as_ref();
    let document = SceneDocument::capture(scene, camera);
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, document.to_json()? + "\n")?;
    log::info!("Saved {} entities to {}", document.scene.count, path.display());
    Ok(())
}
