//! Click-to-select picking
//!
//! A click in the hovered viewport casts one ray from the camera and walks the
//! pickable entities in creation order. The first entity the active test
//! accepts becomes the selection; there is no depth comparison between
//! candidates.

use super::intersect::{ray_obb, ray_proxy, ray_sphere};
use super::{Ray, RayGenerator};
use crate::ecs::Entity;
use crate::foundation::math::Vec3;
use crate::input::MouseState;
use crate::render::Camera;
use crate::scene::Scene;
use serde::{Deserialize, Serialize};

/// Object-space bounds of every model mesh
const MODEL_BOUNDS_MIN: [f32; 3] = [-1.0, -1.0, -1.0];
const MODEL_BOUNDS_MAX: [f32; 3] = [1.0, 1.0, 1.0];

/// Radius used by the sphere test
const MODEL_RADIUS: f32 = 1.0;

/// Which intersection test decides a pick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickMode {
    /// Slab test against the entity's world matrix
    Obb,
    /// Quadratic test against a unit sphere in model space
    Sphere,
    /// Ray cast against the physics proxy
    #[default]
    Proxy,
}

/// The selected entity plus an editable copy of its pose and color
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Selected entity
    pub entity: Entity,
    /// Display name
    pub name: String,
    /// World position
    pub position: Vec3,
    /// Per-axis rotation angles in radians
    pub rotation: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
    /// Object color
    pub color: Vec3,
}

impl Selection {
    /// Snapshot the current state of `entity`
    pub fn capture(scene: &Scene, entity: Entity) -> Option<Self> {
        let info = scene.info(entity)?;
        Some(Self {
            entity,
            name: info.name,
            position: info.position,
            rotation: info.rotation,
            scale: info.scale,
            color: info.color,
        })
    }
}

/// Result of one click
#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    /// The viewport was not hovered; the current selection stands
    Ignored,
    /// An entity was hit
    Hit(Selection),
    /// Nothing was hit; the selection should be cleared
    Miss,
}

impl PickOutcome {
    /// The selection carried by a hit
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            Self::Hit(selection) => Some(selection),
            Self::Ignored | Self::Miss => None,
        }
    }
}

/// Turns clicks into selections
#[derive(Debug, Clone, PartialEq)]
pub struct PickingCoordinator {
    /// Active intersection test
    pub mode: PickMode,
    /// Ray length used by proxy casts
    pub max_distance: f32,
    /// Window position of the viewport's top-left pixel
    pub viewport_offset: (f32, f32),
}

impl Default for PickingCoordinator {
    fn default() -> Self {
        Self {
            mode: PickMode::default(),
            max_distance: 1000.0,
            viewport_offset: (0.0, 0.0),
        }
    }
}

impl PickingCoordinator {
    /// Create a coordinator
    pub fn new(mode: PickMode, max_distance: f32, viewport_offset: (f32, f32)) -> Self {
        Self { mode, max_distance, viewport_offset }
    }

    /// Pick at the last cursor position recorded in `mouse`
    pub fn pick_at_cursor(&self, mouse: &MouseState, camera: &Camera, scene: &Scene) -> PickOutcome {
        let (x, y) = mouse.viewport_position(self.viewport_offset);
        self.pick(x, y, mouse.hovered, camera, scene)
    }

    /// Pick at viewport pixel `(x, y)`
    pub fn pick(&self, x: f32, y: f32, hovered: bool, camera: &Camera, scene: &Scene) -> PickOutcome {
        if !hovered {
            return PickOutcome::Ignored;
        }

        let ray = RayGenerator::screen_to_world(x, y, camera);
        log::trace!("Pick ray from {:?} along {:?}", ray.origin, ray.direction);

        let hit = scene
            .pickable_entities()
            .into_iter()
            .find(|&entity| self.test(&ray, entity, scene));

        match hit.and_then(|entity| Selection::capture(scene, entity)) {
            Some(selection) => {
                log::debug!("Picked '{}' ({}) with {:?}", selection.name, selection.entity, self.mode);
                PickOutcome::Hit(selection)
            }
            None => {
                log::debug!("Pick at ({:.1}, {:.1}) missed", x, y);
                PickOutcome::Miss
            }
        }
    }

    fn test(&self, ray: &Ray, entity: Entity, scene: &Scene) -> bool {
        match self.mode {
            PickMode::Obb => scene.transform(entity).is_some_and(|transform| {
                ray_obb(
                    ray,
                    &Vec3::from(MODEL_BOUNDS_MIN),
                    &Vec3::from(MODEL_BOUNDS_MAX),
                    transform.world_matrix(),
                )
            }),
            PickMode::Sphere => scene
                .transform(entity)
                .is_some_and(|transform| ray_sphere(ray, transform.world_matrix(), MODEL_RADIUS)),
            PickMode::Proxy => scene
                .pickable(entity)
                .and_then(|pickable| pickable.proxy)
                .is_some_and(|proxy| ray_proxy(ray, self.max_distance, proxy, scene.proxies())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::TransformComponent;
    use crate::render::ModelId;

    const CENTER: (f32, f32) = (700.0, 450.0);

    fn looking_at_origin() -> Camera {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(0.0, 5.0, 10.0));
        camera.look_at(Vec3::zeros());
        camera
    }

    fn single_cube() -> Scene {
        let mut scene = Scene::new();
        scene.spawn(ModelId::Cube);
        scene
    }

    #[test]
    fn test_center_pixel_selects_cube_in_every_mode() {
        let scene = single_cube();
        let camera = looking_at_origin();

        for mode in [PickMode::Obb, PickMode::Sphere, PickMode::Proxy] {
            let coordinator = PickingCoordinator { mode, ..PickingCoordinator::default() };
            let outcome = coordinator.pick(CENTER.0, CENTER.1, true, &camera, &scene);
            let selection = outcome.selection().expect("center pixel hits the cube");
            assert_eq!(selection.name, "Cube0");
            assert_eq!(selection.position, Vec3::zeros());
            assert_eq!(selection.scale, Vec3::new(1.0, 1.0, 1.0));
        }
    }

    #[test]
    fn test_corner_pixel_misses() {
        let scene = single_cube();
        let camera = looking_at_origin();

        for mode in [PickMode::Obb, PickMode::Sphere, PickMode::Proxy] {
            let coordinator = PickingCoordinator { mode, ..PickingCoordinator::default() };
            assert_eq!(coordinator.pick(0.0, 0.0, true, &camera, &scene), PickOutcome::Miss);
        }
    }

    #[test]
    fn test_not_hovered_is_ignored() {
        let scene = single_cube();
        let camera = looking_at_origin();
        let outcome = PickingCoordinator::default().pick(CENTER.0, CENTER.1, false, &camera, &scene);
        assert_eq!(outcome, PickOutcome::Ignored);
    }

    #[test]
    fn test_empty_scene_misses() {
        let outcome = PickingCoordinator::default().pick(CENTER.0, CENTER.1, true, &looking_at_origin(), &Scene::new());
        assert_eq!(outcome, PickOutcome::Miss);
    }

    #[test]
    fn test_first_created_wins_over_nearest() {
        let mut scene = Scene::new();
        scene.create_entity(ModelId::Cube, "Far", TransformComponent::from_position(Vec3::new(0.0, 0.0, -5.0)));
        scene.create_entity(ModelId::Cube, "Near", TransformComponent::identity());

        let mut camera = Camera::default();
        camera.set_position(Vec3::new(0.0, 0.0, 10.0));

        let obb = PickingCoordinator { mode: PickMode::Obb, ..PickingCoordinator::default() };
        let outcome = obb.pick(CENTER.0, CENTER.1, true, &camera, &scene);
        assert_eq!(outcome.selection().map(|s| s.name.as_str()), Some("Far"));

        // Only the closest proxy along the ray can match
        let proxy = PickingCoordinator { mode: PickMode::Proxy, ..PickingCoordinator::default() };
        let outcome = proxy.pick(CENTER.0, CENTER.1, true, &camera, &scene);
        assert_eq!(outcome.selection().map(|s| s.name.as_str()), Some("Near"));
    }

    #[test]
    fn test_moved_entity_is_picked_at_new_pose() {
        let mut scene = single_cube();
        let cube = scene.find_by_name("Cube0").expect("cube exists");
        scene.set_position(cube, Vec3::new(30.0, 0.0, 0.0)).expect("cube exists");
        let camera = looking_at_origin();

        for mode in [PickMode::Obb, PickMode::Proxy] {
            let coordinator = PickingCoordinator { mode, ..PickingCoordinator::default() };
            assert_eq!(coordinator.pick(CENTER.0, CENTER.1, true, &camera, &scene), PickOutcome::Miss);
        }
    }

    #[test]
    fn test_cursor_pick_subtracts_viewport_offset() {
        let scene = single_cube();
        let camera = looking_at_origin();
        let coordinator = PickingCoordinator { viewport_offset: (16.0, 50.0), ..PickingCoordinator::default() };

        let mut mouse = MouseState::new(CENTER.0 + 16.0, CENTER.1 + 50.0);
        mouse.hovered = true;
        assert!(coordinator.pick_at_cursor(&mouse, &camera, &scene).selection().is_some());

        mouse.hovered = false;
        assert_eq!(coordinator.pick_at_cursor(&mouse, &camera, &scene), PickOutcome::Ignored);
    }
}
