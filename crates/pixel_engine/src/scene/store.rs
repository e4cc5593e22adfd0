//! Scene entity store
//!
//! Owns the ECS world and the physics proxy world side by side. The entity
//! [`TransformComponent`] is the single source of truth for pose; the proxy
//! body is a derived copy brought up to date by [`Scene::sync_proxy`], which
//! every pose mutator here calls before returning.

use super::error::{Result, SceneError};
use crate::ecs::components::{PickableComponent, PickingType, RenderableComponent, TransformComponent};
use crate::ecs::{Entity, World};
use crate::foundation::math::{Mat4, Vec3};
use crate::physics::ProxyWorld;
use crate::render::ModelId;

/// Flat per-entity summary for the hierarchy and inspector panels
#[derive(Debug, Clone, PartialEq)]
pub struct EntityInfo {
    /// Entity id
    pub entity: Entity,
    /// Display name
    pub name: String,
    /// Mesh
    pub model: ModelId,
    /// World position
    pub position: Vec3,
    /// Per-axis rotation angles in radians, derived from the orientation
    pub rotation: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
    /// Object color
    pub color: Vec3,
    /// Cached world matrix
    pub world: Mat4,
}

/// Proxy shape given to entities of each model
pub fn default_picking_type(model: ModelId) -> PickingType {
    match model {
        ModelId::Cube => PickingType::Box,
        ModelId::Sphere => PickingType::Sphere,
        ModelId::Cylinder => PickingType::Cylinder,
        ModelId::Capsule => PickingType::Capsule,
    }
}

/// Editor scene: entities with transform, renderable and pickable facets
#[derive(Default)]
pub struct Scene {
    world: World,
    proxies: ProxyWorld,
    creation_counter: u32,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entity with all three facets and a synchronized proxy
    pub fn create_entity(
        &mut self,
        model: ModelId,
        name: impl Into<String>,
        transform: TransformComponent,
    ) -> Entity {
        self.create_entity_with_picking(model, default_picking_type(model), name, transform)
    }

    /// Like [`create_entity`](Self::create_entity) with an explicit proxy shape
    pub fn create_entity_with_picking(
        &mut self,
        model: ModelId,
        picking: PickingType,
        name: impl Into<String>,
        transform: TransformComponent,
    ) -> Entity {
        let name = name.into();
        let entity = self.world.create_entity();

        let proxy = self.proxies.create_proxy(picking, &transform);
        let mut pickable = PickableComponent::new(picking);
        pickable.proxy = Some(proxy);
        pickable.synced_revision = Some(transform.revision());

        self.world.add_component(entity, transform);
        self.world.add_component(entity, RenderableComponent::new(model, name.as_str()));
        self.world.add_component(entity, pickable);
        self.creation_counter += 1;

        log::info!("Created {} '{}' as {}", model, name, entity);
        entity
    }

    /// Create an entity at the origin with a generated name
    pub fn spawn(&mut self, model: ModelId) -> Entity {
        let name = self.generate_name(model);
        self.create_entity(model, name, TransformComponent::identity())
    }

    /// Next free name of the form `<Model><counter>`, e.g. `Cube0`
    ///
    /// The counter counts every entity created during this session; names
    /// already taken (for example by a loaded scene) are skipped.
    pub fn generate_name(&self, model: ModelId) -> String {
        (self.creation_counter..)
            .map(|n| format!("{}{}", model.name(), n))
            .find(|candidate| self.find_by_name(candidate).is_none())
            .unwrap_or_else(|| model.name().to_string())
    }

    /// Destroy an entity, releasing its proxy body first
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<()> {
        if !self.world.contains(entity) {
            return Err(SceneError::UnknownEntity(entity));
        }
        if let Some(proxy) = self
            .world
            .get_component::<PickableComponent>(entity)
            .and_then(|pickable| pickable.proxy)
        {
            self.proxies.destroy_proxy(proxy)?;
        }
        self.world.destroy_entity(entity);
        log::info!("Destroyed {}", entity);
        Ok(())
    }

    /// Destroy the first entity called `name`; returns whether one existed
    pub fn destroy_by_name(&mut self, name: &str) -> Result<bool> {
        match self.find_by_name(name) {
            Some(entity) => self.destroy_entity(entity).map(|()| true),
            None => Ok(false),
        }
    }

    /// Destroy every entity and proxy
    pub fn clear(&mut self) {
        self.world.clear();
        self.proxies.clear();
        log::debug!("Scene cleared");
    }

    /// First entity, in creation order, whose renderable is called `name`
    ///
    /// Names are not required to be unique; later duplicates are unreachable
    /// by name.
    pub fn find_by_name(&self, name: &str) -> Option<Entity> {
        self.world
            .query::<RenderableComponent>()
            .into_iter()
            .find(|entity| self.name(*entity) == Some(name))
    }

    /// Display name of an entity
    pub fn name(&self, entity: Entity) -> Option<&str> {
        self.world
            .get_component::<RenderableComponent>(entity)
            .map(|renderable| renderable.name.as_str())
    }

    /// Rename an entity
    pub fn rename(&mut self, entity: Entity, new_name: impl Into<String>) -> Result<()> {
        let renderable = self
            .world
            .get_component_mut::<RenderableComponent>(entity)
            .ok_or(SceneError::UnknownEntity(entity))?;
        let new_name = new_name.into();
        log::info!("Renamed '{}' to '{}'", renderable.name, new_name);
        renderable.name = new_name;
        Ok(())
    }

    /// Set the display color of an entity
    pub fn set_color(&mut self, entity: Entity, color: Vec3) -> Result<()> {
        self.world
            .get_component_mut::<RenderableComponent>(entity)
            .ok_or(SceneError::UnknownEntity(entity))?
            .color = color;
        Ok(())
    }

    /// Transform facet of an entity
    pub fn transform(&self, entity: Entity) -> Option<&TransformComponent> {
        self.world.get_component::<TransformComponent>(entity)
    }

    /// Renderable facet of an entity
    pub fn renderable(&self, entity: Entity) -> Option<&RenderableComponent> {
        self.world.get_component::<RenderableComponent>(entity)
    }

    /// Pickable facet of an entity
    pub fn pickable(&self, entity: Entity) -> Option<&PickableComponent> {
        self.world.get_component::<PickableComponent>(entity)
    }

    /// Move an entity
    pub fn set_position(&mut self, entity: Entity, position: Vec3) -> Result<()> {
        self.edit_transform(entity, |t| t.set_position(position))
    }

    /// Rotate an entity to per-axis angles in radians
    pub fn set_rotation(&mut self, entity: Entity, angles: Vec3) -> Result<()> {
        self.edit_transform(entity, |t| t.set_rotation_on_all_axis(angles))
    }

    /// Rescale an entity
    pub fn set_scale(&mut self, entity: Entity, scale: Vec3) -> Result<()> {
        self.edit_transform(entity, |t| t.set_scale(scale))
    }

    /// Set position, rotation angles and scale in one edit
    pub fn set_pose(&mut self, entity: Entity, position: Vec3, angles: Vec3, scale: Vec3) -> Result<()> {
        self.edit_transform(entity, |t| {
            t.set_position(position);
            t.set_rotation_on_all_axis(angles);
            t.set_scale(scale);
        })
    }

    fn edit_transform(&mut self, entity: Entity, edit: impl FnOnce(&mut TransformComponent)) -> Result<()> {
        let transform = self
            .world
            .get_component_mut::<TransformComponent>(entity)
            .ok_or(SceneError::UnknownEntity(entity))?;
        edit(transform);
        self.sync_proxy(entity)
    }

    /// Bring the entity's proxy body up to its current transform
    ///
    /// No-op when the proxy is already at the transform's revision or the
    /// entity is not pickable.
    pub fn sync_proxy(&mut self, entity: Entity) -> Result<()> {
        let Some(transform) = self.world.get_component::<TransformComponent>(entity) else {
            return Err(SceneError::UnknownEntity(entity));
        };
        let Some(pickable) = self.world.get_component::<PickableComponent>(entity) else {
            return Ok(());
        };
        let revision = transform.revision();
        if !pickable.is_stale(revision) {
            return Ok(());
        }

        if let Some(proxy) = pickable.proxy {
            self.proxies.sync_proxy(proxy, pickable.kind, transform)?;
        }
        if let Some(pickable) = self.world.get_component_mut::<PickableComponent>(entity) {
            pickable.synced_revision = Some(revision);
        }
        Ok(())
    }

    /// Per-frame pass: re-apply every transform except `skip` and sync stale proxies
    pub fn refresh_transforms(&mut self, skip: Option<Entity>) -> Result<()> {
        for entity in self.world.query::<TransformComponent>() {
            if Some(entity) == skip {
                continue;
            }
            if let Some(transform) = self.world.get_component_mut::<TransformComponent>(entity) {
                transform.apply();
            }
            self.sync_proxy(entity)?;
        }
        Ok(())
    }

    /// Entities with a renderable, in creation order
    pub fn entities(&self) -> Vec<Entity> {
        self.world.query::<RenderableComponent>()
    }

    /// Entities with both a transform and a pickable facet, in creation order
    pub fn pickable_entities(&self) -> Vec<Entity> {
        self.world.query2::<TransformComponent, PickableComponent>()
    }

    /// Summary of one entity
    pub fn info(&self, entity: Entity) -> Option<EntityInfo> {
        let transform = self.transform(entity)?;
        let renderable = self.renderable(entity)?;
        Some(EntityInfo {
            entity,
            name: renderable.name.clone(),
            model: renderable.model,
            position: transform.position(),
            rotation: transform.rotation_angles(),
            scale: transform.scale(),
            color: renderable.color,
            world: *transform.world_matrix(),
        })
    }

    /// Summaries of every entity, in creation order
    pub fn entity_infos(&self) -> Vec<EntityInfo> {
        self.entities().into_iter().filter_map(|entity| self.info(entity)).collect()
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.world.entity_count()
    }

    /// Whether the scene has no entities
    pub fn is_empty(&self) -> bool {
        self.world.entity_count() == 0
    }

    /// The underlying component store
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The physics proxy world
    pub fn proxies(&self) -> &ProxyWorld {
        &self.proxies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picking::Ray;
    use approx::assert_relative_eq;

    fn ray_down_z(x: f32) -> Ray {
        Ray::new(Vec3::new(x, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_generated_names_count_creations() {
        let mut scene = Scene::new();
        let a = scene.spawn(ModelId::Cube);
        let b = scene.spawn(ModelId::Sphere);
        assert_eq!(scene.name(a), Some("Cube0"));
        assert_eq!(scene.name(b), Some("Sphere1"));

        scene.create_entity(ModelId::Cube, "Cube3", TransformComponent::identity());
        assert_eq!(scene.generate_name(ModelId::Cube), "Cube4");
        assert_eq!(scene.generate_name(ModelId::Capsule), "Capsule3");
    }

    #[test]
    fn test_pose_edit_syncs_proxy() {
        let mut scene = Scene::new();
        let cube = scene.spawn(ModelId::Cube);
        let proxy = scene.pickable(cube).and_then(|p| p.proxy).expect("proxy created");

        scene.set_position(cube, Vec3::new(5.0, 0.0, 0.0)).expect("entity exists");
        assert_relative_eq!(
            scene.proxies().proxy_position(proxy).expect("proxy alive"),
            Vec3::new(5.0, 0.0, 0.0)
        );
        assert!(scene.proxies().cast_ray(&ray_down_z(0.0), 100.0).is_none());
        assert!(scene.proxies().cast_ray(&ray_down_z(5.0), 100.0).is_some());

        let revision = scene.transform(cube).map(TransformComponent::revision);
        assert_eq!(scene.pickable(cube).and_then(|p| p.synced_revision), revision);
    }

    #[test]
    fn test_destroy_releases_proxy() {
        let mut scene = Scene::new();
        let a = scene.spawn(ModelId::Cube);
        scene.spawn(ModelId::Cylinder);
        assert_eq!(scene.proxies().len(), 2);

        scene.destroy_entity(a).expect("entity exists");
        assert_eq!(scene.proxies().len(), 1);
        assert_eq!(scene.len(), 1);
        assert!(matches!(scene.destroy_entity(a), Err(SceneError::UnknownEntity(_))));
    }

    #[test]
    fn test_duplicate_names_resolve_to_first() {
        let mut scene = Scene::new();
        let first = scene.create_entity(ModelId::Cube, "Box", TransformComponent::identity());
        let second = scene.create_entity(ModelId::Sphere, "Box", TransformComponent::identity());
        assert_eq!(scene.find_by_name("Box"), Some(first));

        assert!(scene.destroy_by_name("Box").expect("destroy succeeds"));
        assert_eq!(scene.find_by_name("Box"), Some(second));
        assert!(!scene.destroy_by_name("Missing").expect("destroy succeeds"));
    }

    #[test]
    fn test_rename_and_color() {
        let mut scene = Scene::new();
        let e = scene.spawn(ModelId::Capsule);
        scene.rename(e, "Pillar").expect("entity exists");
        scene.set_color(e, Vec3::new(1.0, 0.0, 0.0)).expect("entity exists");

        let info = scene.info(e).expect("entity exists");
        assert_eq!(info.name, "Pillar");
        assert_eq!(info.color, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(scene.find_by_name("Capsule0"), None);
    }

    #[test]
    fn test_refresh_keeps_matrices_stable() {
        let mut scene = Scene::new();
        let e = scene.spawn(ModelId::Sphere);
        scene
            .set_pose(e, Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.1, 0.2, 0.3), Vec3::new(2.0, 2.0, 2.0))
            .expect("entity exists");
        let before = scene.info(e).map(|info| info.world);

        scene.refresh_transforms(None).expect("refresh succeeds");
        assert_eq!(scene.info(e).map(|info| info.world), before);
    }

    #[test]
    fn test_clear_empties_scene() {
        let mut scene = Scene::new();
        scene.spawn(ModelId::Cube);
        scene.spawn(ModelId::Sphere);
        scene.clear();
        assert!(scene.is_empty());
        assert!(scene.proxies().is_empty());
        assert!(scene.entity_infos().is_empty());
    }
}
