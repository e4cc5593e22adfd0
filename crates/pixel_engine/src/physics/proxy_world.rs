//! Proxy world - rapier container for pick-only bodies

use super::error::{PhysicsError, Result};
use crate::ecs::components::{PickingType, TransformComponent};
use crate::foundation::math::Vec3;
use crate::picking::Ray;
use rapier3d::prelude as rapier;

/// Smallest half-extent or radius a proxy shape is built with
const MIN_EXTENT: f32 = 1.0e-4;

/// Handle to a proxy body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProxyHandle(pub(crate) rapier::RigidBodyHandle);

/// Closest proxy hit by a ray cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProxyHit {
    /// Body that was hit
    pub proxy: ProxyHandle,
    /// Distance along the ray
    pub distance: f32,
}

/// Rapier world holding one body plus collider per pickable entity
///
/// Pick-only proxies are fixed bodies: rapier never integrates them, which is
/// the "simulation disabled" marker picking relies on.
pub struct ProxyWorld {
    bodies: rapier::RigidBodySet,
    colliders: rapier::ColliderSet,
    islands: rapier::IslandManager,
    impulse_joints: rapier::ImpulseJointSet,
    multibody_joints: rapier::MultibodyJointSet,
    query_pipeline: rapier::QueryPipeline,
}

impl Default for ProxyWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl ProxyWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self {
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
            islands: rapier::IslandManager::new(),
            impulse_joints: rapier::ImpulseJointSet::new(),
            multibody_joints: rapier::MultibodyJointSet::new(),
            query_pipeline: rapier::QueryPipeline::new(),
        }
    }

    /// Create a pick-only proxy matching `transform`
    pub fn create_proxy(&mut self, kind: PickingType, transform: &TransformComponent) -> ProxyHandle {
        let pose = isometry(transform);
        let body = rapier::RigidBodyBuilder::fixed().position(pose).build();
        let handle = self.bodies.insert(body);

        let collider = rapier::ColliderBuilder::new(scaled_shape(kind, &transform.scale()))
            .position(rapier::Isometry::identity())
            .build();
        self.colliders.insert_with_parent(collider, handle, &mut self.bodies);
        self.set_collider_pose(handle, pose);
        self.query_pipeline.update(&self.colliders);

        log::debug!("Created {:?} proxy {:?}", kind, handle);
        ProxyHandle(handle)
    }

    /// Copy position, orientation and scale from `transform` onto the proxy
    ///
    /// Scale is baked into the collider shape, so the shape is rebuilt on every
    /// sync.
    pub fn sync_proxy(
        &mut self,
        proxy: ProxyHandle,
        kind: PickingType,
        transform: &TransformComponent,
    ) -> Result<()> {
        let pose = isometry(transform);
        let body = self.bodies.get_mut(proxy.0).ok_or(PhysicsError::UnknownProxy(proxy))?;
        body.set_position(pose, false);

        let shape = scaled_shape(kind, &transform.scale());
        for collider in self.collider_handles(proxy.0) {
            if let Some(collider) = self.colliders.get_mut(collider) {
                collider.set_shape(shape.clone());
            }
        }
        self.set_collider_pose(proxy.0, pose);
        self.query_pipeline.update(&self.colliders);
        log::trace!("Synced proxy {:?} to {:?}", proxy, transform.position());
        Ok(())
    }

    /// Remove a proxy and its collider
    pub fn destroy_proxy(&mut self, proxy: ProxyHandle) -> Result<()> {
        self.bodies
            .remove(
                proxy.0,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true, // Remove attached colliders
            )
            .ok_or(PhysicsError::UnknownProxy(proxy))?;
        self.query_pipeline.update(&self.colliders);
        log::debug!("Destroyed proxy {:?}", proxy);
        Ok(())
    }

    /// Remove every proxy
    pub fn clear(&mut self) {
        let handles: Vec<_> = self.bodies.iter().map(|(handle, _)| handle).collect();
        for handle in handles {
            let _ = self.destroy_proxy(ProxyHandle(handle));
        }
    }

    /// Whether the proxy is excluded from simulation (pick-only)
    pub fn is_pick_only(&self, proxy: ProxyHandle) -> bool {
        self.bodies.get(proxy.0).is_some_and(rapier::RigidBody::is_fixed)
    }

    /// Toggle the pick-only marker
    ///
    /// A proxy that is not pick-only still blocks rays but never counts as a
    /// pick.
    pub fn set_pick_only(&mut self, proxy: ProxyHandle, pick_only: bool) -> Result<()> {
        let body = self.bodies.get_mut(proxy.0).ok_or(PhysicsError::UnknownProxy(proxy))?;
        let body_type = if pick_only {
            rapier::RigidBodyType::Fixed
        } else {
            rapier::RigidBodyType::Dynamic
        };
        body.set_body_type(body_type, false);
        Ok(())
    }

    /// Closest proxy along `ray` within `max_distance`
    pub fn cast_ray(&self, ray: &Ray, max_distance: f32) -> Option<ProxyHit> {
        let rapier_ray = rapier::Ray::new(
            rapier::Point::new(ray.origin.x, ray.origin.y, ray.origin.z),
            rapier::Vector::new(ray.direction.x, ray.direction.y, ray.direction.z),
        );

        self.query_pipeline
            .cast_ray(
                &self.bodies,
                &self.colliders,
                &rapier_ray,
                max_distance,
                true,
                rapier::QueryFilter::new(),
            )
            .and_then(|(collider, distance)| {
                let parent = self.colliders.get(collider)?.parent()?;
                Some(ProxyHit { proxy: ProxyHandle(parent), distance })
            })
    }

    /// Number of live proxies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the world holds no proxies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// World position of a proxy
    pub fn proxy_position(&self, proxy: ProxyHandle) -> Option<Vec3> {
        self.bodies.get(proxy.0).map(|body| *body.translation())
    }

    /// Colliders with their world pose, for debug drawing
    pub(crate) fn colliders(&self) -> impl Iterator<Item = (&rapier::Collider, bool)> {
        self.colliders.iter().map(|(_, collider)| {
            let pick_only = collider
                .parent()
                .and_then(|parent| self.bodies.get(parent))
                .is_some_and(rapier::RigidBody::is_fixed);
            (collider, pick_only)
        })
    }

    fn collider_handles(&self, body: rapier::RigidBodyHandle) -> Vec<rapier::ColliderHandle> {
        self.bodies
            .get(body)
            .map(|body| body.colliders().to_vec())
            .unwrap_or_default()
    }

    /// The world is never stepped, so parent poses are not propagated to
    /// colliders automatically.
    fn set_collider_pose(&mut self, body: rapier::RigidBodyHandle, pose: rapier::Isometry<f32>) {
        for handle in self.collider_handles(body) {
            if let Some(collider) = self.colliders.get_mut(handle) {
                collider.set_position(pose);
            }
        }
    }
}

fn isometry(transform: &TransformComponent) -> rapier::Isometry<f32> {
    let p = transform.position();
    rapier::Isometry::from_parts(rapier::Translation::new(p.x, p.y, p.z), transform.orientation())
}

/// Collision shape for `kind` at `scale`
///
/// At unit scale: box half-extents 1, sphere radius 1, cylinder half-height 1
/// and radius 1, capsule half-height 0.5 and radius 0.5.
pub(crate) fn scaled_shape(kind: PickingType, scale: &Vec3) -> rapier::SharedShape {
    let s = scale.abs().map(|v| v.max(MIN_EXTENT));
    let radial = s.x.max(s.z);
    match kind {
        PickingType::Box => rapier::SharedShape::cuboid(s.x, s.y, s.z),
        PickingType::Sphere => rapier::SharedShape::ball(s.max()),
        PickingType::Cylinder => rapier::SharedShape::cylinder(s.y, radial),
        PickingType::Capsule => rapier::SharedShape::capsule_y(0.5 * s.y, 0.5 * radial),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ray_down_z(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 10.0), Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_ray_hits_box_proxy() {
        let mut world = ProxyWorld::new();
        let proxy = world.create_proxy(PickingType::Box, &TransformComponent::identity());

        let hit = world.cast_ray(&ray_down_z(0.0, 0.0), 1000.0).expect("ray should hit");
        assert_eq!(hit.proxy, proxy);
        assert_relative_eq!(hit.distance, 9.0, epsilon = 1e-4);
        assert!(world.is_pick_only(proxy));
    }

    #[test]
    fn test_sync_moves_and_rescales_proxy() {
        let mut world = ProxyWorld::new();
        let mut transform = TransformComponent::identity();
        let proxy = world.create_proxy(PickingType::Box, &transform);

        transform.set_position(Vec3::new(5.0, 0.0, 0.0));
        transform.set_scale(Vec3::new(2.0, 2.0, 2.0));
        world.sync_proxy(proxy, PickingType::Box, &transform).expect("proxy exists");

        assert!(world.cast_ray(&ray_down_z(0.0, 0.0), 1000.0).is_none());
        let hit = world.cast_ray(&ray_down_z(6.5, 0.0), 1000.0).expect("scaled box is hit");
        assert_eq!(hit.proxy, proxy);
        assert_relative_eq!(hit.distance, 8.0, epsilon = 1e-4);
    }

    #[test]
    fn test_max_distance_limits_hits() {
        let mut world = ProxyWorld::new();
        world.create_proxy(PickingType::Sphere, &TransformComponent::identity());
        assert!(world.cast_ray(&ray_down_z(0.0, 0.0), 5.0).is_none());
        assert!(world.cast_ray(&ray_down_z(0.0, 0.0), 9.5).is_some());
    }

    #[test]
    fn test_destroy_proxy() {
        let mut world = ProxyWorld::new();
        let proxy = world.create_proxy(PickingType::Capsule, &TransformComponent::identity());
        assert_eq!(world.len(), 1);

        world.destroy_proxy(proxy).expect("proxy exists");
        assert!(world.is_empty());
        assert!(world.cast_ray(&ray_down_z(0.0, 0.0), 1000.0).is_none());
        assert_eq!(world.destroy_proxy(proxy), Err(PhysicsError::UnknownProxy(proxy)));
    }

    #[test]
    fn test_pick_only_flag() {
        let mut world = ProxyWorld::new();
        let proxy = world.create_proxy(PickingType::Cylinder, &TransformComponent::identity());
        world.set_pick_only(proxy, false).expect("proxy exists");
        assert!(!world.is_pick_only(proxy));
        world.set_pick_only(proxy, true).expect("proxy exists");
        assert!(world.is_pick_only(proxy));
    }
}
