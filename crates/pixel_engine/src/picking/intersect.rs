//! Ray intersection tests used by picking
//!
//! Both analytic tests work against a model matrix, so they see the same pose
//! the renderer draws. The proxy test asks the physics world instead.

use super::Ray;
use crate::foundation::math::{Mat4, Mat4Ext, Point3, Vec3};
use crate::physics::{ProxyHandle, ProxyWorld};

/// Below this, a ray direction is considered parallel to a slab
pub const PARALLEL_EPSILON: f32 = 1e-25;

/// Closest slab entry accepted (hits behind the origin are rejected)
const T_MIN_START: f32 = 0.0;

/// Farthest slab exit accepted
const T_MAX_START: f32 = 100_000.0;

/// Ray against a sphere of `radius` centered at the model origin
///
/// The ray is carried into object space with the inverse model matrix (origin
/// as a point, direction as a vector) and the quadratic `a·t² + b·t + c = 0` is
/// checked for real roots. A tangent ray (discriminant exactly zero) hits.
/// Only existence is reported; spheres entirely behind the origin also count.
pub fn ray_sphere(ray: &Ray, model: &Mat4, radius: f32) -> bool {
    let inverse = model.inverse_or_identity();
    let origin = inverse.transform_point(&Point3::from(ray.origin)).coords;
    let direction = inverse.transform_vector(&ray.direction);

    let a = direction.dot(&direction);
    let b = 2.0 * origin.dot(&direction);
    let c = origin.dot(&origin) - radius * radius;

    b * b - 4.0 * a * c >= 0.0
}

/// Ray against an oriented box (slab method), returning the entry distance
///
/// `aabb_min`/`aabb_max` are object-space bounds; `model` places the box. The
/// model axes are normalized and the bounds scaled by each axis length, so a
/// scaled model matrix tests the scaled box. Entry and exit are compared
/// with the same non-strict rule on all three axes: a ray that only touches
/// the box still hits.
pub fn ray_obb_distance(ray: &Ray, aabb_min: &Vec3, aabb_max: &Vec3, model: &Mat4) -> Option<f32> {
    let mut t_min = T_MIN_START;
    let mut t_max = T_MAX_START;
    let delta = model.translation_part() - ray.origin;

    for i in 0..3 {
        let column = model.basis_axis(i);
        let length = column.norm();
        if length <= f32::EPSILON {
            return None;
        }
        let axis = column / length;
        let (min, max) = (aabb_min[i] * length, aabb_max[i] * length);

        let e = axis.dot(&delta);
        let f = ray.direction.dot(&axis);

        if f.abs() > PARALLEL_EPSILON {
            let mut t1 = (e + min) / f;
            let mut t2 = (e + max) / f;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_max = t_max.min(t2);
            t_min = t_min.max(t1);
            if t_max < t_min {
                return None;
            }
        } else if -e + min > 0.0 || -e + max < 0.0 {
            return None;
        }
    }

    Some(t_min)
}

/// Ray against an oriented box (slab method)
///
/// See [`ray_obb_distance`] for the exact rules.
pub fn ray_obb(ray: &Ray, aabb_min: &Vec3, aabb_max: &Vec3, model: &Mat4) -> bool {
    ray_obb_distance(ray, aabb_min, aabb_max, model).is_some()
}

/// Ray against an entity's physics proxy
///
/// Casts over `[origin, origin + direction · max_distance]`. The pick succeeds
/// only when the closest collider hit belongs to `proxy` and that proxy is
/// pick-only.
pub fn ray_proxy(ray: &Ray, max_distance: f32, proxy: ProxyHandle, world: &ProxyWorld) -> bool {
    world
        .cast_ray(ray, max_distance)
        .is_some_and(|hit| hit.proxy == proxy && world.is_pick_only(proxy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{PickingType, TransformComponent};
    use crate::foundation::math::constants::PI;
    use approx::assert_relative_eq;

    fn unit_bounds() -> (Vec3, Vec3) {
        (Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_sphere_tangent_ray_hits() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(ray_sphere(&ray, &Mat4::identity(), 1.0));
    }

    #[test]
    fn test_sphere_surface_origin_aimed_at_center_hits() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(ray_sphere(&ray, &Mat4::identity(), 1.0));
    }

    #[test]
    fn test_sphere_miss_and_model_translation() {
        let ray = Ray::new(Vec3::new(1.01, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!ray_sphere(&ray, &Mat4::identity(), 1.0));

        let model = Mat4::new_translation(&Vec3::new(1.5, 0.0, 0.0));
        assert!(ray_sphere(&ray, &model, 1.0));
    }

    #[test]
    fn test_sphere_respects_model_scale() {
        let ray = Ray::new(Vec3::new(1.5, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let model = Mat4::new_scaling(2.0);
        assert!(ray_sphere(&ray, &model, 1.0));
        assert!(!ray_sphere(&ray, &Mat4::identity(), 1.0));
    }

    #[test]
    fn test_obb_center_hit_along_every_axis() {
        let (min, max) = unit_bounds();
        for axis in [Vec3::x(), Vec3::y(), Vec3::z()] {
            for sign in [1.0, -1.0] {
                let direction = axis * sign;
                let ray = Ray::new(-direction * 10.0, direction);
                let t = ray_obb_distance(&ray, &min, &max, &Mat4::identity());
                assert_relative_eq!(t.unwrap_or(f32::NAN), 9.0, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_obb_parallel_offset_misses_on_every_axis() {
        let (min, max) = unit_bounds();
        let cases = [
            (Vec3::new(2.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0)),
            (Vec3::new(-2.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0)),
            (Vec3::new(0.0, 2.0, 10.0), Vec3::new(0.0, 0.0, -1.0)),
            (Vec3::new(10.0, 0.0, 2.0), Vec3::new(-1.0, 0.0, 0.0)),
            (Vec3::new(0.0, 10.0, -2.0), Vec3::new(0.0, -1.0, 0.0)),
        ];
        for (origin, direction) in cases {
            assert!(!ray_obb(&Ray::new(origin, direction), &min, &max, &Mat4::identity()));
        }
    }

    #[test]
    fn test_obb_touching_face_counts_as_hit() {
        let (min, max) = unit_bounds();
        let along_face = Ray::new(Vec3::new(1.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(ray_obb(&along_face, &min, &max, &Mat4::identity()));

        // Diagonal ray grazing the (1, 1, z) edge: entry equals exit.
        let grazing = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        assert!(ray_obb(&grazing, &min, &max, &Mat4::identity()));
    }

    #[test]
    fn test_obb_behind_origin_misses() {
        let (min, max) = unit_bounds();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!ray_obb(&ray, &min, &max, &Mat4::identity()));
    }

    #[test]
    fn test_obb_rotated_and_scaled_box() {
        let (min, max) = unit_bounds();
        let model = Mat4::new_translation(&Vec3::new(0.0, 0.0, -5.0))
            * Mat4::from_axis_angle(&Vec3::y_axis(), PI * 0.25)
            * Mat4::new_nonuniform_scaling(&Vec3::new(3.0, 1.0, 1.0));

        // The long X axis now points diagonally in XZ, so x = 1.8 is inside
        // the rotated box but outside its unscaled footprint.
        let ray = Ray::new(Vec3::new(1.8, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(ray_obb(&ray, &min, &max, &model));

        let above = Ray::new(Vec3::new(0.0, 1.5, 10.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!ray_obb(&above, &min, &max, &model));
    }

    #[test]
    fn test_proxy_requires_matching_pick_only_body() {
        let mut world = ProxyWorld::new();
        let near = world.create_proxy(
            PickingType::Box,
            &TransformComponent::from_position(Vec3::new(0.0, 0.0, 2.0)),
        );
        let far = world.create_proxy(PickingType::Box, &TransformComponent::identity());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));

        assert!(ray_proxy(&ray, 1000.0, near, &world));
        assert!(!ray_proxy(&ray, 1000.0, far, &world));
        assert!(!ray_proxy(&ray, 5.0, near, &world));

        world.set_pick_only(near, false).expect("proxy exists");
        assert!(!ray_proxy(&ray, 1000.0, near, &world));
    }
}
