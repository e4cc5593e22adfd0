//! Wireframe debug drawing of proxy shapes
//!
//! Produces a line list in world space for every collider in a
//! [`ProxyWorld`]. Pick-only proxies are drawn green, anything else red.

use super::ProxyWorld;
use crate::foundation::math::{constants::PI, Mat4, Vec3};
use crate::render::{LineBatch, LineVertex, ShaderId};
use rapier3d::prelude as rapier;

/// Segments used to approximate a circle
const CIRCLE_SEGMENTS: u32 = 24;

/// Color of pick-only proxies
const PICK_ONLY_COLOR: [f32; 3] = [0.0, 1.0, 0.0];

/// Color of proxies that take part in simulation
const SIMULATED_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

/// Accumulates world-space line segments
#[derive(Debug, Default)]
pub struct DebugLines {
    vertices: Vec<LineVertex>,
}

impl DebugLines {
    /// Create an empty line list
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one segment
    pub fn line(&mut self, start: Vec3, end: Vec3, color: [f32; 3]) {
        self.vertices.push(LineVertex { position: [start.x, start.y, start.z], color });
        self.vertices.push(LineVertex { position: [end.x, end.y, end.z], color });
    }

    /// Add the 12 edges of a box with `half` extents placed by `pose`
    pub fn wire_box(&mut self, pose: &rapier::Isometry<f32>, half: Vec3, color: [f32; 3]) {
        let corner = |x: f32, y: f32, z: f32| {
            pose * rapier::Point::new(x * half.x, y * half.y, z * half.z)
        };
        let c = [
            corner(-1.0, -1.0, -1.0),
            corner(1.0, -1.0, -1.0),
            corner(1.0, 1.0, -1.0),
            corner(-1.0, 1.0, -1.0),
            corner(-1.0, -1.0, 1.0),
            corner(1.0, -1.0, 1.0),
            corner(1.0, 1.0, 1.0),
            corner(-1.0, 1.0, 1.0),
        ];
        for i in 0..4 {
            let next = (i + 1) % 4;
            self.line(c[i].coords, c[next].coords, color);
            self.line(c[i + 4].coords, c[next + 4].coords, color);
            self.line(c[i].coords, c[i + 4].coords, color);
        }
    }

    /// Add a circle of `radius` around `center` in the plane spanned by `u` and `v`
    #[allow(clippy::cast_precision_loss)]
    pub fn wire_circle(&mut self, center: Vec3, u: Vec3, v: Vec3, radius: f32, color: [f32; 3]) {
        let point = |i: u32| {
            let angle = 2.0 * PI * i as f32 / CIRCLE_SEGMENTS as f32;
            center + (u * angle.cos() + v * angle.sin()) * radius
        };
        for i in 0..CIRCLE_SEGMENTS {
            self.line(point(i), point(i + 1), color);
        }
    }

    /// Vertices gathered so far, two per segment
    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    /// Package the lines as a world-space batch for the debug shader
    pub fn into_batch(self) -> LineBatch {
        LineBatch {
            shader: ShaderId::Debug,
            model_matrix: Mat4::identity(),
            vertices: self.vertices,
        }
    }
}

/// Wireframes of every proxy collider in `world`
pub fn proxy_wireframes(world: &ProxyWorld) -> LineBatch {
    let mut lines = DebugLines::new();

    for (collider, pick_only) in world.colliders() {
        let color = if pick_only { PICK_ONLY_COLOR } else { SIMULATED_COLOR };
        let pose = collider.position();
        let center = pose.translation.vector;
        let x = pose.rotation * Vec3::x();
        let y = pose.rotation * Vec3::y();
        let z = pose.rotation * Vec3::z();
        let shape = collider.shape();

        if let Some(cuboid) = shape.as_cuboid() {
            lines.wire_box(pose, cuboid.half_extents, color);
        } else if let Some(ball) = shape.as_ball() {
            lines.wire_circle(center, x, y, ball.radius, color);
            lines.wire_circle(center, y, z, ball.radius, color);
            lines.wire_circle(center, z, x, ball.radius, color);
        } else if let Some(cylinder) = shape.as_cylinder() {
            let offset = y * cylinder.half_height;
            lines.wire_circle(center + offset, x, z, cylinder.radius, color);
            lines.wire_circle(center - offset, x, z, cylinder.radius, color);
            for side in [x, -x, z, -z] {
                let rim = side * cylinder.radius;
                lines.line(center + offset + rim, center - offset + rim, color);
            }
        } else if let Some(capsule) = shape.as_capsule() {
            let half_height = capsule.half_height();
            let radius = capsule.radius;
            let offset = y * half_height;
            for end in [center + offset, center - offset] {
                lines.wire_circle(end, x, z, radius, color);
                lines.wire_circle(end, x, y, radius, color);
                lines.wire_circle(end, z, y, radius, color);
            }
            for side in [x, -x, z, -z] {
                let rim = side * radius;
                lines.line(center + offset + rim, center - offset + rim, color);
            }
        }
    }

    lines.into_batch()
}
