//! # 3D Camera System
//!
//! Free-fly editor camera described by a position plus yaw/pitch angles.
//!
//! ## Design Principles
//! - **Angles are the state**: front/right/up are derived and recomputed
//!   whenever yaw, pitch or the world up vector change
//! - **OpenGL conventions**: right-handed view space, clip depth in [-1, 1]
//! - **Degrees at the API**: yaw, pitch and fov are stored in degrees and
//!   converted only when matrices are built

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Pitch limit in degrees, applied by every pitch mutator
pub const PITCH_LIMIT: f32 = 89.0;

/// Smallest field of view reachable by scroll zoom, in degrees
pub const MIN_FOV: f32 = 1.0;

/// Largest field of view reachable by scroll zoom, in degrees
pub const MAX_FOV: f32 = 90.0;

/// Degrees of fov removed per scroll notch
const ZOOM_STEP: f32 = 5.0;

/// Keyboard movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    /// Along the front vector
    Forward,
    /// Against the front vector
    Backward,
    /// Against the right vector
    Left,
    /// Along the right vector
    Right,
}

/// Construction parameters for [`Camera`]
///
/// Mirrors the `[camera]` section of the editor configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Starting position
    pub position: [f32; 3],
    /// Starting yaw in degrees
    pub yaw: f32,
    /// Starting pitch in degrees
    pub pitch: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
    /// Units per second for keyboard movement
    pub movement_speed: f32,
    /// Degrees per pixel for mouse orbit
    pub mouse_sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            yaw: -90.0,
            pitch: 0.0,
            fov: 45.0,
            near: 1.0,
            far: 1000.0,
            movement_speed: 100.0,
            mouse_sensitivity: 0.4,
        }
    }
}

/// Editor camera
///
/// # Coordinate System
/// Right-handed, Y-up. With yaw -90° and pitch 0° the camera looks down -Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,
    viewport_width: u32,
    viewport_height: u32,
    near: f32,
    far: f32,
    movement_speed: f32,
    mouse_sensitivity: f32,
    world_up: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Camera {
    /// Create a camera from settings and a viewport size in pixels
    pub fn new(settings: &CameraSettings, viewport_width: u32, viewport_height: u32) -> Self {
        let mut camera = Self {
            position: utils::vec3_from_array(settings.position),
            yaw: settings.yaw,
            pitch: settings.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            fov: settings.fov,
            viewport_width,
            viewport_height,
            near: settings.near,
            far: settings.far,
            movement_speed: settings.movement_speed,
            mouse_sensitivity: settings.mouse_sensitivity,
            world_up: Vec3::new(0.0, 1.0, 0.0),
            front: Vec3::new(0.0, 0.0, -1.0),
            right: Vec3::new(1.0, 0.0, 0.0),
            up: Vec3::new(0.0, 1.0, 0.0),
        };
        camera.update_vectors();
        camera
    }

    /// Recompute front/right/up from yaw, pitch and the world up vector
    ///
    /// ```text
    /// front = normalize(cos(yaw)·cos(pitch), sin(pitch), sin(yaw)·cos(pitch))
    /// right = normalize(front × world_up)
    /// up    = normalize(right × front)
    /// ```
    pub fn update_vectors(&mut self) {
        let yaw = utils::deg_to_rad(self.yaw);
        let pitch = utils::deg_to_rad(self.pitch);
        let front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
        self.front = front.normalize();
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();
    }

    /// View matrix: `lookAt(position, position + front, up)`
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_gl(self.position, self.position + self.front, self.up)
    }

    /// Projection matrix: `perspective(fov, width / height, near, far)`
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_gl(utils::deg_to_rad(self.fov), self.aspect(), self.near, self.far)
    }

    /// Viewport aspect ratio (width / height)
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect(&self) -> f32 {
        self.viewport_width as f32 / self.viewport_height.max(1) as f32
    }

    /// Camera position in world space
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Move the camera without changing its orientation
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Set yaw in degrees (unconstrained)
    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.update_vectors();
    }

    /// Pitch in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set pitch in degrees, clamped to [-89, 89]
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Change the world up vector used to derive right/up
    pub fn set_world_up(&mut self, world_up: Vec3) {
        self.world_up = world_up;
        self.update_vectors();
    }

    /// Orient the camera towards a world-space point
    ///
    /// Yaw and pitch are solved from the direction to `target`; pitch is
    /// clamped like any other pitch change.
    pub fn look_at(&mut self, target: Vec3) {
        let direction = target - self.position;
        if direction.norm_squared() <= f32::EPSILON {
            return;
        }
        let direction = direction.normalize();
        self.yaw = utils::rad_to_deg(direction.z.atan2(direction.x));
        self.set_pitch(utils::rad_to_deg(direction.y.clamp(-1.0, 1.0).asin()));
        log::trace!("Camera looking at {:?} (yaw {:.2}, pitch {:.2})", target, self.yaw, self.pitch);
    }

    /// Vertical field of view in degrees
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Scroll zoom: `fov -= 5 · y_offset`, clamped to [1, 90]
    pub fn zoom(&mut self, y_offset: f32) {
        self.fov = (self.fov - ZOOM_STEP * y_offset).clamp(MIN_FOV, MAX_FOV);
        log::trace!("Camera fov now {:.1}", self.fov);
    }

    /// Viewport size in pixels
    pub fn viewport(&self) -> (u32, u32) {
        (self.viewport_width, self.viewport_height)
    }

    /// Update the viewport after a resize
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport_width = width;
        self.viewport_height = height;
        log::debug!("Camera viewport resized to {}x{}", width, height);
    }

    /// Near clipping plane distance
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far clipping plane distance
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Derived front vector
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Derived right vector
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Derived up vector
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Fly along the camera axes at `movement_speed · dt`
    pub fn process_keyboard(&mut self, direction: CameraMovement, dt: f32) {
        let velocity = self.movement_speed * dt;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Apply a mouse delta in pixels (`y_offset` positive = up) to yaw/pitch
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.set_pitch(self.pitch + y_offset * self.mouse_sensitivity);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraSettings::default(), 1400, 900)
    }
}
