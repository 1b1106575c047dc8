//! Free-fly camera with yaw/pitch orientation.

use crate::error::Result;
use crate::math::{Matrix4, Vector3};
use crate::params::CameraParams;

/// Pitch limit either way (degrees); keeps the basis away from the poles.
pub const MAX_PITCH_DEGREES: f32 = 89.0;

/// Beyond this `|direction.y|` the right vector falls back to world X.
const POLE_THRESHOLD: f32 = 0.999;

/// Keyboard-style movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Camera pose and lens.
///
/// `direction`, `right` and `up` are unit length and mutually orthogonal
/// after every rotation; pitch stays within `[-89, 89]` degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vector3,
    direction: Vector3,
    right: Vector3,
    up: Vector3,
    yaw: f32,
    pitch: f32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,
    pub aspect_ratio: f32,
    pub near_plane_m: f32,
    pub far_plane_m: f32,

    /// Meters per second for [`Camera::process_movement`]
    pub movement_speed: f32,

    /// Degrees per unit of mouse offset
    pub mouse_sensitivity: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraParams::default())
    }
}

impl Camera {
    /// Create a camera at the configured pose
    pub fn new(params: &CameraParams) -> Self {
        let mut camera = Self {
            position: params.position,
            direction: Vector3::X,
            right: Vector3::Z,
            up: Vector3::Y,
            yaw: 0.0,
            pitch: 0.0,
            fov_degrees: params.fov_degrees,
            aspect_ratio: params.aspect_ratio,
            near_plane_m: params.near_plane_m,
            far_plane_m: params.far_plane_m,
            movement_speed: params.movement_speed,
            mouse_sensitivity: params.mouse_sensitivity,
        };
        camera.rotate(params.yaw_degrees, params.pitch_degrees);
        camera
    }

    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    pub fn right(&self) -> Vector3 {
        self.right
    }

    pub fn up(&self) -> Vector3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set absolute orientation and rebuild the basis.
    ///
    /// # Arguments
    /// * `yaw` - Degrees around Y; 0 looks down +X, 90 down +Z
    /// * `pitch` - Degrees above the horizon, clamped to `[-89, 89]`
    ///
    /// Non-finite angles are ignored and the current pose is kept.
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        if !(yaw.is_finite() && pitch.is_finite()) {
            return;
        }
        self.yaw = yaw;
        self.pitch = pitch.clamp(-MAX_PITCH_DEGREES, MAX_PITCH_DEGREES);

        let yaw_rad = self.yaw.to_radians();
        let pitch_rad = self.pitch.to_radians();
        self.direction = Vector3::new(
            pitch_rad.cos() * yaw_rad.cos(),
            pitch_rad.sin(),
            pitch_rad.cos() * yaw_rad.sin(),
        )
        .normalize();

        if self.direction.y.abs() > POLE_THRESHOLD {
            // Near vertical: direction x world-up is too short to normalize
            // reliably, so start from world X and square it up afterwards
            self.up = Vector3::X.cross(self.direction).normalize();
            self.right = self.direction.cross(self.up).normalize();
        } else {
            self.right = self.direction.cross(Vector3::Y).normalize();
            self.up = self.right.cross(self.direction).normalize();
        }
    }

    /// Rotate relative to the current orientation (degrees).
    pub fn rotate_by(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.rotate(self.yaw + delta_yaw, self.pitch + delta_pitch);
    }

    /// Apply a mouse offset; positive `dy` looks up.
    pub fn process_mouse(&mut self, dx: f32, dy: f32) {
        self.rotate_by(dx * self.mouse_sensitivity, dy * self.mouse_sensitivity);
    }

    pub fn move_forward(&mut self, distance: f32) {
        self.position = self.position + self.direction * distance;
    }

    pub fn move_right(&mut self, distance: f32) {
        self.position = self.position + self.right * distance;
    }

    pub fn move_up(&mut self, distance: f32) {
        self.position = self.position + self.up * distance;
    }

    /// Move for `dt` seconds at `movement_speed`.
    pub fn process_movement(&mut self, movement: CameraMovement, dt: f32) {
        let distance = self.movement_speed * dt;
        match movement {
            CameraMovement::Forward => self.move_forward(distance),
            CameraMovement::Backward => self.move_forward(-distance),
            CameraMovement::Right => self.move_right(distance),
            CameraMovement::Left => self.move_right(-distance),
            CameraMovement::Up => self.move_up(distance),
            CameraMovement::Down => self.move_up(-distance),
        }
    }

    /// View transform for the current pose, rebuilt on every call.
    pub fn view_matrix(&self) -> Matrix4 {
        Matrix4::look_at(self.position, self.position + self.direction, self.up)
    }

    /// Perspective projection from the lens fields.
    pub fn projection_matrix(&self) -> Result<Matrix4> {
        Matrix4::perspective(
            self.fov_degrees.to_radians(),
            self.aspect_ratio,
            self.near_plane_m,
            self.far_plane_m,
        )
    }
}
