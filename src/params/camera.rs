//! Free-fly camera configuration.

use crate::error::{GeometryError, Result};
use crate::math::{Matrix4, Vector3};

/// Camera lens, motion tuning and starting pose
#[derive(Debug, Clone, PartialEq)]
pub struct CameraParams {
    /// Starting eye position (meters)
    pub position: Vector3,

    /// Starting yaw (degrees); 0 looks down +X, 90 down +Z
    pub yaw_degrees: f32,

    /// Starting pitch (degrees), clamped to [-89, 89]
    pub pitch_degrees: f32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Viewport width over height
    pub aspect_ratio: f32,

    /// Near clipping plane (meters)
    pub near_plane_m: f32,

    /// Far clipping plane (meters)
    pub far_plane_m: f32,

    /// Keyboard movement speed (meters per second)
    pub movement_speed: f32,

    /// Degrees of rotation per unit of mouse offset
    pub mouse_sensitivity: f32,

    /// Minimum eye height above the terrain (meters)
    pub ground_clearance_m: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 20.0, 20.0), // High enough to see the field
            yaw_degrees: 45.0,
            pitch_degrees: -30.0, // Looking down at the scene
            fov_degrees: 45.0,
            aspect_ratio: 800.0 / 600.0,
            near_plane_m: 0.1,
            far_plane_m: 100.0,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            ground_clearance_m: 1.0,
        }
    }
}

impl CameraParams {
    /// Validate configuration (lens must form a valid projection)
    pub fn validate(&self) -> Result<()> {
        Matrix4::perspective(
            self.fov_degrees.to_radians(),
            self.aspect_ratio,
            self.near_plane_m,
            self.far_plane_m,
        )?;
        if !self.position.is_finite() {
            return Err(GeometryError::InvalidSize(format!(
                "camera position must be finite, got {:?}",
                self.position
            )));
        }
        Ok(())
    }
}
