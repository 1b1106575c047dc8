//! Row-major 4x4 transform matrix.
//!
//! Matrices act on column vectors (`M * v`), so translation lives in the last
//! column (elements 3, 7 and 11) and the projective row is row 3. Composition
//! reads right to left: `translation * rotation * scale` scales first.

use std::f32::consts::PI;
use std::ops::Mul;

use bytemuck::{Pod, Zeroable};

use super::Vector3;
use crate::error::{GeometryError, Result};

/// 16 floats in row-major order. `Default` is the identity.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Matrix4 {
    pub m: [f32; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub const fn from_rows(m: [f32; 16]) -> Self {
        Self { m }
    }

    /// Element at `row`, `col`.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[row * 4 + col]
    }

    /// Standard row-by-column product `a * b`.
    pub fn mult(a: &Self, b: &Self) -> Self {
        let mut out = [0.0; 16];
        for i in 0..4 {
            for j in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += a.m[i * 4 + k] * b.m[k * 4 + j];
                }
                out[i * 4 + j] = sum;
            }
        }
        Self { m: out }
    }

    /// Transforms a point (implicit `w = 1`), dropping the projective row.
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        let m = &self.m;
        Vector3::new(
            m[0] * p.x + m[1] * p.y + m[2] * p.z + m[3],
            m[4] * p.x + m[5] * p.y + m[6] * p.z + m[7],
            m[8] * p.x + m[9] * p.y + m[10] * p.z + m[11],
        )
    }

    /// Transforms a direction (implicit `w = 0`), ignoring translation.
    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        let m = &self.m;
        Vector3::new(
            m[0] * v.x + m[1] * v.y + m[2] * v.z,
            m[4] * v.x + m[5] * v.y + m[6] * v.z,
            m[8] * v.x + m[9] * v.y + m[10] * v.z,
        )
    }

    /// Full 4x4 product with a homogeneous vector, e.g. to get clip coordinates.
    pub fn transform_homogeneous(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = (0..4).map(|col| self.m[row * 4 + col] * v[col]).sum();
        }
        out
    }

    /// Translation component (last column).
    pub fn translation_part(&self) -> Vector3 {
        Vector3::new(self.m[3], self.m[7], self.m[11])
    }

    pub fn transpose(&self) -> Self {
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                out[col * 4 + row] = self.m[row * 4 + col];
            }
        }
        Self { m: out }
    }

    /// Column-major element order, the layout GPU uniform buffers expect.
    pub fn to_cols_array(&self) -> [f32; 16] {
        self.transpose().m
    }

    pub fn to_glam(&self) -> glam::Mat4 {
        glam::Mat4::from_cols_array(&self.to_cols_array())
    }

    pub fn from_glam(mat: glam::Mat4) -> Self {
        Self {
            m: mat.transpose().to_cols_array(),
        }
    }

    /// True when every element differs by at most `max_abs_diff`.
    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (a - b).abs() <= max_abs_diff)
    }

    pub fn is_finite(&self) -> bool {
        self.m.iter().all(|v| v.is_finite())
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut out = Self::IDENTITY;
        out.m[3] = x;
        out.m[7] = y;
        out.m[11] = z;
        out
    }

    pub fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        let mut out = Self::IDENTITY;
        out.m[0] = sx;
        out.m[5] = sy;
        out.m[10] = sz;
        out
    }

    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut out = Self::IDENTITY;
        out.m[5] = c;
        out.m[6] = -s;
        out.m[9] = s;
        out.m[10] = c;
        out
    }

    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut out = Self::IDENTITY;
        out.m[0] = c;
        out.m[2] = s;
        out.m[8] = -s;
        out.m[10] = c;
        out
    }

    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut out = Self::IDENTITY;
        out.m[0] = c;
        out.m[1] = -s;
        out.m[4] = s;
        out.m[5] = c;
        out
    }

    /// Right-handed perspective projection with OpenGL clip depth
    /// (`[-w, w]`), so the clip `w` of a view-space point equals `-z`.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view (radians), in `(0, π)`
    /// * `aspect` - Width over height, `> 0`
    /// * `near`, `far` - Clip plane distances, `far > near > 0`
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Result<Self> {
        if !(fov_y > 0.0 && fov_y < PI) {
            return Err(GeometryError::InvalidProjection(format!(
                "vertical fov must be in (0, pi), got {}",
                fov_y
            )));
        }
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(GeometryError::InvalidProjection(format!(
                "aspect ratio must be positive, got {}",
                aspect
            )));
        }
        if !(near.is_finite() && near > 0.0) {
            return Err(GeometryError::InvalidProjection(format!(
                "near plane must be positive, got {}",
                near
            )));
        }
        if !(far.is_finite() && far > near) {
            return Err(GeometryError::InvalidProjection(format!(
                "far plane ({}) must lie beyond near plane ({})",
                far, near
            )));
        }

        let f = 1.0 / (fov_y / 2.0).tan();
        let depth = far - near;
        let mut out = Self { m: [0.0; 16] };
        out.m[0] = f / aspect;
        out.m[5] = f;
        out.m[10] = -(far + near) / depth;
        out.m[11] = -(2.0 * far * near) / depth;
        out.m[14] = -1.0;
        Ok(out)
    }

    /// Right-handed view matrix looking from `eye` towards `target`.
    ///
    /// The caller must keep `target != eye` and the view direction off the
    /// `world_up` axis; both collapse the basis.
    pub fn look_at(eye: Vector3, target: Vector3, world_up: Vector3) -> Self {
        let forward = (target - eye).normalize();
        let right = forward.cross(world_up).normalize();
        let up = right.cross(forward);
        debug_assert!(
            forward != Vector3::ZERO && right != Vector3::ZERO,
            "look_at called with a degenerate basis"
        );

        Self::from_rows([
            right.x,
            right.y,
            right.z,
            -right.dot(eye),
            up.x,
            up.y,
            up.z,
            -up.dot(eye),
            -forward.x,
            -forward.y,
            -forward.z,
            forward.dot(eye),
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::mult(&self, &rhs)
    }
}

impl Mul<Vector3> for Matrix4 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        self.transform_point(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;
    use std::f32::consts::FRAC_PI_4;

    fn close(a: Vector3, b: Vector3) -> bool {
        a.distance(b) < 1e-5
    }

    fn sample_matrices() -> [Matrix4; 3] {
        [
            Matrix4::translation(1.0, -2.0, 3.5) * Matrix4::rotation_y(0.7),
            Matrix4::rotation_x(-1.1) * Matrix4::scale(2.0, 0.5, 1.5),
            Matrix4::from_rows([
                0.5, 1.0, -2.0, 0.25, //
                3.0, 0.0, 1.0, -1.0, //
                -0.5, 2.0, 0.75, 4.0, //
                1.0, -1.0, 0.5, 2.0,
            ]),
        ]
    }

    #[test]
    fn test_default_is_identity() {
        assert_eq!(Matrix4::default(), Matrix4::IDENTITY);
        let p = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(Matrix4::default().transform_point(p), p);
    }

    #[test]
    fn test_mult_associative() {
        let [a, b, c] = sample_matrices();
        let left = Matrix4::mult(&Matrix4::mult(&a, &b), &c);
        let right = Matrix4::mult(&a, &Matrix4::mult(&b, &c));
        assert!(left.abs_diff_eq(&right, 1e-4), "{:?} vs {:?}", left, right);
    }

    #[test]
    fn test_mult_matches_glam() {
        let [a, b, _] = sample_matrices();
        let ours = a * b;
        let reference = Matrix4::from_glam(a.to_glam() * b.to_glam());
        assert!(ours.abs_diff_eq(&reference, 1e-5));
    }

    #[test]
    fn test_translation_point_and_vector() {
        let t = Matrix4::translation(1.0, 2.0, 3.0);
        let p = Vector3::new(1.0, 1.0, 1.0);
        assert_eq!(t.transform_point(p), Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(t.transform_vector(p), p);
        assert_eq!(t.translation_part(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rotations_match_glam() {
        let angle = 0.83;
        let pairs = [
            (Matrix4::rotation_x(angle), glam::Mat4::from_rotation_x(angle)),
            (Matrix4::rotation_y(angle), glam::Mat4::from_rotation_y(angle)),
            (Matrix4::rotation_z(angle), glam::Mat4::from_rotation_z(angle)),
        ];
        for (ours, theirs) in pairs {
            assert!(ours.abs_diff_eq(&Matrix4::from_glam(theirs), 1e-6));
        }
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let r = Matrix4::rotation_y(FRAC_PI_2);
        assert!(close(r.transform_vector(Vector3::X), -Vector3::Z));
        assert!(close(r.transform_vector(Vector3::Z), Vector3::X));
    }

    #[test]
    fn test_composite_transform_matches_glam() {
        let ours = Matrix4::translation(3.0, 1.0, -2.0)
            * Matrix4::rotation_y(1.2)
            * Matrix4::rotation_x(0.1)
            * Matrix4::scale(1.0, 0.9, 1.0);
        let theirs = glam::Mat4::from_translation(glam::Vec3::new(3.0, 1.0, -2.0))
            * glam::Mat4::from_rotation_y(1.2)
            * glam::Mat4::from_rotation_x(0.1)
            * glam::Mat4::from_scale(glam::Vec3::new(1.0, 0.9, 1.0));
        assert!(ours.abs_diff_eq(&Matrix4::from_glam(theirs), 1e-5));

        let p = Vector3::new(0.0, 1.0, 0.0);
        let expected: Vector3 = theirs.transform_point3(glam::Vec3::Y).into();
        assert!(close(ours * p, expected));
    }

    #[test]
    fn test_perspective_matches_glam_gl() {
        let ours = Matrix4::perspective(FRAC_PI_4, 4.0 / 3.0, 0.1, 100.0).unwrap();
        let theirs = glam::Mat4::perspective_rh_gl(FRAC_PI_4, 4.0 / 3.0, 0.1, 100.0);
        assert!(ours.abs_diff_eq(&Matrix4::from_glam(theirs), 1e-5));
    }

    #[test]
    fn test_perspective_near_plane_center() {
        let near = 0.1;
        let proj = Matrix4::perspective(FRAC_PI_4, 4.0 / 3.0, near, 100.0).unwrap();
        let clip = proj.transform_homogeneous([0.0, 0.0, -near, 1.0]);

        assert!(clip[0].abs() < 1e-6);
        assert!(clip[1].abs() < 1e-6);
        // w = -z_view
        assert!((clip[3] - near).abs() < 1e-6);
        // Near plane maps to NDC depth -1
        assert!((clip[2] / clip[3] + 1.0).abs() < 1e-4);

        let far = proj.transform_homogeneous([0.0, 0.0, -100.0, 1.0]);
        assert!((far[3] - 100.0).abs() < 1e-4);
        assert!((far[2] / far[3] - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_perspective_rejects_bad_input() {
        assert!(Matrix4::perspective(0.0, 1.0, 0.1, 10.0).is_err());
        assert!(Matrix4::perspective(PI, 1.0, 0.1, 10.0).is_err());
        assert!(Matrix4::perspective(1.0, 0.0, 0.1, 10.0).is_err());
        assert!(Matrix4::perspective(1.0, -1.0, 0.1, 10.0).is_err());
        assert!(Matrix4::perspective(1.0, 1.0, 0.0, 10.0).is_err());
        assert!(Matrix4::perspective(1.0, 1.0, -0.1, 10.0).is_err());
        assert!(Matrix4::perspective(1.0, 1.0, 10.0, 10.0).is_err());
        assert!(Matrix4::perspective(1.0, 1.0, 10.0, 5.0).is_err());
        assert!(Matrix4::perspective(f32::NAN, 1.0, 0.1, 10.0).is_err());
    }

    #[test]
    fn test_look_at_matches_glam() {
        let eye = Vector3::new(0.0, 20.0, 20.0);
        let target = Vector3::new(5.0, 0.0, -3.0);
        let ours = Matrix4::look_at(eye, target, Vector3::Y);
        let theirs = glam::Mat4::look_at_rh(eye.into(), target.into(), glam::Vec3::Y);
        assert!(ours.abs_diff_eq(&Matrix4::from_glam(theirs), 1e-5));
    }

    #[test]
    fn test_look_at_maps_eye_and_target() {
        let eye = Vector3::new(1.0, 2.0, 3.0);
        let target = Vector3::new(1.0, 2.0, -7.0);
        let view = Matrix4::look_at(eye, target, Vector3::Y);

        assert!(close(view.transform_point(eye), Vector3::ZERO));
        // Target sits on the view-space -Z axis
        assert!(close(view.transform_point(target), Vector3::new(0.0, 0.0, -10.0)));
    }

    #[test]
    fn test_cols_array_roundtrip() {
        let [m, _, _] = sample_matrices();
        let cols = m.to_cols_array();
        assert_eq!(cols[3], m.get(3, 0));
        assert_eq!(cols[12], m.get(0, 3));
        assert_eq!(Matrix4::from_glam(m.to_glam()), m);
    }
}
