//! Triangle meshes and the generators that build them.

mod blade;
mod primitives;
mod terrain;

use bytemuck::{Pod, Zeroable};

use crate::error::{GeometryError, Result};
use crate::math::Vector3;

pub use blade::build_blade;
pub use primitives::{build_cube, build_plane, build_sphere};
pub use terrain::{build_height_field, build_height_field_with};

/// Vertex layout shared by every mesh (position, color, normal, UVW).
///
/// `tex_coord.z` is reserved for volumetric textures and is 0 everywhere.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vector3,
    pub color: Vector3,
    pub normal: Vector3,
    pub tex_coord: Vector3,
}

/// Indexed triangle list. Every index is in range and the index count is a
/// multiple of 3; the buffers never change after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Wrap caller-provided buffers after checking the triangle-list invariants.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self> {
        check_triangle_list(&vertices, &indices)?;
        Ok(Self { vertices, indices })
    }

    /// For generators whose index math is correct by construction.
    pub(crate) fn from_parts(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        debug_assert!(check_triangle_list(&vertices, &indices).is_ok());
        Self { vertices, indices }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex buffer as raw bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Corner positions of each triangle in index order.
    pub fn triangles(&self) -> impl Iterator<Item = [Vector3; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                self.vertices[tri[0] as usize].position,
                self.vertices[tri[1] as usize].position,
                self.vertices[tri[2] as usize].position,
            ]
        })
    }

    /// Axis-aligned bounds of all vertex positions, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vector3, Vector3)> {
        let first = self.vertices.first()?.position;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            let p = v.position;
            (
                Vector3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                Vector3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        }))
    }
}

fn check_triangle_list(vertices: &[Vertex], indices: &[u32]) -> Result<()> {
    if indices.len() % 3 != 0 {
        return Err(GeometryError::IncompleteTriangle(indices.len()));
    }
    match indices.iter().find(|&&i| i as usize >= vertices.len()) {
        Some(&index) => Err(GeometryError::IndexOutOfRange {
            index,
            vertex_count: vertices.len(),
        }),
        None => Ok(()),
    }
}

/// Counter-clockwise face normal (unnormalized).
#[cfg(test)]
pub(crate) fn face_normal(tri: &[Vector3; 3]) -> Vector3 {
    (tri[1] - tri[0]).cross(tri[2] - tri[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex_at(x: f32, y: f32, z: f32) -> Vertex {
        Vertex {
            position: Vector3::new(x, y, z),
            ..Vertex::default()
        }
    }

    #[test]
    fn test_new_validates_indices() {
        let vertices = vec![
            vertex_at(0.0, 0.0, 0.0),
            vertex_at(1.0, 0.0, 0.0),
            vertex_at(0.0, 1.0, 0.0),
        ];

        assert!(Mesh::new(vertices.clone(), vec![0, 1, 2]).is_ok());
        assert_eq!(
            Mesh::new(vertices.clone(), vec![0, 1, 3]),
            Err(GeometryError::IndexOutOfRange {
                index: 3,
                vertex_count: 3
            })
        );
        assert_eq!(
            Mesh::new(vertices, vec![0, 1]),
            Err(GeometryError::IncompleteTriangle(2))
        );
    }

    #[test]
    fn test_byte_views() {
        let mesh = Mesh::new(
            vec![
                vertex_at(0.0, 0.0, 0.0),
                vertex_at(1.0, 0.0, 0.0),
                vertex_at(0.0, 0.0, -1.0),
            ],
            vec![0, 1, 2],
        )
        .unwrap();

        assert_eq!(std::mem::size_of::<Vertex>(), 48);
        assert_eq!(mesh.vertex_bytes().len(), 3 * 48);
        assert_eq!(mesh.index_bytes().len(), 3 * 4);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_bounds_and_triangles() {
        let mesh = Mesh::new(
            vec![
                vertex_at(-1.0, 2.0, 0.0),
                vertex_at(3.0, -2.0, 0.5),
                vertex_at(0.0, 0.0, -4.0),
            ],
            vec![0, 1, 2],
        )
        .unwrap();

        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(lo, Vector3::new(-1.0, -2.0, -4.0));
        assert_eq!(hi, Vector3::new(3.0, 2.0, 0.5));

        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris.len(), 1);
        assert_eq!(tris[0][1], Vector3::new(3.0, -2.0, 0.5));
        assert!(Mesh::default().bounds().is_none());
    }

    #[test]
    fn test_face_normal_winding() {
        let tri = [Vector3::ZERO, Vector3::X, Vector3::Y];
        assert_eq!(face_normal(&tri), Vector3::Z);
    }
}
