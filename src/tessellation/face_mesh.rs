use crate::error::MeshingError;
use crate::math::{Point3, Vector3};

use super::{needs_flip, Triangulation};

/// Renderable geometry of one face, in shape coordinates.
#[derive(Debug, Clone, Default)]
pub struct FaceMesh {
    /// Vertex positions.
    pub points: Vec<Point3>,
    /// Vertex normals, oriented against the triangle winding.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle).
    pub triangles: Vec<[u32; 3]>,
    /// Whether the kernel normals were reversed during orientation.
    pub flipped: bool,
}

impl FaceMesh {
    /// Converts a kernel triangulation into a renderable mesh.
    ///
    /// Nodes and normals are moved into shape coordinates by the face
    /// location, then normals are flipped if the first triangle says so.
    ///
    /// # Errors
    ///
    /// Returns an error if a triangle references a missing node or the
    /// normal count does not match the node count.
    pub fn from_triangulation(triangulation: &Triangulation) -> Result<Self, MeshingError> {
        let nodes = triangulation.nodes.len();
        if triangulation.normals.len() != nodes {
            return Err(MeshingError::NormalCountMismatch {
                nodes,
                normals: triangulation.normals.len(),
            });
        }
        for (triangle, tri) in triangulation.triangles.iter().enumerate() {
            if let Some(&node) = tri.iter().find(|&&n| n as usize >= nodes) {
                return Err(MeshingError::InvalidTriangle {
                    triangle,
                    node,
                    nodes,
                });
            }
        }

        let (points, mut normals): (Vec<Point3>, Vec<Vector3>) = match &triangulation.location {
            Some(location) => (
                triangulation
                    .nodes
                    .iter()
                    .map(|p| location.transform_point(p))
                    .collect(),
                triangulation
                    .normals
                    .iter()
                    .map(|n| location.transform_vector(n))
                    .collect(),
            ),
            None => (triangulation.nodes.clone(), triangulation.normals.clone()),
        };

        let flipped = triangulation.triangles.first().is_some_and(|&[a, b, c]| {
            let tri = [points[a as usize], points[b as usize], points[c as usize]];
            let tri_normals = [normals[a as usize], normals[b as usize], normals[c as usize]];
            needs_flip(&tri, &tri_normals)
        });
        if flipped {
            for n in &mut normals {
                *n = -*n;
            }
        }

        Ok(Self {
            points,
            normals,
            triangles: triangulation.triangles.clone(),
            flipped,
        })
    }

    /// Triangles as a flat cell array: `[3, a, b, c, 3, d, e, f, ...]`.
    #[must_use]
    pub fn cell_array(&self) -> Vec<u32> {
        self.triangles
            .iter()
            .flat_map(|&[a, b, c]| [3, a, b, c])
            .collect()
    }

    /// Normals as a flat `f32` buffer, three components per vertex.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn normal_buffer(&self) -> Vec<f32> {
        self.normals
            .iter()
            .flat_map(|n| [n.x as f32, n.y as f32, n.z as f32])
            .collect()
    }
}
