mod face_mesh;
mod orient;

pub use face_mesh::FaceMesh;
pub use orient::{needs_flip, triangle_disagrees};

use serde::{Deserialize, Serialize};

use crate::math::{Matrix4, Point3, Vector3};
use crate::topology::{FaceKey, Shape};

/// Parameters passed to the kernel's incremental mesher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshParams {
    /// Maximum chordal deviation between mesh and surface.
    pub linear_deflection: f64,
    /// Maximum angle between adjacent triangle normals, in radians.
    pub angular_deflection: f64,
    /// If `true`, `linear_deflection` is relative to the edge length.
    pub relative: bool,
    /// Whether the kernel may mesh faces in parallel.
    pub parallel: bool,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            linear_deflection: 0.1,
            angular_deflection: 0.5,
            relative: false,
            parallel: false,
        }
    }
}

/// A face triangulation as reported by the CAD kernel.
///
/// Nodes and normals are in the face's local frame; `location` maps them
/// into shape coordinates. Triangle indices are 0-based into `nodes`.
#[derive(Debug, Clone, Default)]
pub struct Triangulation {
    /// Node positions.
    pub nodes: Vec<Point3>,
    /// Triangle node indices (each triple defines a triangle).
    pub triangles: Vec<[u32; 3]>,
    /// Per-node normals, same length as `nodes`.
    pub normals: Vec<Vector3>,
    /// Face location transform, identity when `None`.
    pub location: Option<Matrix4>,
}

/// Produces the triangulation of a single face.
///
/// Returning `None` means no triangulation is available for this face; the
/// face is skipped by the presenter.
pub trait Triangulate {
    /// Triangulates `face` of `shape`.
    fn triangulate(&self, shape: &Shape, face: FaceKey, params: &MeshParams)
        -> Option<Triangulation>;
}

/// Uses the triangulation the importer stored on each face.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredTriangulation;

impl Triangulate for StoredTriangulation {
    fn triangulate(
        &self,
        shape: &Shape,
        face: FaceKey,
        _params: &MeshParams,
    ) -> Option<Triangulation> {
        shape.store().face(face).ok()?.triangulation.clone()
    }
}
