//! Orientation of kernel-supplied node normals against triangle winding.
//!
//! The kernel computes node normals from the surface, which may point
//! against the winding of the triangles it emits. Only the first triangle
//! of a face is tested, and normals are flipped only when all three of its
//! node normals disagree with the winding. This is a heuristic: a face
//! whose first triangle is degenerate or straddles a fold can be left
//! unflipped even when most of its normals are reversed.

use crate::math::{Point3, Vector3};

/// Returns `true` if `normal` points against the winding of `tri`.
///
/// The reference direction is `(p2 - p0) × (p1 - p0)`; a positive dot
/// product with it means the normal disagrees.
#[must_use]
pub fn triangle_disagrees(normal: &Vector3, tri: &[Point3; 3]) -> bool {
    let v1 = tri[2] - tri[0];
    let v2 = tri[1] - tri[0];
    normal.dot(&v1.cross(&v2)) > 0.0
}

/// Returns `true` if every node normal of `tri` disagrees with its winding.
#[must_use]
pub fn needs_flip(tri: &[Point3; 3], normals: &[Vector3; 3]) -> bool {
    normals.iter().all(|n| triangle_disagrees(n, tri))
}
