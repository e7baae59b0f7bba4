use crate::tessellation::Triangulation;

slotmap::new_key_type! {
    /// Arena key for a face in the topology store.
    ///
    /// Distinct from [`FaceId`](crate::selection::FaceId), which is the
    /// 1-based position of the face in shape traversal order.
    pub struct FaceKey;
}

/// Data associated with a topological face.
///
/// The surface geometry stays inside the CAD kernel; the store only keeps
/// the triangulation the kernel produced for this face, if any.
#[derive(Debug, Clone, Default)]
pub struct FaceData {
    /// Kernel-produced triangulation. `None` when meshing failed.
    pub triangulation: Option<Triangulation>,
}

impl FaceData {
    /// Creates a face with the given triangulation.
    #[must_use]
    pub fn with_triangulation(triangulation: Triangulation) -> Self {
        Self {
            triangulation: Some(triangulation),
        }
    }

    /// Creates a face the kernel could not triangulate.
    #[must_use]
    pub fn untriangulated() -> Self {
        Self::default()
    }
}
