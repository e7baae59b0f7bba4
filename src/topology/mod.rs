pub mod face;
pub mod shell;
pub mod solid;

pub use face::{FaceData, FaceKey};
pub use shell::{ShellData, ShellKey};
pub use solid::{SolidData, SolidKey};

use crate::error::TopologyError;
use slotmap::SlotMap;

/// Central arena that owns all topological entities of an imported shape.
///
/// Entities reference each other via typed keys (generational indices),
/// avoiding self-referential structures and enabling safe mutation.
#[derive(Debug, Default, Clone)]
pub struct TopologyStore {
    faces: SlotMap<FaceKey, FaceData>,
    shells: SlotMap<ShellKey, ShellData>,
    solids: SlotMap<SolidKey, SolidData>,
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Face operations ---

    /// Inserts a face and returns its key.
    pub fn add_face(&mut self, data: FaceData) -> FaceKey {
        self.faces.insert(data)
    }

    /// Returns a reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face(&self, key: FaceKey) -> Result<&FaceData, TopologyError> {
        self.faces
            .get(key)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()))
    }

    // --- Shell operations ---

    /// Inserts a shell and returns its key.
    pub fn add_shell(&mut self, data: ShellData) -> ShellKey {
        self.shells.insert(data)
    }

    /// Returns a reference to the shell data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn shell(&self, key: ShellKey) -> Result<&ShellData, TopologyError> {
        self.shells
            .get(key)
            .ok_or_else(|| TopologyError::EntityNotFound("shell".into()))
    }

    // --- Solid operations ---

    /// Inserts a solid and returns its key.
    pub fn add_solid(&mut self, data: SolidData) -> SolidKey {
        self.solids.insert(data)
    }

    /// Returns a reference to the solid data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn solid(&self, key: SolidKey) -> Result<&SolidData, TopologyError> {
        self.solids
            .get(key)
            .ok_or_else(|| TopologyError::EntityNotFound("solid".into()))
    }

    /// Returns the faces of a solid in traversal order: outer shell first,
    /// then each void shell.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid or one of its shells is not found.
    pub fn solid_faces(&self, key: SolidKey) -> Result<Vec<FaceKey>, TopologyError> {
        let solid = self.solid(key)?;
        let mut faces = Vec::new();
        for shell_key in solid.shells() {
            faces.extend_from_slice(&self.shell(shell_key)?.faces);
        }
        Ok(faces)
    }
}

/// A root entry of a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeItem {
    /// A closed volume.
    Solid(SolidKey),
    /// A face that belongs to no solid.
    Face(FaceKey),
}

/// A face visited by [`Shape::explore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExploredFace {
    /// Arena key of the face.
    pub key: FaceKey,
    /// 0-based position of the owning solid among the shape's solids,
    /// or `None` for a free face.
    pub solid: Option<usize>,
}

/// An imported CAD geometry handle: a topology store plus its ordered roots.
#[derive(Debug, Default, Clone)]
pub struct Shape {
    store: TopologyStore,
    roots: Vec<ShapeItem>,
}

impl Shape {
    /// Creates an empty shape.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a solid bounded by a single closed shell made of `faces`.
    pub fn add_solid(&mut self, faces: Vec<FaceData>) -> SolidKey {
        self.add_solid_with_voids(faces, Vec::new())
    }

    /// Adds a solid with an outer shell and one inner shell per entry of `voids`.
    pub fn add_solid_with_voids(
        &mut self,
        outer: Vec<FaceData>,
        voids: Vec<Vec<FaceData>>,
    ) -> SolidKey {
        let outer_shell = self.add_shell(outer);
        let inner_shells = voids.into_iter().map(|faces| self.add_shell(faces)).collect();
        let key = self.store.add_solid(SolidData {
            outer_shell,
            inner_shells,
        });
        self.roots.push(ShapeItem::Solid(key));
        key
    }

    /// Adds a face outside any solid.
    pub fn add_free_face(&mut self, face: FaceData) -> FaceKey {
        let key = self.store.add_face(face);
        self.roots.push(ShapeItem::Face(key));
        key
    }

    fn add_shell(&mut self, faces: Vec<FaceData>) -> ShellKey {
        let keys = faces.into_iter().map(|f| self.store.add_face(f)).collect();
        self.store.add_shell(ShellData::new(keys))
    }

    /// The underlying topology store.
    #[must_use]
    pub fn store(&self) -> &TopologyStore {
        &self.store
    }

    /// Number of solids among the roots.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.roots
            .iter()
            .filter(|item| matches!(item, ShapeItem::Solid(_)))
            .count()
    }

    /// Visits every face in deterministic shape order.
    ///
    /// Roots are visited in order. A solid contributes the faces of its
    /// outer shell and then those of its voids. Roots whose keys cannot be
    /// resolved are skipped.
    #[must_use]
    pub fn explore(&self) -> Vec<ExploredFace> {
        let mut visited = Vec::new();
        let mut solid_index = 0;
        for item in &self.roots {
            match *item {
                ShapeItem::Solid(key) => {
                    match self.store.solid_faces(key) {
                        Ok(faces) => visited.extend(faces.into_iter().map(|face| ExploredFace {
                            key: face,
                            solid: Some(solid_index),
                        })),
                        Err(err) => tracing::warn!(%err, "skipping unresolved solid"),
                    }
                    solid_index += 1;
                }
                ShapeItem::Face(key) => {
                    if self.store.face(key).is_ok() {
                        visited.push(ExploredFace { key, solid: None });
                    } else {
                        tracing::warn!("skipping unresolved free face");
                    }
                }
            }
        }
        visited
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn faces(n: usize) -> Vec<FaceData> {
        (0..n).map(|_| FaceData::untriangulated()).collect()
    }

    #[test]
    fn explore_visits_solids_in_order() {
        let mut shape = Shape::new();
        shape.add_solid(faces(2));
        shape.add_solid(faces(3));

        let visited = shape.explore();
        let owners: Vec<_> = visited.iter().map(|f| f.solid).collect();
        assert_eq!(
            owners,
            vec![Some(0), Some(0), Some(1), Some(1), Some(1)]
        );
    }

    #[test]
    fn explore_includes_void_shells_after_outer() {
        let mut shape = Shape::new();
        let solid = shape.add_solid_with_voids(faces(6), vec![faces(1)]);

        let store_faces = shape.store().solid_faces(solid).unwrap();
        assert_eq!(store_faces.len(), 7);
        let visited: Vec<_> = shape.explore().iter().map(|f| f.key).collect();
        assert_eq!(visited, store_faces);
    }

    #[test]
    fn free_faces_have_no_owner() {
        let mut shape = Shape::new();
        let free = shape.add_free_face(FaceData::untriangulated());
        shape.add_solid(faces(1));

        let visited = shape.explore();
        assert_eq!(visited[0], ExploredFace { key: free, solid: None });
        assert_eq!(visited[1].solid, Some(0));
        assert_eq!(shape.solid_count(), 1);
    }

    #[test]
    fn missing_entity_is_an_error() {
        let mut other = TopologyStore::new();
        let key = other.add_solid(SolidData::new(ShellKey::default()));
        let store = TopologyStore::new();
        assert!(matches!(
            store.solid(key),
            Err(TopologyError::EntityNotFound(_))
        ));
    }
}
