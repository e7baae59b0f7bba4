//! The actor collection: one renderable object per triangulated face.

use slotmap::SlotMap;

use crate::error::MeshingError;
use crate::selection::{
    is_highlighted, DisplayState, FaceChange, FaceId, HighlightPolicy, SelectionState,
    VolumeFaceMap,
};
use crate::tessellation::{FaceMesh, MeshParams, Triangulate};
use crate::topology::{FaceKey, Shape};

slotmap::new_key_type! {
    /// Handle of an actor in the scene.
    pub struct ActorKey;
}

/// A renderable face. The face id is stored on the actor, so a pick never
/// depends on the actor's position in the collection.
#[derive(Debug, Clone)]
pub struct Actor {
    face: FaceId,
    mesh: FaceMesh,
    /// Color and specular; the only part the selection engine changes.
    pub display: DisplayState,
}

impl Actor {
    #[must_use]
    pub fn face(&self) -> FaceId {
        self.face
    }

    #[must_use]
    pub fn mesh(&self) -> &FaceMesh {
        &self.mesh
    }
}

/// Faces the presenter could not turn into actors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentReport {
    pub actors: usize,
    pub skipped: Vec<FaceId>,
}

/// Owns every actor of the loaded shape.
#[derive(Debug, Default)]
pub struct Scene {
    actors: SlotMap<ActorKey, Actor>,
    order: Vec<ActorKey>,
    by_face: Vec<Option<ActorKey>>,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates one actor per face of `shape`, in face id order.
    ///
    /// Faces without a usable triangulation are logged and skipped; the
    /// remaining actors keep their own face ids. Each actor is colored once
    /// from the already seeded `selection`.
    pub fn present<T: Triangulate + ?Sized>(
        shape: &Shape,
        map: &VolumeFaceMap,
        selection: &SelectionState,
        triangulator: &T,
        params: &MeshParams,
        policy: &HighlightPolicy,
    ) -> (Self, PresentReport) {
        let mut scene = Self::new();
        let mut report = PresentReport::default();
        for face in map.faces() {
            let Some(key) = map.key_of(face) else {
                continue;
            };
            match mesh_face(shape, key, face, triangulator, params) {
                Ok(mesh) => {
                    let highlighted = is_highlighted(face, selection, map);
                    tracing::debug!(%face, highlighted, "presenting face");
                    scene.insert(face, mesh, policy.display_for(highlighted));
                }
                Err(err) => {
                    tracing::warn!(%face, %err, "skipping face");
                    report.skipped.push(face);
                }
            }
        }
        report.actors = scene.len();
        (scene, report)
    }

    /// Adds an actor for `face`. Replaces any earlier actor of the same face.
    pub fn insert(&mut self, face: FaceId, mesh: FaceMesh, display: DisplayState) -> ActorKey {
        let key = self.actors.insert(Actor {
            face,
            mesh,
            display,
        });
        let slot = face.get() as usize - 1;
        if self.by_face.len() <= slot {
            self.by_face.resize(slot + 1, None);
        }
        if let Some(old) = self.by_face[slot].replace(key) {
            self.actors.remove(old);
            self.order.retain(|&k| k != old);
        }
        self.order.push(key);
        key
    }

    #[must_use]
    pub fn actor(&self, key: ActorKey) -> Option<&Actor> {
        self.actors.get(key)
    }

    /// The actor showing `face`, if the face was presented.
    #[must_use]
    pub fn actor_for_face(&self, face: FaceId) -> Option<ActorKey> {
        self.by_face.get(face.get() as usize - 1).copied().flatten()
    }

    /// The face shown by `key`, if the actor exists.
    #[must_use]
    pub fn face_of(&self, key: ActorKey) -> Option<FaceId> {
        self.actors.get(key).map(Actor::face)
    }

    /// Actors in creation order.
    pub fn actors(&self) -> impl Iterator<Item = (ActorKey, &Actor)> {
        self.order
            .iter()
            .filter_map(|&k| self.actors.get(k).map(|a| (k, a)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Removes every actor.
    pub fn clear(&mut self) {
        self.actors.clear();
        self.order.clear();
        self.by_face.clear();
    }

    /// Recolors the actors of faces that changed during a pick.
    pub fn apply_changes(&mut self, changes: &[FaceChange], policy: &HighlightPolicy) {
        for change in changes {
            let Some(key) = self.actor_for_face(change.face) else {
                continue;
            };
            if let Some(actor) = self.actors.get_mut(key) {
                actor.display = policy.display_for(change.highlighted);
            }
        }
    }
}

fn mesh_face<T: Triangulate + ?Sized>(
    shape: &Shape,
    key: FaceKey,
    face: FaceId,
    triangulator: &T,
    params: &MeshParams,
) -> Result<FaceMesh, MeshingError> {
    let triangulation = triangulator
        .triangulate(shape, key, params)
        .ok_or(MeshingError::NoTriangulation(face.get()))?;
    FaceMesh::from_triangulation(&triangulation)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::selection::{apply_pick, SelectionMode};
    use crate::tessellation::{StoredTriangulation, Triangulation};
    use crate::topology::FaceData;

    fn f(id: u32) -> FaceId {
        FaceId::new(id).unwrap()
    }

    fn triangle() -> FaceData {
        FaceData::with_triangulation(Triangulation {
            nodes: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            triangles: vec![[0, 1, 2]],
            normals: vec![Vector3::z(); 3],
            location: None,
        })
    }

    fn present(shape: &Shape) -> (Scene, PresentReport, VolumeFaceMap) {
        let map = VolumeFaceMap::build(shape);
        let state = SelectionState::new(SelectionMode::Face);
        let (scene, report) = present_seeded(shape, &map, &state);
        (scene, report, map)
    }

    fn present_seeded(
        shape: &Shape,
        map: &VolumeFaceMap,
        state: &SelectionState,
    ) -> (Scene, PresentReport) {
        Scene::present(
            shape,
            map,
            state,
            &StoredTriangulation,
            &MeshParams::default(),
            &HighlightPolicy::default(),
        )
    }

    fn display(scene: &Scene, face: u32) -> DisplayState {
        let key = scene.actor_for_face(f(face)).unwrap();
        scene.actor(key).unwrap().display
    }

    fn displays(scene: &Scene) -> Vec<DisplayState> {
        scene.actors().map(|(_, a)| a.display).collect()
    }

    #[test]
    fn skipped_face_does_not_shift_ids() {
        let mut shape = Shape::new();
        shape.add_solid(vec![triangle(), FaceData::untriangulated(), triangle()]);
        let (scene, report, _) = present(&shape);

        assert_eq!(report.skipped, vec![f(2)]);
        assert_eq!(report.actors, 2);
        let ids: Vec<_> = scene.actors().map(|(_, a)| a.face()).collect();
        assert_eq!(ids, vec![f(1), f(3)]);
        assert!(scene.actor_for_face(f(2)).is_none());
        let third = scene.actor_for_face(f(3)).unwrap();
        assert_eq!(scene.face_of(third), Some(f(3)));
        assert_eq!(scene.actor(third).unwrap().mesh().cell_array(), vec![3, 0, 1, 2]);
    }

    #[test]
    fn missing_triangulation_is_a_meshing_error() {
        let mut shape = Shape::new();
        shape.add_solid(vec![FaceData::untriangulated()]);
        let map = VolumeFaceMap::build(&shape);
        let key = map.key_of(f(1)).unwrap();

        let err = mesh_face(&shape, key, f(1), &StoredTriangulation, &MeshParams::default())
            .unwrap_err();
        assert!(matches!(err, MeshingError::NoTriangulation(1)));
    }

    #[test]
    fn seeded_selection_colors_actors() {
        let mut shape = Shape::new();
        shape.add_solid(vec![triangle(), triangle()]);
        shape.add_solid(vec![triangle()]);
        let map = VolumeFaceMap::build(&shape);
        let policy = HighlightPolicy::default();

        let mut state = SelectionState::seeded(SelectionMode::Volume, &[2], &map);
        let (mut scene, _) = present_seeded(&shape, &map, &state);
        assert_eq!(display(&scene, 3), policy.display_for(true));
        assert_eq!(display(&scene, 1), policy.display_for(false));

        let outcome = apply_pick(&mut state, Some(f(2)), false, &map);
        scene.apply_changes(&outcome.faces, &policy);
        assert_eq!(display(&scene, 1), policy.display_for(true));
        assert_eq!(display(&scene, 2), policy.display_for(true));
    }

    #[test]
    fn repeated_select_leaves_colors_unchanged() {
        let mut shape = Shape::new();
        shape.add_solid(vec![triangle(), triangle()]);
        shape.add_solid(vec![triangle(), triangle()]);
        let policy = HighlightPolicy::default();

        for mode in [SelectionMode::Face, SelectionMode::Volume] {
            let map = VolumeFaceMap::build(&shape);
            let mut state = SelectionState::new(mode);
            let (mut scene, _) = present_seeded(&shape, &map, &state);

            let first = apply_pick(&mut state, Some(f(3)), false, &map);
            scene.apply_changes(&first.faces, &policy);
            let after_first = displays(&scene);

            let second = apply_pick(&mut state, Some(f(3)), false, &map);
            scene.apply_changes(&second.faces, &policy);
            assert!(second.is_noop());
            assert_eq!(displays(&scene), after_first);
            assert_eq!(display(&scene, 3), policy.display_for(true));
        }
    }

    #[test]
    fn repeated_deselect_leaves_colors_unchanged() {
        let mut shape = Shape::new();
        shape.add_solid(vec![triangle(), triangle()]);
        let map = VolumeFaceMap::build(&shape);
        let policy = HighlightPolicy::default();
        let mut state = SelectionState::seeded(SelectionMode::Face, &[1], &map);
        let (mut scene, _) = present_seeded(&shape, &map, &state);
        let before = displays(&scene);

        let outcome = apply_pick(&mut state, Some(f(2)), true, &map);
        scene.apply_changes(&outcome.faces, &policy);
        assert_eq!(displays(&scene), before);
    }

    #[test]
    fn clear_removes_everything() {
        let mut shape = Shape::new();
        shape.add_solid(vec![triangle()]);
        let (mut scene, _, _) = present(&shape);
        assert_eq!(scene.len(), 1);
        scene.clear();
        assert!(scene.is_empty());
        assert!(scene.actor_for_face(f(1)).is_none());
    }
}
