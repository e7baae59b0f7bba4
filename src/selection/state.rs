use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{FaceId, SelectionMode, VolumeFaceMap, VolumeId};

/// The selected-face and selected-volume buffers of one loaded shape.
///
/// In [`SelectionMode::Volume`] every face of a selected volume is selected
/// and every selected face belongs to a selected volume. In
/// [`SelectionMode::Face`] the volume buffer stays empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    mode: SelectionMode,
    selected_faces: BTreeSet<FaceId>,
    selected_volumes: BTreeSet<VolumeId>,
}

impl SelectionState {
    /// Creates an empty selection.
    #[must_use]
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Creates a selection from persisted ids.
    ///
    /// `ids` are face ids in face mode and volume ids in volume mode. In
    /// volume mode every face of a seeded volume is selected too. Ids that
    /// do not exist in `map` are skipped.
    #[must_use]
    pub fn seeded(mode: SelectionMode, ids: &[u32], map: &VolumeFaceMap) -> Self {
        let mut state = Self::new(mode);
        for &raw in ids {
            match mode {
                SelectionMode::Face => match FaceId::new(raw).filter(|&f| map.contains_face(f)) {
                    Some(face) => {
                        state.selected_faces.insert(face);
                    }
                    None => tracing::warn!(id = raw, "seed face does not exist, skipping"),
                },
                SelectionMode::Volume => {
                    match VolumeId::new(raw).filter(|&v| map.contains_volume(v)) {
                        Some(volume) => {
                            state.selected_volumes.insert(volume);
                            state.selected_faces.extend(map.faces_of(volume));
                        }
                        None => tracing::warn!(id = raw, "seed volume does not exist, skipping"),
                    }
                }
            }
        }
        tracing::debug!(
            faces = state.selected_faces.len(),
            volumes = state.selected_volumes.len(),
            "seeded selection"
        );
        state
    }

    /// Restores a selection saved with [`snapshot`](Self::snapshot).
    ///
    /// The snapshot's mode wins; ids are re-validated against `map`.
    #[must_use]
    pub fn restore(snapshot: &SelectionSnapshot, map: &VolumeFaceMap) -> Self {
        Self::seeded(snapshot.mode, snapshot.seed_ids(), map)
    }

    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    #[must_use]
    pub fn selected_faces(&self) -> &BTreeSet<FaceId> {
        &self.selected_faces
    }

    #[must_use]
    pub fn selected_volumes(&self) -> &BTreeSet<VolumeId> {
        &self.selected_volumes
    }

    /// The buffers in persistable form.
    #[must_use]
    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            mode: self.mode,
            faces: self.selected_faces.iter().map(|f| f.get()).collect(),
            volumes: self.selected_volumes.iter().map(|v| v.get()).collect(),
        }
    }
}

/// Serializable copy of the selection buffers for an external store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub mode: SelectionMode,
    pub faces: Vec<u32>,
    #[serde(default)]
    pub volumes: Vec<u32>,
}

impl SelectionSnapshot {
    /// The ids to seed a new session with: volumes in volume mode, faces otherwise.
    #[must_use]
    pub fn seed_ids(&self) -> &[u32] {
        match self.mode {
            SelectionMode::Face => &self.faces,
            SelectionMode::Volume => &self.volumes,
        }
    }
}

/// Returns whether `face` should be drawn highlighted.
///
/// In volume mode a face is highlighted when its owning volume is selected;
/// a face with no owning volume is never highlighted.
#[must_use]
pub fn is_highlighted(face: FaceId, state: &SelectionState, map: &VolumeFaceMap) -> bool {
    match state.mode {
        SelectionMode::Face => state.selected_faces.contains(&face),
        SelectionMode::Volume => map
            .volume_of(face)
            .is_some_and(|v| state.selected_volumes.contains(&v)),
    }
}

/// A face whose highlight state changed during a pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceChange {
    pub face: FaceId,
    pub highlighted: bool,
}

/// Everything a pick changed. Empty for a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickOutcome {
    /// The face the pick resolved to, if any.
    pub picked: Option<FaceId>,
    /// Faces whose membership in the face buffer changed.
    pub faces: Vec<FaceChange>,
    /// The target volume and whether it is now selected, if its
    /// membership changed.
    pub volume: Option<(VolumeId, bool)>,
}

impl PickOutcome {
    /// Whether the pick left both buffers untouched.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.faces.is_empty() && self.volume.is_none()
    }
}

/// Applies one pick to the selection.
///
/// `picked` is `None` when the hit test found nothing; that is a no-op.
/// Selecting inserts only absent ids and deselecting removes only present
/// ids, so repeating a pick changes nothing. A face the map does not know
/// aborts the pick. In volume mode the whole owning volume is the target;
/// a face with no owning volume aborts the pick without changes.
pub fn apply_pick(
    state: &mut SelectionState,
    picked: Option<FaceId>,
    is_deselect: bool,
    map: &VolumeFaceMap,
) -> PickOutcome {
    let mut outcome = PickOutcome {
        picked,
        ..PickOutcome::default()
    };
    let Some(face) = picked else {
        return outcome;
    };

    let (targets, target_volume): (&[FaceId], Option<VolumeId>) = match state.mode {
        SelectionMode::Face => {
            if !map.contains_face(face) {
                tracing::warn!(%face, "picked face does not exist, ignoring pick");
                return outcome;
            }
            (std::slice::from_ref(&face), None)
        }
        SelectionMode::Volume => {
            let Some(volume) = map.volume_of(face) else {
                tracing::warn!(%face, "picked face has no owning volume, ignoring pick");
                return outcome;
            };
            tracing::debug!(%volume, faces = ?map.faces_of(volume), "picked volume");
            (map.faces_of(volume), Some(volume))
        }
    };
    if targets.is_empty() {
        return outcome;
    }

    for &target in targets {
        let changed = if is_deselect {
            state.selected_faces.remove(&target)
        } else {
            state.selected_faces.insert(target)
        };
        if changed {
            outcome.faces.push(FaceChange {
                face: target,
                highlighted: !is_deselect,
            });
        }
    }

    if let Some(volume) = target_volume {
        let changed = if is_deselect {
            state.selected_volumes.remove(&volume)
        } else {
            state.selected_volumes.insert(volume)
        };
        if changed {
            outcome.volume = Some((volume, !is_deselect));
        }
    }

    outcome
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn f(id: u32) -> FaceId {
        FaceId::new(id).unwrap()
    }

    fn v(id: u32) -> VolumeId {
        VolumeId::new(id).unwrap()
    }

    fn faces(ids: &[u32]) -> BTreeSet<FaceId> {
        ids.iter().map(|&i| f(i)).collect()
    }

    fn volumes(ids: &[u32]) -> BTreeSet<VolumeId> {
        ids.iter().map(|&i| v(i)).collect()
    }

    // {1: [1, 2], 2: [3, 4, 5]}
    fn map() -> VolumeFaceMap {
        VolumeFaceMap::from_face_counts(&[2, 3])
    }

    fn assert_volume_invariant(state: &SelectionState, map: &VolumeFaceMap) {
        for &volume in state.selected_volumes() {
            for face in map.faces_of(volume) {
                assert!(
                    state.selected_faces().contains(face),
                    "{face} of {volume} not selected"
                );
            }
        }
        for &face in state.selected_faces() {
            let owner = map.volume_of(face).unwrap();
            assert!(
                state.selected_volumes().contains(&owner),
                "{face} selected without {owner}"
            );
        }
    }

    #[test]
    fn volume_seed_selects_all_faces_of_volume() {
        let map = map();
        let state = SelectionState::seeded(SelectionMode::Volume, &[2, 4], &map);
        assert_eq!(state.selected_volumes(), &volumes(&[2]));
        assert_eq!(state.selected_faces(), &faces(&[3, 4, 5]));
        assert!(is_highlighted(f(4), &state, &map));
        assert!(!is_highlighted(f(1), &state, &map));
    }

    #[test]
    fn face_seed_selects_exactly_those_faces() {
        let map = map();
        let state = SelectionState::seeded(SelectionMode::Face, &[2, 4], &map);
        assert_eq!(state.selected_faces(), &faces(&[2, 4]));
        assert!(state.selected_volumes().is_empty());
        let highlighted: Vec<_> = map
            .faces()
            .filter(|&x| is_highlighted(x, &state, &map))
            .collect();
        assert_eq!(highlighted, vec![f(2), f(4)]);
    }

    #[test]
    fn seed_skips_zero_and_unknown_ids() {
        let map = map();
        let state = SelectionState::seeded(SelectionMode::Face, &[0, 9, 1], &map);
        assert_eq!(state.selected_faces(), &faces(&[1]));
    }

    #[test]
    fn volume_pick_selects_and_deselects_whole_volume() {
        let map = map();
        let mut state = SelectionState::seeded(SelectionMode::Volume, &[2], &map);

        let outcome = apply_pick(&mut state, Some(f(1)), false, &map);
        assert_eq!(state.selected_volumes(), &volumes(&[1, 2]));
        assert_eq!(state.selected_faces(), &faces(&[1, 2, 3, 4, 5]));
        assert_eq!(outcome.volume, Some((v(1), true)));
        assert_eq!(outcome.faces.len(), 2);

        let outcome = apply_pick(&mut state, Some(f(3)), true, &map);
        assert_eq!(state.selected_volumes(), &volumes(&[1]));
        assert_eq!(state.selected_faces(), &faces(&[1, 2]));
        assert!(outcome.faces.iter().all(|c| !c.highlighted));
        assert_volume_invariant(&state, &map);
    }

    #[test]
    fn repeated_select_is_idempotent() {
        let map = map();
        let mut state = SelectionState::new(SelectionMode::Face);
        let first = apply_pick(&mut state, Some(f(3)), false, &map);
        let after_first = state.clone();
        let second = apply_pick(&mut state, Some(f(3)), false, &map);
        assert_eq!(state, after_first);
        assert!(!first.is_noop());
        assert!(second.is_noop());
    }

    #[test]
    fn deselect_of_absent_face_is_idempotent() {
        let map = map();
        let mut state = SelectionState::seeded(SelectionMode::Face, &[1], &map);
        let before = state.clone();
        assert!(apply_pick(&mut state, Some(f(2)), true, &map).is_noop());
        assert_eq!(state, before);
    }

    #[test]
    fn selecting_already_selected_volume_is_noop() {
        let map = map();
        let mut state = SelectionState::seeded(SelectionMode::Volume, &[2], &map);
        let before = state.clone();
        assert!(apply_pick(&mut state, Some(f(4)), false, &map).is_noop());
        assert_eq!(state, before);
    }

    #[test]
    fn miss_never_mutates() {
        let map = map();
        for mode in [SelectionMode::Face, SelectionMode::Volume] {
            let mut state = SelectionState::seeded(mode, &[1], &map);
            let before = state.clone();
            for deselect in [false, true] {
                assert!(apply_pick(&mut state, None, deselect, &map).is_noop());
            }
            assert_eq!(state, before);
        }
    }

    #[test]
    fn orphan_face_aborts_volume_pick() {
        let map = map();
        let mut state = SelectionState::new(SelectionMode::Volume);
        let outcome = apply_pick(&mut state, Some(f(42)), false, &map);
        assert!(outcome.is_noop());
        assert_eq!(outcome.picked, Some(f(42)));
        assert!(state.selected_faces().is_empty());
        assert!(!is_highlighted(f(42), &state, &map));
    }

    #[test]
    fn unknown_face_pick_is_noop_and_survives_restore() {
        let map = map();
        let mut state = SelectionState::seeded(SelectionMode::Face, &[1], &map);
        let before = state.clone();
        for deselect in [false, true] {
            let outcome = apply_pick(&mut state, Some(f(99)), deselect, &map);
            assert!(outcome.is_noop());
            assert_eq!(outcome.picked, Some(f(99)));
        }
        assert_eq!(state, before);
        assert_eq!(SelectionState::restore(&state.snapshot(), &map), state);
    }

    #[test]
    fn invariant_holds_over_pick_sequence() {
        let map = VolumeFaceMap::from_face_counts(&[2, 3, 1, 4]);
        let mut state = SelectionState::new(SelectionMode::Volume);
        let picks = [
            (1, false),
            (6, false),
            (3, false),
            (2, true),
            (10, false),
            (7, true),
            (5, true),
        ];
        for (face, deselect) in picks {
            apply_pick(&mut state, Some(f(face)), deselect, &map);
            assert_volume_invariant(&state, &map);
        }
        assert_eq!(state.selected_volumes(), &volumes(&[3]));
    }

    #[test]
    fn snapshot_restores_the_same_selection() {
        let map = map();
        let mut state = SelectionState::new(SelectionMode::Volume);
        apply_pick(&mut state, Some(f(4)), false, &map);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.volumes, vec![2]);
        assert_eq!(snapshot.faces, vec![3, 4, 5]);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SelectionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(SelectionState::restore(&back, &map), state);
    }
}
