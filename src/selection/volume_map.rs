use std::collections::BTreeMap;

use crate::topology::{FaceKey, Shape};

use super::{FaceId, VolumeId};

/// Mapping from each volume to the faces it contains, plus the reverse index.
///
/// Built once per loaded shape. Face ids are numbered with one counter over
/// the whole shape, so ids are unique and increase across volumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeFaceMap {
    volumes: BTreeMap<VolumeId, Vec<FaceId>>,
    owners: Vec<Option<VolumeId>>,
    keys: Vec<FaceKey>,
}

impl VolumeFaceMap {
    /// Numbers the solids and faces of `shape` in traversal order.
    ///
    /// A shape with no solids yields an empty map. Faces outside any solid
    /// still receive a [`FaceId`] but no owning volume. Faces shared between
    /// solids are not detected.
    #[must_use]
    pub fn build(shape: &Shape) -> Self {
        let mut map = Self::default();
        for (index, explored) in shape.explore().into_iter().enumerate() {
            let Some(face) = FaceId::from_index(index) else {
                tracing::warn!(index, "face count exceeds id range, truncating");
                break;
            };
            let owner = explored.solid.and_then(VolumeId::from_index);
            if let Some(volume) = owner {
                map.volumes.entry(volume).or_default().push(face);
            }
            map.owners.push(owner);
            map.keys.push(explored.key);
        }
        tracing::debug!(
            volumes = map.volumes.len(),
            faces = map.keys.len(),
            "built volume-face map"
        );
        map
    }

    /// Builds a map from the number of faces in each volume.
    ///
    /// Faces are numbered consecutively from 1 in the given order. The map
    /// is not backed by a shape, so [`key_of`](Self::key_of) yields null keys.
    #[must_use]
    pub fn from_face_counts(counts: &[usize]) -> Self {
        let mut map = Self::default();
        let mut next = 0;
        for (volume_index, &count) in counts.iter().enumerate() {
            let Some(volume) = VolumeId::from_index(volume_index) else {
                break;
            };
            for _ in 0..count {
                let Some(face) = FaceId::from_index(next) else {
                    return map;
                };
                map.volumes.entry(volume).or_default().push(face);
                map.owners.push(Some(volume));
                map.keys.push(FaceKey::default());
                next += 1;
            }
        }
        map
    }

    /// The faces of `volume`, in insertion order. Empty if unknown.
    #[must_use]
    pub fn faces_of(&self, volume: VolumeId) -> &[FaceId] {
        self.volumes.get(&volume).map_or(&[], Vec::as_slice)
    }

    /// The volume owning `face`, if any.
    #[must_use]
    pub fn volume_of(&self, face: FaceId) -> Option<VolumeId> {
        self.owners.get(slot(face)).copied().flatten()
    }

    /// The topology key of `face`, if it exists in the shape.
    #[must_use]
    pub fn key_of(&self, face: FaceId) -> Option<FaceKey> {
        self.keys.get(slot(face)).copied()
    }

    /// Whether `volume` owns at least one face.
    #[must_use]
    pub fn contains_volume(&self, volume: VolumeId) -> bool {
        self.volumes.contains_key(&volume)
    }

    /// Whether `face` was numbered by this map.
    #[must_use]
    pub fn contains_face(&self, face: FaceId) -> bool {
        slot(face) < self.keys.len()
    }

    /// Iterates volumes in id order with their faces.
    pub fn volumes(&self) -> impl Iterator<Item = (VolumeId, &[FaceId])> {
        self.volumes.iter().map(|(&v, faces)| (v, faces.as_slice()))
    }

    /// Iterates every face id in traversal order.
    pub fn faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        (0..self.keys.len()).filter_map(FaceId::from_index)
    }

    /// Number of volumes that own at least one face.
    #[must_use]
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    /// Whether no volume owns any face.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Total number of numbered faces, including free faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.keys.len()
    }
}

fn slot(face: FaceId) -> usize {
    face.get() as usize - 1
}
