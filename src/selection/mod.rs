//! Face/volume selection state and the toggle logic driven by picks.

mod highlight;
mod state;
mod volume_map;

pub use highlight::{palette, Color, DisplayState, HighlightPolicy};
pub use state::{
    apply_pick, is_highlighted, FaceChange, PickOutcome, SelectionSnapshot, SelectionState,
};
pub use volume_map::VolumeFaceMap;

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// 1-based position of a face in shape traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceId(NonZeroU32);

/// 1-based position of a solid in shape traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolumeId(NonZeroU32);

macro_rules! impl_id {
    ($ty:ident) => {
        impl $ty {
            /// Creates an id, or `None` for 0.
            #[must_use]
            pub fn new(value: u32) -> Option<Self> {
                NonZeroU32::new(value).map(Self)
            }

            /// The raw 1-based value.
            #[must_use]
            pub fn get(self) -> u32 {
                self.0.get()
            }

            /// Id of the `index`-th (0-based) entity in traversal order.
            pub(crate) fn from_index(index: usize) -> Option<Self> {
                u32::try_from(index)
                    .ok()
                    .and_then(|i| i.checked_add(1))
                    .and_then(Self::new)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

impl_id!(FaceId);
impl_id!(VolumeId);

/// What a pick selects, fixed for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// A pick toggles the single face under the cursor.
    #[default]
    Face,
    /// A pick toggles every face of the volume under the cursor.
    Volume,
}
