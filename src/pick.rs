//! Screen-space picking seam.

use crate::math::{Point3, ScreenPoint};
use crate::scene::{ActorKey, Scene};

/// A screen rectangle in pixels, inclusive on both corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub min: ScreenPoint,
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// A degenerate rectangle covering one pixel.
    #[must_use]
    pub fn point(position: ScreenPoint) -> Self {
        Self {
            min: position,
            max: position,
        }
    }
}

/// What the hit test found under the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// The actor that was hit.
    pub actor: ActorKey,
    /// Where the hit was reported on screen.
    pub screen_pos: ScreenPoint,
    /// World position of the hit, if the renderer captured depth.
    pub world_position: Option<Point3>,
}

/// Resolves screen positions to actors. Implemented by the renderer.
pub trait PickAdapter {
    /// Returns the actor under `rect`, or `None` for a miss.
    fn hit_test(&mut self, scene: &Scene, rect: ScreenRect) -> Option<PickHit>;
}

/// A left-button press in the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickEvent {
    pub position: ScreenPoint,
    /// Shift held: the pick deselects instead of selecting.
    pub shift: bool,
}

impl PickEvent {
    /// A plain click, which selects.
    #[must_use]
    pub fn select(position: ScreenPoint) -> Self {
        Self {
            position,
            shift: false,
        }
    }

    /// A shift-click, which deselects.
    #[must_use]
    pub fn deselect(position: ScreenPoint) -> Self {
        Self {
            position,
            shift: true,
        }
    }

    #[must_use]
    pub fn is_deselect(&self) -> bool {
        self.shift
    }
}
