/*!
Collision data types shared by the collision submodules.

This module contains no algorithms. It defines the data exchanged between
- broad (static world acceleration and candidate queries)
- narrow_phase (parry2d ray and shape casts)
- world (the static collision query service)
- resolver (the raycast sweep-and-clamp controller)
*/

use serde::{Deserialize, Serialize};

use crate::geometry::{Aabb, Vec2};

use super::layers::LayerMask;

/// Which sides of the body registered contact during the last resolved move.
///
/// Reset at the start of every move. A side is set when any ray on that side hit
/// within the move's probe length. Read by the motion logic on the following step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionFlags {
    pub above: bool,
    pub below: bool,
    pub left: bool,
    pub right: bool,
}

impl CollisionFlags {
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn any(&self) -> bool {
        self.above || self.below || self.left || self.right
    }

    /// Touching a wall on either side.
    #[inline]
    pub fn horizontal(&self) -> bool {
        self.left || self.right
    }

    /// Touching a floor or a ceiling.
    #[inline]
    pub fn vertical(&self) -> bool {
        self.above || self.below
    }
}

/// An immutable axis-aligned collider in the static collision layer.
#[derive(Clone, Copy, Debug)]
pub struct StaticCollider {
    /// World-space center.
    pub center: Vec2,
    /// Half extents along x and y.
    pub half_extents: Vec2,
    /// Layers this collider belongs to.
    pub layers: LayerMask,
}

impl StaticCollider {
    #[inline]
    pub fn new(center: Vec2, half_extents: Vec2, layers: LayerMask) -> Self {
        Self {
            center,
            half_extents,
            layers,
        }
    }

    /// Collider covering `bounds`.
    #[inline]
    pub fn from_bounds(bounds: Aabb, layers: LayerMask) -> Self {
        Self::new(bounds.center(), bounds.half_extents(), layers)
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.center, self.half_extents)
    }
}
