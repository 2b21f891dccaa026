//! Collision layers and masks.

use crate::bitmask_flags::BitmaskFlags;
use crate::define_bitmask_flags;

define_bitmask_flags!(CollisionLayer, u32, {
    Ground,
    Platform,
    Wall,
    Hazard,
});

/// Set of [`CollisionLayer`]s. Colliders carry one as their membership, queries carry one as
/// their filter; a query sees a collider when the two intersect.
pub type LayerMask = BitmaskFlags<u32>;

/// Mask of the layers that block the player: everything except hazards.
pub fn solid_mask() -> LayerMask {
    LayerMask::of(&[
        CollisionLayer::Ground,
        CollisionLayer::Platform,
        CollisionLayer::Wall,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_mask_excludes_hazards() {
        let mask = solid_mask();
        assert!(mask.has(CollisionLayer::Ground));
        assert!(mask.has(CollisionLayer::Wall));
        assert!(!mask.has(CollisionLayer::Hazard));

        let hazard = LayerMask::of(&[CollisionLayer::Hazard]);
        assert!(!hazard.intersects(&mask));
    }
}
