use crate::geometry::Vec2;

use super::layers::LayerMask;

/// Spatial queries against the static collision layer.
///
/// The resolver treats this as an opaque service: it only needs the distance to the nearest
/// surface along a ray, and whether a swept box touches anything. [`StaticWorld`](super::StaticWorld)
/// is the in-crate implementation; hosts with their own physics scene implement it over that.
pub trait CollisionQuery {
    /// Distance along `direction` (unit length) from `origin` to the nearest collider whose
    /// layers intersect `mask`, if one lies within `max_distance`.
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: LayerMask)
    -> Option<f32>;

    /// Whether an axis-aligned box of `size` centered at `center`, swept `distance` along
    /// `direction` (unit length), touches any collider whose layers intersect `mask`.
    /// A box already overlapping a collider at its start counts as a hit.
    fn box_cast(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Vec2,
        distance: f32,
        mask: LayerMask,
    ) -> bool;
}

impl<Q: CollisionQuery + ?Sized> CollisionQuery for &Q {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<f32> {
        (**self).raycast(origin, direction, max_distance, mask)
    }

    fn box_cast(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Vec2,
        distance: f32,
        mask: LayerMask,
    ) -> bool {
        (**self).box_cast(center, size, direction, distance, mask)
    }
}
