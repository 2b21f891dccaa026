//! Static collision world: the in-crate [`CollisionQuery`] implementation.
//!
//! Design goals
//! - Immutable: colliders are fixed at construction; the BVH is built once.
//! - Deterministic: queries scan candidates in leaf order and keep the strictly nearest hit.

use super::{
    CollisionQuery, LayerMask, StaticCollider,
    broad::{self, WorldAccel},
    narrow_phase,
    settings::DIST_EPS,
};
use crate::geometry::{Aabb, Vec2};

/// Immutable set of static axis-aligned colliders with a broad-phase accelerator.
pub struct StaticWorld {
    colliders: Vec<StaticCollider>,
    accel: WorldAccel,
}

impl StaticWorld {
    /// Build a world from a list of colliders.
    pub fn build(colliders: Vec<StaticCollider>) -> Self {
        let accel = broad::build_world_accel(&colliders);
        log::debug!("static world built with {} colliders", colliders.len());
        Self { colliders, accel }
    }

    #[inline]
    pub fn colliders(&self) -> &[StaticCollider] {
        &self.colliders
    }

    /// Colliders matching `mask` whose bounds overlap `bounds` by more than `tolerance`.
    pub fn overlapping(&self, bounds: &Aabb, mask: LayerMask, tolerance: f32) -> Vec<usize> {
        broad::query_candidates(&self.accel, bounds)
            .into_iter()
            .filter(|&i| {
                let collider = &self.colliders[i];
                collider.layers.intersects(&mask)
                    && collider.bounds().overlap_depth(bounds) > tolerance
            })
            .collect()
    }

    fn candidates<'a>(
        &'a self,
        swept: &Aabb,
        mask: LayerMask,
    ) -> impl Iterator<Item = &'a StaticCollider> + 'a {
        broad::query_candidates(&self.accel, swept)
            .into_iter()
            .map(move |i| &self.colliders[i])
            .filter(move |c| c.layers.intersects(&mask))
    }
}

impl CollisionQuery for StaticWorld {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<f32> {
        if max_distance < 0.0 {
            return None;
        }
        let dir = direction.try_normalize(DIST_EPS)?;

        let swept = broad::swept_ray_aabb(origin, dir, max_distance, DIST_EPS);
        narrow_phase::nearest_ray_hit(origin, dir, max_distance, self.candidates(&swept, mask))
    }

    fn box_cast(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Vec2,
        distance: f32,
        mask: LayerMask,
    ) -> bool {
        let half_extents = size.abs() * 0.5;
        let motion = direction
            .try_normalize(DIST_EPS)
            .map_or(Vec2::zeros(), |dir| dir * distance.max(0.0));

        let swept = broad::swept_box_aabb(center, half_extents, motion, DIST_EPS);
        self.candidates(&swept, mask)
            .any(|c| narrow_phase::cast_box_against_static(center, half_extents, motion, c))
    }
}
