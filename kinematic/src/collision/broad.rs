use parry2d::{
    bounding_volume::Aabb as ParryAabb,
    math::Point,
    partitioning::{Bvh, BvhBuildStrategy},
};

use crate::collision::StaticCollider;
use crate::geometry::{Aabb, Vec2};

/// Acceleration structure for broad-phase queries over immutable static colliders.
///
/// Every collider is finite, so each one gets a world-space AABB leaf. Leaf `i` maps to
/// `colliders[i]` in the slice the accelerator was built from.
pub struct WorldAccel {
    /// BVH over the static collider AABBs.
    pub bvh: Bvh,
    /// Number of leaves.
    len: usize,
}

impl WorldAccel {
    /// Return true if this accelerator has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of entries (AABBs) in this accelerator.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }
}

/// Build a broad-phase accelerator over immutable static colliders.
pub fn build_world_accel(colliders: &[StaticCollider]) -> WorldAccel {
    let aabbs: Vec<ParryAabb> = colliders.iter().map(|c| to_parry(&c.bounds())).collect();

    WorldAccel {
        bvh: Bvh::from_leaves(BvhBuildStrategy::Binned, &aabbs),
        len: aabbs.len(),
    }
}

/// AABB swept by a segment from `origin` to `origin + direction * distance`, inflated by `margin`.
pub fn swept_ray_aabb(origin: Vec2, direction: Vec2, distance: f32, margin: f32) -> Aabb {
    let end = origin + direction * distance;
    inflate(&union(&Aabb::new(origin, origin), &Aabb::new(end, end)), margin)
}

/// AABB swept by a box of `half_extents` moving from `center` to `center + motion`,
/// inflated by `margin`.
pub fn swept_box_aabb(center: Vec2, half_extents: Vec2, motion: Vec2, margin: f32) -> Aabb {
    let start = Aabb::from_center_half_extents(center, half_extents);
    let end = start.translated(motion);
    inflate(&union(&start, &end), margin)
}

/// Query candidate collider indices whose AABB intersects `swept`.
///
/// Returns indices into the collider slice the accelerator was built from.
pub fn query_candidates(accel: &WorldAccel, swept: &Aabb) -> Vec<usize> {
    if accel.is_empty() {
        return Vec::new();
    }
    accel
        .bvh
        .intersect_aabb(&to_parry(swept))
        .map(|leaf_idx| leaf_idx as usize)
        .collect()
}

fn to_parry(aabb: &Aabb) -> ParryAabb {
    ParryAabb::new(
        Point::new(aabb.min.x, aabb.min.y),
        Point::new(aabb.max.x, aabb.max.y),
    )
}

/// Compute the union of two AABBs.
fn union(a: &Aabb, b: &Aabb) -> Aabb {
    Aabb::new(
        Vec2::new(a.min.x.min(b.min.x), a.min.y.min(b.min.y)),
        Vec2::new(a.max.x.max(b.max.x), a.max.y.max(b.max.y)),
    )
}

/// Inflate an AABB by `margin` on all sides.
fn inflate(a: &Aabb, margin: f32) -> Aabb {
    if margin <= 0.0 {
        return *a;
    }
    let delta = Vec2::new(margin, margin);
    Aabb::new(a.min - delta, a.max + delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::LayerMask;

    fn block(min: (f32, f32), max: (f32, f32)) -> StaticCollider {
        StaticCollider::from_bounds(
            Aabb::new(Vec2::new(min.0, min.1), Vec2::new(max.0, max.1)),
            LayerMask::all(),
        )
    }

    #[test]
    fn swept_ray_covers_both_endpoints() {
        let swept = swept_ray_aabb(Vec2::new(1.0, 1.0), Vec2::new(-1.0, 0.0), 3.0, 0.0);
        assert_eq!(swept.min, Vec2::new(-2.0, 1.0));
        assert_eq!(swept.max, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn swept_box_is_inflated_by_margin() {
        let swept = swept_box_aabb(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.5, 0.5),
            Vec2::new(0.0, 1.0),
            0.1,
        );
        assert!((swept.min - Vec2::new(-0.6, -0.6)).norm() < 1.0e-6);
        assert!((swept.max - Vec2::new(0.6, 1.6)).norm() < 1.0e-6);
    }

    #[test]
    fn candidates_only_include_intersecting_leaves() {
        let colliders = [
            block((-10.0, -1.0), (10.0, 0.0)),
            block((20.0, 0.0), (21.0, 5.0)),
        ];
        let accel = build_world_accel(&colliders);
        assert_eq!(accel.len(), 2);

        let near_floor = swept_ray_aabb(Vec2::new(0.0, 1.0), Vec2::new(0.0, -1.0), 2.0, 0.0);
        let candidates = query_candidates(&accel, &near_floor);
        assert_eq!(candidates, vec![0]);
    }

    #[test]
    fn empty_world_has_no_candidates() {
        let accel = build_world_accel(&[]);
        assert!(accel.is_empty());
        let swept = swept_ray_aabb(Vec2::zeros(), Vec2::new(1.0, 0.0), 1.0, 0.0);
        assert!(query_candidates(&accel, &swept).is_empty());
    }
}
