use parry2d::{
    math::{Isometry, Point, Real, Vector},
    query::{self, Ray, RayCast, ShapeCastOptions},
    shape as pshape,
};

use super::types::StaticCollider;
use crate::geometry::Vec2;

#[inline]
fn collider_pose(collider: &StaticCollider) -> (Isometry<Real>, pshape::Cuboid) {
    (
        Isometry::translation(collider.center.x, collider.center.y),
        pshape::Cuboid::new(Vector::new(
            collider.half_extents.x,
            collider.half_extents.y,
        )),
    )
}

/// Cast a ray against a single static collider.
///
/// - `direction` must be unit length, so the returned time of impact is a distance.
/// - Colliders are solid: a ray starting inside one reports distance `0`.
pub fn cast_ray_against_static(
    origin: Vec2,
    direction: Vec2,
    max_distance: f32,
    collider: &StaticCollider,
) -> Option<f32> {
    let (iso, cuboid) = collider_pose(collider);
    let ray = Ray::new(
        Point::new(origin.x, origin.y),
        Vector::new(direction.x, direction.y),
    );
    cuboid.cast_ray(&iso, &ray, max_distance, true)
}

/// Sweep an axis-aligned box of `half_extents` from `center` along `motion` and report whether it
/// touches `collider` anywhere along the way (including an overlap at the start).
pub fn cast_box_against_static(
    center: Vec2,
    half_extents: Vec2,
    motion: Vec2,
    collider: &StaticCollider,
) -> bool {
    let probe = pshape::Cuboid::new(Vector::new(half_extents.x, half_extents.y));
    let probe_iso: Isometry<Real> = Isometry::translation(center.x, center.y);
    let (target_iso, target) = collider_pose(collider);

    // Options by value; `stop_at_penetration` makes an initial overlap report a hit at 0.
    let mut opts = ShapeCastOptions::with_max_time_of_impact(1.0);
    opts.stop_at_penetration = true;

    matches!(
        query::cast_shapes(
            &probe_iso,
            &Vector::new(motion.x, motion.y),
            &probe as &dyn pshape::Shape,
            &target_iso,
            &Vector::zeros(),
            &target as &dyn pshape::Shape,
            opts,
        ),
        Ok(Some(_))
    )
}

/// Iterate over candidate colliders and return the nearest ray hit distance (if any).
pub fn nearest_ray_hit<'a>(
    origin: Vec2,
    direction: Vec2,
    max_distance: f32,
    candidates: impl IntoIterator<Item = &'a StaticCollider>,
) -> Option<f32> {
    let mut best: Option<f32> = None;
    for collider in candidates {
        if let Some(distance) = cast_ray_against_static(origin, direction, max_distance, collider) {
            if best.map_or(true, |b| distance < b) {
                best = Some(distance);
            }
        }
    }
    best
}
