//! Ray origins and ray spacing derived from the body's contracted bounds.

use crate::collision::settings::MIN_RAY_COUNT;
use crate::geometry::{Aabb, Vec2};

/// The four corners of the contracted bounding box, used as ray fan anchors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastOrigins {
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
}

impl Default for RaycastOrigins {
    fn default() -> Self {
        Self {
            top_left: Vec2::zeros(),
            top_right: Vec2::zeros(),
            bottom_left: Vec2::zeros(),
            bottom_right: Vec2::zeros(),
        }
    }
}

impl RaycastOrigins {
    /// Corners of `bounds`. Pass bounds already contracted by the skin width.
    #[inline]
    pub fn from_bounds(bounds: &Aabb) -> Self {
        Self {
            top_left: Vec2::new(bounds.min.x, bounds.max.y),
            top_right: Vec2::new(bounds.max.x, bounds.max.y),
            bottom_left: Vec2::new(bounds.min.x, bounds.min.y),
            bottom_right: Vec2::new(bounds.max.x, bounds.min.y),
        }
    }
}

/// Distance between neighbouring parallel rays on each axis.
///
/// - `horizontal`: gap between horizontal rays, measured along the box height.
/// - `vertical`: gap between vertical rays, measured along the box width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaySpacing {
    pub horizontal: f32,
    pub vertical: f32,
    /// Ray counts after clamping to [`MIN_RAY_COUNT`].
    pub horizontal_ray_count: usize,
    pub vertical_ray_count: usize,
}

impl RaySpacing {
    /// Compute spacing for `bounds` (already contracted) and the configured ray counts.
    ///
    /// Counts below [`MIN_RAY_COUNT`] are raised to it; this never fails.
    pub fn compute(bounds: &Aabb, horizontal_ray_count: usize, vertical_ray_count: usize) -> Self {
        let h = clamp_ray_count(horizontal_ray_count);
        let v = clamp_ray_count(vertical_ray_count);
        let size = bounds.size();

        Self {
            horizontal: size.y / (h - 1) as f32,
            vertical: size.x / (v - 1) as f32,
            horizontal_ray_count: h,
            vertical_ray_count: v,
        }
    }
}

#[inline]
fn clamp_ray_count(count: usize) -> usize {
    if count < MIN_RAY_COUNT {
        log::trace!("ray count {count} raised to {MIN_RAY_COUNT}");
    }
    count.max(MIN_RAY_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1.0e-6;

    fn unit_box() -> Aabb {
        Aabb::new(Vec2::new(-0.5, 0.0), Vec2::new(0.5, 2.0))
    }

    #[test]
    fn origins_are_the_box_corners() {
        let o = RaycastOrigins::from_bounds(&unit_box());
        assert_eq!(o.bottom_left, Vec2::new(-0.5, 0.0));
        assert_eq!(o.bottom_right, Vec2::new(0.5, 0.0));
        assert_eq!(o.top_left, Vec2::new(-0.5, 2.0));
        assert_eq!(o.top_right, Vec2::new(0.5, 2.0));
    }

    #[test]
    fn spacing_divides_the_orthogonal_axis() {
        // Horizontal rays are spread along the height, vertical rays along the width.
        let s = RaySpacing::compute(&unit_box(), 5, 3);
        assert!((s.horizontal - 2.0 / 4.0).abs() < EPS);
        assert!((s.vertical - 1.0 / 2.0).abs() < EPS);
        assert_eq!(s.horizontal_ray_count, 5);
        assert_eq!(s.vertical_ray_count, 3);
    }

    #[test]
    fn ray_counts_below_two_are_raised() {
        let s = RaySpacing::compute(&unit_box(), 0, 1);
        assert_eq!(s.horizontal_ray_count, 2);
        assert_eq!(s.vertical_ray_count, 2);
        // Two rays: one on each edge.
        assert!((s.horizontal - 2.0).abs() < EPS);
        assert!((s.vertical - 1.0).abs() < EPS);
    }

    #[test]
    fn spacing_is_finite_for_a_collapsed_box() {
        let point = Aabb::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0));
        let s = RaySpacing::compute(&point, 4, 4);
        assert_eq!(s.horizontal, 0.0);
        assert_eq!(s.vertical, 0.0);
    }
}
