/*!
Axis-aligned box geometry and the body geometry capability.

The collision resolver never owns the moving body. It borrows anything that
implements [`BodyGeometry`], reads the world bounds and scale from it, and
translates it once the displacement for the step has been resolved.
*/

use nalgebra as na;

/// 2D vector alias used across the crate.
pub type Vec2 = na::Vector2<f32>;

/// Axis-aligned bounding box in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    #[inline]
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Shrink every side by `margin`.
    ///
    /// An axis thinner than `2 * margin` collapses onto its center line rather than inverting,
    /// so the extents of the result are never negative.
    pub fn contracted(&self, margin: f32) -> Self {
        let center = self.center();
        let half = self.half_extents();
        let half = Vec2::new((half.x - margin).max(0.0), (half.y - margin).max(0.0));
        Self::from_center_half_extents(center, half)
    }

    /// Strict overlap test. Boxes that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Penetration depth along the shallower axis, or 0 when the boxes do not overlap.
    pub fn overlap_depth(&self, other: &Aabb) -> f32 {
        if !self.overlaps(other) {
            return 0.0;
        }
        let dx = self.max.x.min(other.max.x) - self.min.x.max(other.min.x);
        let dy = self.max.y.min(other.max.y) - self.min.y.max(other.min.y);
        dx.min(dy)
    }
}

/// The geometry of the controlled body, supplied by the host.
pub trait BodyGeometry {
    /// World-space bounds of the body's box collider (not contracted).
    fn world_bounds(&self) -> Aabb;

    /// World-space scale of the body, used to size the corner-correction probe box.
    fn local_scale(&self) -> Vec2;

    /// World-space pivot position of the body.
    fn position(&self) -> Vec2;

    /// Move the body by `delta` in world space.
    fn translate(&mut self, delta: Vec2);
}

/// A box-shaped body whose pivot sits at the box center.
///
/// The scale reported to the resolver is the full box size, the same as a unit box collider
/// stretched by its transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxBody {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl BoxBody {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Box of `size` whose bottom edge rests at `feet`.
    pub fn standing_at(feet: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self::new(Vec2::new(feet.x, feet.y + half.y), half)
    }
}

impl BodyGeometry for BoxBody {
    fn world_bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.center, self.half_extents)
    }

    fn local_scale(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    fn position(&self) -> Vec2 {
        self.center
    }

    fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1.0e-6;

    #[test]
    fn contracted_shrinks_each_side_by_margin() {
        let bounds = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 2.0));
        let inner = bounds.contracted(0.015);

        assert!((inner.min.x - 0.015).abs() < EPS);
        assert!((inner.min.y - 0.015).abs() < EPS);
        assert!((inner.max.x - 0.985).abs() < EPS);
        assert!((inner.max.y - 1.985).abs() < EPS);
    }

    #[test]
    fn contracted_never_inverts_a_thin_box() {
        let sliver = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(0.01, 1.0));
        let inner = sliver.contracted(0.015);

        assert!(inner.size().x >= 0.0);
        assert!((inner.center().x - 0.005).abs() < EPS);
        assert!((inner.size().y - 0.97).abs() < EPS);
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let b = Aabb::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        assert!(!a.overlaps(&b));
        assert_eq!(a.overlap_depth(&b), 0.0);

        let c = b.translated(Vec2::new(-0.25, 0.0));
        assert!(a.overlaps(&c));
        assert!((a.overlap_depth(&c) - 0.25).abs() < EPS);
    }

    #[test]
    fn box_body_reports_center_scale_and_translates() {
        let mut body = BoxBody::standing_at(Vec2::new(2.0, 0.0), Vec2::new(1.0, 2.0));
        assert!((body.position() - Vec2::new(2.0, 1.0)).norm() < EPS);
        assert!((body.local_scale() - Vec2::new(1.0, 2.0)).norm() < EPS);

        body.translate(Vec2::new(0.5, -0.25));
        let bounds = body.world_bounds();
        assert!((bounds.min - Vec2::new(2.0, 0.75)).norm() < EPS);
        assert!((bounds.max - Vec2::new(3.0, 2.75)).norm() < EPS);
    }
}
