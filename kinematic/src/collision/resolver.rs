use serde::{Deserialize, Serialize};

use super::{
    CollisionFlags, CollisionQuery, LayerMask,
    settings::{
        CORNER_PROBE_CAST_LENGTH, CORNER_PROBE_SCALE, CORNER_SWEEP_STEP,
        DEFAULT_HORIZONTAL_RAY_COUNT, DEFAULT_UPWARD_CORNER_CORRECTION,
        DEFAULT_VERTICAL_RAY_COUNT, SKIN_WIDTH, SWEEP_COUNT_EPS,
    },
};
use crate::geometry::{Aabb, BodyGeometry, Vec2};
use crate::raycast::{RaySpacing, RaycastOrigins};

/// Tunables of the raycast collision resolver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Rays cast sideways from the leading edge (spread along the box height). Min 2.
    pub horizontal_ray_count: usize,
    /// Rays cast up/down from the leading edge (spread along the box width). Min 2.
    pub vertical_ray_count: usize,
    /// Inward margin on every side of the body's bounds.
    pub skin_width: f32,
    /// Sideways search distance for the upward corner correction. `0` disables it.
    pub upward_corner_correction: f32,
    /// Distance between corner-correction probes; also the snap grid.
    pub corner_sweep_step: f32,
    /// Probe box size relative to the body's scale.
    pub corner_probe_scale: f32,
    /// Upward cast length of each probe box.
    pub corner_probe_cast_length: f32,
    /// Layers the body collides with.
    pub collision_mask: LayerMask,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            horizontal_ray_count: DEFAULT_HORIZONTAL_RAY_COUNT,
            vertical_ray_count: DEFAULT_VERTICAL_RAY_COUNT,
            skin_width: SKIN_WIDTH,
            upward_corner_correction: DEFAULT_UPWARD_CORNER_CORRECTION,
            corner_sweep_step: CORNER_SWEEP_STEP,
            corner_probe_scale: CORNER_PROBE_SCALE,
            corner_probe_cast_length: CORNER_PROBE_CAST_LENGTH,
            collision_mask: LayerMask::all(),
        }
    }
}

impl ResolverConfig {
    /// Number of corner-correction probes tried per side: the integers `i >= 1` with
    /// `i < upward_corner_correction / corner_sweep_step`.
    pub fn corner_sweep_count(&self) -> u32 {
        let step = self.corner_sweep_step;
        let budget = self.upward_corner_correction;
        if !(step > 0.0) || !(budget > 0.0) {
            return 0;
        }
        let limit = budget / step;
        if !limit.is_finite() {
            return 0;
        }
        ((limit - SWEEP_COUNT_EPS).ceil().max(1.0) as u32) - 1
    }
}

/// Raycast sweep-and-clamp resolver for one axis-aligned box body.
///
/// Algorithm, per [`move_body`](Self::move_body):
/// - Rebuild the ray origins from the skin-contracted bounds and reset the contact flags.
/// - Horizontal pass: a fan of rays from the leading side. The nearest hit clamps the horizontal
///   displacement to stop one skin width short of the surface.
/// - Vertical pass: a fan of rays from the leading edge, shifted by the already-resolved
///   horizontal displacement. When moving up into something, try to slip around the corner
///   first; otherwise clamp like the horizontal pass.
/// - Translate the body by the result.
///
/// Clamping is saturating: a resolved component never exceeds the requested magnitude and never
/// flips sign.
#[derive(Clone, Debug)]
pub struct CollisionResolver {
    config: ResolverConfig,
    origins: RaycastOrigins,
    spacing: RaySpacing,
    /// Contracted box size and raw ray counts the cached spacing was computed from.
    spacing_source: Option<(Vec2, usize, usize)>,
    flags: CollisionFlags,
    /// Sign of the last non-zero horizontal displacement. Starts facing right.
    face_direction: i8,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl CollisionResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            origins: RaycastOrigins::default(),
            spacing: RaySpacing {
                horizontal: 0.0,
                vertical: 0.0,
                horizontal_ray_count: 0,
                vertical_ray_count: 0,
            },
            spacing_source: None,
            flags: CollisionFlags::default(),
            face_direction: 1,
        }
    }

    #[inline]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Contact flags from the last move.
    #[inline]
    pub fn flags(&self) -> CollisionFlags {
        self.flags
    }

    /// `1` when facing right, `-1` when facing left.
    #[inline]
    pub fn face_direction(&self) -> i8 {
        self.face_direction
    }

    /// Ray origins used by the last move.
    #[inline]
    pub fn origins(&self) -> &RaycastOrigins {
        &self.origins
    }

    /// Ray spacing used by the last move.
    #[inline]
    pub fn spacing(&self) -> &RaySpacing {
        &self.spacing
    }

    /// Change the ray counts. Spacing is recomputed on the next move.
    pub fn set_ray_counts(&mut self, horizontal: usize, vertical: usize) {
        self.config.horizontal_ray_count = horizontal;
        self.config.vertical_ray_count = vertical;
        self.spacing_source = None;
    }

    /// Resolve `displacement` against `query`, translate `body` by the result, and return it.
    pub fn move_body<B, Q>(&mut self, body: &mut B, query: &Q, displacement: Vec2) -> Vec2
    where
        B: BodyGeometry + ?Sized,
        Q: CollisionQuery + ?Sized,
    {
        let resolved = self.resolve(&*body, query, displacement);
        body.translate(resolved);
        resolved
    }

    /// Resolve `displacement` without moving the body. Updates origins, spacing, and flags.
    pub fn resolve<B, Q>(&mut self, body: &B, query: &Q, displacement: Vec2) -> Vec2
    where
        B: BodyGeometry + ?Sized,
        Q: CollisionQuery + ?Sized,
    {
        let bounds = body.world_bounds().contracted(self.config.skin_width);
        self.origins = RaycastOrigins::from_bounds(&bounds);
        self.refresh_spacing(&bounds);
        self.flags.reset();

        if displacement.x != 0.0 {
            self.face_direction = if displacement.x > 0.0 { 1 } else { -1 };
        }

        let mut resolved = displacement;
        self.horizontal_collisions(query, &mut resolved);

        if resolved.y != 0.0 {
            self.vertical_collisions(body, query, &mut resolved);
        }

        resolved
    }

    fn refresh_spacing(&mut self, bounds: &Aabb) {
        let source = (
            bounds.size(),
            self.config.horizontal_ray_count,
            self.config.vertical_ray_count,
        );
        if self.spacing_source == Some(source) {
            return;
        }
        self.spacing = RaySpacing::compute(bounds, source.1, source.2);
        self.spacing_source = Some(source);
    }

    /// Always runs, even for zero horizontal motion, so walls are still reported while
    /// standing against them.
    fn horizontal_collisions<Q: CollisionQuery + ?Sized>(&mut self, query: &Q, velocity: &mut Vec2) {
        let skin = self.config.skin_width;
        let direction_x = self.face_direction as f32;
        let requested = velocity.x.abs();

        // Probe at least two skins out so a wall is still detected while nearly stationary.
        let mut ray_length = if requested < skin {
            skin * 2.0
        } else {
            requested + skin
        };

        let ray_direction = Vec2::new(direction_x, 0.0);
        for i in 0..self.spacing.horizontal_ray_count {
            let mut ray_origin = if direction_x < 0.0 {
                self.origins.bottom_left
            } else {
                self.origins.bottom_right
            };
            ray_origin.y += self.spacing.horizontal * i as f32;

            if let Some(distance) =
                query.raycast(ray_origin, ray_direction, ray_length, self.config.collision_mask)
            {
                velocity.x = (distance - skin).clamp(0.0, requested) * direction_x;

                // Later rays may only report closer surfaces.
                ray_length = distance;

                self.flags.left = direction_x < 0.0;
                self.flags.right = direction_x > 0.0;
            }
        }
    }

    fn vertical_collisions<B, Q>(&mut self, body: &B, query: &Q, velocity: &mut Vec2)
    where
        B: BodyGeometry + ?Sized,
        Q: CollisionQuery + ?Sized,
    {
        let skin = self.config.skin_width;
        let direction_y = velocity.y.signum();
        let requested = velocity.y.abs();
        let mut ray_length = requested + skin;

        // Collect the nearest hit first; resolve once.
        let mut nearest: Option<f32> = None;
        let ray_direction = Vec2::new(0.0, direction_y);
        for i in 0..self.spacing.vertical_ray_count {
            let mut ray_origin = if direction_y < 0.0 {
                self.origins.bottom_left
            } else {
                self.origins.top_left
            };
            // Test where the body will be after the horizontal move.
            ray_origin.x += self.spacing.vertical * i as f32 + velocity.x;

            if let Some(distance) =
                query.raycast(ray_origin, ray_direction, ray_length, self.config.collision_mask)
            {
                nearest = Some(nearest.map_or(distance, |n: f32| n.min(distance)));
                ray_length = distance;
            }
        }

        let Some(distance) = nearest else {
            return;
        };

        if direction_y > 0.0 && self.correct_upward_corner(body, query, velocity) {
            return;
        }

        velocity.y = (distance - skin).clamp(0.0, requested) * direction_y;
        self.flags.below = direction_y < 0.0;
        self.flags.above = direction_y > 0.0;
    }

    /// Look sideways for a gap above the body. On success the horizontal displacement is moved
    /// onto the gap and `true` is returned, which skips the vertical clamp for this move.
    ///
    /// The gap position snaps back toward the body onto the sweep grid, unless the snapped slot
    /// is blocked.
    fn correct_upward_corner<B, Q>(&self, body: &B, query: &Q, velocity: &mut Vec2) -> bool
    where
        B: BodyGeometry + ?Sized,
        Q: CollisionQuery + ?Sized,
    {
        let sweep_count = self.config.corner_sweep_count();
        if sweep_count == 0 {
            return false;
        }

        let step = self.config.corner_sweep_step;
        let cells_per_unit = 1.0 / step;
        let position = body.position();
        let probe_size = body.local_scale() * self.config.corner_probe_scale;
        let up = Vec2::new(0.0, 1.0);
        // The probe must reach at least as high as the move that hit the ceiling.
        let cast_length = self.config.corner_probe_cast_length.max(velocity.y);

        let is_free = |x: f32| {
            !query.box_cast(
                Vec2::new(x, position.y),
                probe_size,
                up,
                cast_length,
                self.config.collision_mask,
            )
        };

        // Moving left or stationary.
        if velocity.x <= 0.0 {
            for i in 1..=sweep_count {
                let x = position.x + velocity.x - step * i as f32;
                if is_free(x) {
                    let snapped = (x * cells_per_unit).ceil() / cells_per_unit;
                    let target = if is_free(snapped) { snapped } else { x };
                    velocity.x = target - position.x;
                    log::debug!("upward corner correction: slipped left to x={target:.3}");
                    return true;
                }
            }
        }

        // Moving right or stationary.
        if velocity.x >= 0.0 {
            for i in 1..=sweep_count {
                let x = position.x + velocity.x + step * i as f32;
                if is_free(x) {
                    let snapped = (x * cells_per_unit).floor() / cells_per_unit;
                    let target = if is_free(snapped) { snapped } else { x };
                    velocity.x = target - position.x;
                    log::debug!("upward corner correction: slipped right to x={target:.3}");
                    return true;
                }
            }
        }

        false
    }
}
