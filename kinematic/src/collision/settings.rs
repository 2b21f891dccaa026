/*!
Collision resolver settings and tolerances.

These constants are the defaults behind [`ResolverConfig`](super::ResolverConfig). Keeping them
together makes tuning easier; per-body overrides go through the config struct.

Notes
- Distances are in world units, time in seconds.
*/

/// Inward margin subtracted from every side of the body's bounds before casting rays.
/// Keeps ray origins off the body's own surface and away from edge-touch misses.
pub const SKIN_WIDTH: f32 = 0.015;

/// Rays per side along each axis. Counts below [`MIN_RAY_COUNT`] are raised to it.
pub const DEFAULT_HORIZONTAL_RAY_COUNT: usize = 4;
pub const DEFAULT_VERTICAL_RAY_COUNT: usize = 4;

/// A fan needs both edge rays, and `spacing = size / (count - 1)` needs a non-zero divisor.
pub const MIN_RAY_COUNT: usize = 2;

/// Sideways distance (world units) the upward corner correction may search for a gap.
pub const DEFAULT_UPWARD_CORNER_CORRECTION: f32 = 0.4;

/// Distance between successive corner-correction probes. Also the grid the corrected
/// horizontal position snaps to.
pub const CORNER_SWEEP_STEP: f32 = 0.1;

/// Corner-correction probe box size relative to the body's scale.
/// Slightly under 1 so walls flush against the body do not register.
pub const CORNER_PROBE_SCALE: f32 = 0.99;

/// How far each corner-correction probe is cast upward.
pub const CORNER_PROBE_CAST_LENGTH: f32 = 0.5;

/// Slack used when counting sweep probes so that e.g. `0.4 / 0.1` yields 3 probes, not 4.
pub const SWEEP_COUNT_EPS: f32 = 1.0e-4;

/// Practical small distance for comparisons (world units).
pub const DIST_EPS: f32 = 1.0e-6;
