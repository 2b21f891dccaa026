//! Default movement tuning.
//!
//! Units: world units, seconds. Ramp-time constants are the time to go from rest to full speed
//! (or back), so the acceleration rate is `move speed / ramp time`.

/// Horizontal run speed (units per second).
pub const MOVE_SPEED: f32 = 12.0;

/// Ramp times for horizontal acceleration/deceleration while grounded.
pub const ACCEL_GROUNDED: f32 = 0.1;
pub const DECEL_GROUNDED: f32 = 0.1;

/// Ramp times while airborne. Larger than the grounded ones: less air control.
pub const ACCEL_AIRBORNE: f32 = 0.2;
pub const DECEL_AIRBORNE: f32 = 0.2;

/// Apex height of a full jump (units).
pub const MAX_JUMP_HEIGHT: f32 = 4.5;

/// Apex height of a jump cut short by releasing the button (units).
pub const MIN_JUMP_HEIGHT: f32 = 0.5;

/// Time from take-off to the apex of a full jump (seconds).
///
/// Gravity and jump velocities are derived from this and the heights:
/// - `gravity = -2 * MAX_JUMP_HEIGHT / TIME_TO_JUMP_APEX^2`
/// - `max_jump_velocity = |gravity| * TIME_TO_JUMP_APEX`
/// - `min_jump_velocity = sqrt(2 * |gravity| * MIN_JUMP_HEIGHT)`
pub const TIME_TO_JUMP_APEX: f32 = 0.5;

/// Coyote time: how long after leaving the ground a ground jump is still allowed (seconds).
pub const JUMP_GRACE_TIME: f32 = 0.1;

/// How long a jump press is remembered before it can fire (seconds).
pub const JUMP_BUFFER_TIME: f32 = 0.08;

/// Below this vertical speed, holding jump halves gravity for a floatier apex.
pub const HALF_GRAVITY_THRESHOLD: f32 = 1.0;

/// Wall-jump launch velocities `(away from the wall, up)`, picked by horizontal input
/// relative to the wall.
pub const WALL_JUMP_TOWARD: (f32, f32) = (7.5, 16.0);
pub const WALL_JUMP_NEUTRAL: (f32, f32) = (8.5, 7.0);
pub const WALL_JUMP_AWAY: (f32, f32) = (18.0, 17.0);

/// How long outward input must be held before the body peels off a wall (seconds).
pub const WALL_STICK_TIME: f32 = 0.15;

/// Maximum downward speed while sliding down a wall.
pub const WALL_SLIDE_MAX_SPEED: f32 = 10.0;

/// Maximum downward speed in free fall.
pub const TERMINAL_VELOCITY: f32 = 20.0;
