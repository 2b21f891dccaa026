use serde::{Deserialize, Serialize};

use crate::collision::CollisionFlags;
use crate::constants::{
    ACCEL_AIRBORNE, ACCEL_GROUNDED, DECEL_AIRBORNE, DECEL_GROUNDED, HALF_GRAVITY_THRESHOLD,
    JUMP_BUFFER_TIME, JUMP_GRACE_TIME, MAX_JUMP_HEIGHT, MIN_JUMP_HEIGHT, MOVE_SPEED,
    TERMINAL_VELOCITY, TIME_TO_JUMP_APEX, WALL_JUMP_AWAY, WALL_JUMP_NEUTRAL, WALL_JUMP_TOWARD,
    WALL_SLIDE_MAX_SPEED, WALL_STICK_TIME,
};
use crate::geometry::Vec2;

/// Wall-jump launch velocity. `x` is the speed away from the wall, `y` the upward speed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallJumpVelocity {
    pub x: f32,
    pub y: f32,
}

impl WallJumpVelocity {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    const fn from_pair((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Movement tuning for the player body. See [`crate::constants`] for the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub move_speed: f32,
    pub accel_grounded: f32,
    pub decel_grounded: f32,
    pub accel_airborne: f32,
    pub decel_airborne: f32,

    pub max_jump_height: f32,
    pub min_jump_height: f32,
    pub time_to_jump_apex: f32,
    pub jump_grace_time: f32,
    pub jump_buffer_time: f32,
    pub half_gravity_threshold: f32,

    pub wall_jump_toward: WallJumpVelocity,
    pub wall_jump_neutral: WallJumpVelocity,
    pub wall_jump_away: WallJumpVelocity,
    pub wall_stick_time: f32,
    pub wall_slide_max_speed: f32,

    pub terminal_velocity: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            accel_grounded: ACCEL_GROUNDED,
            decel_grounded: DECEL_GROUNDED,
            accel_airborne: ACCEL_AIRBORNE,
            decel_airborne: DECEL_AIRBORNE,
            max_jump_height: MAX_JUMP_HEIGHT,
            min_jump_height: MIN_JUMP_HEIGHT,
            time_to_jump_apex: TIME_TO_JUMP_APEX,
            jump_grace_time: JUMP_GRACE_TIME,
            jump_buffer_time: JUMP_BUFFER_TIME,
            half_gravity_threshold: HALF_GRAVITY_THRESHOLD,
            wall_jump_toward: WallJumpVelocity::from_pair(WALL_JUMP_TOWARD),
            wall_jump_neutral: WallJumpVelocity::from_pair(WALL_JUMP_NEUTRAL),
            wall_jump_away: WallJumpVelocity::from_pair(WALL_JUMP_AWAY),
            wall_stick_time: WALL_STICK_TIME,
            wall_slide_max_speed: WALL_SLIDE_MAX_SPEED,
            terminal_velocity: TERMINAL_VELOCITY,
        }
    }
}

/// Gravity and jump velocities derived from the jump heights and time to apex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JumpPhysics {
    /// Vertical acceleration (negative).
    pub gravity: f32,
    pub max_jump_velocity: f32,
    pub min_jump_velocity: f32,
}

impl MovementConfig {
    /// Derive gravity and jump velocities. Cheap enough to call every step.
    #[inline]
    pub fn jump_physics(&self) -> JumpPhysics {
        let apex_time = self.time_to_jump_apex;
        let gravity = -(2.0 * self.max_jump_height) / (apex_time * apex_time);
        JumpPhysics {
            gravity,
            max_jump_velocity: gravity.abs() * self.time_to_jump_apex,
            min_jump_velocity: (2.0 * gravity.abs() * self.min_jump_height).sqrt(),
        }
    }
}

/// Edges of the jump button for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JumpEdges {
    /// Pressed this frame.
    pub down: bool,
    /// Held this frame.
    pub held: bool,
    /// Released this frame.
    pub up: bool,
}

/// Turns a per-frame "is the button held" sample into press/release edges.
#[derive(Clone, Copy, Debug, Default)]
pub struct JumpButton {
    was_held: bool,
}

impl JumpButton {
    pub fn sample(&mut self, held: bool) -> JumpEdges {
        let edges = JumpEdges {
            down: held && !self.was_held,
            held,
            up: !held && self.was_held,
        };
        self.was_held = held;
        edges
    }
}

/// Player input for one step. Axes are in `[-1, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionInput {
    pub horizontal: f32,
    pub vertical: f32,
    pub jump_down: bool,
    pub jump_held: bool,
    pub jump_up: bool,
}

impl MotionInput {
    pub fn new(horizontal: f32, vertical: f32, jump: JumpEdges) -> Self {
        Self {
            horizontal,
            vertical,
            jump_down: jump.down,
            jump_held: jump.held,
            jump_up: jump.up,
        }
    }

    /// Axes clamped to `[-1, 1]`; NaN reads as neutral.
    pub fn clamped(self) -> Self {
        let clamp_axis = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) };
        Self {
            horizontal: clamp_axis(self.horizontal),
            vertical: clamp_axis(self.vertical),
            ..self
        }
    }

    /// Digital direction of the horizontal axis: `-1`, `0`, or `1`.
    #[inline]
    pub fn horizontal_direction(&self) -> i8 {
        if self.horizontal > 0.0 {
            1
        } else if self.horizontal < 0.0 {
            -1
        } else {
            0
        }
    }
}

/// Which jump rule fired during a step, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JumpKind {
    #[default]
    None,
    /// Full-height jump from the ground (or within coyote time).
    Ground,
    /// Ground jump at the minimum velocity: the button was tapped and released before landing.
    ShortHop,
    /// Wall jump while pushing toward the wall.
    WallToward,
    /// Wall jump with neutral input.
    WallNeutral,
    /// Wall jump while pushing away from the wall.
    WallAway,
    /// Rising jump cut short by releasing the button.
    Cutoff,
}

impl JumpKind {
    #[inline]
    pub fn is_wall_jump(self) -> bool {
        matches!(self, Self::WallToward | Self::WallNeutral | Self::WallAway)
    }
}

/// Output of a single [`MotionState::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionStep {
    /// Velocity at the end of the step.
    pub velocity: Vec2,
    /// Displacement to submit to the collision resolver.
    pub displacement: Vec2,
    pub jump: JumpKind,
    /// Touching a wall while airborne.
    pub on_wall: bool,
    /// Side of the wall contact: `-1` left, `1` right (also `1` with no wall).
    pub wall_direction_x: i8,
}

/// Velocity and timers of the player body, advanced once per frame.
///
/// Timers count down by the elapsed time and may go negative; anything `<= 0` is expired.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionState {
    pub velocity: Vec2,
    /// Coyote time left.
    pub jump_grace_timer: f32,
    /// Time left on a buffered jump press.
    pub jump_buffer_timer: f32,
    /// Time left on a buffered release that turns the next ground jump into a short hop.
    pub min_jump_buffer_timer: f32,
    /// Time left before outward input peels the body off the wall.
    pub time_to_wall_unstick: f32,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            velocity: Vec2::zeros(),
            jump_grace_timer: 0.0,
            jump_buffer_timer: 0.0,
            min_jump_buffer_timer: 0.0,
            time_to_wall_unstick: 0.0,
        }
    }
}

impl MotionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one step.
    ///
    /// `flags` are the contacts reported by the previous resolver move. The returned
    /// displacement is the trapezoidal integral of the velocity over the step.
    pub fn step(
        &mut self,
        config: &MovementConfig,
        flags: CollisionFlags,
        input: MotionInput,
        dt_seconds: f32,
    ) -> MotionStep {
        let dt = dt_seconds.max(0.0);
        let input = input.clamped();
        let physics = config.jump_physics();

        // 1) Contacts are fully inelastic.
        let wall_direction_x: i8 = if flags.left { -1 } else { 1 };
        let mut on_wall = false;
        if flags.horizontal() {
            self.velocity.x = 0.0;
            on_wall = !flags.below;
        }
        if flags.vertical() {
            self.velocity.y = 0.0;
        }

        // 2) Coyote time.
        if flags.below {
            self.jump_grace_timer = config.jump_grace_time;
        } else {
            self.jump_grace_timer -= dt;
        }

        // 3) Jump buffers.
        if input.jump_down {
            self.jump_buffer_timer = config.jump_buffer_time;
            self.min_jump_buffer_timer = 0.0;
        } else if input.jump_up && self.jump_buffer_timer > 0.0 {
            // Released before the buffered press could fire: the jump will be a short hop.
            self.min_jump_buffer_timer = config.jump_buffer_time;
            self.jump_buffer_timer -= dt;
        } else if !input.jump_up {
            self.jump_buffer_timer -= dt;
            self.min_jump_buffer_timer -= dt;
        }

        // 4) Jump arbitration: wall jump, ground jump, cutoff. At most one fires.
        let mut jump = JumpKind::None;
        if on_wall && self.jump_buffer_timer > 0.0 {
            let input_dir = input.horizontal_direction();
            let (kind, launch) = if input_dir == wall_direction_x {
                (JumpKind::WallToward, config.wall_jump_toward)
            } else if input_dir == 0 {
                (JumpKind::WallNeutral, config.wall_jump_neutral)
            } else {
                (JumpKind::WallAway, config.wall_jump_away)
            };
            self.velocity.x = -(wall_direction_x as f32) * launch.x;
            self.velocity.y = launch.y;
            self.jump_buffer_timer = 0.0;
            jump = kind;
        } else if self.jump_buffer_timer > 0.0 && self.jump_grace_timer > 0.0 {
            if self.min_jump_buffer_timer > 0.0 {
                self.velocity.y = physics.min_jump_velocity;
                jump = JumpKind::ShortHop;
            } else {
                self.velocity.y = physics.max_jump_velocity;
                jump = JumpKind::Ground;
            }
            self.jump_grace_timer = 0.0;
            self.jump_buffer_timer = 0.0;
            self.min_jump_buffer_timer = 0.0;
        } else if input.jump_up && self.velocity.y > physics.min_jump_velocity {
            self.velocity.y = physics.min_jump_velocity;
            jump = JumpKind::Cutoff;
        }

        let old_velocity = self.velocity;

        // 5) Horizontal acceleration toward the input target speed.
        let target_x = input.horizontal * config.move_speed;
        let ramp_time = match (input.horizontal == 0.0, flags.below) {
            (true, true) => config.decel_grounded,
            (true, false) => config.decel_airborne,
            (false, true) => config.accel_grounded,
            (false, false) => config.accel_airborne,
        };
        let accel_x = config.move_speed / ramp_time;
        self.velocity.x = approach(self.velocity.x, target_x, accel_x * dt);

        // 6) Wall stick: hold position until outward input has been held long enough.
        if on_wall {
            let input_dir = input.horizontal_direction();
            let pushing_away = input_dir != 0 && input_dir != wall_direction_x;
            if self.time_to_wall_unstick > 0.0 && pushing_away {
                self.time_to_wall_unstick -= dt;
            } else {
                self.time_to_wall_unstick = config.wall_stick_time;
            }

            if self.time_to_wall_unstick > 0.0 && !jump.is_wall_jump() {
                self.velocity.x = 0.0;
            }
        }

        // 7) Gravity, halved near the apex while jump is held.
        let gravity_scale =
            if self.velocity.y.abs() < config.half_gravity_threshold && input.jump_held {
                0.5
            } else {
                1.0
            };
        self.velocity.y += physics.gravity * gravity_scale * dt;

        // 8) Fall speed caps.
        if on_wall && self.velocity.y < -config.wall_slide_max_speed {
            self.velocity.y = -config.wall_slide_max_speed;
        } else if self.velocity.y < -config.terminal_velocity {
            self.velocity.y = -config.terminal_velocity;
        }

        MotionStep {
            velocity: self.velocity,
            displacement: (old_velocity + self.velocity) * 0.5 * dt,
            jump,
            on_wall,
            wall_direction_x,
        }
    }
}

/// Move `value` toward `target` by at most `max_delta`, never overshooting.
#[inline]
pub fn approach(value: f32, target: f32, max_delta: f32) -> f32 {
    if value > target {
        (value - max_delta).max(target)
    } else {
        (value + max_delta).min(target)
    }
}
