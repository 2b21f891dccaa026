use crate::collision::{CollisionFlags, CollisionQuery, CollisionResolver};
use crate::config::ControllerConfig;
use crate::geometry::{Aabb, BodyGeometry, Vec2};
use crate::motion::{JumpKind, MotionInput, MotionState, MovementConfig};

/// Output of a single [`PlatformerController::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    /// Displacement produced by the motion state, before collision.
    pub requested: Vec2,
    /// Displacement actually applied to the body.
    pub resolved: Vec2,
    /// Velocity at the end of the step.
    pub velocity: Vec2,
    /// Contacts reported by this step's move. The motion state reads them next step.
    pub flags: CollisionFlags,
    pub jump: JumpKind,
}

/// One player body driven by the motion state and the collision resolver.
///
/// Per step:
/// 1. Advance the motion state with the contacts from the previous step.
/// 2. Resolve the resulting displacement against the collision query.
/// 3. Translate the body by the resolved displacement.
pub struct PlatformerController<B: BodyGeometry> {
    body: B,
    config: ControllerConfig,
    motion: MotionState,
    resolver: CollisionResolver,
}

impl<B: BodyGeometry> PlatformerController<B> {
    pub fn new(body: B, config: ControllerConfig) -> Self {
        let resolver = CollisionResolver::new(config.resolver.clone());
        Self {
            body,
            config,
            motion: MotionState::new(),
            resolver,
        }
    }

    pub fn with_defaults(body: B) -> Self {
        Self::new(body, ControllerConfig::default())
    }

    pub fn step<Q>(&mut self, query: &Q, input: MotionInput, dt_seconds: f32) -> StepReport
    where
        Q: CollisionQuery + ?Sized,
    {
        let motion = self.motion.step(
            &self.config.movement,
            self.resolver.flags(),
            input,
            dt_seconds,
        );

        match motion.jump {
            JumpKind::None => {}
            JumpKind::Cutoff => log::trace!("jump cut short at vy={:.2}", motion.velocity.y),
            kind => log::debug!(
                "{kind:?} jump, velocity=({:.2}, {:.2})",
                motion.velocity.x,
                motion.velocity.y
            ),
        }

        let resolved = self
            .resolver
            .move_body(&mut self.body, query, motion.displacement);

        let report = StepReport {
            requested: motion.displacement,
            resolved,
            velocity: motion.velocity,
            flags: self.resolver.flags(),
            jump: motion.jump,
        };
        log::trace!("{report:?}");
        report
    }

    /// Current world bounds of the body, e.g. for camera framing.
    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.body.world_bounds()
    }

    /// Contacts from the last step.
    #[inline]
    pub fn flags(&self) -> CollisionFlags {
        self.resolver.flags()
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.motion.velocity
    }

    #[inline]
    pub fn body(&self) -> &B {
        &self.body
    }

    #[inline]
    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    #[inline]
    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    #[inline]
    pub fn resolver(&self) -> &CollisionResolver {
        &self.resolver
    }

    #[inline]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Replace the movement tuning. Takes effect on the next step.
    pub fn set_movement_config(&mut self, movement: MovementConfig) {
        self.config.movement = movement;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{LayerMask, StaticWorld, block};
    use crate::geometry::BoxBody;

    const EPS: f32 = 1.0e-4;
    const DT: f32 = 1.0 / 60.0;

    fn floor() -> StaticWorld {
        StaticWorld::build(vec![block(
            Vec2::new(-100.0, -1.0),
            Vec2::new(100.0, 0.0),
            LayerMask::all(),
        )])
    }

    #[test]
    fn body_dropped_above_floor_lands_and_stays() {
        let world = floor();
        let body = BoxBody::standing_at(Vec2::new(0.0, 2.0), Vec2::new(1.0, 2.0));
        let mut controller = PlatformerController::with_defaults(body);

        for _ in 0..120 {
            controller.step(&world, MotionInput::default(), DT);
        }

        assert!(controller.flags().below);
        assert!(controller.bounds().min.y.abs() < EPS);
        assert!(controller.velocity().y > -1.0);
    }

    #[test]
    fn flags_reach_motion_one_step_later() {
        let world = floor();
        let body = BoxBody::standing_at(Vec2::new(0.0, 0.0), Vec2::new(1.0, 2.0));
        let mut controller = PlatformerController::with_defaults(body);

        // The first step has no contacts yet, so gravity builds a small downward velocity.
        let first = controller.step(&world, MotionInput::default(), DT);
        assert!(first.flags.below);
        assert!(first.velocity.y < 0.0);
        assert!(first.resolved.y.abs() < EPS);

        // The second step sees `below` and zeroes vertical velocity before gravity.
        let second = controller.step(&world, MotionInput::default(), DT);
        assert!((second.velocity.y - (-36.0 * DT)).abs() < EPS);
    }

    #[test]
    fn grounded_jump_leaves_the_floor() {
        let world = floor();
        let body = BoxBody::standing_at(Vec2::new(0.0, 0.0), Vec2::new(1.0, 2.0));
        let mut controller = PlatformerController::with_defaults(body);
        controller.step(&world, MotionInput::default(), DT);

        let jump = MotionInput {
            jump_down: true,
            jump_held: true,
            ..MotionInput::default()
        };
        let report = controller.step(&world, jump, DT);

        assert_eq!(report.jump, JumpKind::Ground);
        assert!(report.resolved.y > 0.0);
        assert!(!report.flags.below);
        assert!(controller.bounds().min.y > 0.0);
    }
}
