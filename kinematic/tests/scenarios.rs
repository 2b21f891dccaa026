//! End-to-end scenarios for the platformer controller.
//!
//! Each test drives the full frame loop (motion state, resolver, body) against a static world
//! at a fixed 60 Hz step.

use kinematic::{
    BoxBody, JumpButton, JumpKind, LayerMask, MotionInput, PlatformerController, StaticCollider,
    StaticWorld, Vec2, geometry::Aabb,
};

const DT: f32 = 1.0 / 60.0;
const EPS: f32 = 1.0e-3;

fn block(min: (f32, f32), max: (f32, f32)) -> StaticCollider {
    StaticCollider::from_bounds(
        Aabb::new(Vec2::new(min.0, min.1), Vec2::new(max.0, max.1)),
        LayerMask::all(),
    )
}

fn player_at(x: f32, feet_y: f32) -> PlatformerController<BoxBody> {
    PlatformerController::with_defaults(BoxBody::standing_at(
        Vec2::new(x, feet_y),
        Vec2::new(1.0, 2.0),
    ))
}

fn run(horizontal: f32) -> MotionInput {
    MotionInput {
        horizontal,
        ..MotionInput::default()
    }
}

#[test]
fn running_on_flat_floor_follows_capped_linear_approach() {
    let world = StaticWorld::build(vec![block((-100.0, -1.0), (100.0, 0.0))]);
    let mut player = player_at(0.0, 0.0);

    // Let the resolver report the floor once.
    player.step(&world, MotionInput::default(), DT);
    assert!(player.flags().below);

    let config = player.config().movement.clone();
    let accel_per_step = config.move_speed / config.accel_grounded * DT;

    let mut expected_vx = 0.0_f32;
    for _ in 0..30 {
        let previous_vx = expected_vx;
        expected_vx = (expected_vx + accel_per_step).min(config.move_speed);

        let report = player.step(&world, run(1.0), DT);

        assert!((report.velocity.x - expected_vx).abs() < EPS);
        assert!((report.resolved.x - (previous_vx + expected_vx) * 0.5 * DT).abs() < EPS);
        assert!(report.resolved.y.abs() < EPS);
        assert!(report.flags.below);
        assert_eq!(report.jump, JumpKind::None);
    }

    assert!((player.velocity().x - config.move_speed).abs() < EPS);
    assert!(player.bounds().min.y.abs() < EPS);
}

#[test]
fn scripted_run_through_a_room_never_penetrates() {
    let world = StaticWorld::build(vec![
        block((-12.0, -1.0), (12.0, 0.0)),
        block((-13.0, -1.0), (-12.0, 20.0)),
        block((12.0, -1.0), (13.0, 20.0)),
        block((-12.0, 14.0), (12.0, 15.0)),
        block((-3.0, 3.0), (3.0, 3.5)),
        block((6.0, 0.0), (8.0, 1.0)),
    ]);
    let mut player = player_at(-8.0, 0.0);
    let skin = player.config().resolver.skin_width;

    let mut jump_button = JumpButton::default();
    for frame in 0..1200 {
        let horizontal = match (frame / 150) % 4 {
            0 => 1.0,
            1 => 0.0,
            2 => -1.0,
            _ => 0.5,
        };
        let edges = jump_button.sample(frame % 45 < 20);
        let input = MotionInput::new(horizontal, 0.0, edges);

        player.step(&world, input, DT);

        let bounds = player.bounds();
        let overlaps = world.overlapping(&bounds, LayerMask::all(), skin + EPS);
        assert!(
            overlaps.is_empty(),
            "frame {frame}: body {bounds:?} penetrates colliders {overlaps:?}"
        );
    }
}

#[test]
fn jump_pressed_just_before_landing_fires_on_touchdown() {
    let world = StaticWorld::build(vec![block((-100.0, -1.0), (100.0, 0.0))]);
    let mut player = player_at(0.0, 1.5);

    while player.bounds().min.y > 0.2 {
        let report = player.step(&world, MotionInput::default(), DT);
        assert!(!report.flags.below);
    }

    let press = MotionInput {
        jump_down: true,
        jump_held: true,
        ..MotionInput::default()
    };
    let hold = MotionInput {
        jump_held: true,
        ..MotionInput::default()
    };

    let mut landed = false;
    let mut jumped = false;
    let first = player.step(&world, press, DT);
    assert_eq!(first.jump, JumpKind::None);
    landed |= first.flags.below;

    for _ in 0..6 {
        let report = player.step(&world, hold, DT);
        if report.jump == JumpKind::Ground {
            assert!(landed, "jump fired before touchdown");
            jumped = true;
            break;
        }
        landed |= report.flags.below;
    }

    assert!(jumped);
    assert!(player.velocity().y > 0.0);
}

#[test]
fn wall_slide_caps_fall_speed_and_wall_jump_launches_away() {
    let world = StaticWorld::build(vec![
        block((-50.0, -51.0), (50.0, -50.0)),
        block((2.0, -50.0), (3.0, 50.0)),
    ]);
    let mut player = player_at(1.5, 20.0);
    let slide_cap = player.config().movement.wall_slide_max_speed;

    for _ in 0..90 {
        let report = player.step(&world, run(1.0), DT);
        assert!(report.velocity.y >= -slide_cap - EPS);
        assert!(report.resolved.x.abs() < EPS);
    }
    assert!(player.flags().right);
    assert!(!player.flags().below);
    assert!((player.velocity().y + slide_cap).abs() < EPS);

    let press = MotionInput {
        horizontal: 1.0,
        jump_down: true,
        jump_held: true,
        ..MotionInput::default()
    };
    let report = player.step(&world, press, DT);

    assert_eq!(report.jump, JumpKind::WallToward);
    assert!(report.velocity.x < 0.0);
    assert!(report.velocity.y > 0.0);
    assert!(report.resolved.x < 0.0);
    assert!(!report.flags.right);
}
