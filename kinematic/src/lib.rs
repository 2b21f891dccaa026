//! Raycast kinematic controller for a 2D platformer body.
//!
//! The body is an axis-aligned box moved through a static collision layer. Each frame the
//! [`MotionState`] turns input into a displacement, and the [`CollisionResolver`] clamps that
//! displacement with fans of rays cast from the body's skin-contracted bounds.
//! [`PlatformerController`] wires the two together.

pub mod bitmask_flags;
pub mod collision;
pub mod config;
pub mod constants;
pub mod controller;
pub mod geometry;
pub mod motion;
pub mod raycast;

pub use collision::{
    CollisionFlags, CollisionLayer, CollisionQuery, CollisionResolver, LayerMask, ResolverConfig,
    StaticCollider, StaticWorld, solid_mask,
};
pub use config::{ConfigError, ControllerConfig};
pub use controller::{PlatformerController, StepReport};
pub use geometry::{Aabb, BodyGeometry, BoxBody, Vec2};
pub use motion::{
    JumpButton, JumpEdges, JumpKind, JumpPhysics, MotionInput, MotionState, MotionStep,
    MovementConfig, WallJumpVelocity, approach,
};
pub use raycast::{RaySpacing, RaycastOrigins};
