/*!
Collision root module.

This module re-exports submodules that implement the raycast box controller
using parry2d for narrow-phase queries and a BVH broad-phase over the static
collision layer. The code is split for clarity:

- types:        shared data types (CollisionFlags, StaticCollider)
- layers:       collision layers and query masks
- settings:     resolver defaults and tolerances
- query:        the collision query capability the resolver is driven through
- broad:        broad-phase helpers (swept AABBs, candidate queries)
- narrow_phase: thin wrappers over parry2d queries (rays, box casts)
- world:        static world implementing the query capability
- resolver:     sweep-and-clamp resolver with upward corner correction
*/

pub mod broad;
pub mod layers;
pub mod narrow_phase;
pub mod query;
pub mod resolver;
pub mod settings;
pub mod types;
pub mod world;

// Re-export commonly used types and functions.
pub use layers::{CollisionLayer, LayerMask, solid_mask};
pub use query::CollisionQuery;
pub use resolver::{CollisionResolver, ResolverConfig};
pub use types::{CollisionFlags, StaticCollider};
pub use world::StaticWorld;

use crate::geometry::{Aabb, Vec2};

/// Convenience: a static collider covering `min..max` on the given layers.
#[inline]
pub fn block(min: Vec2, max: Vec2, layers: LayerMask) -> StaticCollider {
    StaticCollider::from_bounds(Aabb::new(min, max), layers)
}
