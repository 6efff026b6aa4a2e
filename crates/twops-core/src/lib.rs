pub mod body;
pub mod collision;
pub mod core;
pub mod math;
#[cfg(feature = "debug-draw")]
pub mod debug;

// Re-export key types at crate root for convenience
pub use body::{RigidBody, Shape, ShapeKind, SupportPoint};
pub use collision::{
    detect, linear_resolve, positional_correction, resolve, Contact, ContactManifold,
};
pub use crate::core::config::{ConfigError, Integrator, ResolveMode, WorldConfig, DEFAULT_DAMPING};
pub use crate::core::world::{BodyId, PairContact, PhysicsWorld};
pub use math::{clip_edges, is_equal, point_in_polygon, Edge, Vec2Ext, EPSILON};

#[cfg(feature = "debug-draw")]
pub use debug::{
    as_floats, body_outline, debug_draw_world, flatten_lines, manifold_overlay, DebugColor,
    DebugLine, DebugVertex,
};

pub use glam::Vec2;
