//! Rigid bodies: shape variants, mass properties, integration and support queries.
//!
//! Bodies keep their geometry in world space. Every transform moves the
//! center and all vertices together, so a polygon never drifts out of shape.

mod rigid_body;
mod shape;

pub use rigid_body::{RigidBody, SupportPoint};
pub use shape::{Shape, ShapeKind};
