//! Narrow-phase contact generation and contact resolution.

pub mod detection;
pub mod manifold;
pub mod resolution;

pub use detection::detect;
pub use manifold::{Contact, ContactManifold};
pub use resolution::{linear_resolve, positional_correction, resolve};
