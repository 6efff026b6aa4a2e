//! Pure 2D math shared by the body model and the collision pipeline.

pub mod scalar;
pub mod vector;

pub use scalar::{clip_edges, is_equal, point_in_polygon, Edge, EPSILON};
pub use vector::Vec2Ext;
