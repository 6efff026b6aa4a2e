use glam::Vec2;

use crate::math::Vec2Ext;

/// Tag used by the narrow phase to pick a pair routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Polygon,
}

/// Collision geometry of a body.
///
/// Polygon vertices are world-space, convex and consistently wound; that is
/// a precondition of every constructor, not something checked at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Polygon { vertices: Vec<Vec2> },
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Polygon { .. } => ShapeKind::Polygon,
        }
    }

    /// Vertices of a regular polygon of circumradius `size`, starting at angle 0.
    pub(crate) fn regular_vertices(center: Vec2, vertex_count: usize, size: f32) -> Vec<Vec2> {
        let step = std::f32::consts::TAU / vertex_count as f32;
        (0..vertex_count)
            .map(|i| {
                let (sin, cos) = (i as f32 * step).sin_cos();
                Vec2::new(center.x + size * cos, center.y + size * sin)
            })
            .collect()
    }

    /// Rectangle corners in the same winding as `regular_vertices`.
    pub(crate) fn rectangle_vertices(center: Vec2, width: f32, height: f32) -> Vec<Vec2> {
        let (hw, hh) = (width / 2.0, height / 2.0);
        vec![
            Vec2::new(center.x - hw, center.y - hh),
            Vec2::new(center.x + hw, center.y - hh),
            Vec2::new(center.x + hw, center.y + hh),
            Vec2::new(center.x - hw, center.y + hh),
        ]
    }

    /// Moment of inertia about `center` for a body of the given mass.
    pub(crate) fn inertia(&self, mass: f32, center: Vec2) -> f32 {
        match self {
            Shape::Circle { radius } => 0.5 * mass * radius * radius,
            Shape::Polygon { vertices } => polygon_inertia(mass, center, vertices),
        }
    }

    /// Radius of the smallest center-anchored circle enclosing the shape.
    pub(crate) fn bounding_radius(&self, center: Vec2) -> f32 {
        match self {
            Shape::Circle { radius } => *radius,
            Shape::Polygon { vertices } => vertices
                .iter()
                .map(|v| (*v - center).length())
                .fold(0.0, f32::max),
        }
    }
}

/// Area centroid of a ring; falls back to the vertex average for degenerate rings.
pub(crate) fn centroid(vertices: &[Vec2]) -> Vec2 {
    if vertices.is_empty() {
        return Vec2::ZERO;
    }
    let mut area = 0.0;
    let mut weighted = Vec2::ZERO;
    for i in 0..vertices.len() {
        let (a, b) = (vertices[i], vertices[(i + 1) % vertices.len()]);
        let cross = a.cross(b);
        area += cross;
        weighted += (a + b) * cross;
    }
    if area.abs() < f32::EPSILON {
        vertices.iter().copied().sum::<Vec2>() / vertices.len() as f32
    } else {
        weighted / (3.0 * area)
    }
}

/// Triangle-fan inertia of a uniform-density polygon about `center`.
fn polygon_inertia(mass: f32, center: Vec2, vertices: &[Vec2]) -> f32 {
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for i in 0..vertices.len() {
        let p = vertices[i] - center;
        let q = vertices[(i + 1) % vertices.len()] - center;
        let cross = p.cross(q).abs();
        numerator += cross * (p.dot(p) + p.dot(q) + q.dot(q));
        denominator += cross;
    }
    if denominator == 0.0 {
        return 0.0;
    }
    mass * numerator / (6.0 * denominator)
}
