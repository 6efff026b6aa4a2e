use glam::Vec2;

/// Tolerance for float comparisons and near-tie detection between contact depths.
pub const EPSILON: f32 = 1e-4;

/// Points this close to a ring's boundary count as inside it when clipping edges.
const BOUNDARY_TOLERANCE: f32 = 1e-3;

/// `true` when `a` lies strictly inside `(b - error, b + error)`.
#[inline]
pub fn is_equal(a: f32, b: f32, error: f32) -> bool {
    a > b - error && a < b + error
}

/// Even-odd ray cast of `point` against an ordered vertex ring.
///
/// Points exactly on the boundary may land on either side.
pub fn point_in_polygon(point: Vec2, ring: &[Vec2]) -> bool {
    let mut inside = false;
    if ring.is_empty() {
        return inside;
    }
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let x_at = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_at {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// A directed polygon edge in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Vec2,
    pub end: Vec2,
}

impl Edge {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Edge `index` of a ring, wrapping back to vertex 0 after the last one.
    pub fn of_ring(ring: &[Vec2], index: usize) -> Self {
        Self::new(ring[index], ring[(index + 1) % ring.len()])
    }

    fn distance_to(&self, p: Vec2) -> f32 {
        let seg = self.end - self.start;
        let len_sq = seg.length_squared();
        if len_sq == 0.0 {
            return (p - self.start).length();
        }
        let t = ((p - self.start).dot(seg) / len_sq).clamp(0.0, 1.0);
        (p - (self.start + seg * t)).length()
    }
}

fn inside_or_touching(point: Vec2, ring: &[Vec2]) -> bool {
    point_in_polygon(point, ring)
        || (0..ring.len()).any(|i| Edge::of_ring(ring, i).distance_to(point) <= BOUNDARY_TOLERANCE)
}

/// Clip two candidate contact edges against polygon rings.
///
/// The endpoints of `edge_a` are kept when they lie inside (or on the
/// boundary of) `ring_a`, and likewise `edge_b` against `ring_b`; each ring
/// is the polygon opposite the edge. Survivors come back in order (edge A
/// start, end, then edge B start, end) with near-duplicates dropped.
pub fn clip_edges(edge_a: Edge, edge_b: Edge, ring_a: &[Vec2], ring_b: &[Vec2]) -> Vec<Vec2> {
    let candidates = [
        (edge_a.start, ring_a),
        (edge_a.end, ring_a),
        (edge_b.start, ring_b),
        (edge_b.end, ring_b),
    ];

    let mut kept: Vec<Vec2> = Vec::with_capacity(4);
    for (point, ring) in candidates {
        if !inside_or_touching(point, ring) {
            continue;
        }
        let duplicate = kept.iter().any(|k| {
            is_equal(k.x, point.x, BOUNDARY_TOLERANCE) && is_equal(k.y, point.y, BOUNDARY_TOLERANCE)
        });
        if !duplicate {
            kept.push(point);
        }
    }
    kept
}
