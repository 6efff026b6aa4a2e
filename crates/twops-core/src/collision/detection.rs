//! Separating-axis contact generation for circle and convex-polygon pairs.
//!
//! Every routine measures penetration with support points: for a candidate
//! axis it asks the other shape for its deepest point behind a reference
//! edge. A shape with no point behind the edge proves a separating axis and
//! the pair is reported as not colliding. Among the remaining axes the one of
//! least penetration gives the contact normal.

use glam::Vec2;

use super::manifold::{orient_normal, ContactManifold};
use crate::body::{RigidBody, ShapeKind, SupportPoint};
use crate::math::{clip_edges, is_equal, Edge, Vec2Ext, EPSILON};

/// Detect contact between two bodies.
///
/// Returns `None` when the pair does not collide. The manifold normal points
/// from `b` toward `a`; resolving along it pushes the bodies apart.
pub fn detect(a: &RigidBody, b: &RigidBody) -> Option<ContactManifold> {
    match (a.kind(), b.kind()) {
        (ShapeKind::Circle, ShapeKind::Circle) => circle_vs_circle(a, b),
        (ShapeKind::Polygon, ShapeKind::Circle) => polygon_vs_circle(a, b),
        (ShapeKind::Circle, ShapeKind::Polygon) => {
            polygon_vs_circle(b, a).map(ContactManifold::flipped)
        }
        (ShapeKind::Polygon, ShapeKind::Polygon) => polygon_vs_polygon(a, b),
    }
}

fn circle_vs_circle(a: &RigidBody, b: &RigidBody) -> Option<ContactManifold> {
    let (ra, rb) = (a.radius()?, b.radius()?);
    let r_sum = ra + rb;
    let a_to_b = b.center() - a.center();
    if a_to_b.length_squared() >= r_sum * r_sum {
        return None;
    }

    let depth = r_sum - a_to_b.length();
    let toward_b = a_to_b.unit();
    let point = a.center() + toward_b * ra;
    let normal = orient_normal(toward_b, a.center(), b.center());
    Some(ContactManifold::single(point, normal, depth))
}

/// Vertex with the largest projection onto `n`.
fn extreme_vertex(vertices: &[Vec2], n: Vec2) -> Option<Vec2> {
    let mut best: Option<(Vec2, f32)> = None;
    for &v in vertices {
        let proj = v.dot(n);
        if best.map_or(true, |(_, p)| proj > p) {
            best = Some((v, proj));
        }
    }
    best.map(|(v, _)| v)
}

fn polygon_vs_circle(polygon: &RigidBody, circle: &RigidBody) -> Option<ContactManifold> {
    let vertices = polygon.vertices();
    let circle_center = circle.center();
    let mut best: Option<SupportPoint> = None;
    let mut consider = |sp: SupportPoint| {
        if best.map_or(true, |b| sp.depth < b.depth) {
            best = Some(sp);
        }
    };

    for (i, n) in polygon.face_normals().into_iter().enumerate() {
        consider(circle.find_support_point(-n, vertices[i])?);
    }

    // Face normals miss the corner regions; the axes through the polygon
    // center and through the nearest vertex cover them.
    let extra_axes = [
        (circle_center - polygon.center()).unit(),
        polygon
            .nearest_vertex(circle_center)
            .map_or(Vec2::ZERO, |v| (circle_center - v).unit()),
    ];
    for axis in extra_axes {
        if axis == Vec2::ZERO {
            continue;
        }
        let Some(edge_point) = extreme_vertex(vertices, axis) else {
            continue;
        };
        consider(circle.find_support_point(-axis, edge_point)?);
    }

    let sp = best?;
    Some(
        ContactManifold::single(sp.point, sp.normal, sp.depth)
            .oriented(polygon.center(), circle_center),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    A,
    B,
}

/// A face of one polygon and the other polygon's support point behind it.
#[derive(Debug, Clone, Copy)]
struct FaceContact {
    point: Vec2,
    normal: Vec2,
    depth: f32,
    side: Side,
    edge: usize,
}

/// Run the per-face test of `reference` against `incident`, appending one
/// record per face. `None` as soon as a face separates the pair.
fn collect_face_contacts(
    reference: &RigidBody,
    incident: &RigidBody,
    side: Side,
    out: &mut Vec<FaceContact>,
) -> Option<()> {
    let vertices = reference.vertices();
    for (i, n) in reference.face_normals().into_iter().enumerate() {
        let sp = incident.find_support_point(-n, vertices[i])?;
        out.push(FaceContact { point: sp.point, normal: n, depth: sp.depth, side, edge: i });
    }
    Some(())
}

/// Index of the least-penetration record and of its near-tie, if any.
///
/// Records are scanned in order. A strictly smaller depth becomes the new
/// minimum; a depth within `EPSILON` of the minimum (but not below it) is
/// remembered as the tie, first one found.
fn least_penetration(records: &[FaceContact]) -> Option<(usize, Option<usize>)> {
    if records.is_empty() {
        return None;
    }
    let mut primary = 0;
    let mut tie: Option<usize> = None;
    for i in 1..records.len() {
        let depth = records[i].depth;
        let min = records[primary].depth;
        if depth < min {
            tie = tie
                .filter(|&t| is_equal(records[t].depth, depth, EPSILON))
                .or_else(|| is_equal(min, depth, EPSILON).then_some(primary));
            primary = i;
        } else if tie.is_none() && is_equal(depth, min, EPSILON) {
            tie = Some(i);
        }
    }
    Some((primary, tie))
}

fn polygon_vs_polygon(a: &RigidBody, b: &RigidBody) -> Option<ContactManifold> {
    let mut records = Vec::with_capacity(a.vertices().len() + b.vertices().len());
    collect_face_contacts(a, b, Side::A, &mut records)?;
    collect_face_contacts(b, a, Side::B, &mut records)?;

    let (primary_idx, tie_idx) = least_penetration(&records)?;
    let primary = records[primary_idx];
    let normal = orient_normal(primary.normal, a.center(), b.center());

    if let Some(tie) = tie_idx.map(|t| records[t]) {
        // Face-to-face: clip both faces against the opposite polygons.
        let (edge_p, ring_p) = face_and_opposite(a, b, primary);
        let (edge_t, ring_t) = face_and_opposite(a, b, tie);
        let clipped = clip_edges(edge_p, edge_t, ring_p, ring_t);
        if clipped.len() >= 2 {
            return Some(ContactManifold::pair(clipped[0], clipped[1], normal, primary.depth));
        }
    }

    Some(ContactManifold::single(primary.point, normal, primary.depth))
}

/// The face a record was measured against, and the ring it is clipped by.
fn face_and_opposite<'a>(a: &'a RigidBody, b: &'a RigidBody, record: FaceContact) -> (Edge, &'a [Vec2]) {
    match record.side {
        Side::A => (Edge::of_ring(a.vertices(), record.edge), b.vertices()),
        Side::B => (Edge::of_ring(b.vertices(), record.edge), a.vertices()),
    }
}
