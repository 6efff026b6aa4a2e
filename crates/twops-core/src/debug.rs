//! Debug geometry: body outlines and contact overlays as plain polylines.
//!
//! Nothing here draws. Callers hand the lines (or the flat vertex buffer from
//! [`flatten_lines`]) to whatever renderer they have.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::body::{RigidBody, Shape};
use crate::collision::ContactManifold;
use crate::core::world::PhysicsWorld;

const CIRCLE_SEGMENTS: usize = 24;
/// Half the arm length of the cross drawn at a contact point.
const CROSS_HALF: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugColor {
    Outline,
    StaticOutline,
    ContactPoint,
    Normal,
}

impl DebugColor {
    /// Palette index written into [`DebugVertex::color`].
    pub fn code(self) -> f32 {
        match self {
            DebugColor::Outline => 0.0,
            DebugColor::StaticOutline => 1.0,
            DebugColor::ContactPoint => 2.0,
            DebugColor::Normal => 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebugLine {
    pub points: Vec<[f32; 2]>,
    pub color: DebugColor,
}

/// One polyline vertex. 4 floats = 16 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DebugVertex {
    pub x: f32,
    pub y: f32,
    /// [`DebugColor::code`] of the owning line.
    pub color: f32,
    /// Index of the owning line, so a renderer can break strips.
    pub line: f32,
}

impl DebugVertex {
    pub const FLOATS: usize = 4;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Closed outline of a body in world space.
///
/// Circles get a 24-segment ring followed by a spoke from the rim back to the
/// center at the body's angle, so rotation is visible.
pub fn body_outline(body: &RigidBody) -> Vec<[f32; 2]> {
    match body.shape() {
        Shape::Circle { radius } => {
            let c = body.center();
            let rot = body.angle();
            let mut points = Vec::with_capacity(CIRCLE_SEGMENTS + 2);
            for i in 0..=CIRCLE_SEGMENTS {
                let angle = rot + (i as f32 / CIRCLE_SEGMENTS as f32) * std::f32::consts::TAU;
                points.push([c.x + angle.cos() * radius, c.y + angle.sin() * radius]);
            }
            points.push([c.x, c.y]);
            points
        }
        Shape::Polygon { vertices } => {
            let mut points: Vec<[f32; 2]> = vertices.iter().map(|v| v.to_array()).collect();
            if let Some(&first) = points.first() {
                points.push(first);
            }
            points
        }
    }
}

/// A cross per contact point and the normal drawn from the first point,
/// `depth` long.
pub fn manifold_overlay(manifold: &ContactManifold) -> Vec<DebugLine> {
    let mut lines = Vec::with_capacity(manifold.len() * 2 + 1);
    for &p in manifold.points() {
        lines.push(segment(p - Vec2::X * CROSS_HALF, p + Vec2::X * CROSS_HALF, DebugColor::ContactPoint));
        lines.push(segment(p - Vec2::Y * CROSS_HALF, p + Vec2::Y * CROSS_HALF, DebugColor::ContactPoint));
    }
    if let Some(&start) = manifold.points().first() {
        lines.push(segment(start, start + manifold.normal * manifold.depth, DebugColor::Normal));
    }
    lines
}

/// Outlines for every body plus overlays for the contacts of the last step.
pub fn debug_draw_world(world: &PhysicsWorld) -> Vec<DebugLine> {
    let mut lines: Vec<DebugLine> = world
        .bodies()
        .iter()
        .map(|body| DebugLine {
            points: body_outline(body),
            color: if body.is_static() {
                DebugColor::StaticOutline
            } else {
                DebugColor::Outline
            },
        })
        .collect();
    for pair in world.contacts() {
        lines.extend(manifold_overlay(&pair.manifold));
    }
    lines
}

pub fn flatten_lines(lines: &[DebugLine]) -> Vec<DebugVertex> {
    let total = lines.iter().map(|l| l.points.len()).sum();
    let mut vertices = Vec::with_capacity(total);
    for (index, line) in lines.iter().enumerate() {
        let color = line.color.code();
        vertices.extend(line.points.iter().map(|&[x, y]| DebugVertex {
            x,
            y,
            color,
            line: index as f32,
        }));
    }
    vertices
}

/// View a vertex slice as the flat float buffer a renderer uploads.
pub fn as_floats(vertices: &[DebugVertex]) -> &[f32] {
    bytemuck::cast_slice(vertices)
}

fn segment(from: Vec2, to: Vec2, color: DebugColor) -> DebugLine {
    DebugLine {
        points: vec![from.to_array(), to.to_array()],
        color,
    }
}
