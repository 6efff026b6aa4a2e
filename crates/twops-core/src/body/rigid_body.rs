use glam::Vec2;

use super::shape::{centroid, Shape, ShapeKind};
use crate::core::config::{Integrator, DEFAULT_DAMPING};
use crate::math::Vec2Ext;

/// Restitution given to new bodies.
const DEFAULT_BOUNCE: f32 = 0.3;
/// Friction coefficient given to new bodies.
const DEFAULT_FRICTION: f32 = 0.5;

/// Deepest point of a shape behind a reference edge, as found by
/// [`RigidBody::find_support_point`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportPoint {
    /// World-space candidate point with the largest projection.
    pub point: Vec2,
    /// Projection of `point - edge_point` onto `normal`; always positive.
    pub depth: f32,
    /// The direction that was searched.
    pub normal: Vec2,
}

/// A simulated body: a circle or convex polygon with linear and angular state.
///
/// Mass and inertia of 0 encode an immovable, non-rotatable body. Inverse
/// terms are derived on demand and never stored, so they cannot fall out of
/// sync with `mass`/`inertia`.
///
/// State is only changed through forces, integration, rigid transforms and
/// the contact resolver; callers get read access for display.
#[derive(Debug, Clone)]
pub struct RigidBody {
    center: Vec2,
    shape: Shape,
    velocity: Vec2,
    angular_velocity: f32,
    /// Accumulated rotation in radians.
    angle: f32,
    mass: f32,
    inertia: f32,
    /// Set once `with_inertia` pins the value; `with_mass` then leaves it alone.
    inertia_pinned: bool,
    bounce: f32,
    friction: f32,
    force: Vec2,
    torque: f32,
}

impl RigidBody {
    fn from_shape(center: Vec2, shape: Shape) -> Self {
        let mass = 1.0;
        let inertia = shape.inertia(mass, center);
        Self {
            center,
            shape,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            angle: 0.0,
            mass,
            inertia,
            inertia_pinned: false,
            bounce: DEFAULT_BOUNCE,
            friction: DEFAULT_FRICTION,
            force: Vec2::ZERO,
            torque: 0.0,
        }
    }

    /// Circle of the given radius, mass 1.
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Self::from_shape(center, Shape::Circle { radius })
    }

    /// Regular convex polygon with `vertex_count` corners on a circle of radius `size`.
    pub fn polygon(center: Vec2, vertex_count: usize, size: f32) -> Self {
        Self::from_shape(
            center,
            Shape::Polygon { vertices: Shape::regular_vertices(center, vertex_count, size) },
        )
    }

    /// Axis-aligned rectangle; a 4-vertex polygon.
    pub fn rectangle(center: Vec2, width: f32, height: f32) -> Self {
        Self::from_shape(
            center,
            Shape::Polygon { vertices: Shape::rectangle_vertices(center, width, height) },
        )
    }

    /// Convex polygon from world-space vertices; the center is their area centroid.
    pub fn convex(vertices: Vec<Vec2>) -> Self {
        let center = centroid(&vertices);
        Self::from_shape(center, Shape::Polygon { vertices })
    }

    // -- builder-style configuration --

    /// Set the mass. Inertia follows from the shape unless pinned with `with_inertia`.
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass.max(0.0);
        if !self.inertia_pinned {
            self.inertia = self.shape.inertia(self.mass, self.center);
        }
        self
    }

    /// Override the moment of inertia. 0 makes the body non-rotatable.
    pub fn with_inertia(mut self, inertia: f32) -> Self {
        self.inertia = inertia.max(0.0);
        self.inertia_pinned = true;
        self
    }

    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction.max(0.0);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Make the body immovable: mass and inertia 0, at rest.
    pub fn into_static(mut self) -> Self {
        self.mass = 0.0;
        self.inertia = 0.0;
        self.inertia_pinned = true;
        self.velocity = Vec2::ZERO;
        self.angular_velocity = 0.0;
        self
    }

    // -- read access --

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Polygon vertices in world space; empty for circles.
    pub fn vertices(&self) -> &[Vec2] {
        match &self.shape {
            Shape::Polygon { vertices } => vertices,
            Shape::Circle { .. } => &[],
        }
    }

    /// Circle radius; `None` for polygons.
    pub fn radius(&self) -> Option<f32> {
        match self.shape {
            Shape::Circle { radius } => Some(radius),
            Shape::Polygon { .. } => None,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn inertia(&self) -> f32 {
        self.inertia
    }

    pub fn inverse_mass(&self) -> f32 {
        if self.mass == 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// 0 for static bodies, whatever inertia was pinned.
    pub fn inverse_inertia(&self) -> f32 {
        if self.is_static() || self.inertia == 0.0 {
            0.0
        } else {
            1.0 / self.inertia
        }
    }

    pub fn bounce(&self) -> f32 {
        self.bounce
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// A body is static exactly when its mass is 0.
    pub fn is_static(&self) -> bool {
        self.mass == 0.0
    }

    /// Force accumulated since the last integration.
    pub fn force(&self) -> Vec2 {
        self.force
    }

    /// Torque accumulated since the last integration.
    pub fn torque(&self) -> f32 {
        self.torque
    }

    pub fn bounding_radius(&self) -> f32 {
        self.shape.bounding_radius(self.center)
    }

    /// `true` when position, velocity and rotation are all finite.
    pub fn is_finite(&self) -> bool {
        self.center.is_finite()
            && self.velocity.is_finite()
            && self.angular_velocity.is_finite()
            && self.vertices().iter().all(|v| v.is_finite())
    }

    // -- forces and integration --

    /// Accumulate a force. Applied at `point` it also accumulates the torque
    /// `(point - center) x force`. Velocity is untouched until `integrate`.
    pub fn add_force(&mut self, force: Vec2, point: Option<Vec2>) {
        self.force += force;
        if let Some(p) = point {
            self.torque += (p - self.center).cross(force);
        }
    }

    /// Advance one step with semi-implicit Euler and the default damping.
    pub fn integrate(&mut self, dt: f32) {
        self.integrate_with(dt, Integrator::SemiImplicitEuler, DEFAULT_DAMPING);
    }

    /// Advance one step, then scale both velocities by `damping` and clear
    /// the force and torque accumulators.
    ///
    /// `Integrator::Blended` weights four velocity stages 1/6, 2/6, 2/6, 1/6
    /// when moving the body. Acceleration is taken from the accumulators once
    /// and reused for every stage, so the velocity update equals Euler's and
    /// only the displacement is smoothed.
    pub fn integrate_with(&mut self, dt: f32, integrator: Integrator, damping: f32) {
        let accel = self.force * self.inverse_mass();
        let angular_accel = self.torque * self.inverse_inertia();

        let (displacement, rotation) = match integrator {
            Integrator::SemiImplicitEuler => {
                self.velocity += accel * dt;
                self.angular_velocity += angular_accel * dt;
                (self.velocity * dt, self.angular_velocity * dt)
            }
            Integrator::Blended => {
                let v = blend_stages(self.velocity, accel, dt);
                let w = blend_stages(self.angular_velocity, angular_accel, dt);
                self.velocity += accel * dt;
                self.angular_velocity += angular_accel * dt;
                (v * dt, w * dt)
            }
        };

        self.translate(displacement);
        self.rotate(rotation);

        self.velocity *= damping;
        self.angular_velocity *= damping;
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }

    // -- rigid transforms --

    pub fn translate(&mut self, offset: Vec2) {
        self.center += offset;
        if let Shape::Polygon { vertices } = &mut self.shape {
            for v in vertices.iter_mut() {
                *v += offset;
            }
        }
    }

    /// Rotate about the body's own center.
    pub fn rotate(&mut self, angle: f32) {
        self.rotate_about(angle, self.center);
    }

    /// Rotate center and vertices together about `pivot`.
    pub fn rotate_about(&mut self, angle: f32, pivot: Vec2) {
        if angle == 0.0 {
            return;
        }
        self.angle += angle;
        self.center = self.center.rotate_about(angle, pivot);
        if let Shape::Polygon { vertices } = &mut self.shape {
            for v in vertices.iter_mut() {
                *v = v.rotate_about(angle, pivot);
            }
        }
    }

    // -- geometric queries --

    /// Outward unit normal of every polygon edge `i -> i + 1`. Empty for circles.
    pub fn face_normals(&self) -> Vec<Vec2> {
        let verts = self.vertices();
        (0..verts.len())
            .map(|i| (verts[(i + 1) % verts.len()] - verts[i]).right_perp().unit())
            .collect()
    }

    /// Point with the largest positive projection of `point - edge_point` onto `n`.
    ///
    /// Polygons search their vertices, circles the two points `center ± radius * n`.
    /// `None` means nothing lies past the edge along `n`: a separating axis.
    pub fn find_support_point(&self, n: Vec2, edge_point: Vec2) -> Option<SupportPoint> {
        match self.shape {
            Shape::Circle { radius } => {
                let candidates = [self.center + n * radius, self.center - n * radius];
                support_among(&candidates, n, edge_point)
            }
            Shape::Polygon { ref vertices } => support_among(vertices, n, edge_point),
        }
    }

    /// Polygon vertex closest to `point`; `None` for circles.
    pub fn nearest_vertex(&self, point: Vec2) -> Option<Vec2> {
        let mut best: Option<(Vec2, f32)> = None;
        for &v in self.vertices() {
            let dist = (v - point).length_squared();
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((v, dist));
            }
        }
        best.map(|(v, _)| v)
    }

    // -- resolver access --

    /// Apply an impulse at offset `r` from the center.
    pub(crate) fn apply_impulse(&mut self, impulse: Vec2, r: Vec2) {
        if self.is_static() {
            return;
        }
        self.velocity += impulse * self.inverse_mass();
        self.angular_velocity += r.cross(impulse) * self.inverse_inertia();
    }

    /// Apply an impulse through the center of mass (no rotation).
    pub(crate) fn apply_linear_impulse(&mut self, impulse: Vec2) {
        if self.is_static() {
            return;
        }
        self.velocity += impulse * self.inverse_mass();
    }

    /// Velocity of the material point at offset `r` from the center.
    pub(crate) fn point_velocity(&self, r: Vec2) -> Vec2 {
        self.velocity + Vec2::new(-self.angular_velocity * r.y, self.angular_velocity * r.x)
    }
}

/// Weighted blend (1, 2, 2, 1) / 6 of the four stage values of a quantity
/// under constant acceleration.
fn blend_stages<T>(start: T, accel: T, dt: f32) -> T
where
    T: Copy + std::ops::Add<Output = T> + std::ops::Mul<f32, Output = T>,
{
    let k1 = start;
    let k2 = start + accel * (dt * 0.5);
    let k3 = start + accel * (dt * 0.5);
    let k4 = start + accel * dt;
    (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (1.0 / 6.0)
}

fn support_among(points: &[Vec2], n: Vec2, edge_point: Vec2) -> Option<SupportPoint> {
    let mut best: Option<SupportPoint> = None;
    for &p in points {
        let proj = n.dot(p - edge_point);
        if proj > 0.0 && best.map_or(true, |b| proj > b.depth) {
            best = Some(SupportPoint { point: p, depth: proj, normal: n });
        }
    }
    best
}
