//! Body storage and the per-step simulation loop.
//!
//! There is no broad phase: `step` tests every pair `(i, j)` with `i < j`.
//! Callers with their own culling use `step_with_pairs`.

use glam::Vec2;

use super::config::{ResolveMode, WorldConfig};
use crate::body::RigidBody;
use crate::collision::{detect, linear_resolve, positional_correction, resolve, ContactManifold};

/// Index of a body in its world. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// A colliding pair found during the last solver pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PairContact {
    pub a: BodyId,
    pub b: BodyId,
    /// Normal points from `b` toward `a`.
    pub manifold: ContactManifold,
}

pub struct PhysicsWorld {
    config: WorldConfig,
    bodies: Vec<RigidBody>,
    contacts: Vec<PairContact>,
}

impl PhysicsWorld {
    /// Invalid fields are logged and replaced by their defaults.
    pub fn new(config: WorldConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("invalid world config ({}), falling back to defaults", err);
                config.sanitized()
            }
        };
        log::debug!(
            "physics world created: gravity={:?} iterations={} mode={:?}",
            config.gravity,
            config.solver_iterations,
            config.resolve_mode
        );
        Self {
            config,
            bodies: Vec::new(),
            contacts: Vec::new(),
        }
    }

    /// Default configuration with the given gravity.
    /// For Y-down coordinates use positive Y for downward gravity.
    pub fn with_gravity(gravity: Vec2) -> Self {
        Self::new(WorldConfig::default().with_gravity(gravity))
    }

    pub fn add_body(&mut self, body: RigidBody) -> BodyId {
        let id = BodyId(self.bodies.len());
        log::debug!(
            "add body {:?}: {:?} at {:?} mass={}",
            id,
            body.kind(),
            body.center(),
            body.mass()
        );
        self.bodies.push(body);
        id
    }

    pub fn body(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.get(id.0)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.bodies.get_mut(id.0)
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Accumulate a force on a body for the next step. Unknown ids are ignored.
    pub fn apply_force(&mut self, id: BodyId, force: Vec2, point: Option<Vec2>) {
        if let Some(body) = self.bodies.get_mut(id.0) {
            body.add_force(force, point);
        }
    }

    /// Manifolds found in the final solver pass of the last step.
    pub fn contacts(&self) -> &[PairContact] {
        &self.contacts
    }

    /// Sum of linear and angular kinetic energy over dynamic bodies.
    pub fn kinetic_energy(&self) -> f32 {
        self.bodies
            .iter()
            .filter(|b| !b.is_static())
            .map(|b| {
                0.5 * b.mass() * b.velocity().length_squared()
                    + 0.5 * b.inertia() * b.angular_velocity() * b.angular_velocity()
            })
            .sum()
    }

    /// Advance by `dt`, testing every pair of bodies.
    pub fn step(&mut self, dt: f32) {
        let n = self.bodies.len();
        let pairs: Vec<(BodyId, BodyId)> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (BodyId(i), BodyId(j))))
            .collect();
        self.step_with_pairs(dt, &pairs);
    }

    /// Advance by `dt`, testing only the given candidate pairs.
    ///
    /// Pairs naming the same body twice or an unknown id are skipped.
    pub fn step_with_pairs(&mut self, dt: f32, pairs: &[(BodyId, BodyId)]) {
        let gravity = self.config.gravity;
        for body in &mut self.bodies {
            let weight = gravity * body.mass();
            body.add_force(weight, None);
            body.integrate_with(dt, self.config.integrator, self.config.damping);
        }

        for _ in 0..self.config.solver_iterations {
            self.contacts.clear();
            for &(a, b) in pairs {
                let Some((body_a, body_b)) = pair_mut(&mut self.bodies, a.0, b.0) else {
                    continue;
                };
                let Some(manifold) = detect(body_a, body_b) else {
                    continue;
                };
                positional_correction(body_a, body_b, &manifold.primary(), self.config.correction_factor);
                for contact in manifold.contacts() {
                    match self.config.resolve_mode {
                        ResolveMode::Rotational => resolve(body_a, body_b, &contact),
                        ResolveMode::Linear => linear_resolve(body_a, body_b, &contact),
                    }
                }
                self.contacts.push(PairContact { a, b, manifold });
            }
        }
        log::trace!("step dt={} contacts={}", dt, self.contacts.len());

        for (i, body) in self.bodies.iter().enumerate() {
            if !body.is_finite() {
                log::warn!("body {:?} has non-finite state: center={:?}", BodyId(i), body.center());
            }
        }
    }
}

/// Two distinct mutable bodies, in the order asked for.
fn pair_mut(bodies: &mut [RigidBody], i: usize, j: usize) -> Option<(&mut RigidBody, &mut RigidBody)> {
    if i == j || i >= bodies.len() || j >= bodies.len() {
        return None;
    }
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}
