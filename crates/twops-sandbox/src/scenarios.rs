//! Headless versions of the interactive test scenes.
//!
//! Every scene sits in the same walled arena: two side walls and a floor,
//! 1000 x 600 units centered on the origin, Y pointing down.

use glam::Vec2;
use twops_core::{detect, BodyId, PhysicsWorld, ResolveMode, RigidBody, WorldConfig};

use crate::rng::Rng;
use crate::runner::Scenario;

const ARENA_HALF_WIDTH: f32 = 500.0;
const ARENA_HALF_HEIGHT: f32 = 300.0;
const WALL_THICKNESS: f32 = 30.0;

/// Add static left, bottom and right walls around the origin.
/// Returns their ids in that order.
pub fn arena_walls(world: &mut PhysicsWorld, half_width: f32, half_height: f32, thickness: f32) -> [BodyId; 3] {
    let left = RigidBody::rectangle(Vec2::new(-half_width, 0.0), thickness, 2.0 * half_height);
    let bottom = RigidBody::rectangle(Vec2::new(0.0, half_height), 2.0 * half_width, thickness);
    let right = RigidBody::rectangle(Vec2::new(half_width, 0.0), thickness, 2.0 * half_height);
    [
        world.add_body(left.into_static()),
        world.add_body(bottom.into_static()),
        world.add_body(right.into_static()),
    ]
}

fn default_arena(world: &mut PhysicsWorld) -> [BodyId; 3] {
    arena_walls(world, ARENA_HALF_WIDTH, ARENA_HALF_HEIGHT, WALL_THICKNESS)
}

// ---------------------------------------------------------------------------
// StackBalls
// ---------------------------------------------------------------------------

/// Circles scattered above the floor, resolved without rotation.
pub struct StackBalls {
    pub count: usize,
    pub radius: f32,
    pub seed: u64,
    balls: Vec<BodyId>,
}

impl StackBalls {
    pub fn new(count: usize, radius: f32, seed: u64) -> Self {
        Self {
            count,
            radius,
            seed,
            balls: Vec::new(),
        }
    }

    pub fn balls(&self) -> &[BodyId] {
        &self.balls
    }
}

impl Default for StackBalls {
    fn default() -> Self {
        Self::new(50, 40.0, 42)
    }
}

impl Scenario for StackBalls {
    fn config(&self) -> WorldConfig {
        WorldConfig::default()
            .with_resolve_mode(ResolveMode::Linear)
            .with_solver_iterations(3)
    }

    fn name(&self) -> &str {
        "stack-balls"
    }

    fn init(&mut self, world: &mut PhysicsWorld) {
        let mut rng = Rng::new(self.seed);
        self.balls = (0..self.count)
            .map(|_| {
                let center = Vec2::new(rng.range(-300.0, 300.0), rng.range(-300.0, 200.0));
                world.add_body(RigidBody::circle(center, self.radius))
            })
            .collect();
        default_arena(world);
    }
}

// ---------------------------------------------------------------------------
// RotationalResolution
// ---------------------------------------------------------------------------

/// A circle and a tall box dropped onto a tilted static ramp.
#[derive(Default)]
pub struct RotationalResolution {
    ball: Option<BodyId>,
    tower: Option<BodyId>,
}

impl RotationalResolution {
    pub fn ball(&self) -> Option<BodyId> {
        self.ball
    }

    pub fn tower(&self) -> Option<BodyId> {
        self.tower
    }
}

impl Scenario for RotationalResolution {
    fn config(&self) -> WorldConfig {
        WorldConfig::default()
            .with_resolve_mode(ResolveMode::Rotational)
            .with_solver_iterations(5)
    }

    fn name(&self) -> &str {
        "rotational-resolution"
    }

    fn init(&mut self, world: &mut PhysicsWorld) {
        default_arena(world);

        let mut ramp = RigidBody::rectangle(Vec2::new(-170.0, 100.0), 450.0, 30.0).into_static();
        ramp.rotate(0.5);
        world.add_body(ramp);

        self.ball = Some(world.add_body(RigidBody::circle(Vec2::new(-120.0, -50.0), 50.0)));
        self.tower = Some(world.add_body(RigidBody::rectangle(Vec2::new(-100.0, -100.0), 60.0, 160.0)));
    }
}

// ---------------------------------------------------------------------------
// InertiaShowcase
// ---------------------------------------------------------------------------

/// One body of each shape, reporting the inertia computed for it.
#[derive(Default)]
pub struct InertiaShowcase {
    readings: Vec<(&'static str, f32)>,
}

impl InertiaShowcase {
    /// (label, moment of inertia) per showcased body, in insertion order.
    pub fn readings(&self) -> &[(&'static str, f32)] {
        &self.readings
    }
}

impl Scenario for InertiaShowcase {
    fn config(&self) -> WorldConfig {
        WorldConfig::default()
            .with_resolve_mode(ResolveMode::Linear)
            .with_solver_iterations(5)
    }

    fn name(&self) -> &str {
        "inertia-showcase"
    }

    fn init(&mut self, world: &mut PhysicsWorld) {
        default_arena(world);
        let bodies = [
            ("circle", RigidBody::circle(Vec2::new(100.0, 100.0), 50.0)),
            ("rectangle", RigidBody::rectangle(Vec2::new(-100.0, 100.0), 50.0, 100.0)),
            ("decagon", RigidBody::polygon(Vec2::new(200.0, 100.0), 10, 50.0)),
        ];
        for (label, body) in bodies {
            log::info!("{} inertia: {:.1}", label, body.inertia());
            self.readings.push((label, body.inertia()));
            world.add_body(body);
        }
    }
}

// ---------------------------------------------------------------------------
// CircleVsRectangle
// ---------------------------------------------------------------------------

/// Probe position and detected depth (if colliding) for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeSample {
    pub center: Vec2,
    pub depth: Option<f32>,
}

/// Detection only: a static probe circle is swept across a static rectangle.
///
/// Both bodies are static, so the world detects and reports contacts without
/// resolving them.
pub struct CircleVsRectangle {
    /// Probe speed in units per second along +X.
    pub speed: f32,
    probe: Option<BodyId>,
    target: Option<BodyId>,
    samples: Vec<ProbeSample>,
}

impl CircleVsRectangle {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            probe: None,
            target: None,
            samples: Vec::new(),
        }
    }

    pub fn samples(&self) -> &[ProbeSample] {
        &self.samples
    }
}

impl Default for CircleVsRectangle {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Scenario for CircleVsRectangle {
    fn config(&self) -> WorldConfig {
        WorldConfig::default().with_gravity(Vec2::ZERO)
    }

    fn name(&self) -> &str {
        "circle-vs-rectangle"
    }

    fn init(&mut self, world: &mut PhysicsWorld) {
        self.probe = Some(world.add_body(RigidBody::circle(Vec2::new(-100.0, 0.0), 60.0).into_static()));
        self.target = Some(world.add_body(RigidBody::rectangle(Vec2::new(100.0, 0.0), 100.0, 100.0).into_static()));
    }

    fn update(&mut self, world: &mut PhysicsWorld, dt: f32) {
        let (Some(probe_id), Some(target_id)) = (self.probe, self.target) else {
            return;
        };
        if let Some(probe) = world.body_mut(probe_id) {
            probe.translate(Vec2::new(self.speed * dt, 0.0));
        }
        let (Some(target), Some(probe)) = (world.body(target_id), world.body(probe_id)) else {
            return;
        };
        let depth = detect(target, probe).map(|m| m.depth);
        self.samples.push(ProbeSample {
            center: probe.center(),
            depth,
        });
    }
}
