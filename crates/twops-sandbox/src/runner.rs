use twops_core::{PhysicsWorld, WorldConfig};

use crate::time::Stepper;

/// The contract every sandbox scene fulfills.
pub trait Scenario {
    /// World configuration. Called once before `init`.
    fn config(&self) -> WorldConfig {
        WorldConfig::default()
    }

    fn name(&self) -> &str;

    /// Populate the world.
    fn init(&mut self, world: &mut PhysicsWorld);

    /// Called before every fixed step. Apply forces, move probes, record state.
    fn update(&mut self, _world: &mut PhysicsWorld, _dt: f32) {}
}

/// Drives a [`Scenario`] at a fixed timestep.
pub struct ScenarioRunner<S: Scenario> {
    scenario: S,
    world: PhysicsWorld,
    stepper: Stepper,
    /// Fixed steps taken so far.
    ticks: u64,
}

impl<S: Scenario> ScenarioRunner<S> {
    /// Build the world from the scenario's config and run its `init`.
    pub fn new(mut scenario: S) -> Self {
        let config = scenario.config();
        let stepper = Stepper::from_config(&config);
        let mut world = PhysicsWorld::new(config);
        scenario.init(&mut world);
        log::info!("scenario '{}' ready with {} bodies", scenario.name(), world.len());
        Self {
            scenario,
            world,
            stepper,
            ticks: 0,
        }
    }

    /// Feed one frame of wall time. Returns the number of fixed steps run.
    pub fn tick(&mut self, frame_dt: f32) -> u32 {
        let steps = self.stepper.accumulate(frame_dt);
        let dt = self.stepper.dt();
        for _ in 0..steps {
            self.scenario.update(&mut self.world, dt);
            self.world.step(dt);
            self.ticks += 1;
        }
        steps
    }

    pub fn run_frames(&mut self, frames: u32, frame_dt: f32) {
        for _ in 0..frames {
            self.tick(frame_dt);
        }
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn scenario(&self) -> &S {
        &self.scenario
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Interpolation alpha between the last two steps.
    pub fn alpha(&self) -> f32 {
        self.stepper.alpha()
    }
}
