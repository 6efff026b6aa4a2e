pub mod rng;
pub mod runner;
pub mod scenarios;
pub mod time;

pub use rng::Rng;
pub use runner::{Scenario, ScenarioRunner};
pub use scenarios::{
    arena_walls, CircleVsRectangle, InertiaShowcase, ProbeSample, RotationalResolution,
    StackBalls,
};
pub use time::Stepper;
