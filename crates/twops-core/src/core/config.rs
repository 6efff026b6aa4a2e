use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Velocity multiplier applied after every integration step.
pub const DEFAULT_DAMPING: f32 = 0.999;

/// How `RigidBody::integrate_with` advances position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integrator {
    /// Velocity first, then position from the new velocity.
    #[default]
    SemiImplicitEuler,
    /// Four-stage weighted velocity average for the displacement.
    Blended,
}

/// Which velocity solver the world runs on each contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveMode {
    /// `collision::resolve`: angular terms and friction.
    #[default]
    Rotational,
    /// `collision::linear_resolve`: linear velocities only.
    Linear,
}

/// Simulation parameters for a [`PhysicsWorld`](super::world::PhysicsWorld).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Acceleration applied to every dynamic body. Y-down, so positive Y falls.
    pub gravity: Vec2,
    /// Detect/correct/resolve passes over all pairs per step (default: 5).
    pub solver_iterations: u32,
    /// Fraction of penetration removed per correction, in (0, 1].
    pub correction_factor: f32,
    /// Per-step velocity multiplier, in (0, 1].
    pub damping: f32,
    pub resolve_mode: ResolveMode,
    pub integrator: Integrator,
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Cap on fixed steps taken for one rendered frame (default: 10).
    pub max_steps_per_frame: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 500.0),
            solver_iterations: 5,
            correction_factor: 0.25,
            damping: DEFAULT_DAMPING,
            resolve_mode: ResolveMode::Rotational,
            integrator: Integrator::SemiImplicitEuler,
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
        }
    }
}

/// Rejected configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("correction_factor must be in (0, 1], got {0}")]
    CorrectionFactor(f32),
    #[error("damping must be in (0, 1], got {0}")]
    Damping(f32),
    #[error("solver_iterations must be at least 1")]
    SolverIterations,
    #[error("fixed_dt must be positive and finite, got {0}")]
    FixedDt(f32),
}

impl WorldConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.correction_factor > 0.0 && self.correction_factor <= 1.0) {
            return Err(ConfigError::CorrectionFactor(self.correction_factor));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::Damping(self.damping));
        }
        if self.solver_iterations == 0 {
            return Err(ConfigError::SolverIterations);
        }
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return Err(ConfigError::FixedDt(self.fixed_dt));
        }
        Ok(())
    }

    /// Replace every field [`validate`](Self::validate) would reject with its default.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.correction_factor > 0.0 && self.correction_factor <= 1.0) {
            self.correction_factor = defaults.correction_factor;
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            self.damping = defaults.damping;
        }
        if self.solver_iterations == 0 {
            self.solver_iterations = defaults.solver_iterations;
        }
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            self.fixed_dt = defaults.fixed_dt;
        }
        self
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_solver_iterations(mut self, iterations: u32) -> Self {
        self.solver_iterations = iterations;
        self
    }

    pub fn with_resolve_mode(mut self, mode: ResolveMode) -> Self {
        self.resolve_mode = mode;
        self
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }
}
