//! Planner configuration and statistics.

/// Tunables for one `plan()` call. Field defaults mirror the reference
/// values for this planner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub max_iterations: u32,
    pub step_size: f64,
    pub optimization_interval: u32,
    pub gamma: f64,
    pub connection_k: usize,
    pub pso_particles: usize,
    pub pso_iterations: u32,
    pub pso_inertia: f64,
    pub pso_cognitive: f64,
    pub pso_social: f64,
    /// Seed for the deterministic RNG stream threaded through sampling,
    /// strategy selection, and PSO. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5000,
            step_size: 20.0,
            optimization_interval: 200,
            gamma: 150.0,
            connection_k: 5,
            pso_particles: 20,
            pso_iterations: 50,
            pso_inertia: 0.7,
            pso_cognitive: 1.5,
            pso_social: 1.5,
            seed: None,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<(), crate::error::PlanError> {
        if self.max_iterations < 1 {
            return Err(crate::error::PlanError::InvalidConfig(
                "max_iterations must be >= 1".into(),
            ));
        }
        if self.step_size <= 0.0 {
            return Err(crate::error::PlanError::InvalidConfig(
                "step_size must be positive".into(),
            ));
        }
        if self.pso_particles == 0 {
            return Err(crate::error::PlanError::InvalidConfig(
                "pso_particles must be positive".into(),
            ));
        }
        if self.optimization_interval < 1 {
            return Err(crate::error::PlanError::InvalidConfig(
                "optimization_interval must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

/// Aggregate statistics returned alongside the best path.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlannerStats {
    pub iterations_executed: u32,
    pub paths_found: u32,
    pub nodes_explored: usize,
}

/// Tags which of the two trees an index refers to, replacing string tags
/// like `"start"`/`"goal"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeLabel {
    Start,
    Goal,
}

impl TreeLabel {
    pub fn opposite(self) -> Self {
        match self {
            TreeLabel::Start => TreeLabel::Goal,
            TreeLabel::Goal => TreeLabel::Start,
        }
    }
}
