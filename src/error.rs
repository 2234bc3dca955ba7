//! Error types surfaced by input validation.
//!
//! `NoPathFound` is deliberately absent here: it is a return-value
//! condition (an empty path with infinite cost), not a hard failure — see
//! `planner::plan`.

use std::{error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum PlanError {
    /// Start or goal lies outside the workspace, or inside an obstacle.
    InvalidEndpoint(String),
    /// The workspace rectangle is degenerate (`x_min >= x_max` or
    /// `y_min >= y_max`).
    InvalidWorkspace,
    /// A configuration value is non-positive where it must be positive.
    InvalidConfig(String),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoint(reason) => write!(f, "invalid start/goal endpoint: {reason}"),
            Self::InvalidWorkspace => write!(f, "workspace rectangle is degenerate"),
            Self::InvalidConfig(reason) => write!(f, "invalid planner configuration: {reason}"),
        }
    }
}

impl error::Error for PlanError {}
