use serde::{Deserialize, Serialize};
use std::fmt;

pub mod greedy;
pub mod optimal;

pub use greedy::GreedyAssigner;
pub use optimal::OptimalAssigner;

/// Which path produced a section's assignments. `Greedy` marks a degraded
/// (non-optimal but complete) result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentMethod {
    Optimal,
    Greedy,
}

impl AssignmentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentMethod::Optimal => "optimal",
            AssignmentMethod::Greedy => "greedy",
        }
    }
}

impl fmt::Display for AssignmentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub enum AssignmentError {
    /// No integer assignment satisfies all equality constraints at once.
    Infeasible,
    /// The solver failed for any other reason (limits, numeric trouble).
    Solver(String),
}

impl fmt::Display for AssignmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentError::Infeasible => {
                write!(f, "assignment model is infeasible")
            }
            AssignmentError::Solver(message) => write!(f, "solver error: {message}"),
        }
    }
}

impl std::error::Error for AssignmentError {}
