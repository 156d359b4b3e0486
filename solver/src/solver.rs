use std::sync::Arc;
use std::time::Duration;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use instance::problem_parameters::ProblemParameters;

use crate::assignment::SolverOutput;
use crate::error::SolverError;

/// How a solver run ended.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverStatus {
    #[display(fmt = "optimal")]
    Optimal,
    /// a feasible solution without proof of optimality, e.g. the time limit was reached
    #[display(fmt = "feasible")]
    Feasible,
    /// the time limit was reached before any feasible solution was found
    #[display(fmt = "no_solution")]
    NoSolution,
    #[display(fmt = "infeasible_or_unbounded")]
    InfeasibleOrUnbounded,
}

impl SolverStatus {
    pub fn has_solution(&self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::Feasible)
    }
}

/// A solver consumes one instance and runs synchronously for at most `time_limit`.
pub trait Solver {
    fn initialize(parameters: Arc<ProblemParameters>, time_limit: Duration) -> Self;

    fn solve(&self) -> Result<SolverOutput, SolverError>;
}
