//! The contract between an instance and the optimization backend that solves it, plus a
//! baseline backend.
pub mod assignment;
pub mod error;
pub mod json_serialisation;
pub mod one_bus_per_trip;
pub mod solver;

pub use assignment::{ArcVisit, BusAssignment, SolverOutput};
pub use solver::{Solver, SolverStatus};
