pub mod api;
pub mod config;
pub mod domain;
pub mod models;

#[cfg(test)]
mod test_utils;

pub use domain::error::{Result, SolveError};
pub use domain::solve::{solve, solve_request};
pub use domain::solver_factory::{create_solver, SolverType};
pub use models::{ModelDescription, SolveOutcome, SolveRequest, SolveResult};
