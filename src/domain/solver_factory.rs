use crate::domain::solver::Solver;
use crate::domain::solvers::HighsSolver;

#[cfg(feature = "gurobi-solver")]
use crate::domain::solvers::GurobiSolver;

/// Available solver backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverType {
    Highs,
    #[cfg(feature = "gurobi-solver")]
    Gurobi,
}

impl SolverType {
    /// Parse solver type from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "highs" => Some(SolverType::Highs),
            #[cfg(feature = "gurobi-solver")]
            "gurobi" => Some(SolverType::Gurobi),
            _ => None,
        }
    }

    /// Backends compiled into this build
    pub fn available() -> Vec<SolverType> {
        vec![
            SolverType::Highs,
            #[cfg(feature = "gurobi-solver")]
            SolverType::Gurobi,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SolverType::Highs => "highs",
            #[cfg(feature = "gurobi-solver")]
            SolverType::Gurobi => "gurobi",
        }
    }
}

/// Create a solver instance based on the specified type
pub fn create_solver(solver_type: SolverType) -> Box<dyn Solver> {
    match solver_type {
        SolverType::Highs => Box::new(HighsSolver::new()),
        #[cfg(feature = "gurobi-solver")]
        SolverType::Gurobi => Box::new(GurobiSolver::new()),
    }
}
