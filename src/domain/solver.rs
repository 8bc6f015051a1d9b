use crate::domain::assemble::LinExpr;
use crate::domain::error::Result;
use crate::domain::model::{ColumnSpec, ConstraintSense, ModelSense};

/// Common interface for MIP solver backends
pub trait Solver: Send + Sync {
    /// Open a fresh session for a single solve.
    ///
    /// The session owns every solver resource it creates and releases them on drop, so
    /// dropping it on any exit path tears the solve down.
    fn open_session(&self) -> Result<Box<dyn SolverSession>>;

    /// Get the solver name for logging/debugging
    fn name(&self) -> &str;
}

/// Counters reported by the solver after `optimize`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SolveStatistics {
    /// Wall-clock solve time in seconds
    pub runtime: f64,
    pub itercount: f64,
    pub baritercount: f64,
    pub nodecount: f64,
}

/// One model inside an external solver, from creation to teardown.
///
/// Variables are addressed by their creation index; the session keeps the handles.
pub trait SolverSession {
    fn set_model_name(&mut self, name: &str) -> Result<()>;

    /// Apply one named parameter; a rejected name or value is a
    /// [`crate::domain::error::SolveError::InvalidParameter`]
    fn set_param(&mut self, name: &str, value: &str) -> Result<()>;

    fn add_vars(&mut self, columns: &[ColumnSpec]) -> Result<()>;

    fn set_model_sense(&mut self, sense: ModelSense) -> Result<()>;

    /// Add one constraint per expression. The expressions are consumed.
    fn add_constrs(
        &mut self,
        lhs: Vec<LinExpr>,
        senses: &[ConstraintSense],
        rhs: &[f64],
        names: &[String],
    ) -> Result<()>;

    /// Run the solver. Blocks until it returns.
    fn optimize(&mut self) -> Result<()>;

    /// Raw status code, Gurobi numbering (see [`crate::domain::status`])
    fn status(&self) -> Result<i32>;

    /// Number of solutions held in the solution pool
    fn solution_count(&self) -> Result<usize>;

    /// Make pool entry `k` the one read by [`SolverSession::var_pool_value`]
    fn select_solution(&mut self, k: usize) -> Result<()>;

    fn num_vars(&self) -> usize;

    /// Objective coefficient of variable `j` as stored in the solver
    fn var_objective(&self, j: usize) -> Result<f64>;

    /// Value of variable `j` in the selected pool entry
    fn var_pool_value(&self, j: usize) -> Result<f64>;

    fn statistics(&self) -> Result<SolveStatistics>;
}
