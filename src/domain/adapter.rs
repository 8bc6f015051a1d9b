use log::debug;

use crate::domain::assemble::assemble_rows;
use crate::domain::error::Result;
use crate::domain::model::Model;
use crate::domain::progress::Progress;
use crate::domain::solver::{Solver, SolverSession};

/// Drives one solver session through model construction and the solve.
///
/// The adapter is bound to a single call; dropping it releases the session.
pub struct SolverAdapter {
    session: Box<dyn SolverSession>,
    solver_name: String,
}

impl SolverAdapter {
    pub fn open(solver: &dyn Solver) -> Result<Self> {
        let session = solver.open_session()?;
        debug!("Opened {} session", solver.name());
        Ok(SolverAdapter {
            session,
            solver_name: solver.name().to_string(),
        })
    }

    /// Load the model: name, parameters in input order, variables, direction, constraints
    pub fn build(
        &mut self,
        model: &Model,
        params: &[(String, String)],
        progress: &Progress,
    ) -> Result<()> {
        self.session.set_model_name(&model.name)?;

        progress.step("adding parameters");
        for (name, value) in params {
            self.session.set_param(name, value)?;
        }

        progress.step("adding vars");
        self.session.add_vars(&model.columns())?;
        self.session.set_model_sense(model.model_sense)?;

        progress.step("adding constrs");
        let lhs = assemble_rows(model);
        self.session
            .add_constrs(lhs, &model.senses, &model.rhs, &model.constraint_names())?;

        debug!(
            "Loaded model '{}' with {} variables and {} constraints",
            model.name,
            model.ncol(),
            model.nrow()
        );
        Ok(())
    }

    /// Solve and return the raw status code
    pub fn optimize(&mut self) -> Result<i32> {
        self.session.optimize()?;
        let status = self.session.status()?;
        debug!("{} finished with status code {}", self.solver_name, status);
        Ok(status)
    }

    pub fn session(&self) -> &dyn SolverSession {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> &mut dyn SolverSession {
        self.session.as_mut()
    }
}

impl Drop for SolverAdapter {
    fn drop(&mut self) {
        debug!("Releasing {} session", self.solver_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ConstraintSense, ModelSense};
    use crate::domain::status;
    use crate::test_utils::{two_var_model, Call, ScriptedSolver};

    fn build_with(solver: &ScriptedSolver, params: &[(String, String)]) -> Result<()> {
        let model = Model::try_from(two_var_model()).unwrap();
        let mut adapter = SolverAdapter::open(solver)?;
        adapter.build(&model, params, &Progress::new(false))
    }

    #[test]
    fn test_build_issues_calls_in_order() {
        let solver = ScriptedSolver::new(status::OPTIMAL);
        let params = vec![
            ("TimeLimit".to_string(), "5".to_string()),
            ("Threads".to_string(), "1".to_string()),
        ];
        build_with(&solver, &params).unwrap();

        let calls = solver.calls();
        assert_eq!(calls[0], Call::SetModelName("trivial".to_string()));
        assert_eq!(
            calls[1],
            Call::SetParam("TimeLimit".to_string(), "5".to_string())
        );
        assert_eq!(calls[2], Call::SetParam("Threads".to_string(), "1".to_string()));
        assert!(matches!(calls[3], Call::AddVars(2)));
        assert_eq!(calls[4], Call::SetModelSense(ModelSense::Minimize));
        assert!(matches!(calls[5], Call::AddConstrs { .. }));
        assert_eq!(calls.len(), 6);
    }

    #[test]
    fn test_build_names_constraints_and_passes_rows() {
        let solver = ScriptedSolver::new(status::OPTIMAL);
        build_with(&solver, &[]).unwrap();

        let constraints = solver.constraints();
        assert_eq!(constraints.names, vec!["C0"]);
        assert_eq!(constraints.senses, vec![ConstraintSense::LessEqual]);
        assert_eq!(constraints.rhs, vec![10.0]);
        assert_eq!(constraints.lhs[0].coefficient(0), 1.0);
        assert_eq!(constraints.lhs[0].coefficient(1), 1.0);
    }

    #[test]
    fn test_rejected_parameter_stops_the_build() {
        let solver = ScriptedSolver::new(status::OPTIMAL).reject_param("Bogus");
        let params = vec![
            ("Threads".to_string(), "1".to_string()),
            ("Bogus".to_string(), "1".to_string()),
            ("TimeLimit".to_string(), "5".to_string()),
        ];
        let err = build_with(&solver, &params).unwrap_err();

        assert!(err.is_input_error());
        assert!(err.to_string().contains("Bogus"));
        let calls = solver.calls();
        assert!(!calls.iter().any(|c| matches!(c, Call::AddVars(_))));
        assert!(!calls
            .iter()
            .any(|c| *c == Call::SetParam("TimeLimit".to_string(), "5".to_string())));
    }

    #[test]
    fn test_session_is_released_when_adapter_drops() {
        let solver = ScriptedSolver::new(status::OPTIMAL);
        {
            let _adapter = SolverAdapter::open(&solver).unwrap();
            assert_eq!(solver.open_sessions(), 1);
        }
        assert_eq!(solver.open_sessions(), 0);
    }
}
