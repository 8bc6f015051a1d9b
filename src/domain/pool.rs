use log::debug;

use crate::domain::error::Result;
use crate::domain::solver::SolverSession;

/// Solutions read from the solver's pool, in pool order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionPool {
    /// Objective value of each solution, recomputed from the variable values
    pub objval: Vec<f64>,
    /// One row per solution, one column per variable
    pub x: Vec<Vec<f64>>,
}

/// Read up to `requested` solutions from a solved session.
///
/// The count is capped by the pool size. Each objective value is computed as
/// `sum_j obj_j * x_kj` from the variables' objective attribute; the solver's own objective
/// for the pool entry is never read.
pub fn extract_solutions(session: &mut dyn SolverSession, requested: usize) -> Result<SolutionPool> {
    let available = session.solution_count()?;
    let count = requested.min(available);
    let ncol = session.num_vars();
    debug!(
        "Extracting {} of {} pooled solutions ({} requested)",
        count, available, requested
    );

    let objective = (0..ncol)
        .map(|j| session.var_objective(j))
        .collect::<Result<Vec<f64>>>()?;

    let mut pool = SolutionPool {
        objval: Vec::with_capacity(count),
        x: Vec::with_capacity(count),
    };
    for k in 0..count {
        session.select_solution(k)?;
        let values = (0..ncol)
            .map(|j| session.var_pool_value(j))
            .collect::<Result<Vec<f64>>>()?;
        let objval: f64 = objective
            .iter()
            .zip(values.iter())
            .map(|(c, x)| c * x)
            .sum();
        pool.objval.push(objval);
        pool.x.push(values);
    }

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ColumnSpec, VarType};
    use crate::domain::solver::Solver;
    use crate::domain::status;
    use crate::test_utils::ScriptedSolver;

    fn session_with(
        objective: &[f64],
        pool: Vec<Vec<f64>>,
    ) -> (ScriptedSolver, Box<dyn SolverSession>) {
        let solver = ScriptedSolver::new(status::OPTIMAL).with_pool(pool);
        let mut session = solver.open_session().unwrap();
        let columns: Vec<ColumnSpec> = objective
            .iter()
            .map(|&objective| ColumnSpec {
                objective,
                lower: 0.0,
                upper: f64::INFINITY,
                var_type: VarType::Continuous,
            })
            .collect();
        session.add_vars(&columns).unwrap();
        (solver, session)
    }

    #[test]
    fn test_extracts_requested_count_when_pool_is_larger() {
        let (_solver, mut session) = session_with(
            &[1.0, 2.0],
            vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]],
        );
        let pool = extract_solutions(session.as_mut(), 2).unwrap();

        assert_eq!(pool.objval, vec![1.0, 2.0]);
        assert_eq!(pool.x, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_caps_count_at_pool_size() {
        let (_solver, mut session) = session_with(&[3.0], vec![vec![2.0]]);
        let pool = extract_solutions(session.as_mut(), 10).unwrap();

        assert_eq!(pool.objval.len(), 1);
        assert_eq!(pool.x.len(), 1);
        assert_eq!(pool.objval[0], 6.0);
    }

    #[test]
    fn test_zero_requested_gives_empty_pool() {
        let (_solver, mut session) = session_with(&[1.0], vec![vec![5.0]]);
        let pool = extract_solutions(session.as_mut(), 0).unwrap();
        assert_eq!(pool, SolutionPool::default());
    }

    #[test]
    fn test_objective_is_sum_of_coefficient_times_value() {
        let solver = ScriptedSolver::new(status::OPTIMAL).with_pool(vec![vec![2.0, 3.0]]);
        let mut session = solver.open_session().unwrap();
        let columns = [
            ColumnSpec {
                objective: 1.5,
                lower: 0.0,
                upper: 10.0,
                var_type: VarType::Integer,
            },
            ColumnSpec {
                objective: -1.0,
                lower: 0.0,
                upper: 10.0,
                var_type: VarType::Continuous,
            },
        ];
        session.add_vars(&columns).unwrap();

        let pool = extract_solutions(session.as_mut(), 1).unwrap();
        assert!((pool.objval[0] - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_rows_have_one_entry_per_variable() {
        let (_solver, mut session) = session_with(
            &[1.0, 1.0, 1.0],
            vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]],
        );
        let pool = extract_solutions(session.as_mut(), 2).unwrap();
        for (k, row) in pool.x.iter().enumerate() {
            assert_eq!(row.len(), 3);
            let expected: f64 = row.iter().sum();
            assert!((pool.objval[k] - expected).abs() < 1e-12);
        }
    }
}
