use std::ffi::{c_void, CString};

use ::highs::{Col, RowProblem, Sense, SolvedModel};
use highs_sys::{
    HighsInt, MODEL_STATUS_INFEASIBLE, MODEL_STATUS_MODEL_EMPTY, MODEL_STATUS_NOTSET,
    MODEL_STATUS_OBJECTIVE_BOUND, MODEL_STATUS_OBJECTIVE_TARGET, MODEL_STATUS_OPTIMAL,
    MODEL_STATUS_REACHED_INTERRUPT, MODEL_STATUS_REACHED_ITERATION_LIMIT,
    MODEL_STATUS_REACHED_SOLUTION_LIMIT, MODEL_STATUS_REACHED_TIME_LIMIT, MODEL_STATUS_UNBOUNDED,
    MODEL_STATUS_UNBOUNDED_OR_INFEASIBLE, STATUS_OK, STATUS_WARNING,
};
use log::{debug, warn};

use crate::domain::assemble::LinExpr;
use crate::domain::error::{Result, SolveError};
use crate::domain::model::{ColumnSpec, ConstraintSense, ModelSense, VarType};
use crate::domain::solver::{SolveStatistics, Solver, SolverSession};
use crate::domain::status;

/// HiGHS solver implementation.
///
/// HiGHS keeps a single incumbent, so its solution pool holds at most one entry.
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        HighsSolver
    }

    /// Convert a raw HiGHS model status to the raw status numbering
    fn convert_status(model_status: HighsInt) -> i32 {
        match model_status {
            MODEL_STATUS_NOTSET => status::LOADED,
            MODEL_STATUS_OPTIMAL | MODEL_STATUS_MODEL_EMPTY => status::OPTIMAL,
            MODEL_STATUS_INFEASIBLE => status::INFEASIBLE,
            MODEL_STATUS_UNBOUNDED_OR_INFEASIBLE => status::INF_OR_UNBD,
            MODEL_STATUS_UNBOUNDED => status::UNBOUNDED,
            MODEL_STATUS_OBJECTIVE_BOUND | MODEL_STATUS_OBJECTIVE_TARGET => status::CUTOFF,
            MODEL_STATUS_REACHED_ITERATION_LIMIT => status::ITERATION_LIMIT,
            MODEL_STATUS_REACHED_TIME_LIMIT => status::TIME_LIMIT,
            MODEL_STATUS_REACHED_SOLUTION_LIMIT => status::SOLUTION_LIMIT,
            MODEL_STATUS_REACHED_INTERRUPT => status::INTERRUPTED,
            other => {
                warn!("HiGHS returned model status {}, reporting it as NUMERIC", other);
                status::NUMERIC
            }
        }
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for HighsSolver {
    fn open_session(&self) -> Result<Box<dyn SolverSession>> {
        Ok(Box::new(HighsSession::new()?))
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}

/// Set an option from its string form. HiGHS parses the value into the option's own type
/// (bool, integer, double or string) and rejects unknown names and unparseable values.
fn set_option(highs: *mut c_void, name: &str, value: &str) -> std::result::Result<(), String> {
    let c_name = CString::new(name).map_err(|_| "option name contains a NUL byte".to_string())?;
    let c_value =
        CString::new(value).map_err(|_| "option value contains a NUL byte".to_string())?;
    let status = unsafe {
        highs_sys::Highs_setStringOptionValue(highs, c_name.as_ptr(), c_value.as_ptr())
    };
    match status {
        STATUS_OK => Ok(()),
        STATUS_WARNING => {
            warn!("HiGHS accepted option '{}' = '{}' with a warning", name, value);
            Ok(())
        }
        other => Err(format!("HiGHS rejected the option (status {})", other)),
    }
}

fn model_status(solved: &SolvedModel) -> HighsInt {
    unsafe { highs_sys::Highs_getModelStatus(solved.as_ptr()) }
}

/// Integer info value, `None` when HiGHS has no valid value for it
fn int_info(solved: &SolvedModel, name: &str) -> Option<f64> {
    let c_name = CString::new(name).ok()?;
    let mut value: HighsInt = 0;
    let status =
        unsafe { highs_sys::Highs_getIntInfoValue(solved.as_ptr(), c_name.as_ptr(), &mut value) };
    if status == STATUS_OK && value >= 0 {
        Some(value as f64)
    } else {
        debug!("HiGHS info '{}' not available (status {})", name, status);
        None
    }
}

fn int64_info(solved: &SolvedModel, name: &str) -> Option<f64> {
    let c_name = CString::new(name).ok()?;
    let mut value: i64 = 0;
    let status = unsafe {
        highs_sys::Highs_getInt64InfoValue(solved.as_ptr(), c_name.as_ptr(), &mut value)
    };
    if status == STATUS_OK && value >= 0 {
        Some(value as f64)
    } else {
        debug!("HiGHS info '{}' not available (status {})", name, status);
        None
    }
}

/// Result of the solve, kept for the queries that follow it
struct SolvedState {
    model: SolvedModel,
    status: HighsInt,
    values: Option<Vec<f64>>,
}

struct HighsSession {
    problem: Option<RowProblem>,
    columns: Vec<Col>,
    objective: Vec<f64>,
    sense: Sense,
    options: Vec<(String, String)>,
    // The problem only becomes a highs::Model at solve time, so options are checked against
    // this empty model as they arrive and replayed on the real one.
    probe: ::highs::Model,
    solved: Option<SolvedState>,
}

impl HighsSession {
    fn new() -> Result<Self> {
        let mut probe = RowProblem::default()
            .try_optimise(Sense::Minimise)
            .map_err(|e| SolveError::solver("Failed to create HiGHS model", format!("{:?}", e)))?;
        probe.make_quiet();

        Ok(HighsSession {
            problem: Some(RowProblem::default()),
            columns: Vec::new(),
            objective: Vec::new(),
            sense: Sense::Minimise,
            options: Vec::new(),
            probe,
            solved: None,
        })
    }

    fn problem_mut(&mut self) -> Result<&mut RowProblem> {
        self.problem
            .as_mut()
            .ok_or_else(|| SolveError::Solver("HiGHS model has already been solved".to_string()))
    }

    fn solved(&self) -> Result<&SolvedState> {
        self.solved
            .as_ref()
            .ok_or_else(|| SolveError::Solver("HiGHS model has not been solved".to_string()))
    }

    fn apply_options(&self, model: &mut ::highs::Model) -> Result<()> {
        for (name, value) in &self.options {
            set_option(model.as_mut_ptr(), name, value).map_err(|details| {
                SolveError::solver(&format!("Failed to set HiGHS option '{}'", name), details)
            })?;
        }
        Ok(())
    }
}

impl SolverSession for HighsSession {
    fn set_model_name(&mut self, name: &str) -> Result<()> {
        debug!("HiGHS session for model '{}'", name);
        Ok(())
    }

    fn set_param(&mut self, name: &str, value: &str) -> Result<()> {
        set_option(self.probe.as_mut_ptr(), name, value).map_err(|details| {
            SolveError::InvalidParameter {
                name: name.to_string(),
                value: value.to_string(),
                details,
            }
        })?;
        self.options.push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn add_vars(&mut self, columns: &[ColumnSpec]) -> Result<()> {
        let mut created = Vec::with_capacity(columns.len());
        let problem = self.problem_mut()?;
        for spec in columns {
            let col = match spec.var_type {
                VarType::Continuous => problem.add_column(spec.objective, spec.lower..=spec.upper),
                VarType::Integer => {
                    problem.add_integer_column(spec.objective, spec.lower..=spec.upper)
                }
                VarType::Binary => problem.add_integer_column(
                    spec.objective,
                    spec.lower.max(0.0)..=spec.upper.min(1.0),
                ),
            };
            created.push(col);
        }
        self.columns.extend(created);
        self.objective.extend(columns.iter().map(|spec| spec.objective));
        Ok(())
    }

    fn set_model_sense(&mut self, sense: ModelSense) -> Result<()> {
        self.sense = match sense {
            ModelSense::Minimize => Sense::Minimise,
            ModelSense::Maximize => Sense::Maximise,
        };
        Ok(())
    }

    fn add_constrs(
        &mut self,
        lhs: Vec<LinExpr>,
        senses: &[ConstraintSense],
        rhs: &[f64],
        _names: &[String],
    ) -> Result<()> {
        let columns = self.columns.clone();
        let problem = self.problem_mut()?;
        for ((expr, sense), &bound) in lhs.into_iter().zip(senses.iter()).zip(rhs.iter()) {
            let factors: Vec<(Col, f64)> = expr
                .terms()
                .map(|(col, coefficient)| (columns[col], coefficient))
                .collect();
            match sense {
                ConstraintSense::LessEqual => {
                    problem.add_row(..=bound, factors);
                }
                ConstraintSense::Equal => {
                    problem.add_row(bound..=bound, factors);
                }
                ConstraintSense::GreaterEqual => {
                    problem.add_row(bound.., factors);
                }
            }
        }
        Ok(())
    }

    fn optimize(&mut self) -> Result<()> {
        let problem = self
            .problem
            .take()
            .ok_or_else(|| SolveError::Solver("HiGHS model has already been solved".to_string()))?;

        let mut model = problem
            .try_optimise(self.sense)
            .map_err(|e| SolveError::solver("Failed to load model into HiGHS", format!("{:?}", e)))?;
        model.make_quiet();
        self.apply_options(&mut model)?;

        let mut solved = model
            .try_solve()
            .map_err(|e| SolveError::solver("Failed to optimize", format!("{:?}", e)))?;

        // Presolve can stop at "infeasible or unbounded"; without it the simplex tells them apart
        if model_status(&solved) == MODEL_STATUS_UNBOUNDED_OR_INFEASIBLE {
            debug!("HiGHS reported infeasible or unbounded, solving again without presolve");
            let mut retry: ::highs::Model = solved.into();
            set_option(retry.as_mut_ptr(), "presolve", "off")
                .map_err(|details| SolveError::solver("Failed to disable presolve", details))?;
            solved = retry
                .try_solve()
                .map_err(|e| SolveError::solver("Failed to optimize", format!("{:?}", e)))?;
        }

        let raw_status = model_status(&solved);
        let values = match raw_status {
            MODEL_STATUS_OPTIMAL | MODEL_STATUS_MODEL_EMPTY => {
                Some(solved.get_solution().columns().to_vec())
            }
            _ => None,
        };

        self.solved = Some(SolvedState {
            model: solved,
            status: raw_status,
            values,
        });
        Ok(())
    }

    fn status(&self) -> Result<i32> {
        Ok(HighsSolver::convert_status(self.solved()?.status))
    }

    fn solution_count(&self) -> Result<usize> {
        Ok(usize::from(self.solved()?.values.is_some()))
    }

    fn select_solution(&mut self, k: usize) -> Result<()> {
        if k < self.solution_count()? {
            Ok(())
        } else {
            Err(SolveError::Solver(format!(
                "HiGHS has no pooled solution number {}",
                k
            )))
        }
    }

    fn num_vars(&self) -> usize {
        self.columns.len()
    }

    fn var_objective(&self, j: usize) -> Result<f64> {
        self.objective
            .get(j)
            .copied()
            .ok_or_else(|| SolveError::Solver(format!("No variable {}", j)))
    }

    fn var_pool_value(&self, j: usize) -> Result<f64> {
        self.solved()?
            .values
            .as_ref()
            .and_then(|values| values.get(j).copied())
            .ok_or_else(|| SolveError::Solver(format!("No solution value for variable {}", j)))
    }

    fn statistics(&self) -> Result<SolveStatistics> {
        let solved = &self.solved()?.model;
        Ok(SolveStatistics {
            runtime: unsafe { highs_sys::Highs_getRunTime(solved.as_ptr()) },
            itercount: int_info(solved, "simplex_iteration_count").unwrap_or(0.0),
            baritercount: int_info(solved, "ipm_iteration_count").unwrap_or(0.0),
            nodecount: int64_info(solved, "mip_node_count").unwrap_or(0.0),
        })
    }
}
