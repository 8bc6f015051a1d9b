use grb::parameter::Undocumented;
use grb::prelude::*;
use log::debug;

use crate::domain::assemble::LinExpr;
use crate::domain::error::{Result, SolveError};
use crate::domain::model::{ColumnSpec, ConstraintSense, ModelSense as Direction, VarType as ColumnType};
use crate::domain::solver::{SolveStatistics, Solver, SolverSession};

/// Gurobi solver implementation, with access to Gurobi's solution pool
pub struct GurobiSolver;

impl GurobiSolver {
    pub fn new() -> Self {
        GurobiSolver
    }
}

impl Default for GurobiSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for GurobiSolver {
    fn open_session(&self) -> Result<Box<dyn SolverSession>> {
        let mut env = Env::new("")
            .map_err(|e| SolveError::solver("Failed to create Gurobi environment", e))?;
        // Console output off unless the caller passes OutputFlag
        env.set(param::OutputFlag, 0)
            .map_err(|e| SolveError::solver("Failed to set Gurobi output flag", e))?;
        let model = Model::with_env("", &env)
            .map_err(|e| SolveError::solver("Failed to create Gurobi model", e))?;

        Ok(Box::new(GurobiSession {
            model,
            vars: Vec::new(),
            _env: env,
        }))
    }

    fn name(&self) -> &str {
        "Gurobi"
    }
}

/// Gurobi's own value for an infinite bound
fn to_gurobi_bound(bound: f64) -> f64 {
    if bound.is_infinite() {
        bound.signum() * grb::INFINITY
    } else {
        bound
    }
}

struct GurobiSession {
    // Dropped before the environment it was created from
    model: Model,
    vars: Vec<Var>,
    _env: Env,
}

impl GurobiSession {
    fn var(&self, j: usize) -> Result<&Var> {
        self.vars
            .get(j)
            .ok_or_else(|| SolveError::Solver(format!("No variable {}", j)))
    }

    fn update(&mut self, context: &str) -> Result<()> {
        self.model
            .update()
            .map_err(|e| SolveError::solver(context, e))
    }

    /// Parameters arrive as strings; try each typed reading of the value in turn
    fn try_set_param(&mut self, name: &str, value: &str) -> grb::Result<()> {
        let param = Undocumented::new(name)?;
        let model = &mut self.model;
        first_accepted(ParamValue::readings(value), |reading| match reading {
            ParamValue::Int(v) => model.set_param(&param, v),
            ParamValue::Float(v) => model.set_param(&param, v),
            ParamValue::Str(v) => model.set_param(&param, v),
        })
    }
}

/// A parameter value read as one of Gurobi's parameter types
#[derive(Debug, Clone, PartialEq)]
enum ParamValue {
    Int(i32),
    Float(f64),
    Str(String),
}

impl ParamValue {
    /// Readings of `value`, most specific first; the string reading always comes last
    fn readings(value: &str) -> Vec<ParamValue> {
        let mut readings = Vec::new();
        if let Ok(v) = value.parse::<i32>() {
            readings.push(ParamValue::Int(v));
        }
        if let Ok(v) = value.parse::<f64>() {
            readings.push(ParamValue::Float(v));
        }
        readings.push(ParamValue::Str(value.to_string()));
        readings
    }
}

/// Apply `set` to each reading until one is accepted. When all are rejected the error from
/// the first, most specific reading is returned.
fn first_accepted<T, E>(
    readings: Vec<T>,
    mut set: impl FnMut(T) -> std::result::Result<(), E>,
) -> std::result::Result<(), E> {
    let mut first_error = None;
    for reading in readings {
        match set(reading) {
            Ok(()) => return Ok(()),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }
    first_error.map_or(Ok(()), Err)
}

impl SolverSession for GurobiSession {
    fn set_model_name(&mut self, name: &str) -> Result<()> {
        self.model
            .set_attr(attr::ModelName, name.to_string())
            .map_err(|e| SolveError::solver("Failed to set model name", e))?;
        self.update("Failed to update model after setting its name")
    }

    fn set_param(&mut self, name: &str, value: &str) -> Result<()> {
        self.try_set_param(name, value)
            .map_err(|e| SolveError::InvalidParameter {
                name: name.to_string(),
                value: value.to_string(),
                details: e.to_string(),
            })
    }

    fn add_vars(&mut self, columns: &[ColumnSpec]) -> Result<()> {
        for spec in columns {
            let vtype = match spec.var_type {
                ColumnType::Continuous => VarType::Continuous,
                ColumnType::Binary => VarType::Binary,
                ColumnType::Integer => VarType::Integer,
            };
            let var = self
                .model
                .add_var(
                    "",
                    vtype,
                    spec.objective,
                    to_gurobi_bound(spec.lower),
                    to_gurobi_bound(spec.upper),
                    std::iter::empty(),
                )
                .map_err(|e| SolveError::solver("Failed to add variable", e))?;
            self.vars.push(var);
        }
        self.update("Failed to update model after adding variables")
    }

    fn set_model_sense(&mut self, sense: Direction) -> Result<()> {
        let sense = match sense {
            Direction::Minimize => ModelSense::Minimize,
            Direction::Maximize => ModelSense::Maximize,
        };
        self.model
            .set_attr(attr::ModelSense, sense)
            .map_err(|e| SolveError::solver("Failed to set model sense", e))?;
        self.update("Failed to update model after setting its sense")
    }

    fn add_constrs(
        &mut self,
        lhs: Vec<LinExpr>,
        senses: &[ConstraintSense],
        rhs: &[f64],
        names: &[String],
    ) -> Result<()> {
        let rows = lhs.into_iter().zip(senses.iter()).zip(rhs.iter()).zip(names.iter());
        for (((expr, sense), &bound), name) in rows {
            let mut row = grb::expr::LinExpr::new();
            for (col, coefficient) in expr.terms() {
                row.add_term(coefficient, self.vars[col]);
            }
            let constraint = match sense {
                ConstraintSense::LessEqual => c!(row <= bound),
                ConstraintSense::Equal => c!(row == bound),
                ConstraintSense::GreaterEqual => c!(row >= bound),
            };
            self.model
                .add_constr(name, constraint)
                .map_err(|e| SolveError::solver("Failed to add constraint", e))?;
        }
        self.update("Failed to update model after adding constraints")
    }

    fn optimize(&mut self) -> Result<()> {
        self.model
            .optimize()
            .map_err(|e| SolveError::solver("Failed to optimize", e))
    }

    fn status(&self) -> Result<i32> {
        let status = self
            .model
            .status()
            .map_err(|e| SolveError::solver("Failed to get model status", e))?;
        Ok(status as i32)
    }

    fn solution_count(&self) -> Result<usize> {
        let count = self
            .model
            .get_attr(attr::SolCount)
            .map_err(|e| SolveError::solver("Failed to get solution count", e))?;
        Ok(count.max(0) as usize)
    }

    fn select_solution(&mut self, k: usize) -> Result<()> {
        debug!("Selecting Gurobi pool solution {}", k);
        self.model
            .set_param(param::SolutionNumber, k as i32)
            .map_err(|e| SolveError::solver("Failed to select pool solution", e))
    }

    fn num_vars(&self) -> usize {
        self.vars.len()
    }

    fn var_objective(&self, j: usize) -> Result<f64> {
        self.model
            .get_obj_attr(attr::Obj, self.var(j)?)
            .map_err(|e| SolveError::solver("Failed to read objective coefficient", e))
    }

    fn var_pool_value(&self, j: usize) -> Result<f64> {
        self.model
            .get_obj_attr(attr::Xn, self.var(j)?)
            .map_err(|e| SolveError::solver("Failed to read pool solution value", e))
    }

    fn statistics(&self) -> Result<SolveStatistics> {
        let read = |e: grb::Error| SolveError::solver("Failed to read solve statistics", e);
        Ok(SolveStatistics {
            runtime: self.model.get_attr(attr::Runtime).map_err(read)?,
            itercount: self.model.get_attr(attr::IterCount).map_err(read)?,
            baritercount: self.model.get_attr(attr::BarIterCount).map_err(read)? as f64,
            nodecount: self.model.get_attr(attr::NodeCount).map_err(read)?,
        })
    }
}
