//! Test helpers: model fixtures and a scripted solver that records every session call.

use std::sync::{Arc, Mutex};

use crate::domain::assemble::LinExpr;
use crate::domain::error::{Result, SolveError};
use crate::domain::model::{ColumnSpec, ConstraintSense, ModelSense};
use crate::domain::solver::{SolveStatistics, Solver, SolverSession};
use crate::models::ModelDescription;

/// `min x0 + x1` s.t. `x0 + x1 <= 10`, both continuous with lower bound 0
pub fn two_var_model() -> ModelDescription {
    ModelDescription {
        a_rows: vec![0, 0],
        a_cols: vec![0, 1],
        a_vals: vec![1.0, 1.0],
        obj: vec![1.0, 1.0],
        rhs: vec![10.0],
        ub: vec![],
        lb: vec![0.0, 0.0],
        vtype: vec!["C".to_string(), "C".to_string()],
        sense: vec!["<".to_string()],
        modelsense: "min".to_string(),
        modelname: "trivial".to_string(),
    }
}

/// A session call as seen by the scripted solver
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetModelName(String),
    SetParam(String, String),
    AddVars(usize),
    SetModelSense(ModelSense),
    AddConstrs { count: usize },
    Optimize,
    SelectSolution(usize),
}

#[derive(Debug, Clone, Default)]
pub struct RecordedConstraints {
    pub lhs: Vec<LinExpr>,
    pub senses: Vec<ConstraintSense>,
    pub rhs: Vec<f64>,
    pub names: Vec<String>,
}

#[derive(Debug, Default)]
struct Script {
    status: i32,
    final_status: Option<i32>,
    status_queries: usize,
    pool: Vec<Vec<f64>>,
    rejected_param: Option<String>,
    fail_optimize: bool,
    calls: Vec<Call>,
    constraints: RecordedConstraints,
    open_sessions: usize,
}

/// Solver double that serves a scripted status and solution pool.
#[derive(Clone)]
pub struct ScriptedSolver {
    script: Arc<Mutex<Script>>,
}

pub const SCRIPTED_STATISTICS: SolveStatistics = SolveStatistics {
    runtime: 0.25,
    itercount: 7.0,
    baritercount: 0.0,
    nodecount: 1.0,
};

impl ScriptedSolver {
    pub fn new(status: i32) -> Self {
        ScriptedSolver {
            script: Arc::new(Mutex::new(Script {
                status,
                ..Script::default()
            })),
        }
    }

    pub fn with_pool(self, pool: Vec<Vec<f64>>) -> Self {
        self.script.lock().unwrap().pool = pool;
        self
    }

    /// Status returned by every query after the first one
    pub fn with_final_status(self, status: i32) -> Self {
        self.script.lock().unwrap().final_status = Some(status);
        self
    }

    pub fn reject_param(self, name: &str) -> Self {
        self.script.lock().unwrap().rejected_param = Some(name.to_string());
        self
    }

    pub fn fail_optimize(self) -> Self {
        self.script.lock().unwrap().fail_optimize = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn constraints(&self) -> RecordedConstraints {
        self.script.lock().unwrap().constraints.clone()
    }

    pub fn open_sessions(&self) -> usize {
        self.script.lock().unwrap().open_sessions
    }
}

impl Solver for ScriptedSolver {
    fn open_session(&self) -> Result<Box<dyn SolverSession>> {
        self.script.lock().unwrap().open_sessions += 1;
        Ok(Box::new(ScriptedSession {
            script: Arc::clone(&self.script),
            columns: Vec::new(),
            selected: 0,
        }))
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}

struct ScriptedSession {
    script: Arc<Mutex<Script>>,
    columns: Vec<ColumnSpec>,
    selected: usize,
}

impl ScriptedSession {
    fn record(&self, call: Call) {
        self.script.lock().unwrap().calls.push(call);
    }
}

impl SolverSession for ScriptedSession {
    fn set_model_name(&mut self, name: &str) -> Result<()> {
        self.record(Call::SetModelName(name.to_string()));
        Ok(())
    }

    fn set_param(&mut self, name: &str, value: &str) -> Result<()> {
        let rejected = self.script.lock().unwrap().rejected_param.clone();
        if rejected.as_deref() == Some(name) {
            return Err(SolveError::InvalidParameter {
                name: name.to_string(),
                value: value.to_string(),
                details: "Unknown parameter".to_string(),
            });
        }
        self.record(Call::SetParam(name.to_string(), value.to_string()));
        Ok(())
    }

    fn add_vars(&mut self, columns: &[ColumnSpec]) -> Result<()> {
        self.columns.extend_from_slice(columns);
        self.record(Call::AddVars(columns.len()));
        Ok(())
    }

    fn set_model_sense(&mut self, sense: ModelSense) -> Result<()> {
        self.record(Call::SetModelSense(sense));
        Ok(())
    }

    fn add_constrs(
        &mut self,
        lhs: Vec<LinExpr>,
        senses: &[ConstraintSense],
        rhs: &[f64],
        names: &[String],
    ) -> Result<()> {
        self.record(Call::AddConstrs { count: lhs.len() });
        self.script.lock().unwrap().constraints = RecordedConstraints {
            lhs,
            senses: senses.to_vec(),
            rhs: rhs.to_vec(),
            names: names.to_vec(),
        };
        Ok(())
    }

    fn optimize(&mut self) -> Result<()> {
        self.record(Call::Optimize);
        if self.script.lock().unwrap().fail_optimize {
            return Err(SolveError::solver("Failed to optimize", "scripted failure"));
        }
        Ok(())
    }

    fn status(&self) -> Result<i32> {
        let mut script = self.script.lock().unwrap();
        script.status_queries += 1;
        if script.status_queries > 1 {
            Ok(script.final_status.unwrap_or(script.status))
        } else {
            Ok(script.status)
        }
    }

    fn solution_count(&self) -> Result<usize> {
        Ok(self.script.lock().unwrap().pool.len())
    }

    fn select_solution(&mut self, k: usize) -> Result<()> {
        self.record(Call::SelectSolution(k));
        self.selected = k;
        Ok(())
    }

    fn num_vars(&self) -> usize {
        self.columns.len()
    }

    fn var_objective(&self, j: usize) -> Result<f64> {
        Ok(self.columns[j].objective)
    }

    fn var_pool_value(&self, j: usize) -> Result<f64> {
        Ok(self.script.lock().unwrap().pool[self.selected][j])
    }

    fn statistics(&self) -> Result<SolveStatistics> {
        Ok(SCRIPTED_STATISTICS)
    }
}

impl Drop for ScriptedSession {
    fn drop(&mut self) {
        if let Ok(mut script) = self.script.lock() {
            script.open_sessions -= 1;
        }
    }
}
