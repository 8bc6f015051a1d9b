use serde::{Deserialize, Serialize};

use crate::domain::status::{EarlyExit, SolveStatus};

// ---------- API (wire) types: owned & serde-friendly ----------

/// A mixed-integer linear model as supplied by the caller.
///
/// The constraint matrix is given as triplets: `A_vals[i]` sits at `(A_rows[i], A_cols[i])`.
/// `rhs` fixes the number of constraints and `obj` the number of variables.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ModelDescription {
    #[serde(rename = "A_rows")]
    pub a_rows: Vec<usize>,
    #[serde(rename = "A_cols")]
    pub a_cols: Vec<usize>,
    #[serde(rename = "A_vals")]
    pub a_vals: Vec<f64>,
    pub obj: Vec<f64>,
    pub rhs: Vec<f64>,
    #[serde(default)]
    pub ub: Vec<f64>,
    #[serde(default)]
    pub lb: Vec<f64>,
    pub vtype: Vec<String>,
    pub sense: Vec<String>,
    pub modelsense: String,
    #[serde(default)]
    pub modelname: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SolveRequest {
    pub model: ModelDescription,
    #[serde(default)]
    pub param_names: Vec<String>,
    #[serde(default)]
    pub param_vals: Vec<String>,
    #[serde(rename = "NumberSolutions")]
    pub number_solutions: usize,
    #[serde(default)]
    pub verbose: bool,
    /// Backend override; the server's configured default is used when absent
    #[serde(default)]
    pub solver: Option<String>,
}

// ---------- API response types ----------

/// Full result of a solve that reached extraction.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub status: SolveStatus,
    pub runtime: f64,
    pub itercount: f64,
    pub baritercount: f64,
    pub nodecount: f64,
    pub objval: Vec<f64>,
    pub x: Vec<Vec<f64>>,
}

/// What a solve call returns: either the full result or just a status.
///
/// Serialized untagged, so the early-exit form is exactly `{"status": ...}`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum SolveOutcome {
    Stopped { status: EarlyExit },
    Solved(SolveResult),
}

impl SolveOutcome {
    /// The status label reported to the caller
    pub fn status_label(&self) -> String {
        match self {
            SolveOutcome::Stopped { status } => status.to_string(),
            SolveOutcome::Solved(result) => result.status.to_string(),
        }
    }

    pub fn solved(&self) -> Option<&SolveResult> {
        match self {
            SolveOutcome::Solved(result) => Some(result),
            SolveOutcome::Stopped { .. } => None,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ApiError {
    pub error: String,
}
