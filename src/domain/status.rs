//! Translation of raw solver status codes.
//!
//! Raw codes follow the Gurobi numbering; backends with their own status type convert into it.
//! Translation happens in two tiers: [`gate`] decides whether solutions are extracted at all,
//! and [`SolveStatus::from_code`] produces the label reported once extraction has run.

use serde::{Serialize, Serializer};
use std::fmt;

pub const LOADED: i32 = 1;
pub const OPTIMAL: i32 = 2;
pub const INFEASIBLE: i32 = 3;
pub const INF_OR_UNBD: i32 = 4;
pub const UNBOUNDED: i32 = 5;
pub const CUTOFF: i32 = 6;
pub const ITERATION_LIMIT: i32 = 7;
pub const NODE_LIMIT: i32 = 8;
pub const TIME_LIMIT: i32 = 9;
pub const SOLUTION_LIMIT: i32 = 10;
pub const INTERRUPTED: i32 = 11;
pub const NUMERIC: i32 = 12;
pub const SUBOPTIMAL: i32 = 13;
pub const INPROGRESS: i32 = 14;

/// Terminal statuses that end a solve before any solution is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EarlyExit {
    InfeasibleOrUnbounded,
    Infeasible,
    Unbounded,
    /// Any other non-optimal code, kept for diagnosis
    Error(i32),
}

impl fmt::Display for EarlyExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EarlyExit::InfeasibleOrUnbounded => write!(f, "INFEASIBLE_OR_UNBOUNDED"),
            EarlyExit::Infeasible => write!(f, "INFEASIBLE"),
            EarlyExit::Unbounded => write!(f, "UNBOUNDED"),
            EarlyExit::Error(code) => write!(f, "ERROR_{}", code),
        }
    }
}

impl Serialize for EarlyExit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Decide whether a finished solve proceeds to solution extraction.
///
/// Only a raw `OPTIMAL` extracts. Limit statuses such as `TIME_LIMIT` may leave incumbents in
/// the pool, but they still stop here.
pub fn gate(code: i32) -> Result<(), EarlyExit> {
    match code {
        OPTIMAL => Ok(()),
        INF_OR_UNBD => Err(EarlyExit::InfeasibleOrUnbounded),
        INFEASIBLE => Err(EarlyExit::Infeasible),
        UNBOUNDED => Err(EarlyExit::Unbounded),
        other => Err(EarlyExit::Error(other)),
    }
}

/// Status label of a solve that reached extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Loaded,
    Optimal,
    Infeasible,
    InfOrUnbd,
    Unbounded,
    Cutoff,
    IterationLimit,
    NodeLimit,
    TimeLimit,
    SolutionLimit,
    Interrupted,
    Numeric,
    Suboptimal,
    InProgress,
    /// Reported as `UNKNOWN_ERROR`; the raw code is kept
    Unknown(i32),
}

impl SolveStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            LOADED => SolveStatus::Loaded,
            OPTIMAL => SolveStatus::Optimal,
            INFEASIBLE => SolveStatus::Infeasible,
            INF_OR_UNBD => SolveStatus::InfOrUnbd,
            UNBOUNDED => SolveStatus::Unbounded,
            CUTOFF => SolveStatus::Cutoff,
            ITERATION_LIMIT => SolveStatus::IterationLimit,
            NODE_LIMIT => SolveStatus::NodeLimit,
            TIME_LIMIT => SolveStatus::TimeLimit,
            SOLUTION_LIMIT => SolveStatus::SolutionLimit,
            INTERRUPTED => SolveStatus::Interrupted,
            NUMERIC => SolveStatus::Numeric,
            SUBOPTIMAL => SolveStatus::Suboptimal,
            INPROGRESS => SolveStatus::InProgress,
            other => SolveStatus::Unknown(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SolveStatus::Loaded => "LOADED",
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::InfOrUnbd => "INF_OR_UNBD",
            SolveStatus::Unbounded => "UNBOUNDED",
            SolveStatus::Cutoff => "CUTOFF",
            SolveStatus::IterationLimit => "ITERATION_LIMIT",
            SolveStatus::NodeLimit => "NODE_LIMIT",
            SolveStatus::TimeLimit => "TIME_LIMIT",
            SolveStatus::SolutionLimit => "SOLUTION_LIMIT",
            SolveStatus::Interrupted => "INTERRUPTED",
            SolveStatus::Numeric => "NUMERIC",
            SolveStatus::Suboptimal => "SUBOPTIMAL",
            SolveStatus::InProgress => "INPROGRESS",
            SolveStatus::Unknown(_) => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SolveStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
