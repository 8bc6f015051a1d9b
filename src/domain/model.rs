use crate::domain::error::{Result, SolveError};
use crate::domain::validate::validate_model;
use crate::models::ModelDescription;

/// Default lower bound for every variable type
pub const DEFAULT_LOWER_BOUND: f64 = 0.0;

/// Type of decision variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Continuous,
    Binary,
    Integer,
}

impl VarType {
    /// Parse a type tag; only the first character counts
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.chars().next()? {
            'C' => Some(VarType::Continuous),
            'B' => Some(VarType::Binary),
            'I' => Some(VarType::Integer),
            _ => None,
        }
    }

    pub fn default_upper_bound(&self) -> f64 {
        match self {
            VarType::Binary => 1.0,
            VarType::Continuous | VarType::Integer => f64::INFINITY,
        }
    }
}

/// Relation between a constraint's left-hand side and its rhs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    LessEqual,
    Equal,
    GreaterEqual,
}

impl ConstraintSense {
    /// Parse a sense tag; only the first character counts, so `"<="` reads as `<`
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.chars().next()? {
            '<' | '≤' => Some(ConstraintSense::LessEqual),
            '=' => Some(ConstraintSense::Equal),
            '>' | '≥' => Some(ConstraintSense::GreaterEqual),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSense {
    Minimize,
    Maximize,
}

impl ModelSense {
    /// `"min"` minimizes; every other value maximizes
    pub fn from_label(label: &str) -> Self {
        if label == "min" {
            ModelSense::Minimize
        } else {
            ModelSense::Maximize
        }
    }
}

/// Which bound vectors the caller supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundPresence {
    Both,
    LowerOnly,
    UpperOnly,
    Neither,
}

/// A variable ready to be created in a solver session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub objective: f64,
    pub lower: f64,
    pub upper: f64,
    pub var_type: VarType,
}

/// A validated model with parsed tags.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: String,
    pub a_rows: Vec<usize>,
    pub a_cols: Vec<usize>,
    pub a_vals: Vec<f64>,
    pub obj: Vec<f64>,
    pub rhs: Vec<f64>,
    pub lb: Vec<f64>,
    pub ub: Vec<f64>,
    pub var_types: Vec<VarType>,
    pub senses: Vec<ConstraintSense>,
    pub model_sense: ModelSense,
}

impl Model {
    pub fn ncol(&self) -> usize {
        self.obj.len()
    }

    pub fn nrow(&self) -> usize {
        self.rhs.len()
    }

    pub fn bound_presence(&self) -> BoundPresence {
        match (self.lb.is_empty(), self.ub.is_empty()) {
            (false, false) => BoundPresence::Both,
            (false, true) => BoundPresence::LowerOnly,
            (true, false) => BoundPresence::UpperOnly,
            (true, true) => BoundPresence::Neither,
        }
    }

    /// One column per objective entry; a missing bound vector falls back to the type default
    pub fn columns(&self) -> Vec<ColumnSpec> {
        let presence = self.bound_presence();
        self.obj
            .iter()
            .zip(self.var_types.iter())
            .enumerate()
            .map(|(j, (&objective, &var_type))| {
                let (lower, upper) = match presence {
                    BoundPresence::Both => (self.lb[j], self.ub[j]),
                    BoundPresence::LowerOnly => (self.lb[j], var_type.default_upper_bound()),
                    BoundPresence::UpperOnly => (DEFAULT_LOWER_BOUND, self.ub[j]),
                    BoundPresence::Neither => {
                        (DEFAULT_LOWER_BOUND, var_type.default_upper_bound())
                    }
                };
                ColumnSpec {
                    objective,
                    lower,
                    upper,
                    var_type,
                }
            })
            .collect()
    }

    /// Deterministic constraint names: `C0`, `C1`, ...
    pub fn constraint_names(&self) -> Vec<String> {
        (0..self.nrow()).map(|i| format!("C{}", i)).collect()
    }
}

impl TryFrom<ModelDescription> for Model {
    type Error = SolveError;

    fn try_from(description: ModelDescription) -> Result<Self> {
        validate_model(&description)?;

        let var_types = description
            .vtype
            .iter()
            .enumerate()
            .map(|(j, tag)| {
                VarType::from_tag(tag).ok_or_else(|| {
                    SolveError::InvalidModel(format!(
                        "Unknown variable type '{}' for variable {}",
                        tag, j
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let senses = description
            .sense
            .iter()
            .enumerate()
            .map(|(i, tag)| {
                ConstraintSense::from_tag(tag).ok_or_else(|| {
                    SolveError::InvalidModel(format!(
                        "Unknown constraint sense '{}' for row {}",
                        tag, i
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Model {
            name: description.modelname,
            a_rows: description.a_rows,
            a_cols: description.a_cols,
            a_vals: description.a_vals,
            obj: description.obj,
            rhs: description.rhs,
            lb: description.lb,
            ub: description.ub,
            var_types,
            senses,
            model_sense: ModelSense::from_label(&description.modelsense),
        })
    }
}
