use thiserror::Error;

/// Result type for solve operations
pub type Result<T> = std::result::Result<T, SolveError>;

/// Errors that abort a solve call.
///
/// Non-optimal termination is not an error: it is reported through the outcome's status.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The model description is inconsistent; nothing was sent to the solver
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// The solver rejected a parameter name or value
    #[error("Invalid parameter '{name}' = '{value}': {details}")]
    InvalidParameter {
        name: String,
        value: String,
        details: String,
    },

    /// A solver call failed while building, solving or querying the model
    #[error("Solver error: {0}")]
    Solver(String),
}

impl SolveError {
    pub fn solver(context: &str, err: impl std::fmt::Display) -> Self {
        SolveError::Solver(format!("{}: {}", context, err))
    }

    /// Whether the caller supplied bad input, as opposed to the solver failing
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SolveError::InvalidModel(_) | SolveError::InvalidParameter { .. }
        )
    }
}
