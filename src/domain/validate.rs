use crate::domain::error::{Result, SolveError};
use crate::models::ModelDescription;

/// Check the shape invariants of a model description.
///
/// Returns the first inconsistency found. Tag contents are checked when the description is
/// converted into a [`crate::domain::model::Model`].
pub fn validate_model(model: &ModelDescription) -> Result<()> {
    let ncol = model.obj.len();
    let nrow = model.rhs.len();
    let nnz = model.a_rows.len();

    if model.a_cols.len() != nnz || model.a_vals.len() != nnz {
        return Err(SolveError::InvalidModel(format!(
            "Triplet lengths differ: A_rows has {}, A_cols has {}, A_vals has {}",
            nnz,
            model.a_cols.len(),
            model.a_vals.len(),
        )));
    }

    if model.vtype.len() != ncol {
        return Err(SolveError::InvalidModel(format!(
            "vtype has {} entries but obj has {}",
            model.vtype.len(),
            ncol,
        )));
    }

    if model.sense.len() != nrow {
        return Err(SolveError::InvalidModel(format!(
            "sense has {} entries but rhs has {}",
            model.sense.len(),
            nrow,
        )));
    }

    for (name, bounds) in [("lb", &model.lb), ("ub", &model.ub)] {
        if !bounds.is_empty() && bounds.len() != ncol {
            return Err(SolveError::InvalidModel(format!(
                "Error processing lb and ub data: {} has {} entries, expected 0 or {}",
                name,
                bounds.len(),
                ncol,
            )));
        }
    }

    for (i, (&row, &col)) in model.a_rows.iter().zip(model.a_cols.iter()).enumerate() {
        if row >= nrow {
            return Err(SolveError::InvalidModel(format!(
                "Triplet {} has row index {} but the model has {} rows",
                i, row, nrow,
            )));
        }
        if col >= ncol {
            return Err(SolveError::InvalidModel(format!(
                "Triplet {} has column index {} but the model has {} columns",
                i, col, ncol,
            )));
        }
    }

    Ok(())
}

/// Pair parameter names with their values by position.
pub fn pair_parameters(names: &[String], values: &[String]) -> Result<Vec<(String, String)>> {
    if names.len() != values.len() {
        return Err(SolveError::InvalidModel(format!(
            "Got {} parameter names but {} parameter values",
            names.len(),
            values.len(),
        )));
    }

    Ok(names.iter().cloned().zip(values.iter().cloned()).collect())
}
