//! Assembly of a triplet matrix into per-row linear expressions.

use indexmap::IndexMap;

use crate::domain::model::Model;

/// Sum of `coefficient * variable` terms, keyed by column index.
///
/// Terms keep the order in which their column was first added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinExpr {
    terms: IndexMap<usize, f64>,
}

impl LinExpr {
    pub fn new() -> Self {
        LinExpr::default()
    }

    /// Add `coefficient * x[col]`, summing with any existing term for `col`
    pub fn add_term(&mut self, col: usize, coefficient: f64) {
        *self.terms.entry(col).or_insert(0.0) += coefficient;
    }

    /// Coefficient of `x[col]`; zero when the column does not appear
    pub fn coefficient(&self, col: usize) -> f64 {
        self.terms.get(&col).copied().unwrap_or(0.0)
    }

    pub fn terms(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.terms.iter().map(|(&col, &coefficient)| (col, coefficient))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Build one expression per constraint row.
///
/// Every one of the `nrow` rows exists even if no triplet touches it; such a row becomes the
/// trivial constraint `0 <sense> rhs`. Indices must already be validated against `nrow`.
pub fn assemble(a_rows: &[usize], a_cols: &[usize], a_vals: &[f64], nrow: usize) -> Vec<LinExpr> {
    let mut lhs = vec![LinExpr::new(); nrow];
    for ((&row, &col), &val) in a_rows.iter().zip(a_cols.iter()).zip(a_vals.iter()) {
        lhs[row].add_term(col, val);
    }
    lhs
}

/// Assemble the constraint rows of a validated model
pub fn assemble_rows(model: &Model) -> Vec<LinExpr> {
    assemble(&model.a_rows, &model.a_cols, &model.a_vals, model.nrow())
}
