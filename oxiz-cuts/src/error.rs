//! Errors for cut target selection.

use crate::term::ColumnId;
use thiserror::Error;

/// Reasons a column cannot be used as the pivot of a Gomory cut.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CutError {
    /// The column has no row, so it is not basic.
    #[error("column {0} is not basic")]
    NotBasic(ColumnId),
    /// The column is not integer-typed.
    #[error("column {0} is not an integer column")]
    NotInteger(ColumnId),
    /// The column's value is already integral.
    #[error("column {0} already has an integral value")]
    IntegralValue(ColumnId),
    /// A non-basic column of the row is strictly between its bounds.
    #[error("column {col} in the row of {pivot} is not at a bound")]
    NotAtBound {
        /// Pivot column.
        pivot: ColumnId,
        /// Offending row column.
        col: ColumnId,
    },
    /// A non-basic column of the row carries an infinitesimal.
    #[error("column {col} in the row of {pivot} has an infinitesimal value")]
    Infinitesimal {
        /// Pivot column.
        pivot: ColumnId,
        /// Offending row column.
        col: ColumnId,
    },
}

/// Result type for cut target selection.
pub type CutResult<T> = Result<T, CutError>;
