use crate::{Retcode, Status};
use thiserror::Error;

/// The solver could not give a definitive feasible/infeasible answer.
///
/// This is never folded into infeasibility: pruning on a failed solve would cut
/// off regions of the search tree that may well contain feasible points.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverFailure {
    /// A SCIP call returned an error code.
    #[error("SCIP call failed: {0}")]
    Retcode(#[from] Retcode),
    /// SCIP stopped with a status that is neither optimal nor infeasible.
    #[error("solve ended without a definitive answer (status {0:?})")]
    Indeterminate(Status),
    /// The model has no finite optimum.
    #[error("model is unbounded")]
    Unbounded,
    /// An optimal status was reported but no primal solution is stored.
    #[error("optimal status without a primal solution")]
    MissingSolution,
    /// The solution does not have one value per variable and, when asked for,
    /// one dual per row of the model it answers.
    #[error(
        "solution of {model} has {values} values and {duals} duals, expected {n_vars} and {n_rows}"
    )]
    MalformedSolution {
        /// Name of the solved model.
        model: String,
        /// Number of variables in the model.
        n_vars: usize,
        /// Number of values returned.
        values: usize,
        /// Number of rows in the model, or 0 if no duals were asked for.
        n_rows: usize,
        /// Number of duals returned.
        duals: usize,
    },
}

/// Errors surfaced by the branch-and-price search.
#[derive(Debug, Error)]
pub enum BnpError {
    /// The solver collaborator failed.
    #[error(transparent)]
    Solver(#[from] SolverFailure),

    /// A column does not have one entry per master row.
    #[error("column has {found} rows, expected {expected}")]
    ColumnLength {
        /// Number of master rows.
        expected: usize,
        /// Length of the offending column.
        found: usize,
    },

    /// The problem catalog is unusable.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Reading a catalog or settings file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catalog or settings file is not valid TOML for its schema.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for branch-and-price operations.
pub type BnpResult<T> = Result<T, BnpError>;
