//! Branch-and-price for the two-stage two-dimensional cutting stock problem.
//!
//! Stock sheets are first cut into strips (outer stage) and strips are then cut
//! into items (inner stage). The set-covering master problem has one column per
//! stock-cutting pattern and one per strip-cutting pattern; columns are generated
//! on demand by two nested knapsack pricing problems and the LP relaxation is
//! embedded in a depth-first branch-and-bound search.
//!
//! ```no_run
//! use bnp2d::prelude::*;
//!
//! let catalog = Catalog::load("data/small.toml").unwrap();
//! let settings = Settings::default();
//! let mut solver = ScipSolver::new(settings.solver.clone());
//! let result = BranchAndPrice::new(&catalog, &settings, &mut solver, MostFractional)
//!     .solve(ColumnPool::initial(&catalog))
//!     .unwrap();
//! println!("{:?}", result.incumbent);
//! ```
#![warn(missing_docs)]

/// Re-exported raw bindings to SCIP.
pub use scip_sys as ffi;

/// Column pools and column identities.
pub mod column;
pub use column::*;

/// Problem catalog: stock, strip types and item types.
pub mod catalog;
pub use catalog::*;

/// Error types.
pub mod error;
pub use error::*;

/// Settings for pricing, search and the solver backend.
pub mod settings;
pub use settings::*;

/// Solver-independent linear model description.
pub mod model;
pub use model::*;

/// Builders for variables and rows of a [`LinearModel`].
pub mod builder;

/// Solutions returned by a solver.
pub mod solution;
pub use solution::*;

/// SCIP return codes.
pub mod retcode;
pub use retcode::*;

/// SCIP solving status.
pub mod status;
pub use status::*;

/// The solver collaborator and its SCIP implementation.
pub mod solver;
pub use solver::*;

mod scip;

/// Restricted master problem.
pub mod master;
pub use master::*;

/// Outer and inner pricing subproblems.
pub mod pricing;
pub use pricing::*;

/// Branch-and-bound nodes and their column generation loop.
pub mod node;
pub use node::*;

/// Rules for choosing the variable to branch on.
pub mod branchrule;
pub use branchrule::*;

/// Depth-first branch-and-price driver.
pub mod tree;
pub use tree::*;

#[cfg(test)]
pub(crate) mod testing;

/// Commonly used items.
pub mod prelude {
    pub use crate::builder::row::row;
    pub use crate::builder::var::var;
    pub use crate::*;
}

/// Calls a SCIP function and returns from the enclosing function with the
/// corresponding [`Retcode`] if it did not succeed.
#[macro_export]
macro_rules! scip_call {
    ($res:expr) => {
        let res = unsafe { $res };
        let retcode = $crate::retcode::Retcode::from(res);
        if retcode != $crate::retcode::Retcode::Okay {
            return Err(retcode);
        }
    };
}
