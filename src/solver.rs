use tracing::trace;

use crate::scip::ScipPtr;
use crate::{LinearModel, Solution, SolveOutcome, SolverFailure, SolverSettings, Status};

/// The external optimizer, seen through a request/response contract.
///
/// Implementations build a fresh model for every call and release it before
/// returning, whatever the outcome.
pub trait Solver {
    /// Solves `model` to optimality or proves it infeasible.
    ///
    /// Duals are only filled in when [`LinearModel::is_continuous`] holds. Any
    /// other ending of the solve is a [`SolverFailure`].
    fn solve(&mut self, model: &LinearModel) -> Result<SolveOutcome, SolverFailure>;
}

impl<S: Solver + ?Sized> Solver for &mut S {
    fn solve(&mut self, model: &LinearModel) -> Result<SolveOutcome, SolverFailure> {
        (**self).solve(model)
    }
}

/// A [`Solver`] backed by SCIP, one SCIP instance per call.
#[derive(Debug, Clone, Default)]
pub struct ScipSolver {
    settings: SolverSettings,
    n_solves: usize,
}

impl ScipSolver {
    /// Creates a SCIP-backed solver.
    pub fn new(settings: SolverSettings) -> Self {
        ScipSolver {
            settings,
            n_solves: 0,
        }
    }

    /// Number of models solved so far.
    pub fn n_solves(&self) -> usize {
        self.n_solves
    }
}

impl Solver for ScipSolver {
    fn solve(&mut self, model: &LinearModel) -> Result<SolveOutcome, SolverFailure> {
        self.n_solves += 1;
        let continuous = model.is_continuous();

        let mut scip = ScipPtr::new()?;
        if self.settings.quiet {
            scip.hide_output();
        }
        scip.include_default_plugins()?;
        scip.create_prob(model.name())?;
        if let Some(time_limit) = self.settings.time_limit {
            scip.set_real_param("limits/time", time_limit)?;
        }
        if continuous {
            scip.disable_reductions()?;
        }
        scip.set_obj_sense(model.sense())?;

        let vars = model
            .vars()
            .iter()
            .map(|spec| scip.create_var(spec))
            .collect::<Result<Vec<_>, _>>()?;
        let conss = model
            .rows()
            .iter()
            .map(|spec| scip.create_linear_cons(spec, &vars))
            .collect::<Result<Vec<_>, _>>()?;

        scip.solve()?;
        let status = scip.status();
        trace!(event = "scip_solve", model = model.name(), ?status);

        match status {
            Status::Optimal => {
                let sol = scip.best_sol().ok_or(SolverFailure::MissingSolution)?;
                let values = vars.iter().map(|&var| scip.sol_val(sol, var)).collect();
                let duals = if continuous {
                    conss
                        .iter()
                        .map(|&cons| scip.dual_sol(cons))
                        .collect::<Result<Vec<_>, _>>()?
                } else {
                    Vec::new()
                };
                Ok(SolveOutcome::Optimal(Solution {
                    objective: scip.sol_obj_val(sol),
                    values,
                    duals,
                }))
            }
            Status::Infeasible => Ok(SolveOutcome::Infeasible),
            Status::Unbounded => Err(SolverFailure::Unbounded),
            other => Err(SolverFailure::Indeterminate(other)),
        }
    }
}
