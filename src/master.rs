use tracing::debug;

use crate::builder::row::row;
use crate::builder::var::var;
use crate::{
    Catalog, ColumnPool, ColumnRef, Fixings, LinearModel, SolveOutcome, Solver, SolverFailure,
};

/// Name of every restricted master model handed to the solver.
pub const MASTER: &str = "master";

/// Optimal LP solution of a restricted master problem.
///
/// The objective is the value of the master over the columns generated so
/// far, not a proven lower bound for the node.
#[derive(Debug, Clone, PartialEq)]
pub struct LpRelaxation {
    /// Objective value: the (fractional) number of stock sheets.
    pub objective: f64,
    /// One value per column, in master variable order (stock columns, then strip columns).
    pub primal: Vec<f64>,
    /// One dual price per row: strip rows, then item rows.
    pub duals: Vec<f64>,
    n_strip_types: usize,
}

impl LpRelaxation {
    /// Dual prices of the strip rows, the outer pricing values.
    pub fn strip_duals(&self) -> &[f64] {
        &self.duals[..self.n_strip_types]
    }

    /// Dual prices of the item rows, the inner pricing values.
    pub fn item_duals(&self) -> &[f64] {
        &self.duals[self.n_strip_types..]
    }

    /// LP value of a column of the pool this relaxation was solved for.
    pub fn value(&self, pool: &ColumnPool, col: ColumnRef) -> f64 {
        self.primal[pool.position(col)]
    }
}

/// Outcome of one master solve.
#[derive(Debug, Clone, PartialEq)]
pub enum MasterOutcome {
    /// No point satisfies the rows under the node's fixings.
    Infeasible,
    /// The LP optimum.
    Feasible(LpRelaxation),
}

/// Bounds of the master variable of `col` under `fixings`.
///
/// 1. the node's own branching variable is fixed to the node's value;
/// 2. a variable fixed by an ancestor keeps the recorded value;
/// 3. every other variable ranges over `[0, inf)`.
pub fn resolve_bounds(col: ColumnRef, fixings: &Fixings) -> (f64, f64) {
    if let Some(branch) = fixings.branch.filter(|b| b.column == col) {
        return (branch.value, branch.value);
    }
    if let Some(fixed) = fixings.inherited.iter().find(|f| f.column == col) {
        return (fixed.value, fixed.value);
    }
    (0.0, f64::INFINITY)
}

/// Builds the restricted master LP for the columns of `pool`.
///
/// Strip rows are `0 <= row`, item rows are `demand <= row`; stock columns cost
/// one sheet and strip columns are free. Integrality is not imposed: the master
/// is the LP relaxation that column generation works on.
pub fn build_master(catalog: &Catalog, pool: &ColumnPool, fixings: &Fixings) -> LinearModel {
    let mut model = LinearModel::new(MASTER).minimize();

    let vars: Vec<usize> = pool
        .iter()
        .map(|(col, _)| {
            let name = col.to_string();
            model.add(
                var()
                    .name(&name)
                    .obj(col.kind().cost())
                    .bounds(resolve_bounds(col, fixings)),
            )
        })
        .collect();

    let j_num = catalog.n_strip_types();
    for r in 0..pool.n_rows() {
        let (name, lhs) = if r < j_num {
            (format!("strip_{}", r + 1), 0.0)
        } else {
            let item = &catalog.item_types[r - j_num];
            (format!("item_{}", r - j_num + 1), f64::from(item.demand))
        };
        let coefs = pool
            .iter()
            .zip(&vars)
            .map(|((_, column), &var)| (var, column[r]));
        model.add(row().name(&name).expr(coefs).ge(lhs));
    }
    model
}

/// Builds the master for the current pool and solves it from scratch.
pub fn solve_master<S: Solver + ?Sized>(
    solver: &mut S,
    catalog: &Catalog,
    pool: &ColumnPool,
    fixings: &Fixings,
) -> Result<MasterOutcome, SolverFailure> {
    let model = build_master(catalog, pool, fixings);
    match solver.solve(&model)? {
        SolveOutcome::Infeasible => {
            debug!(event = "master_infeasible", columns = pool.len());
            Ok(MasterOutcome::Infeasible)
        }
        SolveOutcome::Optimal(sol) => {
            sol.check_shape(&model, true)?;
            debug!(
                event = "master_solved",
                objective = sol.objective,
                columns = pool.len(),
                fixed = fixings.len(),
            );
            Ok(MasterOutcome::Feasible(LpRelaxation {
                objective: sol.objective,
                primal: sol.values,
                duals: sol.duals,
                n_strip_types: catalog.n_strip_types(),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, ScriptedSolver};
    use crate::{BranchFixing, ColumnKind, ScipSolver, SolverSettings};

    const TOL: f64 = 1e-6;

    fn scenario(demand: u32) -> (Catalog, ColumnPool) {
        let catalog = testing::catalog(&[10.0], &[(5.0, demand)]);
        let mut pool = ColumnPool::for_catalog(&catalog);
        pool.push(ColumnKind::Stock, vec![1.0, 0.0]).unwrap();
        pool.push(ColumnKind::Strip, vec![-1.0, 2.0]).unwrap();
        (catalog, pool)
    }

    fn fix(column: ColumnRef, value: f64) -> BranchFixing {
        BranchFixing { column, value }
    }

    #[test]
    fn bounds_three_way_rule() {
        let fixings = Fixings {
            inherited: vec![fix(ColumnRef::Strip(0), 2.0), fix(ColumnRef::Stock(1), 0.0)],
            branch: Some(fix(ColumnRef::Stock(0), 3.0)),
        };
        assert_eq!(resolve_bounds(ColumnRef::Stock(0), &fixings), (3.0, 3.0));
        assert_eq!(resolve_bounds(ColumnRef::Strip(0), &fixings), (2.0, 2.0));
        assert_eq!(resolve_bounds(ColumnRef::Stock(1), &fixings), (0.0, 0.0));
        assert_eq!(
            resolve_bounds(ColumnRef::Strip(1), &fixings),
            (0.0, f64::INFINITY)
        );
    }

    #[test]
    fn branch_fixing_wins_over_inherited() {
        let fixings = Fixings {
            inherited: vec![fix(ColumnRef::Stock(0), 1.0)],
            branch: Some(fix(ColumnRef::Stock(0), 2.0)),
        };
        assert_eq!(resolve_bounds(ColumnRef::Stock(0), &fixings), (2.0, 2.0));
    }

    #[test]
    fn stock_and_strip_indices_do_not_collide() {
        // Stock(0) and Strip(0) are different variables even though both have index 0
        let fixings = Fixings {
            inherited: vec![fix(ColumnRef::Strip(0), 4.0)],
            branch: None,
        };
        assert_eq!(
            resolve_bounds(ColumnRef::Stock(0), &fixings),
            (0.0, f64::INFINITY)
        );
    }

    #[test]
    fn master_model_shape() {
        let (catalog, pool) = scenario(3);
        let fixings = Fixings {
            inherited: vec![],
            branch: Some(fix(ColumnRef::Strip(0), 1.0)),
        };
        let model = build_master(&catalog, &pool, &fixings);

        assert_eq!(model.name(), MASTER);
        assert!(model.is_continuous());
        let names: Vec<_> = model.vars().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Y_1", "X_1"]);
        assert_eq!(model.vars()[0].obj, 1.0);
        assert_eq!(model.vars()[1].obj, 0.0);
        assert!(model.vars()[1].is_fixed());
        assert_eq!(model.vars()[1].lb, 1.0);

        let strip_row = &model.rows()[0];
        assert_eq!((strip_row.lhs, strip_row.rhs), (0.0, f64::INFINITY));
        assert_eq!(strip_row.coefs, vec![(0, 1.0), (1, -1.0)]);
        let item_row = &model.rows()[1];
        assert_eq!((item_row.lhs, item_row.rhs), (3.0, f64::INFINITY));
        assert_eq!(item_row.coefs, vec![(1, 2.0)]);
    }

    #[test]
    fn relaxation_splits_duals() {
        let (catalog, pool) = scenario(3);
        let mut solver = ScriptedSolver::new([Ok(testing::optimal(
            1.5,
            &[1.5, 1.5],
            &[1.0, 0.5],
        ))]);
        let MasterOutcome::Feasible(lp) =
            solve_master(&mut solver, &catalog, &pool, &Fixings::default()).unwrap()
        else {
            panic!("expected a feasible master");
        };
        assert_eq!(lp.strip_duals(), &[1.0]);
        assert_eq!(lp.item_duals(), &[0.5]);
        assert_eq!(lp.value(&pool, ColumnRef::Strip(0)), 1.5);
        assert_eq!(solver.calls(), vec![MASTER]);
    }

    #[test]
    fn short_duals_are_a_failure() {
        let (catalog, pool) = scenario(3);
        let mut solver = ScriptedSolver::new([Ok(testing::optimal(1.5, &[1.5, 1.5], &[]))]);
        assert_eq!(
            solve_master(&mut solver, &catalog, &pool, &Fixings::default()),
            Err(SolverFailure::MalformedSolution {
                model: MASTER.to_string(),
                n_vars: 2,
                values: 2,
                n_rows: 2,
                duals: 0,
            })
        );
    }

    #[test]
    fn short_values_are_a_failure() {
        let (catalog, pool) = scenario(3);
        let mut solver = ScriptedSolver::new([Ok(testing::optimal(1.5, &[1.5], &[1.0, 0.5]))]);
        assert!(matches!(
            solve_master(&mut solver, &catalog, &pool, &Fixings::default()),
            Err(SolverFailure::MalformedSolution { values: 1, .. })
        ));
    }

    #[test]
    fn solver_failure_is_not_infeasibility() {
        let (catalog, pool) = scenario(3);
        let mut solver = ScriptedSolver::new([Err(SolverFailure::Unbounded)]);
        assert_eq!(
            solve_master(&mut solver, &catalog, &pool, &Fixings::default()),
            Err(SolverFailure::Unbounded)
        );
    }

    #[test]
    fn scip_meets_demand() {
        let (catalog, pool) = scenario(3);
        let mut solver = ScipSolver::new(SolverSettings::default());
        let MasterOutcome::Feasible(lp) =
            solve_master(&mut solver, &catalog, &pool, &Fixings::default()).unwrap()
        else {
            panic!("expected a feasible master");
        };

        assert!(lp.objective.is_finite());
        assert!((lp.objective - 1.5).abs() < TOL);
        assert!(2.0 * lp.value(&pool, ColumnRef::Strip(0)) >= 3.0 - TOL);
        assert_eq!(lp.duals.len(), 2);
        assert!(lp.duals.iter().all(|&d| d >= -TOL));
    }

    #[test]
    fn scip_zero_demand_needs_no_stock() {
        let (catalog, pool) = scenario(0);
        let mut solver = ScipSolver::new(SolverSettings::default());
        let MasterOutcome::Feasible(lp) =
            solve_master(&mut solver, &catalog, &pool, &Fixings::default()).unwrap()
        else {
            panic!("expected a feasible master");
        };
        assert!(lp.objective.abs() < TOL);
    }

    #[test]
    fn scip_resolve_reproduces_objective() {
        let (catalog, pool) = scenario(3);
        let mut solver = ScipSolver::new(SolverSettings::default());
        let first = solve_master(&mut solver, &catalog, &pool, &Fixings::default()).unwrap();
        let second = solve_master(&mut solver, &catalog, &pool, &Fixings::default()).unwrap();
        match (first, second) {
            (MasterOutcome::Feasible(a), MasterOutcome::Feasible(b)) => {
                assert!((a.objective - b.objective).abs() < TOL)
            }
            other => panic!("expected two feasible masters, got {other:?}"),
        }
    }

    #[test]
    fn scip_fixings_make_master_infeasible() {
        let (catalog, pool) = scenario(3);
        let fixings = Fixings {
            inherited: vec![fix(ColumnRef::Stock(0), 1.0)],
            branch: Some(fix(ColumnRef::Strip(0), 1.0)),
        };
        let mut solver = ScipSolver::new(SolverSettings::default());
        assert_eq!(
            solve_master(&mut solver, &catalog, &pool, &fixings).unwrap(),
            MasterOutcome::Infeasible
        );
    }
}
