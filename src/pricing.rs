use tracing::debug;

use crate::builder::row::row;
use crate::builder::var::var;
use crate::{Catalog, Column, ItemType, LinearModel, Solver, SolverFailure, StripType};

/// Name of the stock-cutting (outer) pricing model.
pub const OUTER_PRICING: &str = "outer_pricing";
/// Name of the strip-cutting (inner) pricing model.
pub const INNER_PRICING: &str = "inner_pricing";

/// Optimal solution of a pricing knapsack.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    /// Total dual value of the pattern.
    pub objective: f64,
    /// How many copies of each strip (outer) or item (inner) type the pattern holds.
    pub counts: Vec<u32>,
}

/// Integer knapsack `max sum(values * x) s.t. sum(weights * x) <= capacity, x >= 0`.
fn knapsack(name: &str, values: &[f64], weights: &[f64], capacity: f64) -> LinearModel {
    let mut model = LinearModel::new(name).maximize();
    let vars = model.add(
        values
            .iter()
            .map(|&value| var().obj(value).integer(0.0, f64::INFINITY)),
    );
    model.add(
        row()
            .name("capacity")
            .expr(vars.into_iter().zip(weights.iter().copied()))
            .le(capacity),
    );
    model
}

fn solve_knapsack<S: Solver + ?Sized>(
    solver: &mut S,
    model: &LinearModel,
) -> Result<Option<Pattern>, SolverFailure> {
    let Some(sol) = solver.solve(model)?.optimal() else {
        return Ok(None);
    };
    sol.check_shape(model, false)?;
    Ok(Some(Pattern {
        objective: sol.objective,
        counts: sol.int_values(),
    }))
}

/// Prices a stock-cutting pattern: how many strips of each type to cut from one
/// stock sheet, valuing each strip at its row's dual price.
///
/// Returns `None` when the knapsack is infeasible.
pub fn price_outer<S: Solver + ?Sized>(
    solver: &mut S,
    strip_duals: &[f64],
    strip_types: &[StripType],
    stock_width: f64,
) -> Result<Option<Pattern>, SolverFailure> {
    let widths: Vec<f64> = strip_types.iter().map(|s| s.width).collect();
    let model = knapsack(OUTER_PRICING, strip_duals, &widths, stock_width);
    solve_knapsack(solver, &model)
}

/// Prices a strip-cutting pattern: how many items of each type to cut along one
/// strip, valuing each item at its row's dual price.
///
/// Returns `None` when the knapsack is infeasible.
pub fn price_inner<S: Solver + ?Sized>(
    solver: &mut S,
    item_duals: &[f64],
    item_types: &[ItemType],
    stock_length: f64,
) -> Result<Option<Pattern>, SolverFailure> {
    let lengths: Vec<f64> = item_types.iter().map(|i| i.length).collect();
    let model = knapsack(INNER_PRICING, item_duals, &lengths, stock_length);
    solve_knapsack(solver, &model)
}

/// Stock-cutting column of an outer pattern; item rows are zero.
pub fn stock_column(outer: &Pattern, n_item_types: usize) -> Column {
    outer
        .counts
        .iter()
        .map(|&g| f64::from(g))
        .chain(std::iter::repeat_n(0.0, n_item_types))
        .collect()
}

/// Strip-cutting column for strip type `p`: consumes one strip of that type and
/// yields the inner pattern's items.
pub fn strip_column(p: usize, n_strip_types: usize, inner: &Pattern) -> Column {
    (0..n_strip_types)
        .map(|j| if j == p { -1.0 } else { 0.0 })
        .chain(inner.counts.iter().map(|&d| f64::from(d)))
        .collect()
}

/// What the outer pricing problem decided in one round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OuterDecision {
    /// The outer knapsack had no solution; nothing was generated.
    Infeasible,
    /// The pattern's value exceeded the break-even value; nothing was generated.
    NotImproving(f64),
    /// The pattern was turned into a candidate stock-cutting column, unless it
    /// holds no strip at all.
    Candidate(f64),
}

/// Candidate columns produced by one pricing round.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRound {
    /// Outcome of the outer knapsack.
    pub outer: OuterDecision,
    /// Candidate stock-cutting columns.
    pub stock_columns: Vec<Column>,
    /// Candidate strip-cutting columns that passed the admission test.
    pub strip_columns: Vec<Column>,
    /// Number of inner knapsacks solved.
    pub inner_calls: usize,
}

impl PricingRound {
    /// Whether the round produced no candidate at all.
    pub fn is_empty(&self) -> bool {
        self.stock_columns.is_empty() && self.strip_columns.is_empty()
    }
}

/// Runs one round of two-level pricing on the master duals.
///
/// The outer knapsack is solved first. If its value is at most `break_even`
/// its pattern becomes a candidate stock column, and the inner knapsack is
/// solved once for every strip type `p` the pattern uses. The strip column
/// built from the inner pattern is kept only if the inner value exceeds the
/// outer count `g_p`.
pub fn price_round<S: Solver + ?Sized>(
    solver: &mut S,
    catalog: &Catalog,
    strip_duals: &[f64],
    item_duals: &[f64],
    break_even: f64,
) -> Result<PricingRound, SolverFailure> {
    let mut round = PricingRound {
        outer: OuterDecision::Infeasible,
        stock_columns: Vec::new(),
        strip_columns: Vec::new(),
        inner_calls: 0,
    };

    let Some(outer) = price_outer(solver, strip_duals, &catalog.strip_types, catalog.stock.width)?
    else {
        debug!(event = "outer_infeasible");
        return Ok(round);
    };
    if outer.objective > break_even {
        debug!(event = "outer_not_improving", objective = outer.objective);
        round.outer = OuterDecision::NotImproving(outer.objective);
        return Ok(round);
    }
    round.outer = OuterDecision::Candidate(outer.objective);
    // an empty pattern would cost a sheet and cut nothing
    if outer.counts.iter().any(|&g| g > 0) {
        round
            .stock_columns
            .push(stock_column(&outer, catalog.n_item_types()));
    }

    let j_num = catalog.n_strip_types();
    for (p, &g_p) in outer.counts.iter().enumerate().filter(|&(_, &g)| g > 0) {
        round.inner_calls += 1;
        let Some(inner) =
            price_inner(solver, item_duals, &catalog.item_types, catalog.stock.length)?
        else {
            debug!(event = "inner_infeasible", strip = p);
            continue;
        };
        let v_p = f64::from(g_p);
        if inner.objective > v_p {
            round.strip_columns.push(strip_column(p, j_num, &inner));
        } else {
            debug!(
                event = "inner_rejected",
                strip = p,
                objective = inner.objective,
                v_p,
            );
        }
    }

    debug!(
        event = "pricing_round",
        outer = outer.objective,
        inner_calls = round.inner_calls,
        stock_candidates = round.stock_columns.len(),
        strip_candidates = round.strip_columns.len(),
    );
    Ok(round)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, ScriptedSolver};
    use crate::{ObjSense, ScipSolver, SolveOutcome, SolverSettings, VarType};

    fn pattern(objective: f64, counts: &[f64]) -> Result<SolveOutcome, SolverFailure> {
        Ok(testing::optimal(objective, counts, &[]))
    }

    #[test]
    fn knapsack_model_shape() {
        let model = knapsack(OUTER_PRICING, &[0.5, -0.2], &[4.0, 3.0], 10.0);
        assert_eq!(model.sense(), ObjSense::Maximize);
        assert!(!model.is_continuous());
        assert!(model.vars().iter().all(|v| v.var_type == VarType::Integer));
        assert_eq!(model.vars()[1].obj, -0.2);
        assert_eq!(model.rows().len(), 1);
        assert_eq!(model.rows()[0].rhs, 10.0);
        assert_eq!(model.rows()[0].coefs, vec![(0, 4.0), (1, 3.0)]);
    }

    #[test]
    fn column_padding() {
        let outer = Pattern {
            objective: 1.0,
            counts: vec![2, 0],
        };
        assert_eq!(stock_column(&outer, 3), vec![2.0, 0.0, 0.0, 0.0, 0.0]);

        let inner = Pattern {
            objective: 3.0,
            counts: vec![1, 4],
        };
        assert_eq!(strip_column(1, 3, &inner), vec![0.0, -1.0, 0.0, 1.0, 4.0]);
    }

    #[test]
    fn not_improving_skips_inner() {
        let catalog = testing::catalog(&[5.0], &[(4.0, 1)]);
        let mut solver = ScriptedSolver::new([pattern(2.0, &[2.0])]);
        let round = price_round(&mut solver, &catalog, &[1.0], &[0.5], 1.0).unwrap();

        assert_eq!(round.outer, OuterDecision::NotImproving(2.0));
        assert!(round.is_empty());
        assert_eq!(round.inner_calls, 0);
        assert_eq!(solver.calls(), vec![OUTER_PRICING]);
    }

    #[test]
    fn break_even_is_inclusive() {
        let catalog = testing::catalog(&[5.0], &[(4.0, 1)]);
        let mut solver = ScriptedSolver::new([pattern(1.0, &[2.0]), pattern(1.0, &[5.0])]);
        let round = price_round(&mut solver, &catalog, &[0.5], &[0.2], 1.0).unwrap();

        assert_eq!(round.outer, OuterDecision::Candidate(1.0));
        assert_eq!(round.stock_columns, vec![vec![2.0, 0.0]]);
        assert_eq!(round.inner_calls, 1);
    }

    #[test]
    fn one_inner_call_per_used_strip() {
        let catalog = testing::catalog(&[2.0, 3.0, 4.0], &[(5.0, 1), (6.0, 2)]);
        let mut solver = ScriptedSolver::new([
            pattern(0.9, &[1.0, 0.0, 2.0]),
            pattern(3.0, &[1.0, 2.0]),
            pattern(3.0, &[1.0, 2.0]),
        ]);
        let round = price_round(
            &mut solver,
            &catalog,
            &[0.1, 0.2, 0.4],
            &[1.0, 1.0],
            1.0,
        )
        .unwrap();

        assert_eq!(round.inner_calls, 2);
        assert_eq!(solver.count(INNER_PRICING), 2);
        assert_eq!(
            round.stock_columns,
            vec![vec![1.0, 0.0, 2.0, 0.0, 0.0]]
        );
        assert_eq!(
            round.strip_columns,
            vec![
                vec![-1.0, 0.0, 0.0, 1.0, 2.0],
                vec![0.0, 0.0, -1.0, 1.0, 2.0],
            ]
        );
    }

    #[test]
    fn inner_admission_compares_with_outer_count() {
        let catalog = testing::catalog(&[2.0, 3.0], &[(5.0, 1)]);
        let mut solver = ScriptedSolver::new([
            pattern(0.8, &[1.0, 3.0]),
            // 2.5 > 1 admitted for the first strip type
            pattern(2.5, &[2.0]),
            // 2.5 <= 3 rejected for the second
            pattern(2.5, &[2.0]),
        ]);
        let round = price_round(&mut solver, &catalog, &[0.2, 0.2], &[1.25], 1.0).unwrap();

        assert_eq!(round.inner_calls, 2);
        assert_eq!(round.strip_columns, vec![vec![-1.0, 0.0, 2.0]]);
    }

    #[test]
    fn infeasible_subproblems_generate_nothing() {
        let catalog = testing::catalog(&[5.0], &[(4.0, 1)]);
        let mut solver = ScriptedSolver::new([Ok(SolveOutcome::Infeasible)]);
        let round = price_round(&mut solver, &catalog, &[0.5], &[0.5], 1.0).unwrap();
        assert_eq!(round.outer, OuterDecision::Infeasible);
        assert!(round.is_empty());

        let mut solver =
            ScriptedSolver::new([pattern(0.5, &[1.0]), Ok(SolveOutcome::Infeasible)]);
        let round = price_round(&mut solver, &catalog, &[0.5], &[0.5], 1.0).unwrap();
        assert_eq!(round.inner_calls, 1);
        assert_eq!(round.stock_columns.len(), 1);
        assert!(round.strip_columns.is_empty());
    }

    #[test]
    fn empty_outer_pattern_is_no_column() {
        let catalog = testing::catalog(&[5.0], &[(4.0, 1)]);
        let mut solver = ScriptedSolver::new([pattern(0.0, &[0.0])]);
        let round = price_round(&mut solver, &catalog, &[0.0], &[0.0], 1.0).unwrap();

        assert_eq!(round.outer, OuterDecision::Candidate(0.0));
        assert!(round.is_empty());
        assert_eq!(round.inner_calls, 0);
        assert_eq!(solver.calls(), vec![OUTER_PRICING]);
    }

    #[test]
    fn short_pattern_is_a_failure() {
        let catalog = testing::catalog(&[5.0, 4.0], &[(4.0, 1)]);
        let mut solver = ScriptedSolver::new([pattern(0.5, &[1.0])]);
        assert!(matches!(
            price_round(&mut solver, &catalog, &[0.5, 0.1], &[0.5], 1.0),
            Err(SolverFailure::MalformedSolution { n_vars: 2, values: 1, .. })
        ));
    }

    #[test]
    fn failures_propagate() {
        let catalog = testing::catalog(&[5.0], &[(4.0, 1)]);
        let mut solver = ScriptedSolver::new([
            pattern(0.5, &[1.0]),
            Err(SolverFailure::MissingSolution),
        ]);
        assert_eq!(
            price_round(&mut solver, &catalog, &[0.5], &[0.5], 1.0),
            Err(SolverFailure::MissingSolution)
        );
    }

    #[test]
    fn scip_outer_knapsack() {
        let catalog = testing::catalog(&[4.0, 3.0], &[(5.0, 1)]);
        let mut solver = ScipSolver::new(SolverSettings::default());
        // width 10: two 4-strips score 1.0, one 4-strip and two 3-strips score 0.9
        let outer = price_outer(&mut solver, &[0.5, 0.2], &catalog.strip_types, 10.0)
            .unwrap()
            .unwrap();
        assert!((outer.objective - 1.0).abs() < 1e-6);
        assert_eq!(outer.counts, vec![2, 0]);
    }

    #[test]
    fn scip_inner_ignores_negative_duals() {
        let catalog = testing::catalog(&[4.0], &[(5.0, 1), (6.0, 1)]);
        let mut solver = ScipSolver::new(SolverSettings::default());
        let inner = price_inner(&mut solver, &[1.0, -1.0], &catalog.item_types, 20.0)
            .unwrap()
            .unwrap();
        assert!((inner.objective - 4.0).abs() < 1e-6);
        assert_eq!(inner.counts, vec![4, 0]);
    }
}
