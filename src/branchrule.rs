use crate::{ColumnPool, ColumnRef, LpRelaxation};

/// A trait for defining custom branching rules.
pub trait BranchRule {
    /// Picks the variable to branch on among the fractional candidates.
    ///
    /// Returning `None` leaves the node unbranched.
    fn select(&mut self, candidates: &[BranchingCandidate]) -> Option<BranchingCandidate>;
}

impl<B: BranchRule + ?Sized> BranchRule for &mut B {
    fn select(&mut self, candidates: &[BranchingCandidate]) -> Option<BranchingCandidate> {
        (**self).select(candidates)
    }
}

/// A candidate for branching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchingCandidate {
    /// The column whose master variable is fractional.
    pub column: ColumnRef,
    /// The LP solution value of the variable.
    pub lp_sol_val: f64,
    /// The fractional part of the LP solution value of the variable.
    pub frac: f64,
}

impl BranchingCandidate {
    /// Value the down child fixes the variable to.
    pub fn floor(&self) -> f64 {
        self.lp_sol_val.floor()
    }

    /// Value the up child fixes the variable to.
    pub fn ceil(&self) -> f64 {
        self.lp_sol_val.ceil()
    }
}

/// Master variables whose LP value is more than `tol` away from an integer, in
/// master variable order.
pub fn fractional_candidates(
    pool: &ColumnPool,
    lp: &LpRelaxation,
    tol: f64,
) -> Vec<BranchingCandidate> {
    pool.iter()
        .map(|(column, _)| (column, lp.value(pool, column)))
        .filter_map(|(column, lp_sol_val)| {
            let frac = lp_sol_val - lp_sol_val.floor();
            (frac > tol && frac < 1.0 - tol).then_some(BranchingCandidate {
                column,
                lp_sol_val,
                frac,
            })
        })
        .collect()
}

/// Branches on the variable whose fractional part is closest to one half.
///
/// Ties go to the earliest candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostFractional;

impl BranchRule for MostFractional {
    fn select(&mut self, candidates: &[BranchingCandidate]) -> Option<BranchingCandidate> {
        let mut best: Option<&BranchingCandidate> = None;
        for candidate in candidates {
            let score = (candidate.frac - 0.5).abs();
            if best.is_none_or(|b| score < (b.frac - 0.5).abs()) {
                best = Some(candidate);
            }
        }
        best.copied()
    }
}

/// Branches on the first fractional variable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFractional;

impl BranchRule for FirstFractional {
    fn select(&mut self, candidates: &[BranchingCandidate]) -> Option<BranchingCandidate> {
        candidates.first().copied()
    }
}
