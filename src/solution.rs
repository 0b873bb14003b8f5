use crate::{LinearModel, SolverFailure};

/// Values of an optimal solution of a [`crate::LinearModel`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Solution {
    /// Objective value in the model's own sense.
    pub objective: f64,
    /// One value per variable, in model order.
    pub values: Vec<f64>,
    /// One dual value per row, in model order. Empty unless the model is continuous.
    pub duals: Vec<f64>,
}

impl Solution {
    /// Checks that the solution fits `model`: one value per variable and, if
    /// `with_duals`, one dual per row.
    pub fn check_shape(&self, model: &LinearModel, with_duals: bool) -> Result<(), SolverFailure> {
        let n_rows = if with_duals { model.n_rows() } else { 0 };
        let duals_ok = !with_duals || self.duals.len() == n_rows;
        if self.values.len() == model.n_vars() && duals_ok {
            return Ok(());
        }
        Err(SolverFailure::MalformedSolution {
            model: model.name().to_string(),
            n_vars: model.n_vars(),
            values: self.values.len(),
            n_rows,
            duals: self.duals.len(),
        })
    }

    /// Returns the value of the variable with the given index.
    pub fn val(&self, var: usize) -> f64 {
        self.values[var]
    }

    /// Values rounded to the nearest non-negative integer.
    pub fn int_values(&self) -> Vec<u32> {
        self.values
            .iter()
            .map(|v| v.round().max(0.0) as u32)
            .collect()
    }
}

/// Definitive outcome of one solve.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// An optimal solution was found.
    Optimal(Solution),
    /// The model was proven infeasible.
    Infeasible,
}

impl SolveOutcome {
    /// Returns the solution if the model was feasible.
    pub fn optimal(self) -> Option<Solution> {
        match self {
            SolveOutcome::Optimal(sol) => Some(sol),
            SolveOutcome::Infeasible => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_pattern_values() {
        let sol = Solution {
            objective: 2.0,
            values: vec![1.9999999, -1e-9, 3.0],
            duals: vec![],
        };
        assert_eq!(sol.int_values(), vec![2, 0, 3]);
        assert_eq!(sol.val(2), 3.0);
    }

    #[test]
    fn shape_check() {
        let mut model = LinearModel::new("lp");
        let x = model.add(crate::builder::var::var());
        model.add(crate::builder::row::row().coef(x, 1.0).ge(1.0));

        let sol = Solution {
            objective: 1.0,
            values: vec![1.0],
            duals: vec![],
        };
        assert!(sol.check_shape(&model, false).is_ok());
        assert!(matches!(
            sol.check_shape(&model, true),
            Err(SolverFailure::MalformedSolution {
                n_rows: 1,
                duals: 0,
                ..
            })
        ));
    }

    #[test]
    fn infeasible_has_no_solution() {
        assert!(SolveOutcome::Infeasible.optimal().is_none());
    }
}
