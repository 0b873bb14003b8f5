//! Test doubles shared by the unit tests.

use std::collections::VecDeque;

use crate::{
    Catalog, ItemType, LinearModel, Solution, SolveOutcome, Solver, SolverFailure, Stock,
    StripType,
};

/// A 10 x 20 stock with the given strip widths and `(length, demand)` items.
pub(crate) fn catalog(strip_widths: &[f64], items: &[(f64, u32)]) -> Catalog {
    Catalog::new(
        Stock {
            width: 10.0,
            length: 20.0,
        },
        strip_widths
            .iter()
            .map(|&width| StripType { width })
            .collect(),
        items
            .iter()
            .map(|&(length, demand)| ItemType { length, demand })
            .collect(),
    )
    .unwrap()
}

pub(crate) fn optimal(objective: f64, values: &[f64], duals: &[f64]) -> SolveOutcome {
    SolveOutcome::Optimal(Solution {
        objective,
        values: values.to_vec(),
        duals: duals.to_vec(),
    })
}

/// Replays canned answers and records every model it was asked to solve.
#[derive(Debug, Default)]
pub(crate) struct ScriptedSolver {
    answers: VecDeque<Result<SolveOutcome, SolverFailure>>,
    pub(crate) models: Vec<LinearModel>,
}

impl ScriptedSolver {
    pub(crate) fn new<I>(answers: I) -> Self
    where
        I: IntoIterator<Item = Result<SolveOutcome, SolverFailure>>,
    {
        ScriptedSolver {
            answers: answers.into_iter().collect(),
            models: Vec::new(),
        }
    }

    /// Names of the models solved so far, in order.
    pub(crate) fn calls(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name()).collect()
    }

    pub(crate) fn count(&self, name: &str) -> usize {
        self.models.iter().filter(|m| m.name() == name).count()
    }
}

impl Solver for ScriptedSolver {
    fn solve(&mut self, model: &LinearModel) -> Result<SolveOutcome, SolverFailure> {
        self.models.push(model.clone());
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer left for {}", model.name()))
    }
}
