use tracing::{debug, warn};

use crate::{
    BnpResult, BranchingCandidate, Catalog, ColumnKind, ColumnPool, ColumnRef, LpRelaxation,
    MasterOutcome, PricingRound, PricingSettings, Solver, fractional_candidates, price_round,
    solve_master,
};

/// A master variable fixed to a value by a branching decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchFixing {
    /// The fixed column.
    pub column: ColumnRef,
    /// The value both bounds are set to.
    pub value: f64,
}

/// Branching decisions in force at a node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fixings {
    /// Decisions taken at the ancestors, oldest first.
    pub inherited: Vec<BranchFixing>,
    /// The parent's branching variable with this node's value; `None` at the root.
    pub branch: Option<BranchFixing>,
}

impl Fixings {
    /// Fixings of a child: everything in force here plus `branch`.
    pub fn descend(&self, branch: BranchFixing) -> Fixings {
        let mut inherited = self.inherited.clone();
        inherited.extend(self.branch);
        Fixings {
            inherited,
            branch: Some(branch),
        }
    }

    /// All fixings, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &BranchFixing> {
        self.inherited.iter().chain(self.branch.as_ref())
    }

    /// Number of fixed variables.
    pub fn len(&self) -> usize {
        self.inherited.len() + usize::from(self.branch.is_some())
    }

    /// Whether no variable is fixed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lifecycle of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Created, not solved yet.
    Open,
    /// Column generation is running; a node left in this state failed.
    Solving,
    /// Cut off: the master was infeasible or the bound could not beat the incumbent.
    Pruned,
    /// Column generation finished and the master value is final.
    Bounded,
}

/// A node in the branch-and-bound tree.
///
/// A node owns its column pool and fixings. Children start from copies of both,
/// so columns generated below a node never show up in its siblings.
#[derive(Debug, Clone)]
pub struct Node {
    index: usize,
    parent: Option<usize>,
    depth: usize,
    fixings: Fixings,
    pool: ColumnPool,
    state: NodeState,
    lp: Option<LpRelaxation>,
    branch_var: Option<BranchingCandidate>,
    n_rounds: usize,
    n_generated: usize,
}

impl Node {
    /// The root node, starting from `pool` without fixings.
    pub fn root(pool: ColumnPool) -> Self {
        Node {
            index: 0,
            parent: None,
            depth: 0,
            fixings: Fixings::default(),
            pool,
            state: NodeState::Open,
            lp: None,
            branch_var: None,
            n_rounds: 0,
            n_generated: 0,
        }
    }

    /// Returns the number of the node.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the number of the parent, `None` at the root.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Returns the depth of the node in the branch-and-bound tree.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the restricted master value of the node, once it is bounded.
    ///
    /// Pricing can stop while an improving strip column is still missing, so
    /// this is not always a lower bound on the node's integer optimum.
    pub fn lower_bound(&self) -> Option<f64> {
        self.lp.as_ref().map(|lp| lp.objective)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Branching decisions applied to the master.
    pub fn fixings(&self) -> &Fixings {
        &self.fixings
    }

    /// Columns known at this node.
    pub fn pool(&self) -> &ColumnPool {
        &self.pool
    }

    /// Final LP relaxation, `None` unless the master was feasible.
    pub fn lp(&self) -> Option<&LpRelaxation> {
        self.lp.as_ref()
    }

    /// The variable the children branch on, once chosen.
    pub fn branch_var(&self) -> Option<&BranchingCandidate> {
        self.branch_var.as_ref()
    }

    /// Number of pricing rounds run.
    pub fn n_rounds(&self) -> usize {
        self.n_rounds
    }

    /// Number of columns this node added to its pool.
    pub fn n_generated(&self) -> usize {
        self.n_generated
    }

    /// Runs column generation until no new column is admitted.
    ///
    /// Every round solves the master from scratch, prices on its duals and
    /// appends the admitted columns. An infeasible master prunes the node before
    /// any pricing. After `max_rounds` rounds the master is solved once more so
    /// the stored LP matches the final pool.
    pub fn solve<S: Solver + ?Sized>(
        &mut self,
        solver: &mut S,
        catalog: &Catalog,
        settings: &PricingSettings,
    ) -> BnpResult<NodeState> {
        self.state = NodeState::Solving;
        loop {
            let lp = match solve_master(solver, catalog, &self.pool, &self.fixings)? {
                MasterOutcome::Infeasible => {
                    debug!(event = "node_infeasible", node = self.index, depth = self.depth);
                    self.lp = None;
                    self.state = NodeState::Pruned;
                    return Ok(self.state);
                }
                MasterOutcome::Feasible(lp) => lp,
            };
            if self.n_rounds == settings.max_rounds {
                warn!(
                    event = "pricing_round_limit",
                    node = self.index,
                    rounds = self.n_rounds,
                );
                self.lp = Some(lp);
                break;
            }

            self.n_rounds += 1;
            let round = price_round(
                solver,
                catalog,
                lp.strip_duals(),
                lp.item_duals(),
                settings.break_even,
            )?;
            let admitted = self.admit(round)?;
            self.lp = Some(lp);
            if admitted == 0 {
                break;
            }
        }

        self.state = NodeState::Bounded;
        debug!(
            event = "node_bounded",
            node = self.index,
            depth = self.depth,
            bound = self.lower_bound(),
            rounds = self.n_rounds,
            columns = self.pool.len(),
        );
        Ok(self.state)
    }

    /// Appends the round's candidates that are not in the pool yet.
    fn admit(&mut self, round: PricingRound) -> BnpResult<usize> {
        let mut admitted = 0;
        for col in round.stock_columns {
            admitted += usize::from(self.pool.admit(ColumnKind::Stock, col)?.is_some());
        }
        for col in round.strip_columns {
            admitted += usize::from(self.pool.admit(ColumnKind::Strip, col)?.is_some());
        }
        self.n_generated += admitted;
        Ok(admitted)
    }

    /// Fractional master variables of the final LP; empty if there is none.
    pub fn fractional_candidates(&self, tol: f64) -> Vec<BranchingCandidate> {
        match &self.lp {
            Some(lp) => fractional_candidates(&self.pool, lp, tol),
            None => Vec::new(),
        }
    }

    /// Whether the node is bounded with an integral LP solution.
    pub fn is_integral(&self, tol: f64) -> bool {
        self.state == NodeState::Bounded && self.fractional_candidates(tol).is_empty()
    }

    /// Records the variable the children will branch on.
    pub fn set_branch_var(&mut self, candidate: BranchingCandidate) {
        self.branch_var = Some(candidate);
    }

    /// Cuts the node off without further processing.
    pub fn prune(&mut self) {
        self.state = NodeState::Pruned;
    }

    /// Creates a child that fixes the branching variable to `value`.
    ///
    /// Returns `None` if no branching variable was recorded.
    pub fn child(&self, index: usize, value: f64) -> Option<Node> {
        let branch_var = self.branch_var.as_ref()?;
        let fixing = BranchFixing {
            column: branch_var.column,
            value,
        };
        Some(Node {
            index,
            parent: Some(self.index),
            depth: self.depth + 1,
            fixings: self.fixings.descend(fixing),
            pool: self.pool.clone(),
            state: NodeState::Open,
            lp: None,
            branch_var: None,
            n_rounds: 0,
            n_generated: 0,
        })
    }
}
