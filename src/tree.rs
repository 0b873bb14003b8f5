use tracing::{debug, info, warn};

use crate::{
    BnpResult, BranchRule, Catalog, Column, ColumnPool, ColumnRef, Node, NodeState, Settings,
    Solver,
};

/// A column used by the incumbent, with its value.
#[derive(Debug, Clone, PartialEq)]
pub struct UsedColumn {
    /// Identity of the column in the pool of the node that found the incumbent.
    pub column: ColumnRef,
    /// The column's coefficients.
    pub coefs: Column,
    /// How many times the pattern is cut.
    pub value: f64,
}

/// Best integral solution found.
#[derive(Debug, Clone, PartialEq)]
pub struct Incumbent {
    /// Number of stock sheets used.
    pub objective: f64,
    /// Node that found it.
    pub node: usize,
    /// Columns with a non-zero value.
    pub columns: Vec<UsedColumn>,
}

impl Incumbent {
    fn from_node(node: &Node, tol: f64) -> Option<Self> {
        let lp = node.lp()?;
        let pool = node.pool();
        let columns = lp
            .primal
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value > tol)
            .filter_map(|(position, &value)| {
                let column = pool.column_ref(position);
                Some(UsedColumn {
                    column,
                    coefs: pool.get(column)?.clone(),
                    value: value.round(),
                })
            })
            .collect();
        Some(Incumbent {
            objective: lp.objective.round(),
            node: node.index(),
            columns,
        })
    }
}

/// Counters collected during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Nodes whose master was solved.
    pub nodes: usize,
    /// Nodes pruned because their master was infeasible.
    pub pruned_infeasible: usize,
    /// Nodes pruned because their bound could not beat the incumbent.
    pub pruned_bound: usize,
    /// Nodes that spawned children.
    pub branched: usize,
    /// Columns generated over all nodes.
    pub columns_generated: usize,
    /// Whether the search stopped at the node limit with open nodes left.
    pub node_limit_reached: bool,
}

/// Outcome of a branch-and-price search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Best integral solution, if any was found.
    pub incumbent: Option<Incumbent>,
    /// Restricted master value of the root once pricing stopped, `None` if the
    /// root master was infeasible.
    ///
    /// Pricing optimizes strip patterns against one shared set of item duals,
    /// so this value can lie above the true LP optimum.
    pub root_bound: Option<f64>,
    /// Search counters.
    pub stats: SearchStats,
}

/// Whether a node with value `bound` can be discarded given an incumbent of
/// value `incumbent`.
///
/// The objective counts stock sheets, so only integral values are attainable
/// and the bound is rounded up first. Only sound when `bound` is a true lower
/// bound, see [`SearchSettings::prune_by_bound`](crate::SearchSettings).
pub fn bound_prunes(bound: f64, incumbent: f64, tol: f64) -> bool {
    (bound - tol).ceil() >= incumbent - tol
}

/// Depth-first branch-and-price.
#[derive(Debug)]
pub struct BranchAndPrice<'a, S: Solver, B: BranchRule> {
    catalog: &'a Catalog,
    settings: &'a Settings,
    solver: S,
    rule: B,
}

impl<'a, S: Solver, B: BranchRule> BranchAndPrice<'a, S, B> {
    /// Creates a search over `catalog`.
    pub fn new(catalog: &'a Catalog, settings: &'a Settings, solver: S, rule: B) -> Self {
        BranchAndPrice {
            catalog,
            settings,
            solver,
            rule,
        }
    }

    /// Returns the solver, e.g. to read its counters.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Runs the search from a root node holding `pool`.
    ///
    /// Nodes are explored depth first. A fractional node branches on the
    /// variable picked by the rule into a child fixing it to the rounded-down
    /// value, explored first, and one fixing it to the rounded-up value.
    pub fn solve(&mut self, pool: ColumnPool) -> BnpResult<SearchResult> {
        let tol = self.settings.search.tolerance;
        let mut stats = SearchStats::default();
        let mut incumbent: Option<Incumbent> = None;
        let mut root_bound = None;
        let mut next_index = 1;
        let mut stack = vec![Node::root(pool)];

        info!(
            event = "search_start",
            strip_types = self.catalog.n_strip_types(),
            item_types = self.catalog.n_item_types(),
        );

        while let Some(mut node) = stack.pop() {
            if self
                .settings
                .search
                .node_limit
                .is_some_and(|limit| stats.nodes >= limit)
            {
                warn!(event = "node_limit", nodes = stats.nodes, open = stack.len() + 1);
                stats.node_limit_reached = true;
                break;
            }
            stats.nodes += 1;

            let state = node.solve(&mut self.solver, self.catalog, &self.settings.pricing)?;
            stats.columns_generated += node.n_generated();
            if state == NodeState::Pruned {
                stats.pruned_infeasible += 1;
                continue;
            }
            let Some(bound) = node.lower_bound() else {
                continue;
            };
            if node.parent().is_none() {
                root_bound = Some(bound);
                info!(event = "root_bound", bound, columns = node.pool().len());
            }

            let pruning = incumbent
                .as_ref()
                .filter(|_| self.settings.search.prune_by_bound);
            if let Some(best) = pruning {
                if bound_prunes(bound, best.objective, tol) {
                    debug!(
                        event = "node_pruned",
                        node = node.index(),
                        bound,
                        incumbent = best.objective,
                    );
                    node.prune();
                    stats.pruned_bound += 1;
                    continue;
                }
            }

            let candidates = node.fractional_candidates(tol);
            if candidates.is_empty() {
                if let Some(found) = Incumbent::from_node(&node, tol) {
                    let improves = incumbent
                        .as_ref()
                        .is_none_or(|best| found.objective < best.objective - tol);
                    debug!(
                        event = "integral_node",
                        node = found.node,
                        objective = found.objective,
                        improves,
                    );
                    if improves {
                        info!(
                            event = "incumbent",
                            node = found.node,
                            depth = node.depth(),
                            objective = found.objective,
                        );
                        incumbent = Some(found);
                    }
                }
                continue;
            }

            let Some(branch_var) = self.rule.select(&candidates) else {
                warn!(
                    event = "branching_declined",
                    node = node.index(),
                    candidates = candidates.len(),
                );
                continue;
            };
            node.set_branch_var(branch_var);
            let up = node.child(next_index, branch_var.ceil());
            let down = node.child(next_index + 1, branch_var.floor());
            next_index += 2;
            debug!(
                event = "node_branched",
                node = node.index(),
                column = %branch_var.column,
                value = branch_var.lp_sol_val,
            );
            stats.branched += 1;
            stack.extend(up);
            stack.extend(down);
        }

        info!(
            event = "search_done",
            objective = incumbent.as_ref().map(|inc| inc.objective),
            root_bound,
            nodes = stats.nodes,
            columns = stats.columns_generated,
        );
        Ok(SearchResult {
            incumbent,
            root_bound,
            stats,
        })
    }
}
