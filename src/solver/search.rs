use tracing::debug;

use crate::{
    error::{Error, Result},
    solver::{
        domain::{Assignment, DomainStore},
        heuristics::{
            value::{IdentityValueHeuristic, ValueOrderingHeuristic},
            variable::{MinimumRemainingValuesHeuristic, VariableSelectionHeuristic},
        },
        problem::Problem,
        propagate::{enforce_arc_consistency, propagate_assignment},
        stats::SearchStats,
        value::ValueOrdering,
    },
};

/// The terminal state of a solve. Unsatisfiability is a legitimate answer
/// for a well-formed problem, so it is a variant here rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<V> {
    /// A complete assignment satisfying every constraint.
    Solved(Assignment<V>),
    /// The search space is exhausted: no satisfying assignment exists.
    Unsatisfiable,
}

impl<V> Outcome<V> {
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&Assignment<V>> {
        match self {
            Outcome::Solved(assignment) => Some(assignment),
            Outcome::Unsatisfiable => None,
        }
    }

    pub fn into_solution(self) -> Option<Assignment<V>> {
        match self {
            Outcome::Solved(assignment) => Some(assignment),
            Outcome::Unsatisfiable => None,
        }
    }
}

/// The solving engine: AC-3 preprocessing followed by depth-first
/// backtracking search with propagate-on-assign.
///
/// The engine is problem-agnostic; everything puzzle-specific arrives
/// through the [`Problem`]. Heuristics are pluggable, defaulting to MRV
/// variable selection and natural value order.
pub struct Solver<V: ValueOrdering> {
    variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
    value_heuristic: Box<dyn ValueOrderingHeuristic<V>>,
    budget: Option<u64>,
}

impl<V: ValueOrdering> Solver<V> {
    /// A solver with the default heuristics (MRV + identity value order).
    pub fn new() -> Self {
        Self::with_heuristics(
            Box::new(MinimumRemainingValuesHeuristic),
            Box::new(IdentityValueHeuristic),
        )
    }

    pub fn with_heuristics(
        variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
        value_heuristic: Box<dyn ValueOrderingHeuristic<V>>,
    ) -> Self {
        Self {
            variable_heuristic,
            value_heuristic,
            budget: None,
        }
    }

    /// Bounds the search to at most `nodes` Select steps. Exhausting the
    /// budget surfaces as [`Error::BudgetExhausted`], which is distinct from
    /// both outcomes: nothing was proven.
    pub fn with_budget(mut self, nodes: u64) -> Self {
        self.budget = Some(nodes);
        self
    }

    /// Attempts to find one satisfying assignment.
    ///
    /// First runs full AC-3 to prune domains; if propagation alone empties a
    /// domain the problem is unsatisfiable without any search, and if it
    /// determines every variable the problem is solved without any search.
    /// Otherwise backtracking search explores the remaining space.
    pub fn solve(&self, problem: &Problem<V>) -> Result<(Outcome<V>, SearchStats)> {
        let mut stats = SearchStats::default();
        let mut store = problem.initial_store();

        if !enforce_arc_consistency(problem.graph(), &mut store, &mut stats) {
            debug!("proven unsatisfiable during preprocessing");
            return Ok((Outcome::Unsatisfiable, stats));
        }
        if store.is_complete() {
            stats.solutions_found = 1;
            return Ok((Outcome::Solved(store.to_assignment()?), stats));
        }

        let outcome = match self.search(problem, &mut store, &mut stats)? {
            Some(assignment) => {
                stats.solutions_found = 1;
                Outcome::Solved(assignment)
            }
            None => Outcome::Unsatisfiable,
        };
        Ok((outcome, stats))
    }

    /// Enumerates every satisfying assignment.
    ///
    /// An unsatisfiable problem yields an empty vector. The order of the
    /// returned solutions follows the heuristics' branching order.
    pub fn solve_all(&self, problem: &Problem<V>) -> Result<(Vec<Assignment<V>>, SearchStats)> {
        let mut stats = SearchStats::default();
        let mut store = problem.initial_store();
        let mut solutions = Vec::new();

        if !enforce_arc_consistency(problem.graph(), &mut store, &mut stats) {
            return Ok((solutions, stats));
        }

        self.enumerate(problem, &mut store, &mut stats, &mut solutions)?;
        stats.solutions_found = solutions.len() as u64;
        Ok((solutions, stats))
    }

    /// One Select step of the backtracking state machine.
    ///
    /// The store is restored around every failing trial value, so a `None`
    /// return leaves it exactly as the caller passed it in. A successful
    /// return keeps the winning assignment in place and unwinds without
    /// further undo.
    fn search(
        &self,
        problem: &Problem<V>,
        store: &mut DomainStore<V>,
        stats: &mut SearchStats,
    ) -> Result<Option<Assignment<V>>> {
        self.charge_node(stats)?;

        let Some(var) = self.variable_heuristic.select_variable(store) else {
            return Ok(Some(store.to_assignment()?));
        };

        let domain = store.domain(var).clone();
        for value in self.value_heuristic.order_values(&domain) {
            let snapshot = store.snapshot();
            store.assign(var, value.clone());

            if propagate_assignment(problem.graph(), store, var, stats) {
                if let Some(assignment) = self.search(problem, store, stats)? {
                    return Ok(Some(assignment));
                }
            }

            store.restore(snapshot);
            stats.backtracks += 1;
        }

        Ok(None)
    }

    /// Like [`search`](Self::search), but keeps exploring after each
    /// solution instead of unwinding, collecting everything it finds.
    fn enumerate(
        &self,
        problem: &Problem<V>,
        store: &mut DomainStore<V>,
        stats: &mut SearchStats,
        solutions: &mut Vec<Assignment<V>>,
    ) -> Result<()> {
        self.charge_node(stats)?;

        let Some(var) = self.variable_heuristic.select_variable(store) else {
            solutions.push(store.to_assignment()?);
            return Ok(());
        };

        let domain = store.domain(var).clone();
        for value in self.value_heuristic.order_values(&domain) {
            let snapshot = store.snapshot();
            store.assign(var, value.clone());

            if propagate_assignment(problem.graph(), store, var, stats) {
                self.enumerate(problem, store, stats, solutions)?;
            }

            store.restore(snapshot);
            stats.backtracks += 1;
        }

        Ok(())
    }

    fn charge_node(&self, stats: &mut SearchStats) -> Result<()> {
        stats.nodes_visited += 1;
        match self.budget {
            Some(budget) if stats.nodes_visited > budget => Err(Error::BudgetExhausted(budget)),
            _ => Ok(()),
        }
    }
}

impl<V: ValueOrdering> Default for Solver<V> {
    fn default() -> Self {
        Self::new()
    }
}
