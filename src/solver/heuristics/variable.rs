//! Standard heuristics for selecting which variable to branch on next
//! during the search process.

use crate::solver::{domain::DomainStore, value::ValueOrdering, VariableId};

/// A strategy for choosing which unassigned variable the solver should
/// branch on next. A good choice here can shrink the search tree by orders
/// of magnitude.
///
/// Implementations must be deterministic for a fixed store so that solver
/// runs are reproducible.
pub trait VariableSelectionHeuristic<V: ValueOrdering> {
    /// Selects the next variable to be assigned.
    ///
    /// Returns `None` when every variable is already determined (all domains
    /// are singletons).
    fn select_variable(&self, store: &DomainStore<V>) -> Option<VariableId>;
}

/// Selects the unassigned variable with the smallest [`VariableId`].
///
/// The simplest deterministic baseline; mostly useful for comparing against
/// the MRV heuristic.
pub struct SelectFirstHeuristic;

impl<V: ValueOrdering> VariableSelectionHeuristic<V> for SelectFirstHeuristic {
    fn select_variable(&self, store: &DomainStore<V>) -> Option<VariableId> {
        store
            .iter()
            .filter(|(_, domain)| domain.len() > 1)
            .min_by_key(|(var, _)| **var)
            .map(|(var, _)| *var)
    }
}

/// Minimum Remaining Values: selects the unassigned variable with the
/// fewest candidates left.
///
/// A "fail-first" strategy: the most constrained variable is the most likely
/// to expose a contradiction cheaply. Ties are broken by the lower
/// [`VariableId`], so selection never depends on map iteration order.
pub struct MinimumRemainingValuesHeuristic;

impl<V: ValueOrdering> VariableSelectionHeuristic<V> for MinimumRemainingValuesHeuristic {
    fn select_variable(&self, store: &DomainStore<V>) -> Option<VariableId> {
        store
            .iter()
            .filter(|(_, domain)| domain.len() > 1)
            .min_by_key(|(var, domain)| (domain.len(), **var))
            .map(|(var, _)| *var)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::domain::DomainStore;

    fn store_of(domains: &[(VariableId, &[i64])]) -> DomainStore<i64> {
        DomainStore::new(
            domains
                .iter()
                .map(|(var, values)| (*var, values.iter().copied().collect()))
                .collect(),
        )
    }

    #[test]
    fn mrv_picks_the_smallest_domain() {
        let store = store_of(&[(0, &[1, 2, 3]), (1, &[1, 2]), (2, &[1, 2, 3, 4])]);
        let heuristic = MinimumRemainingValuesHeuristic;
        assert_eq!(heuristic.select_variable(&store), Some(1));
    }

    #[test]
    fn mrv_skips_determined_variables() {
        let store = store_of(&[(0, &[7]), (1, &[1, 2, 3])]);
        let heuristic = MinimumRemainingValuesHeuristic;
        assert_eq!(heuristic.select_variable(&store), Some(1));
    }

    #[test]
    fn mrv_breaks_ties_by_lowest_variable_id() {
        let store = store_of(&[(4, &[1, 2, 3]), (2, &[1, 2, 3]), (9, &[1, 2, 3])]);
        let heuristic = MinimumRemainingValuesHeuristic;
        assert_eq!(heuristic.select_variable(&store), Some(2));
    }

    #[test]
    fn returns_none_when_everything_is_determined() {
        let store = store_of(&[(0, &[1]), (1, &[2])]);
        assert_eq!(
            VariableSelectionHeuristic::<i64>::select_variable(
                &MinimumRemainingValuesHeuristic,
                &store
            ),
            None
        );
        assert_eq!(
            VariableSelectionHeuristic::<i64>::select_variable(&SelectFirstHeuristic, &store),
            None
        );
    }

    #[test]
    fn select_first_orders_by_variable_id() {
        let store = store_of(&[(5, &[1, 2]), (3, &[1, 2, 3])]);
        let heuristic = SelectFirstHeuristic;
        assert_eq!(heuristic.select_variable(&store), Some(3));
    }
}
