use std::collections::HashMap;

use im::OrdSet;

use crate::{
    error::{Error, Result},
    solver::{value::ValueOrdering, VariableId},
};

/// A committed, complete mapping from variable to value.
pub type Assignment<V> = HashMap<VariableId, V>;

/// The set of values still considered possible for one variable.
///
/// Backed by a persistent ordered set: cloning is cheap (structural sharing)
/// and iteration order is the natural order of the value type, which keeps
/// value-ordering heuristics deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain<V: ValueOrdering>(OrdSet<V>);

impl<V: ValueOrdering> Domain<V> {
    pub fn new(values: OrdSet<V>) -> Self {
        Self(values)
    }

    /// A domain containing exactly one value.
    pub fn singleton(value: V) -> Self {
        Self(OrdSet::unit(value))
    }

    /// Returns the number of candidate values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no candidate values remain. An empty domain means
    /// the variable is unsatisfiable in the current state.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the variable is effectively determined.
    pub fn is_singleton(&self) -> bool {
        self.0.len() == 1
    }

    /// If the domain is a singleton, returns its single value.
    pub fn singleton_value(&self) -> Option<V> {
        if self.is_singleton() {
            self.0.get_min().cloned()
        } else {
            None
        }
    }

    pub fn contains(&self, value: &V) -> bool {
        self.0.contains(value)
    }

    /// Iterates over the candidate values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.0.iter()
    }

    /// Returns a new domain containing only the values that satisfy `keep`.
    pub fn retain(&self, keep: impl Fn(&V) -> bool) -> Self {
        Self(self.0.iter().filter(|v| keep(v)).cloned().collect())
    }

    /// Returns a new domain with `value` removed.
    pub fn without(&self, value: &V) -> Self {
        Self(self.0.without(value))
    }
}

impl<V: ValueOrdering> FromIterator<V> for Domain<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// An opaque saved copy of every domain, produced by
/// [`DomainStore::snapshot`] and consumed by [`DomainStore::restore`].
///
/// Thanks to the persistent backing maps a snapshot is an O(1) clone, and
/// restoring one can never alias mutable state still held by the live store.
#[derive(Debug, Clone)]
pub struct DomainSnapshot<V: ValueOrdering> {
    domains: im::HashMap<VariableId, Domain<V>>,
}

/// Holds the current candidate set for every variable in the problem.
///
/// This is the only mutable state in the engine. The search owns it
/// exclusively: each trial assignment takes a [`snapshot`](Self::snapshot)
/// first and [`restore`](Self::restore)s it on every failing exit path, so
/// sibling branches never observe each other's mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainStore<V: ValueOrdering> {
    domains: im::HashMap<VariableId, Domain<V>>,
}

impl<V: ValueOrdering> DomainStore<V> {
    pub fn new(domains: im::HashMap<VariableId, Domain<V>>) -> Self {
        Self { domains }
    }

    /// Returns the current candidate set for `var`.
    ///
    /// # Panics
    ///
    /// Panics if `var` was never declared; problem construction guarantees a
    /// domain entry for every declared variable.
    pub fn domain(&self, var: VariableId) -> &Domain<V> {
        self.domains
            .get(&var)
            .unwrap_or_else(|| panic!("no domain for variable ?{var}"))
    }

    pub fn get(&self, var: VariableId) -> Option<&Domain<V>> {
        self.domains.get(&var)
    }

    /// Removes one value from a variable's domain. Returns whether the
    /// removal actually changed the domain, for propagation bookkeeping.
    pub fn remove(&mut self, var: VariableId, value: &V) -> bool {
        let domain = self.domain(var);
        if !domain.contains(value) {
            return false;
        }
        let shrunk = domain.without(value);
        self.domains.insert(var, shrunk);
        true
    }

    /// Collapses a variable's domain to `{value}`. Used when the search
    /// commits to a trial value.
    pub fn assign(&mut self, var: VariableId, value: V) {
        debug_assert!(
            self.domain(var).contains(&value),
            "trial value must come from the variable's current domain"
        );
        self.domains.insert(var, Domain::singleton(value));
    }

    /// Replaces a variable's entire domain. Used by propagation after a
    /// revise pass has filtered out unsupported values.
    pub fn replace(&mut self, var: VariableId, domain: Domain<V>) {
        self.domains.insert(var, domain);
    }

    /// Saves the full domain map. O(1) thanks to structural sharing.
    pub fn snapshot(&self) -> DomainSnapshot<V> {
        DomainSnapshot {
            domains: self.domains.clone(),
        }
    }

    /// Rolls every domain back to the snapshotted state.
    pub fn restore(&mut self, snapshot: DomainSnapshot<V>) {
        debug_assert_eq!(
            self.domains.len(),
            snapshot.domains.len(),
            "snapshot covers a different variable set than the live store"
        );
        self.domains = snapshot.domains;
    }

    /// Returns `true` if every variable's domain is a singleton.
    pub fn is_complete(&self) -> bool {
        self.domains.values().all(Domain::is_singleton)
    }

    /// Iterates over `(variable, domain)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&VariableId, &Domain<V>)> {
        self.domains.iter()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Extracts the committed assignment once every domain is a singleton.
    ///
    /// Calling this on an incomplete store is an engine bug, surfaced as
    /// [`Error::Internal`] rather than a silent wrong answer.
    pub fn to_assignment(&self) -> Result<Assignment<V>> {
        self.domains
            .iter()
            .map(|(var, domain)| {
                domain
                    .singleton_value()
                    .map(|value| (*var, value))
                    .ok_or_else(|| {
                        Error::Internal(format!(
                            "extracting assignment but variable ?{var} still has {} candidates",
                            domain.len()
                        ))
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn store_of(domains: &[(VariableId, &[i64])]) -> DomainStore<i64> {
        DomainStore::new(
            domains
                .iter()
                .map(|(var, values)| (*var, values.iter().copied().collect()))
                .collect(),
        )
    }

    #[test]
    fn remove_reports_whether_the_domain_changed() {
        let mut store = store_of(&[(0, &[1, 2, 3])]);
        assert!(store.remove(0, &2));
        assert!(!store.remove(0, &2));
        assert_eq!(store.domain(0).len(), 2);
    }

    #[test]
    fn assign_collapses_to_a_singleton() {
        let mut store = store_of(&[(0, &[1, 2, 3])]);
        store.assign(0, 3);
        assert_eq!(store.domain(0).singleton_value(), Some(3));
        assert!(store.is_complete());
    }

    #[test]
    fn restore_rolls_back_every_mutation() {
        let mut store = store_of(&[(0, &[1, 2, 3]), (1, &[4, 5])]);
        let before = store.clone();
        let snapshot = store.snapshot();

        store.assign(0, 1);
        store.remove(1, &5);
        assert_ne!(store, before);

        store.restore(snapshot);
        assert_eq!(store, before);
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutation() {
        let mut store = store_of(&[(0, &[1, 2])]);
        let snapshot = store.snapshot();
        store.remove(0, &1);

        let mut other = store_of(&[(0, &[1, 2])]);
        other.restore(snapshot);
        assert!(other.domain(0).contains(&1));
    }

    #[test]
    fn to_assignment_rejects_incomplete_stores() {
        let store = store_of(&[(0, &[1, 2])]);
        assert!(matches!(
            store.to_assignment(),
            Err(crate::error::Error::Internal(_))
        ));
    }

    #[test]
    fn domain_iteration_is_sorted() {
        let domain: Domain<i64> = [3, 1, 2].into_iter().collect();
        let values: Vec<_> = domain.iter().copied().collect();
        assert_eq!(values, vec![1, 2, 3]);
    }
}
