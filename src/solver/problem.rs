use std::collections::HashSet;

use crate::{
    error::{Error, Result},
    solver::{
        constraint::{BinaryConstraint, ConstraintGraph},
        domain::{Domain, DomainStore},
        value::ValueOrdering,
        VariableId,
    },
};

/// A complete problem instance: the ordered variable list, every variable's
/// initial domain, and the constraint graph.
///
/// Construction is the malformed-input boundary. A constraint referencing an
/// undeclared variable, a variable without a domain, or a domain that is
/// empty before any propagation has run all fail fast here with a
/// descriptive error; nothing malformed ever reaches the search.
#[derive(Debug, Clone)]
pub struct Problem<V: ValueOrdering> {
    variables: Vec<VariableId>,
    initial: DomainStore<V>,
    graph: ConstraintGraph<V>,
}

impl<V: ValueOrdering> Problem<V> {
    pub fn new(
        variables: Vec<VariableId>,
        domains: impl IntoIterator<Item = (VariableId, Domain<V>)>,
        constraints: Vec<BinaryConstraint<V>>,
    ) -> Result<Self> {
        let declared: HashSet<VariableId> = variables.iter().copied().collect();
        let domain_map: im::HashMap<VariableId, Domain<V>> = domains
            .into_iter()
            .filter(|(var, _)| declared.contains(var))
            .collect();

        for &var in &variables {
            match domain_map.get(&var) {
                None => return Err(Error::MissingDomain(var)),
                Some(domain) if domain.is_empty() => return Err(Error::EmptyDomain(var)),
                Some(_) => {}
            }
        }

        let graph = ConstraintGraph::new(constraints, &declared)?;

        Ok(Self {
            variables,
            initial: DomainStore::new(domain_map),
            graph,
        })
    }

    pub fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    pub fn graph(&self) -> &ConstraintGraph<V> {
        &self.graph
    }

    /// A fresh working copy of the initial domains. Each `solve` call gets
    /// its own store; the problem itself is never mutated by solving.
    pub fn initial_store(&self) -> DomainStore<V> {
        self.initial.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::predicate::NotEqual;

    fn domain_of(values: &[i64]) -> Domain<i64> {
        values.iter().copied().collect()
    }

    #[test]
    fn rejects_a_missing_domain() {
        let result = Problem::new(
            vec![0, 1],
            [(0, domain_of(&[1, 2]))],
            vec![BinaryConstraint::new(0, 1, NotEqual)],
        );
        assert!(matches!(result, Err(Error::MissingDomain(1))));
    }

    #[test]
    fn rejects_an_empty_initial_domain() {
        let result = Problem::new(
            vec![0, 1],
            [(0, domain_of(&[1, 2])), (1, domain_of(&[]))],
            vec![],
        );
        assert!(matches!(result, Err(Error::EmptyDomain(1))));
    }

    #[test]
    fn rejects_a_constraint_over_undeclared_variables() {
        let result = Problem::new(
            vec![0, 1],
            [(0, domain_of(&[1])), (1, domain_of(&[2]))],
            vec![BinaryConstraint::new(0, 9, NotEqual)],
        );
        assert!(matches!(
            result,
            Err(Error::UnknownVariable { variable: 9, .. })
        ));
    }

    #[test]
    fn keeps_only_declared_domains() {
        let problem = Problem::new(
            vec![0],
            [(0, domain_of(&[1])), (42, domain_of(&[1, 2]))],
            vec![],
        )
        .unwrap();
        assert_eq!(problem.initial_store().len(), 1);
    }
}
