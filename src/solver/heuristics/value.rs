use crate::solver::{domain::Domain, value::ValueOrdering};

/// A strategy for the order in which a branched variable's candidate values
/// are tried.
pub trait ValueOrderingHeuristic<V: ValueOrdering> {
    /// Given the domain of the variable being branched on, returns the
    /// values in the order they should be tried.
    fn order_values<'a>(&self, domain: &'a Domain<V>) -> Box<dyn Iterator<Item = &'a V> + 'a>;
}

/// Tries values in the domain's natural (ascending) order.
pub struct IdentityValueHeuristic;

impl<V: ValueOrdering> ValueOrderingHeuristic<V> for IdentityValueHeuristic {
    fn order_values<'a>(&self, domain: &'a Domain<V>) -> Box<dyn Iterator<Item = &'a V> + 'a> {
        Box::new(domain.iter())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn identity_yields_ascending_order() {
        let domain: Domain<i64> = [9, 1, 5].into_iter().collect();
        let ordered: Vec<i64> = IdentityValueHeuristic
            .order_values(&domain)
            .copied()
            .collect();
        assert_eq!(ordered, vec![1, 5, 9]);
    }
}
