//! Constraint propagation: the AC-3 fixed-point algorithm plus the narrower
//! incremental pass the search runs after each trial assignment.
//!
//! Propagation never errors. It answers a single question: can every
//! variable still take at least one value? `false` means some domain was
//! emptied and the current state is a dead end.

use tracing::{debug, trace};

use crate::solver::{
    constraint::ConstraintGraph,
    domain::DomainStore,
    stats::SearchStats,
    value::ValueOrdering,
    work_list::WorkList,
    ConstraintId, VariableId,
};

/// Runs full AC-3: every arc of every constraint, in both directions, until
/// the fixed point is reached.
///
/// Returns `false` as soon as any domain becomes empty (the problem is
/// proven unsatisfiable in the current state, no search required for this
/// branch), `true` once every remaining value has support in every
/// neighbouring domain. Repeated invocation on an already consistent store
/// is a no-op: domains only ever shrink.
pub fn enforce_arc_consistency<V: ValueOrdering>(
    graph: &ConstraintGraph<V>,
    store: &mut DomainStore<V>,
    stats: &mut SearchStats,
) -> bool {
    let mut worklist = WorkList::new();
    for (id, constraint) in graph.constraints().iter().enumerate() {
        for &var in constraint.variables() {
            worklist.push(var, id);
        }
    }
    run_to_fixed_point(graph, store, worklist, stats)
}

/// The incremental variant run after assigning `var`: only the arcs whose
/// target is a neighbour of `var` are seeded, and the shrink re-enqueue
/// takes care of anything further out.
///
/// Equivalent in effect to forward checking followed by outward propagation
/// of whatever shrank.
pub fn propagate_assignment<V: ValueOrdering>(
    graph: &ConstraintGraph<V>,
    store: &mut DomainStore<V>,
    var: VariableId,
    stats: &mut SearchStats,
) -> bool {
    let mut worklist = WorkList::new();
    for &id in graph.incident(var) {
        worklist.push(graph.constraint(id).other(var), id);
    }
    run_to_fixed_point(graph, store, worklist, stats)
}

fn run_to_fixed_point<V: ValueOrdering>(
    graph: &ConstraintGraph<V>,
    store: &mut DomainStore<V>,
    mut worklist: WorkList,
    stats: &mut SearchStats,
) -> bool {
    while let Some((target, constraint_id)) = worklist.pop() {
        let start_time = std::time::Instant::now();
        let revised = revise(graph, store, target, constraint_id);

        let constraint_stats = stats.constraint_stats.entry(constraint_id).or_default();
        constraint_stats.revisions += 1;
        constraint_stats.time_spent_micros += start_time.elapsed().as_micros() as u64;

        if revised {
            constraint_stats.prunings += 1;

            if store.domain(target).is_empty() {
                trace!(variable = target, "domain wiped out, propagation failed");
                return false;
            }

            // The domain of `target` shrank, so every other constraint
            // touching `target` may now prune its opposite variable.
            for &dep_id in graph.incident(target) {
                if dep_id != constraint_id {
                    worklist.push(graph.constraint(dep_id).other(target), dep_id);
                }
            }
        }
    }

    debug!("propagation reached a fixed point");
    true
}

/// Removes from `target`'s domain every value with no supporting value in
/// the opposite domain. Returns whether the domain changed.
fn revise<V: ValueOrdering>(
    graph: &ConstraintGraph<V>,
    store: &mut DomainStore<V>,
    target: VariableId,
    constraint_id: ConstraintId,
) -> bool {
    let constraint = graph.constraint(constraint_id);
    let other = constraint.other(target);

    let target_domain = store.domain(target);
    let other_domain = store.domain(other).clone();

    let revised = target_domain.retain(|target_value| {
        other_domain
            .iter()
            .any(|other_value| constraint.consistent(target, target_value, other_value))
    });

    if revised.len() < target_domain.len() {
        store.replace(target, revised);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::{
        constraint::BinaryConstraint,
        predicate::NotEqual,
    };

    fn graph_of(constraints: Vec<BinaryConstraint<i64>>) -> ConstraintGraph<i64> {
        let declared = constraints
            .iter()
            .flat_map(|c| c.variables().iter().copied())
            .collect();
        ConstraintGraph::new(constraints, &declared).unwrap()
    }

    fn store_of(domains: &[(VariableId, &[i64])]) -> DomainStore<i64> {
        DomainStore::new(
            domains
                .iter()
                .map(|(var, values)| (*var, values.iter().copied().collect()))
                .collect(),
        )
    }

    #[test]
    fn prunes_values_without_support() {
        // ?0 != ?1 with ?1 fixed to 1: AC-3 must remove 1 from ?0.
        let graph = graph_of(vec![BinaryConstraint::new(0, 1, NotEqual)]);
        let mut store = store_of(&[(0, &[1, 2]), (1, &[1])]);
        let mut stats = SearchStats::default();

        assert!(enforce_arc_consistency(&graph, &mut store, &mut stats));
        assert_eq!(store.domain(0).singleton_value(), Some(2));
    }

    #[test]
    fn shrinks_cascade_through_the_graph() {
        // A chain ?0 != ?1 != ?2 with singleton ends forces the middle.
        let graph = graph_of(vec![
            BinaryConstraint::new(0, 1, NotEqual),
            BinaryConstraint::new(1, 2, NotEqual),
        ]);
        let mut store = store_of(&[(0, &[1]), (1, &[1, 2]), (2, &[2, 3])]);
        let mut stats = SearchStats::default();

        assert!(enforce_arc_consistency(&graph, &mut store, &mut stats));
        assert_eq!(store.domain(1).singleton_value(), Some(2));
        assert_eq!(store.domain(2).singleton_value(), Some(3));
    }

    #[test]
    fn detects_a_wipeout() {
        let graph = graph_of(vec![BinaryConstraint::new(0, 1, NotEqual)]);
        let mut store = store_of(&[(0, &[5]), (1, &[5])]);
        let mut stats = SearchStats::default();

        assert!(!enforce_arc_consistency(&graph, &mut store, &mut stats));
    }

    #[test]
    fn domains_only_shrink_and_a_second_pass_is_a_no_op() {
        let graph = graph_of(vec![
            BinaryConstraint::new(0, 1, NotEqual),
            BinaryConstraint::new(1, 2, NotEqual),
        ]);
        let mut store = store_of(&[(0, &[1]), (1, &[1, 2, 3]), (2, &[2, 3])]);
        let initial = store.clone();
        let mut stats = SearchStats::default();

        assert!(enforce_arc_consistency(&graph, &mut store, &mut stats));
        for (var, domain) in store.iter() {
            for value in domain.iter() {
                assert!(initial.domain(*var).contains(value), "domain grew");
            }
        }

        // Idempotence: the fixed point is already reached.
        let after_first = store.clone();
        let prunings_before = stats.total_prunings();
        assert!(enforce_arc_consistency(&graph, &mut store, &mut stats));
        assert_eq!(store, after_first);
        assert_eq!(stats.total_prunings(), prunings_before);
    }

    #[test]
    fn incremental_pass_only_touches_reachable_arcs() {
        // ?0 and ?1 constrained; ?2 is isolated and must be untouched.
        let graph = graph_of(vec![BinaryConstraint::new(0, 1, NotEqual)]);
        let mut store = store_of(&[(0, &[1]), (1, &[1, 2]), (2, &[1, 2, 3])]);
        let mut stats = SearchStats::default();

        assert!(propagate_assignment(&graph, &mut store, 0, &mut stats));
        assert_eq!(store.domain(1).singleton_value(), Some(2));
        assert_eq!(store.domain(2).len(), 3);
    }
}
