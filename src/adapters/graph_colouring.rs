//! The graph-colouring adapter.
//!
//! Vertices are numbered `0..num_vertices`, colours `0..num_colours`, and
//! every declared edge becomes one pairwise not-equal constraint.

use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    solver::{
        constraint::BinaryConstraint,
        domain::{Assignment, Domain},
        predicate::NotEqual,
        problem::Problem,
        value::StandardValue,
        VariableId,
    },
};

/// Builds the CSP for colouring a graph with `num_colours` colours.
///
/// Edges referencing a vertex outside `0..num_vertices` are rejected during
/// problem construction; self-loops are rejected here because no colouring
/// can ever satisfy them and they would otherwise slip through the pairwise
/// encoding.
pub fn build_problem(
    num_vertices: u32,
    edges: &[(VariableId, VariableId)],
    num_colours: usize,
) -> Result<Problem<StandardValue>> {
    for &(u, v) in edges {
        if u == v {
            return Err(Error::InvalidInput(format!(
                "self-loop on vertex {u} can never be coloured"
            )));
        }
    }

    let variables: Vec<VariableId> = (0..num_vertices).collect();
    let palette: Domain<StandardValue> = (0..num_colours as i64).map(StandardValue::Int).collect();
    let domains: Vec<_> = variables.iter().map(|&v| (v, palette.clone())).collect();

    let constraints = edges
        .iter()
        .map(|&(u, v)| BinaryConstraint::new(u, v, NotEqual))
        .collect();

    Problem::new(variables, domains, constraints)
}

/// Converts a solved assignment into a vertex → colour-index map.
pub fn colours(assignment: &Assignment<StandardValue>) -> HashMap<VariableId, usize> {
    assignment
        .iter()
        .filter_map(|(&vertex, value)| value.as_int().map(|c| (vertex, c as usize)))
        .collect()
}

/// The Australia map instance: seven regions, nine adjacencies, and the
/// usual three colours. Returns the problem plus region names indexed by
/// vertex id.
pub fn australia() -> Result<(Problem<StandardValue>, [&'static str; 7])> {
    let names = ["WA", "NT", "SA", "Q", "NSW", "V", "T"];
    let (wa, nt, sa, q, nsw, v) = (0, 1, 2, 3, 4, 5);
    let edges = [
        (wa, nt),
        (wa, sa),
        (nt, sa),
        (nt, q),
        (sa, q),
        (sa, nsw),
        (sa, v),
        (q, nsw),
        (nsw, v),
    ];
    let problem = build_problem(names.len() as u32, &edges, 3)?;
    Ok((problem, names))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::search::{Outcome, Solver};

    #[test]
    fn colours_the_australia_map_with_three_colours() {
        let (problem, _names) = australia().unwrap();
        let (outcome, _stats) = Solver::new().solve(&problem).unwrap();
        let assignment = outcome.into_solution().expect("satisfiable");
        let colouring = colours(&assignment);

        assert_eq!(colouring.len(), 7);
        for constraint in problem.graph().constraints() {
            let [u, v] = *constraint.variables();
            assert_ne!(colouring[&u], colouring[&v], "regions {u} and {v} clash");
        }
    }

    #[test]
    fn a_triangle_needs_three_colours() {
        let edges = [(0, 1), (1, 2), (2, 0)];

        let two = build_problem(3, &edges, 2).unwrap();
        let (outcome, _stats) = Solver::new().solve(&two).unwrap();
        assert_eq!(outcome, Outcome::Unsatisfiable);

        let three = build_problem(3, &edges, 3).unwrap();
        let (outcome, _stats) = Solver::new().solve(&three).unwrap();
        assert!(outcome.is_solved());
    }

    #[test]
    fn a_complete_graph_on_four_vertices_defeats_three_colours() {
        let edges = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        let problem = build_problem(4, &edges, 3).unwrap();
        let (outcome, _stats) = Solver::new().solve(&problem).unwrap();
        assert_eq!(outcome, Outcome::Unsatisfiable);
    }

    #[test]
    fn rejects_self_loops() {
        assert!(matches!(
            build_problem(2, &[(1, 1)], 3),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_edges_to_unknown_vertices() {
        assert!(matches!(
            build_problem(2, &[(0, 7)], 3),
            Err(Error::UnknownVariable { variable: 7, .. })
        ));
    }

    #[test]
    fn an_edgeless_graph_is_colourable_with_one_colour() {
        let problem = build_problem(4, &[], 1).unwrap();
        let (outcome, _stats) = Solver::new().solve(&problem).unwrap();
        let colouring = colours(&outcome.into_solution().unwrap());
        assert!(colouring.values().all(|&c| c == 0));
    }

    mod prop_tests {
        use std::collections::HashSet;

        use proptest::prelude::*;

        use super::*;

        fn random_graph() -> impl Strategy<
            Value = (u32, Vec<(VariableId, VariableId)>, usize),
        > {
            (2..12u32).prop_flat_map(|vertices| {
                let edges = proptest::collection::vec(
                    (0..vertices, 0..vertices)
                        .prop_filter("no self-loops", |(a, b)| a != b)
                        .prop_map(|(a, b)| if a < b { (a, b) } else { (b, a) }),
                    0..=((vertices * (vertices - 1) / 2).min(24) as usize),
                )
                .prop_map(|edges| {
                    let unique: HashSet<_> = edges.into_iter().collect();
                    unique.into_iter().collect::<Vec<_>>()
                });
                (Just(vertices), edges, 2..5usize)
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn every_solved_colouring_is_valid((vertices, edges, palette) in random_graph()) {
                let problem = build_problem(vertices, &edges, palette).unwrap();
                let (outcome, _stats) = Solver::new().solve(&problem).unwrap();

                // Unsatisfiable is a legitimate answer for a tight palette;
                // only a claimed solution carries obligations.
                if let Some(assignment) = outcome.into_solution() {
                    let colouring = colours(&assignment);
                    for (u, v) in edges {
                        prop_assert!(colouring[&u] < palette);
                        prop_assert_ne!(colouring[&u], colouring[&v]);
                    }
                }
            }
        }
    }
}
