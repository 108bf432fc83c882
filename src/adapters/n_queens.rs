//! The N-Queens adapter.
//!
//! One variable per row, whose value is the column its queen occupies.
//! Columns are covered by a pairwise not-equal constraint per row pair, and
//! diagonals by an absolute-difference constraint: rows `i` and `j` clash
//! diagonally exactly when their columns differ by `j - i`.

use crate::{
    error::{Error, Result},
    solver::{
        constraint::BinaryConstraint,
        domain::{Assignment, Domain},
        predicate::{AbsDiffNotEqual, NotEqual},
        problem::Problem,
        search::Solver,
        value::StandardValue,
        VariableId,
    },
};

/// Builds the CSP for an `n`-queens board.
pub fn build_problem(n: usize) -> Result<Problem<StandardValue>> {
    let variables: Vec<VariableId> = (0..n as VariableId).collect();
    let columns: Domain<StandardValue> = (0..n as i64).map(StandardValue::Int).collect();

    let domains: Vec<_> = variables.iter().map(|&row| (row, columns.clone())).collect();

    let mut constraints = Vec::with_capacity(n * n.saturating_sub(1));
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (variables[i], variables[j]);
            constraints.push(BinaryConstraint::new(a, b, NotEqual));
            constraints.push(BinaryConstraint::new(
                a,
                b,
                AbsDiffNotEqual::new(StandardValue::Int((j - i) as i64)),
            ));
        }
    }

    Problem::new(variables, domains, constraints)
}

/// Finds one placement, as column indices per row. `Ok(None)` means no
/// placement exists (n = 2 and n = 3).
pub fn first_solution(n: usize) -> Result<Option<Vec<usize>>> {
    let problem = build_problem(n)?;
    let (outcome, _stats) = Solver::new().solve(&problem)?;
    outcome
        .into_solution()
        .map(|assignment| to_columns(&assignment, n))
        .transpose()
}

/// Enumerates every placement, each as column indices per row.
pub fn all_solutions(n: usize) -> Result<Vec<Vec<usize>>> {
    let problem = build_problem(n)?;
    let (solutions, _stats) = Solver::new().solve_all(&problem)?;
    solutions
        .iter()
        .map(|assignment| to_columns(assignment, n))
        .collect()
}

/// Reads a complete assignment back out as column indices per row.
pub fn to_columns(assignment: &Assignment<StandardValue>, n: usize) -> Result<Vec<usize>> {
    (0..n as VariableId)
        .map(|row| {
            assignment
                .get(&row)
                .and_then(StandardValue::as_int)
                .map(|col| col as usize)
                .ok_or_else(|| {
                    Error::Internal(format!("no column assigned for queen row {row}"))
                })
        })
        .collect()
}

/// Renders a placement as board rows, a `Q` in the queen's column and `.`
/// elsewhere.
pub fn render_board(columns: &[usize]) -> Vec<String> {
    let n = columns.len();
    columns
        .iter()
        .map(|&col| {
            (0..n)
                .map(|c| if c == col { 'Q' } else { '.' })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_placement_is_valid(columns: &[usize]) {
        let n = columns.len();
        for i in 0..n {
            for j in (i + 1)..n {
                assert_ne!(columns[i], columns[j], "shared column");
                assert_ne!(
                    columns[i].abs_diff(columns[j]),
                    j - i,
                    "shared diagonal between rows {i} and {j}"
                );
            }
        }
    }

    #[test]
    fn four_queens_has_exactly_two_solutions() {
        let solutions = all_solutions(4).unwrap();
        let as_set: HashSet<Vec<usize>> = solutions.iter().cloned().collect();
        assert_eq!(
            as_set,
            HashSet::from([vec![1, 3, 0, 2], vec![2, 0, 3, 1]])
        );
    }

    #[test]
    fn eight_queens_has_exactly_ninety_two_solutions() {
        let solutions = all_solutions(8).unwrap();
        assert_eq!(solutions.len(), 92);

        let distinct: HashSet<Vec<usize>> = solutions.iter().cloned().collect();
        assert_eq!(distinct.len(), 92);
        for placement in &solutions {
            assert_placement_is_valid(placement);
        }
    }

    #[test]
    fn small_boards_without_solutions_are_unsatisfiable() {
        assert_eq!(first_solution(2).unwrap(), None);
        assert_eq!(first_solution(3).unwrap(), None);
        assert!(all_solutions(3).unwrap().is_empty());
    }

    #[test]
    fn a_single_queen_is_trivial() {
        assert_eq!(first_solution(1).unwrap(), Some(vec![0]));
    }

    #[test]
    fn first_solution_is_valid_for_a_larger_board() {
        let placement = first_solution(10).unwrap().expect("satisfiable");
        assert_placement_is_valid(&placement);
    }

    #[test]
    fn renders_queen_markers() {
        assert_eq!(
            render_board(&[1, 3, 0, 2]),
            vec![".Q..", "...Q", "Q...", "..Q."]
        );
    }
}
