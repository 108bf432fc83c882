//! The 9×9 Sudoku adapter.
//!
//! One variable per cell, identified as `row * 9 + col`. A clue cell gets a
//! singleton domain; an empty cell gets `{1..9}` and AC-3 does the initial
//! narrowing. The all-different rule over each row, column, and box is
//! decomposed into pairwise not-equal constraints; after deduplicating the
//! pairs that share both a row/column and a box, a 9×9 board has exactly 810
//! of them.

use std::collections::BTreeSet;

use crate::{
    error::{Error, Result},
    solver::{
        constraint::BinaryConstraint,
        domain::{Assignment, Domain},
        predicate::NotEqual,
        problem::Problem,
        search::Solver,
        value::StandardValue,
        VariableId,
    },
};

pub const SIZE: usize = 9;
const CELLS: usize = SIZE * SIZE;

fn cell(row: usize, col: usize) -> VariableId {
    (row * SIZE + col) as VariableId
}

/// Parses a grid from text: 81 significant characters, row-major, digits
/// `1`–`9` for clues and `.` or `0` for empty cells. Whitespace (newlines,
/// spaces, pipes from pretty-printed grids) is ignored.
pub fn parse_grid(text: &str) -> Result<[[Option<i64>; SIZE]; SIZE]> {
    let mut cells = Vec::with_capacity(CELLS);
    for ch in text.chars() {
        match ch {
            '1'..='9' => cells.push(Some(ch as i64 - '0' as i64)),
            '.' | '0' => cells.push(None),
            c if c.is_whitespace() || c == '|' || c == '-' || c == '+' => {}
            c => {
                return Err(Error::InvalidInput(format!(
                    "unexpected character {c:?} in sudoku grid"
                )))
            }
        }
    }
    if cells.len() != CELLS {
        return Err(Error::InvalidInput(format!(
            "sudoku grid has {} cells, expected {CELLS}",
            cells.len()
        )));
    }

    let mut grid = [[None; SIZE]; SIZE];
    for (i, value) in cells.into_iter().enumerate() {
        grid[i / SIZE][i % SIZE] = value;
    }
    Ok(grid)
}

/// Builds the CSP for a (possibly partial) grid.
pub fn build_problem(grid: &[[Option<i64>; SIZE]; SIZE]) -> Result<Problem<StandardValue>> {
    let variables: Vec<VariableId> = (0..CELLS as VariableId).collect();

    let domains = (0..SIZE).flat_map(|row| {
        (0..SIZE).map(move |col| {
            let domain: Domain<StandardValue> = match grid[row][col] {
                Some(clue) => Domain::singleton(StandardValue::Int(clue)),
                None => (1..=9).map(StandardValue::Int).collect(),
            };
            (cell(row, col), domain)
        })
    });

    let mut pairs: BTreeSet<(VariableId, VariableId)> = BTreeSet::new();
    for unit in units() {
        for (i, &a) in unit.iter().enumerate() {
            for &b in &unit[i + 1..] {
                pairs.insert(if a < b { (a, b) } else { (b, a) });
            }
        }
    }

    let constraints = pairs
        .into_iter()
        .map(|(a, b)| BinaryConstraint::new(a, b, NotEqual))
        .collect();

    Problem::new(variables, domains, constraints)
}

/// The 27 all-different units: 9 rows, 9 columns, 9 boxes.
fn units() -> Vec<Vec<VariableId>> {
    let mut units = Vec::with_capacity(27);
    for row in 0..SIZE {
        units.push((0..SIZE).map(|col| cell(row, col)).collect());
    }
    for col in 0..SIZE {
        units.push((0..SIZE).map(|row| cell(row, col)).collect());
    }
    for box_row in 0..3 {
        for box_col in 0..3 {
            let mut unit = Vec::with_capacity(SIZE);
            for r in 0..3 {
                for c in 0..3 {
                    unit.push(cell(box_row * 3 + r, box_col * 3 + c));
                }
            }
            units.push(unit);
        }
    }
    units
}

/// Renders a complete assignment back into grid shape: nine rows of nine
/// digits. Every sentinel from the input ends up replaced by a digit.
pub fn render_grid(assignment: &Assignment<StandardValue>) -> String {
    let mut out = String::with_capacity(CELLS + SIZE);
    for row in 0..SIZE {
        for col in 0..SIZE {
            let digit = assignment
                .get(&cell(row, col))
                .and_then(StandardValue::as_int)
                .and_then(|d| char::from_digit(d as u32, 10));
            out.push(digit.unwrap_or('?'));
        }
        out.push('\n');
    }
    out
}

/// End-to-end convenience: parse, solve, render. `Ok(None)` means the
/// puzzle is unsatisfiable.
pub fn solve(text: &str) -> Result<Option<String>> {
    let problem = build_problem(&parse_grid(text)?)?;
    let (outcome, _stats) = Solver::new().solve(&problem)?;
    Ok(outcome.into_solution().map(|a| render_grid(&a)))
}
