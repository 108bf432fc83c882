//! Trellis is a small, reusable constraint satisfaction problem (CSP) solver
//! built around arc consistency and backtracking search.
//!
//! The engine is problem-agnostic: a problem is nothing more than a set of
//! variables, a candidate-value domain per variable, and pairwise
//! constraints, each governed by a [`Predicate`]. Solving runs the AC-3
//! fixed-point algorithm to prune domains, then a depth-first backtracking
//! search with propagate-on-assign and full undo on failure.
//!
//! # Core Concepts
//!
//! - **[`Problem`]**: the variables, their initial domains, and the
//!   constraint graph, validated at construction.
//! - **[`Predicate`]**: the consistency test for one constrained pair, e.g.
//!   [`NotEqual`]. Custom rules plug in through [`FnPredicate`].
//! - **[`Solver`]**: AC-3 plus backtracking with pluggable variable and
//!   value heuristics. [`Solver::solve`] finds one solution;
//!   [`Solver::solve_all`] enumerates every solution.
//! - **[`Outcome`]**: `Solved(assignment)` or `Unsatisfiable` — the latter
//!   is an answer, not an error.
//!
//! Ready-made adapters for Sudoku, N-Queens, and graph colouring live in
//! [`adapters`].
//!
//! # Example: A Simple 2-Variable Problem
//!
//! Solve `?A != ?B` where `?A` can be `1` or `2` and `?B` can only be `1`.
//! The solver deduces that `?A` must be `2` from propagation alone.
//!
//! ```
//! use trellis::solver::constraint::BinaryConstraint;
//! use trellis::solver::domain::Domain;
//! use trellis::solver::predicate::NotEqual;
//! use trellis::solver::problem::Problem;
//! use trellis::solver::search::Solver;
//!
//! let a = 0;
//! let b = 1;
//!
//! let problem = Problem::new(
//!     vec![a, b],
//!     [
//!         (a, [1i64, 2].into_iter().collect::<Domain<_>>()),
//!         (b, [1i64].into_iter().collect::<Domain<_>>()),
//!     ],
//!     vec![BinaryConstraint::new(a, b, NotEqual)],
//! )?;
//!
//! let (outcome, _stats) = Solver::new().solve(&problem)?;
//! let assignment = outcome.into_solution().expect("satisfiable");
//! assert_eq!(assignment[&a], 2);
//! # Ok::<(), trellis::error::Error>(())
//! ```
//!
//! [`Problem`]: solver::problem::Problem
//! [`Predicate`]: solver::predicate::Predicate
//! [`NotEqual`]: solver::predicate::NotEqual
//! [`FnPredicate`]: solver::predicate::FnPredicate
//! [`Solver`]: solver::search::Solver
//! [`Solver::solve`]: solver::search::Solver::solve
//! [`Solver::solve_all`]: solver::search::Solver::solve_all
//! [`Outcome`]: solver::search::Outcome

pub mod adapters;
pub mod error;
pub mod solver;
