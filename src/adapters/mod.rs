//! Problem adapters: translate concrete puzzles into the engine's
//! `(variables, domains, constraints)` triple and render assignments back
//! into puzzle form.
//!
//! Adapters are leaves. The engine knows nothing about any of them, and they
//! only talk to it through the public [`Problem`](crate::solver::problem)
//! contract.

pub mod graph_colouring;
pub mod n_queens;
pub mod sudoku;
