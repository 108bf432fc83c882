//! The problem-agnostic solver engine: domains, constraints, propagation,
//! heuristics, and backtracking search.

pub mod constraint;
pub mod domain;
pub mod heuristics;
pub mod predicate;
pub mod problem;
pub mod propagate;
pub mod search;
pub mod stats;
pub mod value;
pub mod work_list;

/// An opaque identifier for a variable. Adapters decide what it stands for
/// (a board cell, a queen's row, a graph vertex).
pub type VariableId = u32;

/// An index into a problem's constraint list.
pub type ConstraintId = usize;
