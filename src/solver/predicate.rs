//! Binary consistency predicates.
//!
//! A predicate is the "rule" half of a constraint: given a value for each of
//! the two constrained variables, it decides whether the pair is admissible.
//! Predicates are declared once per constraint; the engine takes care of
//! applying them with the right argument order for each arc direction.

use std::sync::Arc;

use crate::solver::value::{ValueArithmetic, ValueEquality};

/// The consistency test governing an ordered pair of variables `(X, Y)`.
///
/// `test(a, b)` receives a candidate value for `X` first and for `Y` second,
/// in the order the constraint was declared.
pub trait Predicate<V>: std::fmt::Debug + Send + Sync {
    fn test(&self, a: &V, b: &V) -> bool;

    /// A short name for diagnostics and statistics tables.
    fn name(&self) -> &'static str;
}

/// The workhorse predicate: the two variables must take different values.
#[derive(Debug, Clone, Copy)]
pub struct NotEqual;

impl<V: ValueEquality> Predicate<V> for NotEqual {
    fn test(&self, a: &V, b: &V) -> bool {
        a != b
    }

    fn name(&self) -> &'static str {
        "NotEqual"
    }
}

/// Requires `abs(a - b) != offset`.
///
/// Used by the N-Queens adapter to forbid two queens from sharing a diagonal:
/// rows `i` and `j` clash diagonally exactly when their column difference
/// equals `j - i`.
#[derive(Debug, Clone)]
pub struct AbsDiffNotEqual<V> {
    offset: V,
}

impl<V> AbsDiffNotEqual<V> {
    pub fn new(offset: V) -> Self {
        Self { offset }
    }
}

impl<V: ValueEquality + ValueArithmetic + Send + Sync> Predicate<V> for AbsDiffNotEqual<V> {
    fn test(&self, a: &V, b: &V) -> bool {
        a.sub(b).abs() != self.offset
    }

    fn name(&self) -> &'static str {
        "AbsDiffNotEqual"
    }
}

/// Adapts an arbitrary function or closure into a [`Predicate`].
///
/// This is the escape hatch for problem-specific rules that none of the
/// stock predicates cover.
#[derive(Clone)]
pub struct FnPredicate<V> {
    name: &'static str,
    test: Arc<dyn Fn(&V, &V) -> bool + Send + Sync>,
}

impl<V> FnPredicate<V> {
    pub fn new(name: &'static str, test: impl Fn(&V, &V) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name,
            test: Arc::new(test),
        }
    }
}

impl<V> std::fmt::Debug for FnPredicate<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnPredicate").field("name", &self.name).finish()
    }
}

impl<V: ValueEquality> Predicate<V> for FnPredicate<V> {
    fn test(&self, a: &V, b: &V) -> bool {
        (self.test)(a, b)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
