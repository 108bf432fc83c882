/// The base trait for any value that can live in a variable's domain.
///
/// This is a marker trait: any type that is cloneable, debuggable, equatable,
/// and hashable qualifies automatically.
pub trait ValueEquality: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static {}
impl<T> ValueEquality for T where T: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static {}

/// A capability trait for values with a defined total ordering.
///
/// The engine stores domains in ordered sets, so every solvable value type
/// must be orderable. The ordering also fixes the value-iteration order,
/// which keeps search results reproducible.
pub trait ValueOrdering: ValueEquality + Ord {}
impl<T> ValueOrdering for T where T: ValueEquality + Ord {}

/// A capability trait for values that support basic arithmetic.
///
/// Needed by predicates such as
/// [`AbsDiffNotEqual`](crate::solver::predicate::AbsDiffNotEqual), which
/// compares the difference of two values against a fixed offset.
pub trait ValueArithmetic: ValueEquality {
    /// Subtracts one value from another.
    ///
    /// # Panics
    ///
    /// May panic if the underlying type does not support subtraction.
    fn sub(&self, other: &Self) -> Self;

    /// Returns the absolute value.
    ///
    /// # Panics
    ///
    /// May panic if the underlying type does not support the operation.
    fn abs(&self) -> Self;
}

/// A concrete enum providing standard, reusable value implementations.
///
/// Problem adapters can use `StandardValue` directly, or wrap it in their own
/// value type when a puzzle mixes value kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardValue {
    /// A 64-bit integer value.
    Int(i64),
    /// A boolean value.
    Bool(bool),
}

impl ValueArithmetic for StandardValue {
    fn sub(&self, other: &Self) -> Self {
        match (self, other) {
            (StandardValue::Int(a), StandardValue::Int(b)) => StandardValue::Int(a - b),
            _ => panic!("Arithmetic sub is only supported for Int types"),
        }
    }

    fn abs(&self) -> Self {
        match self {
            StandardValue::Int(a) => StandardValue::Int(a.abs()),
            _ => panic!("Arithmetic abs is only supported for Int types"),
        }
    }
}

impl StandardValue {
    /// Extracts the integer payload, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            StandardValue::Int(i) => Some(*i),
            StandardValue::Bool(_) => None,
        }
    }
}
