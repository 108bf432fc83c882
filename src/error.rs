use crate::solver::VariableId;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while constructing or solving a problem.
///
/// An unsatisfiable problem is *not* an error: the solver reports it through
/// [`Outcome::Unsatisfiable`](crate::solver::search::Outcome). Everything here
/// is either a malformed problem definition (caller error), an exhausted
/// search budget, or a defect in the engine itself.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A constraint refers to a variable that was never declared.
    #[error("constraint `{constraint}` references undeclared variable ?{variable}")]
    UnknownVariable {
        constraint: String,
        variable: VariableId,
    },

    /// A declared variable has no initial domain at all.
    #[error("no initial domain declared for variable ?{0}")]
    MissingDomain(VariableId),

    /// A variable's initial domain is empty before any propagation has run.
    #[error("variable ?{0} has an empty initial domain")]
    EmptyDomain(VariableId),

    /// The configured node budget ran out before the search finished.
    #[error("search budget of {0} nodes exhausted before the search completed")]
    BudgetExhausted(u64),

    /// A puzzle adapter was handed input it cannot translate.
    #[error("invalid puzzle input: {0}")]
    InvalidInput(String),

    /// An engine invariant was violated. This indicates a bug in the solver,
    /// never a property of the input problem.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}
