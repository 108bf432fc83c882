use std::sync::Arc;

use crate::{
    error::{Error, Result},
    solver::{predicate::Predicate, value::ValueEquality, ConstraintId, VariableId},
};

/// A human-readable summary of a constraint, used in diagnostics and the
/// statistics table.
#[derive(Debug, Clone)]
pub struct ConstraintDescriptor {
    pub name: String,
    pub description: String,
}

/// A relation over an ordered pair of variables, governed by a
/// [`Predicate`].
///
/// Constraints are symmetric in effect: declaring `(X, Y)` constrains both
/// arc directions. The predicate is declared once, in `(X, Y)` order, and
/// [`consistent`](Self::consistent) swaps arguments as needed so callers
/// never track which direction was declared.
#[derive(Debug, Clone)]
pub struct BinaryConstraint<V> {
    vars: [VariableId; 2],
    predicate: Arc<dyn Predicate<V>>,
}

impl<V: ValueEquality> BinaryConstraint<V> {
    pub fn new(x: VariableId, y: VariableId, predicate: impl Predicate<V> + 'static) -> Self {
        Self {
            vars: [x, y],
            predicate: Arc::new(predicate),
        }
    }

    pub fn variables(&self) -> &[VariableId; 2] {
        &self.vars
    }

    /// The variable at the other end of the constraint from `var`.
    pub fn other(&self, var: VariableId) -> VariableId {
        if var == self.vars[0] {
            self.vars[1]
        } else {
            self.vars[0]
        }
    }

    pub fn touches(&self, var: VariableId) -> bool {
        self.vars[0] == var || self.vars[1] == var
    }

    /// Tests the predicate for the arc whose target is `target`, normalizing
    /// argument order to the declared `(X, Y)` orientation.
    pub fn consistent(&self, target: VariableId, target_value: &V, other_value: &V) -> bool {
        if target == self.vars[0] {
            self.predicate.test(target_value, other_value)
        } else {
            self.predicate.test(other_value, target_value)
        }
    }

    pub fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: self.predicate.name().to_string(),
            description: format!("{}(?{}, ?{})", self.predicate.name(), self.vars[0], self.vars[1]),
        }
    }
}

/// The read-only adjacency structure over a problem's constraints.
///
/// Built once at problem construction and never mutated while solving. For
/// each variable it answers "which constraints touch me" in O(1) average
/// lookup, which is what both the AC-3 worklist seeding and the shrink
/// re-enqueue step need.
#[derive(Debug, Clone)]
pub struct ConstraintGraph<V> {
    constraints: Vec<BinaryConstraint<V>>,
    incident: std::collections::HashMap<VariableId, Vec<ConstraintId>>,
}

impl<V: ValueEquality> ConstraintGraph<V> {
    /// Builds the graph, rejecting any constraint that references a variable
    /// outside `declared`.
    pub fn new(
        constraints: Vec<BinaryConstraint<V>>,
        declared: &std::collections::HashSet<VariableId>,
    ) -> Result<Self> {
        let mut incident: std::collections::HashMap<VariableId, Vec<ConstraintId>> =
            std::collections::HashMap::new();
        for (id, constraint) in constraints.iter().enumerate() {
            for &var in constraint.variables() {
                if !declared.contains(&var) {
                    return Err(Error::UnknownVariable {
                        constraint: constraint.descriptor().description,
                        variable: var,
                    });
                }
                incident.entry(var).or_default().push(id);
            }
        }
        Ok(Self {
            constraints,
            incident,
        })
    }

    pub fn constraint(&self, id: ConstraintId) -> &BinaryConstraint<V> {
        &self.constraints[id]
    }

    pub fn constraints(&self) -> &[BinaryConstraint<V>] {
        &self.constraints
    }

    /// The constraints incident to `var`.
    pub fn incident(&self, var: VariableId) -> &[ConstraintId] {
        self.incident.get(&var).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The variables sharing at least one constraint with `var`.
    pub fn neighbours(&self, var: VariableId) -> impl Iterator<Item = VariableId> + '_ {
        self.incident(var)
            .iter()
            .map(move |&id| self.constraints[id].other(var))
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}
