use std::collections::{HashSet, VecDeque};

use crate::solver::{ConstraintId, VariableId};

/// The AC-3 arc worklist: pending `(target variable, constraint)` pairs.
///
/// FIFO discipline with a membership set so an arc is never queued twice at
/// once. The processing order only affects how much work the fixed point
/// takes, not what it is, so any discipline would be correct.
pub struct WorkList {
    queue: VecDeque<(VariableId, ConstraintId)>,
    queued: HashSet<(VariableId, ConstraintId)>,
}

impl WorkList {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            queued: HashSet::new(),
        }
    }

    pub fn push(&mut self, variable: VariableId, constraint: ConstraintId) {
        if self.queued.insert((variable, constraint)) {
            self.queue.push_back((variable, constraint));
        }
    }

    pub fn pop(&mut self) -> Option<(VariableId, ConstraintId)> {
        let item = self.queue.pop_front()?;
        self.queued.remove(&item);
        Some(item)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for WorkList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_fifo_order() {
        let mut list = WorkList::new();
        list.push(0, 1);
        list.push(1, 0);
        assert_eq!(list.pop(), Some((0, 1)));
        assert_eq!(list.pop(), Some((1, 0)));
        assert_eq!(list.pop(), None);
    }

    #[test]
    fn deduplicates_queued_arcs() {
        let mut list = WorkList::new();
        list.push(3, 7);
        list.push(3, 7);
        assert_eq!(list.pop(), Some((3, 7)));
        assert!(list.is_empty());

        // Re-queuing after a pop is allowed again.
        list.push(3, 7);
        assert_eq!(list.pop(), Some((3, 7)));
    }
}
