use std::collections::HashMap;

use prettytable::{Cell, Row, Table};
use serde::Serialize;

use crate::solver::{constraint::ConstraintGraph, value::ValueEquality, ConstraintId};

/// Counters describing one solve: how much searching and propagating it took.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SearchStats {
    /// Search-tree nodes entered (one per Select step).
    pub nodes_visited: u64,
    /// Trial values abandoned after a failed branch.
    pub backtracks: u64,
    /// Complete assignments found (only > 1 when enumerating).
    pub solutions_found: u64,
    /// Per-constraint revision counters, keyed by constraint index.
    pub constraint_stats: HashMap<ConstraintId, PerConstraintStats>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct PerConstraintStats {
    /// Times the constraint's arcs were revised.
    pub revisions: u64,
    /// Revisions that actually shrank a domain.
    pub prunings: u64,
    pub time_spent_micros: u64,
}

impl SearchStats {
    pub fn total_revisions(&self) -> u64 {
        self.constraint_stats.values().map(|s| s.revisions).sum()
    }

    pub fn total_prunings(&self) -> u64 {
        self.constraint_stats.values().map(|s| s.prunings).sum()
    }
}

/// Renders the per-constraint counters as a table, slowest constraints last.
pub fn render_stats_table<V: ValueEquality>(
    stats: &SearchStats,
    graph: &ConstraintGraph<V>,
) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Constraint"),
        Cell::new("ID"),
        Cell::new("Revise Calls"),
        Cell::new("Prunings"),
        Cell::new("Time / Call (µs)"),
        Cell::new("Total Time (ms)"),
    ]));

    let mut sorted_stats: Vec<(&ConstraintId, &PerConstraintStats)> =
        stats.constraint_stats.iter().collect();
    sorted_stats.sort_by_key(|(id, s)| (s.time_spent_micros, **id));

    for (constraint_id, constraint_stats) in sorted_stats {
        let descriptor = graph.constraint(*constraint_id).descriptor();
        let avg_time = if constraint_stats.revisions > 0 {
            constraint_stats.time_spent_micros as f64 / constraint_stats.revisions as f64
        } else {
            0.0
        };

        table.add_row(Row::new(vec![
            Cell::new(&descriptor.description),
            Cell::new(&constraint_id.to_string()),
            Cell::new(&constraint_stats.revisions.to_string()),
            Cell::new(&constraint_stats.prunings.to_string()),
            Cell::new(&format!("{avg_time:.2}")),
            Cell::new(&format!(
                "{:.2}",
                constraint_stats.time_spent_micros as f64 / 1000.0
            )),
        ]));
    }

    table.to_string()
}
