//! Pluggable strategies for choosing what to branch on next.

pub mod value;
pub mod variable;
