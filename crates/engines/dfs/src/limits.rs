//! Budgets that end a search on their own, without a stop request.
//!
//! Both budgets are soft: the search loop checks them once per expanded
//! node, so a node that is already being expanded always completes.

use std::time::Duration;

use tokio::time::Instant;

/// Node and time budgets for one search.
///
/// The default is unbounded: the search runs until its queue empties or it
/// is told to stop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop once this many positions have been expanded (None = no cap)
    pub max_nodes: Option<u64>,
    /// Maximum time allowed for this search (None = infinite)
    pub move_time: Option<Duration>,
}

impl SearchLimits {
    /// No budget at all.
    pub fn infinite() -> Self {
        Self::default()
    }

    /// Create limits with only a node cap.
    pub fn nodes(max_nodes: u64) -> Self {
        Self {
            max_nodes: Some(max_nodes),
            move_time: None,
        }
    }

    /// Create limits with only a time constraint.
    pub fn time(move_time: Duration) -> Self {
        Self {
            max_nodes: None,
            move_time: Some(move_time),
        }
    }

    /// True once `nodes` expanded positions exhaust the node cap.
    #[inline]
    pub fn nodes_exhausted(&self, nodes: u64) -> bool {
        self.max_nodes.is_some_and(|max| nodes >= max)
    }

    /// Point in time at which a search started at `start` must finish.
    pub fn deadline(&self, start: Instant) -> Option<Instant> {
        self.move_time.map(|t| start + t)
    }
}

#[cfg(test)]
#[path = "limits_tests.rs"]
mod limits_tests;
