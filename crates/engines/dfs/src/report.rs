use std::fmt;

use chess_core::{line_to_string, Move};

/// Output of a running search, rendered in the UCI `info`/`bestmove`
/// text format by `Display`.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    /// Node telemetry. `ns` counts positions expanded since the previous
    /// progress report, `nodes` is the running total.
    Progress {
        ns: u64,
        nodes: u64,
        depth: usize,
        queue: Option<usize>,
    },
    /// Current principal variation and its score in pawns, from the point
    /// of view of the side to move at the root.
    PrincipalVariation {
        depth: usize,
        score: f64,
        line: Vec<Move>,
    },
    /// Terminal answer. `None` when the root has no legal move.
    BestMove(Option<Move>),
}

impl Report {
    pub fn is_best_move(&self) -> bool {
        matches!(self, Report::BestMove(_))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Progress {
                ns,
                nodes,
                depth,
                queue,
            } => {
                write!(f, "info ns {ns} nodes {nodes} depth {depth}")?;
                if let Some(q) = queue {
                    write!(f, " queue {q}")?;
                }
                Ok(())
            }
            Report::PrincipalVariation { depth, score, line } => write!(
                f,
                "info depth {depth} score cp {} pv {}",
                (score * 100.0).round() as i64,
                line_to_string(line)
            ),
            Report::BestMove(Some(mv)) => write!(f, "bestmove {mv}"),
            Report::BestMove(None) => f.write_str("bestmove 0000"),
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
