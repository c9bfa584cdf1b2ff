//! The search loop.
//!
//! One task owns the frontier, the seen set and the evaluation tree. Each
//! iteration polls, in priority order, the stop signal, the report timer and
//! the frontier, so a stop request is never starved by expansion work.

use std::{
    collections::{HashSet, VecDeque},
    sync::Arc,
    time::Duration,
};

use chess_core::{Position, PositionKey};
use tokio::{
    sync::{mpsc, oneshot},
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{
    eval::{signed_sum, Evaluator, MATE_SCORE},
    eval_tree::EvalTree,
    limits::SearchLimits,
    report::Report,
};

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Finish {
    Stopped,
    NodeBudget,
    TimeBudget,
    Exhausted,
}

pub(crate) struct Search {
    root: Position,
    sel_depth: usize,
    evaluators: Vec<Arc<dyn Evaluator>>,
    report_interval: Duration,
    out: mpsc::UnboundedSender<Report>,

    queue: VecDeque<Position>,
    seen: HashSet<PositionKey>,
    tree: EvalTree,
    depth: usize,
    nodes: u64,
    total: u64,
}

impl Search {
    pub(crate) fn new(
        root: Position,
        sel_depth: usize,
        evaluators: Vec<Arc<dyn Evaluator>>,
        report_interval: Duration,
        out: mpsc::UnboundedSender<Report>,
    ) -> Self {
        Self {
            root,
            sel_depth,
            evaluators,
            report_interval,
            out,
            queue: VecDeque::new(),
            seen: HashSet::new(),
            tree: EvalTree::new(),
            depth: sel_depth + 1,
            nodes: 0,
            total: 0,
        }
    }

    pub(crate) async fn run(mut self, limits: SearchLimits, mut stop: oneshot::Receiver<()>) {
        let start = Instant::now();
        let deadline = limits.deadline(start);
        info!(
            root = %self.root,
            sel_depth = self.sel_depth,
            max_nodes = ?limits.max_nodes,
            move_time = ?limits.move_time,
            "search started"
        );

        self.seed();
        if self.tree.is_empty() {
            debug!("root has no legal move");
            self.emit(Report::BestMove(None));
            return;
        }

        let mut ticker = time::interval_at(start + self.report_interval, self.report_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let finish = loop {
            tokio::select! {
                biased;

                // A dropped sender counts as a stop request.
                _ = &mut stop => break Finish::Stopped,

                _ = ticker.tick() => {
                    self.total += self.nodes;
                    self.emit(Report::Progress {
                        ns: self.nodes,
                        nodes: self.total,
                        depth: self.depth,
                        queue: Some(self.queue.len()),
                    });
                    self.nodes = 0;
                    self.emit_principal_variation();
                }

                _ = std::future::ready(()) => {
                    let Some(pos) = self.queue.pop_front() else {
                        break Finish::Exhausted;
                    };
                    self.step(pos);

                    if limits.nodes_exhausted(self.total + self.nodes) {
                        break Finish::NodeBudget;
                    }
                    if deadline.is_some_and(|d| Instant::now() >= d) {
                        break Finish::TimeBudget;
                    }
                }
            }
            tokio::task::yield_now().await;
        };

        self.tree.update_best_line();
        self.total += self.nodes;
        match finish {
            Finish::Stopped => {}
            Finish::NodeBudget | Finish::TimeBudget => self.emit_final_progress(),
            Finish::Exhausted => {
                self.emit_principal_variation();
                self.emit_final_progress();
            }
        }
        let best = self.tree.best_move();
        info!(
            reason = ?finish,
            nodes = self.total,
            elapsed = ?start.elapsed(),
            best = %best.map_or_else(|| "0000".to_string(), |m| m.to_string()),
            "search finished"
        );
        self.emit(Report::BestMove(best));
    }

    // Greedy one-ply line from the root, explored first; the other root
    // children worth a look go to the back of the queue.
    fn seed(&mut self) {
        let mut line = Vec::new();
        let mut pos = self.root.clone();
        while line.len() < self.sel_depth {
            let Some((next, score, finished)) = self.greedy_step(&pos) else {
                break;
            };
            self.tree.insert(next.line(), score);
            line.push(next.clone());
            pos = next;
            if finished {
                break;
            }
        }

        let Some(first) = line.first().and_then(|p| p.line().first().copied()) else {
            return;
        };
        for p in line {
            self.seen.insert(p.key());
            self.queue.push_front(p);
        }
        for child in self.root.next_positions() {
            if child.line().first() == Some(&first) || !worth_exploring(&child) {
                continue;
            }
            if self.seen.insert(child.key()) {
                self.queue.push_back(child);
            }
        }
        debug!(seeded = self.queue.len(), first = %first, "queue seeded");
    }

    fn greedy_step(&self, pos: &Position) -> Option<(Position, f64, bool)> {
        let mut best: Option<(Position, f64, bool)> = None;
        for child in pos.next_positions() {
            let (score, finished) = self.score(&child);
            if best.as_ref().map_or(true, |(_, s, _)| score > *s) {
                best = Some((child, score, finished));
            }
        }
        best
    }

    fn step(&mut self, pos: Position) {
        self.nodes += 1;
        let ply = pos.line().len();
        if ply < self.depth {
            self.tree.update_best_line();
        }
        self.depth = ply;

        let (score, _) = self.score(&pos);
        self.tree.insert(pos.line(), score);

        if ply >= self.sel_depth {
            return;
        }
        let children = pos.next_positions();
        let forced = children.len() <= 1;
        for child in children {
            if !forced && !worth_exploring(&child) {
                continue;
            }
            if self.seen.insert(child.key()) {
                self.queue.push_front(child);
            }
        }
    }

    /// Score of the move that reached `pos`, from the mover's perspective,
    /// and whether the game is over.
    fn score(&self, pos: &Position) -> (f64, bool) {
        if pos.valid_moves().is_empty() {
            return if pos.in_check() {
                (MATE_SCORE, true)
            } else {
                (0.0, true)
            };
        }
        if pos.is_fifty_move_draw() || pos.is_insufficient_material() {
            return (0.0, true);
        }
        (-signed_sum(&self.evaluators, pos), false)
    }

    fn emit(&self, report: Report) {
        // A closed channel means nobody is listening; the search still ends
        // through its own budget or stop signal.
        self.out.send(report).ok();
    }

    fn emit_principal_variation(&self) {
        let (line, score) = self.tree.best_line();
        self.emit(Report::PrincipalVariation {
            depth: line.len(),
            score,
            line,
        });
    }

    fn emit_final_progress(&self) {
        self.emit(Report::Progress {
            ns: self.nodes,
            nodes: self.total,
            depth: self.depth,
            queue: None,
        });
    }
}

/// Pruning filter: quiet successors are skipped unless they give check or
/// leave the opponent at most one reply.
pub(crate) fn worth_exploring(pos: &Position) -> bool {
    pos.in_check() || pos.valid_moves().len() <= 1
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
