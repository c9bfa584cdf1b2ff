//! Selective Depth-First Chess Engine
//!
//! Explores forcing lines (checks and replies with at most one answer) to a
//! selective depth, records every scored line in an evaluation tree and
//! reports the best line found so far. The search runs as a single tokio
//! task and talks to its owner through a report channel and a stop signal.

pub mod config;
pub mod eval;
pub mod eval_tree;
pub mod limits;
pub mod report;
mod search;

use std::{sync::Arc, time::Duration};

use chess_core::Position;
use tokio::sync::{mpsc, oneshot};

pub use config::{ConfigError, EngineConfig, EvaluatorKind};
pub use eval::{Evaluator, Material, Space, MATE_SCORE};
pub use eval_tree::EvalTree;
pub use limits::SearchLimits;
pub use report::Report;

/// Shortest accepted period between progress reports.
pub const MIN_REPORT_INTERVAL: Duration = Duration::from_millis(1);

/// Depth-first search engine.
///
/// Holds the root position and settings between searches; each call to
/// [`DfsEngine::start`] runs an independent search on a fresh task.
#[derive(Clone)]
pub struct DfsEngine {
    position: Position,
    sel_depth: usize,
    evaluators: Vec<Arc<dyn Evaluator>>,
    report_interval: Duration,
}

impl DfsEngine {
    /// Engine without evaluators: every non-final position scores 0.
    /// A selective depth of 0 is raised to 1 so the root is always expanded.
    pub fn new(sel_depth: usize) -> Self {
        Self {
            position: Position::startpos(),
            sel_depth: sel_depth.max(1),
            evaluators: Vec::new(),
            report_interval: Duration::from_secs(1),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let mut engine = Self::new(config.sel_depth);
        engine.set_report_interval(config.report_interval());
        engine.evaluators = config.evaluators.iter().map(|k| k.build()).collect();
        engine
    }

    /// Sets the search root. The move history is dropped so reported lines
    /// start at this position.
    pub fn set_position(&mut self, pos: &Position) {
        self.position = pos.as_root();
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn set_sel_depth(&mut self, sel_depth: usize) {
        self.sel_depth = sel_depth.max(1);
    }

    pub fn sel_depth(&self) -> usize {
        self.sel_depth
    }

    /// Period of `Progress` reports, at least [`MIN_REPORT_INTERVAL`].
    pub fn set_report_interval(&mut self, interval: Duration) {
        self.report_interval = interval.max(MIN_REPORT_INTERVAL);
    }

    pub fn add_evaluator(&mut self, evaluator: impl Evaluator + 'static) {
        self.evaluators.push(Arc::new(evaluator));
    }

    /// Spawns the search on the current tokio runtime.
    ///
    /// The returned handle yields reports until exactly one
    /// [`Report::BestMove`] has been sent, after which the channel closes.
    pub fn start(&self, limits: SearchLimits) -> SearchHandle {
        let (out, reports) = mpsc::unbounded_channel();
        let (stop, stop_rx) = oneshot::channel();
        let search = search::Search::new(
            self.position.clone(),
            self.sel_depth,
            self.evaluators.clone(),
            self.report_interval,
            out,
        );
        tokio::spawn(search.run(limits, stop_rx));
        SearchHandle {
            reports,
            stop: StopHandle { tx: Some(stop) },
        }
    }
}

impl Default for DfsEngine {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// Requests a running search to finish. Dropping the handle also stops it.
#[derive(Debug)]
pub struct StopHandle {
    tx: Option<oneshot::Sender<()>>,
}

impl StopHandle {
    /// Idempotent; a search that already finished ignores the request.
    pub fn stop(&mut self) {
        if let Some(tx) = self.tx.take() {
            tx.send(()).ok();
        }
    }
}

/// Owner side of a running search.
#[derive(Debug)]
pub struct SearchHandle {
    reports: mpsc::UnboundedReceiver<Report>,
    stop: StopHandle,
}

impl SearchHandle {
    /// Next report, or `None` once the search task has exited.
    pub async fn next_report(&mut self) -> Option<Report> {
        self.reports.recv().await
    }

    pub fn stop(&mut self) {
        self.stop.stop();
    }

    /// Collects every report until the search task exits. The last one is
    /// always the [`Report::BestMove`].
    pub async fn wait(mut self) -> Vec<Report> {
        let mut all = Vec::new();
        while let Some(report) = self.reports.recv().await {
            all.push(report);
        }
        all
    }

    /// Separates the stop side from the report stream, so they can live
    /// in different tasks.
    pub fn split(self) -> (StopHandle, mpsc::UnboundedReceiver<Report>) {
        (self.stop, self.reports)
    }
}
