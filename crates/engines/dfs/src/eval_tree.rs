//! Tree of scored lines gathered during one search.
//!
//! Every node stores the score of the move that reaches it, from the point
//! of view of the side that played that move. Inserting a line records the
//! static score of its last move; [`EvalTree::update_best_line`] later backs
//! scores up the tree negamax style. Between backups the principal
//! variation may be stale.

use chess_core::Move;
use tracing::trace;

const ROOT: usize = 0;

#[derive(Debug, Clone)]
struct Node {
    mv: Option<Move>,
    parent: Option<usize>,
    children: Vec<usize>,
    best: Option<usize>,
    ply: usize,
    static_score: f64,
    score: f64,
}

impl Node {
    fn new(mv: Option<Move>, parent: Option<usize>, ply: usize) -> Self {
        Self {
            mv,
            parent,
            children: Vec::new(),
            best: None,
            ply,
            static_score: f64::NEG_INFINITY,
            score: f64::NEG_INFINITY,
        }
    }
}

/// Arena-backed evaluation tree. Node ids are indices into `nodes`.
#[derive(Debug, Clone)]
pub struct EvalTree {
    nodes: Vec<Node>,
    dirty: Vec<usize>,
}

impl Default for EvalTree {
    fn default() -> Self {
        Self::new()
    }
}

impl EvalTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(None, None, 0)],
            dirty: Vec::new(),
        }
    }

    /// Number of scored lines in the tree, the root excluded.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records `score` for the last move of `line`, creating any missing
    /// nodes along the way. Only the immediate parent's best pointer is
    /// refreshed here.
    pub fn insert(&mut self, line: &[Move], score: f64) {
        if line.is_empty() {
            return;
        }
        let mut at = ROOT;
        for &mv in line {
            at = match self.child(at, mv) {
                Some(id) => id,
                None => self.push_child(at, mv),
            };
        }

        let node = &mut self.nodes[at];
        node.static_score = score;
        node.score = score;
        let parent = node.parent.unwrap_or(ROOT);

        let better = match self.nodes[parent].best {
            None => true,
            Some(best) => best != at && score > self.nodes[best].score,
        };
        if better {
            self.nodes[parent].best = Some(at);
        }
        self.dirty.push(at);
    }

    /// Backs scores up from every node inserted since the previous call.
    ///
    /// Inserted nodes and their ancestors are processed deepest first: each
    /// takes the child with the highest score as its best (the first inserted
    /// wins ties) and the negation of that score as its own. Leaves keep
    /// their static score.
    pub fn update_best_line(&mut self) {
        if self.dirty.is_empty() {
            return;
        }
        let mut marked = vec![false; self.nodes.len()];
        let mut stale = Vec::new();
        for &id in &self.dirty {
            let mut next = Some(id);
            while let Some(p) = next {
                if marked[p] {
                    break;
                }
                marked[p] = true;
                stale.push(p);
                next = self.nodes[p].parent;
            }
        }
        stale.sort_by(|a, b| self.nodes[*b].ply.cmp(&self.nodes[*a].ply));

        for &id in &stale {
            let mut best: Option<usize> = None;
            for &child in &self.nodes[id].children {
                let wins = match best {
                    None => true,
                    Some(b) => self.nodes[child].score > self.nodes[b].score,
                };
                if wins {
                    best = Some(child);
                }
            }
            let node_score = match best {
                Some(b) => -self.nodes[b].score,
                None => self.nodes[id].static_score,
            };
            let node = &mut self.nodes[id];
            node.best = best;
            node.score = node_score;
        }

        trace!(
            inserted = self.dirty.len(),
            refreshed = stale.len(),
            "evaluation tree backed up"
        );
        self.dirty.clear();
    }

    /// Follows best pointers from the root. The score is that of the first
    /// move, from the root mover's perspective; an empty tree yields an
    /// empty line scored 0.
    pub fn best_line(&self) -> (Vec<Move>, f64) {
        let mut line = Vec::new();
        let mut score = 0.0;
        let mut at = self.nodes[ROOT].best;
        while let Some(id) = at {
            let node = &self.nodes[id];
            if line.is_empty() {
                score = node.score;
            }
            if let Some(mv) = node.mv {
                line.push(mv);
            }
            at = node.best;
        }
        (line, score)
    }

    pub fn best_move(&self) -> Option<Move> {
        let best = self.nodes[ROOT].best?;
        self.nodes[best].mv
    }

    /// Score currently recorded for `line`, if the tree holds it.
    pub fn score_of(&self, line: &[Move]) -> Option<f64> {
        let mut at = ROOT;
        for &mv in line {
            at = self.child(at, mv)?;
        }
        (at != ROOT).then(|| self.nodes[at].score)
    }

    fn child(&self, parent: usize, mv: Move) -> Option<usize> {
        self.nodes[parent]
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c].mv == Some(mv))
    }

    fn push_child(&mut self, parent: usize, mv: Move) -> usize {
        let id = self.nodes.len();
        let ply = self.nodes[parent].ply + 1;
        self.nodes.push(Node::new(Some(mv), Some(parent), ply));
        self.nodes[parent].children.push(id);
        id
    }
}

#[cfg(test)]
#[path = "eval_tree_tests.rs"]
mod eval_tree_tests;
