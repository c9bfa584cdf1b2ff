//! Position evaluators.
//!
//! Every evaluator scores from White's perspective. The search sums the
//! registered evaluators and flips the sign when Black is to move.

use std::sync::Arc;

use chess_core::{attacks_where, Bitboard, Color, PieceKind, Position};

/// Score recorded for a move that delivers checkmate.
pub const MATE_SCORE: f64 = 58008.0;

/// Material values in pawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
const PIECE_VALUES: [f64; 6] = [1.0, 3.0, 3.0, 5.0, 9.0, 0.0];

/// Weight of one controlled square.
const SPACE_WEIGHT: f64 = 0.05;

/// A pure scoring function over positions.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, pos: &Position) -> f64;
}

impl<F> Evaluator for F
where
    F: Fn(&Position) -> f64 + Send + Sync,
{
    fn evaluate(&self, pos: &Position) -> f64 {
        self(pos)
    }
}

/// Material balance: 1/3/3/5/9.
#[derive(Debug, Clone, Copy, Default)]
pub struct Material;

impl Evaluator for Material {
    fn evaluate(&self, pos: &Position) -> f64 {
        PieceKind::ALL
            .iter()
            .map(|&kind| {
                let white = pos.pieces(Color::White, kind).popcount() as f64;
                let black = pos.pieces(Color::Black, kind).popcount() as f64;
                PIECE_VALUES[kind.idx()] * (white - black)
            })
            .sum()
    }
}

/// Difference in the number of squares each side attacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Space;

impl Space {
    fn controlled(pos: &Position, color: Color) -> u32 {
        attacks_where(pos, color, |_| true)
            .iter()
            .fold(Bitboard::EMPTY, |acc, m| acc | Bitboard::from_square(m.to))
            .popcount()
    }
}

impl Evaluator for Space {
    fn evaluate(&self, pos: &Position) -> f64 {
        let white = Self::controlled(pos, Color::White) as f64;
        let black = Self::controlled(pos, Color::Black) as f64;
        SPACE_WEIGHT * (white - black)
    }
}

/// Sum of all evaluators, from the side to move's perspective.
pub fn signed_sum(evaluators: &[Arc<dyn Evaluator>], pos: &Position) -> f64 {
    let total: f64 = evaluators.iter().map(|e| e.evaluate(pos)).sum();
    match pos.side_to_move() {
        Color::White => total,
        Color::Black => -total,
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
