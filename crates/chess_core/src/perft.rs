use crate::{board::Position, types::Move};

/// Pure perft node count.
/// Counts all legal positions reachable from `pos` in exactly `depth` plies.
pub fn perft(pos: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = pos.valid_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| perft(&pos.apply_move(mv), depth - 1))
        .sum()
}

/// Perft split by root move, in generation order. Useful for bisecting a
/// count mismatch against a reference engine.
pub fn divide(pos: &Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    pos.valid_moves()
        .into_iter()
        .map(|mv| (mv, perft(&pos.apply_move(mv), depth - 1)))
        .collect()
}
