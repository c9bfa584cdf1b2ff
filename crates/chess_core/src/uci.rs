//! Move text and `position` command handling shared by protocol front ends.

use crate::{
    board::Position,
    error::{ChessError, MoveError},
    types::*,
};

/// Parses coordinate move text ("e2e4", "e7e8q") and matches it against the
/// legal moves of `pos`, so only playable moves come back.
pub fn parse_move(pos: &Position, txt: &str) -> Result<Move, MoveError> {
    let malformed = || MoveError::Malformed(txt.to_string());
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return Err(malformed());
    }
    let from = coord_to_sq(&txt[0..2]).ok_or_else(malformed)?;
    let to = coord_to_sq(&txt[2..4]).ok_or_else(malformed)?;
    let promo = match txt[4..].chars().next() {
        None => None,
        Some(c) => match PieceKind::from_char(c) {
            Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
            _ => return Err(malformed()),
        },
    };

    pos.valid_moves()
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promo == promo)
        .ok_or_else(|| MoveError::Illegal(txt.to_string()))
}

/// Builds the position described by the arguments of a `position` command:
/// `startpos [moves ...]` or `fen <fields> [moves ...]`.
pub fn position_from_uci(args: &[&str]) -> Result<Position, ChessError> {
    let moves_at = args.iter().position(|&a| a == "moves");
    let (setup, moves) = match moves_at {
        Some(i) => (&args[..i], &args[i + 1..]),
        None => (args, &args[args.len()..]),
    };

    let mut pos = match setup.split_first() {
        Some((&"startpos", [])) => Position::startpos(),
        Some((&"fen", fields)) if !fields.is_empty() => Position::from_fen(&fields.join(" "))?,
        _ => return Err(ChessError::Command(args.join(" "))),
    };

    for txt in moves {
        let mv = parse_move(&pos, txt)?;
        pos = pos.apply_move(mv);
    }
    Ok(pos)
}

impl Position {
    pub fn parse_move(&self, txt: &str) -> Result<Move, MoveError> {
        parse_move(self, txt)
    }
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
