//! Position text (FEN) codec.
//!
//! The halfmove clock and fullmove number fields are optional on input and
//! default to `0` and `1`. Output always carries all six fields.

use std::{fmt, str::FromStr};

use crate::{
    board::{CastleRights, Position},
    error::FenError,
    types::*,
};

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&parts.len()) {
            return Err(FenError::FieldCount(parts.len()));
        }

        let board = parse_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        let castling = parse_castling(parts[2])?;

        // The target sits behind a pawn that just made a double push.
        let ep_rank = match side_to_move {
            Color::White => 5,
            Color::Black => 2,
        };
        let en_passant = match parts[3] {
            "-" => None,
            s => match coord_to_sq(s) {
                Some(ep) if rank_of(ep) == ep_rank => Some(ep),
                _ => return Err(FenError::EnPassant(s.to_string())),
            },
        };

        let halfmove_clock = parse_counter(parts.get(4), "halfmove clock", 0)?;
        let fullmove_number = parse_counter(parts.get(5), "fullmove number", 1)?;

        for color in [Color::White, Color::Black] {
            let count = board
                .iter()
                .flatten()
                .filter(|p| p.color == color && p.kind == PieceKind::King)
                .count() as u32;
            if count != 1 {
                return Err(FenError::KingCount { color, count });
            }
        }

        Ok(Position::from_parts(
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        ))
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(rank * 8 + file) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move() {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let white = self.castling(Color::White);
        let black = self.castling(Color::Black);
        let mut rights = String::new();
        if white.kingside() {
            rights.push('K');
        }
        if white.queenside() {
            rights.push('Q');
        }
        if black.kingside() {
            rights.push('k');
        }
        if black.queenside() {
            rights.push('q');
        }
        if rights.is_empty() {
            rights.push('-');
        }
        out.push_str(&rights);

        out.push(' ');
        match self.en_passant() {
            Some(ep) => out.push_str(&sq_to_coord(ep)),
            None => out.push('-'),
        }

        out.push_str(&format!(
            " {} {}",
            self.halfmove_clock(),
            self.fullmove_number()
        ));
        out
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}

fn parse_placement(placement: &str) -> Result<[Option<Piece>; 64], FenError> {
    let bad = |why: &str| FenError::Placement(format!("{why} in {placement:?}"));

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(bad("expected 8 ranks"));
    }

    let mut board = [None; 64];
    for (i, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - i as u8;
        let mut file: u8 = 0;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10) {
                if !(1..=8).contains(&d) {
                    return Err(bad("empty run out of range"));
                }
                file += d as u8;
            } else {
                let pc = Piece::from_char(ch).ok_or_else(|| bad("unknown piece letter"))?;
                if file >= 8 {
                    return Err(bad("rank overflows 8 files"));
                }
                board[(rank * 8 + file) as usize] = Some(pc);
                file += 1;
            }
            if file > 8 {
                return Err(bad("rank overflows 8 files"));
            }
        }
        if file != 8 {
            return Err(bad("rank does not cover 8 files"));
        }
    }
    Ok(board)
}

fn parse_castling(field: &str) -> Result<[CastleRights; 2], FenError> {
    if field == "-" {
        return Ok([CastleRights::None; 2]);
    }
    let mut flags = [[false; 2]; 2]; // [color][kingside, queenside]
    for ch in field.chars() {
        let (color, side) = match ch {
            'K' => (0, 0),
            'Q' => (0, 1),
            'k' => (1, 0),
            'q' => (1, 1),
            _ => return Err(FenError::Castling(field.to_string())),
        };
        if flags[color][side] {
            return Err(FenError::Castling(field.to_string()));
        }
        flags[color][side] = true;
    }
    Ok([
        CastleRights::from_flags(flags[0][0], flags[0][1]),
        CastleRights::from_flags(flags[1][0], flags[1][1]),
    ])
}

fn parse_counter(field: Option<&&str>, name: &'static str, default: u32) -> Result<u32, FenError> {
    match field {
        None => Ok(default),
        Some(s) => s.parse().map_err(|_| FenError::Counter {
            field: name,
            value: s.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
