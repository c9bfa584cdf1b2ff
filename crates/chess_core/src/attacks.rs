//! Pre-computed move vectors for move generation and attack detection.
//!
//! Every table is built at compile time and lists target squares in a fixed
//! order:
//! - Knight and king target sets
//! - Pawn capture targets, per color
//! - Ordered rays for sliding pieces, walking outward from the origin

use crate::types::PieceKind;

/// A short, fixed-capacity list of squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Targets {
    squares: [u8; 8],
    len: u8,
}

impl Targets {
    pub const EMPTY: Targets = Targets {
        squares: [0; 8],
        len: 0,
    };

    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        &self.squares[..self.len as usize]
    }
}

/// Unit steps as (file, rank) deltas.
/// Directions: 0=N, 1=NE, 2=E, 3=SE, 4=S, 5=SW, 6=W, 7=NW
pub const DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const BISHOP_DIRECTIONS: [usize; 4] = [1, 3, 5, 7];
const ROOK_DIRECTIONS: [usize; 4] = [0, 2, 4, 6];
const QUEEN_DIRECTIONS: [usize; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

const fn jump_table(deltas: &[(i8, i8)]) -> [Targets; 64] {
    let mut table = [Targets::EMPTY; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let file = (sq % 8) as i8;
        let rank = (sq / 8) as i8;
        let mut i = 0;
        while i < deltas.len() {
            let f = file + deltas[i].0;
            let r = rank + deltas[i].1;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                let n = table[sq].len as usize;
                table[sq].squares[n] = (r * 8 + f) as u8;
                table[sq].len += 1;
            }
            i += 1;
        }
        sq += 1;
    }
    table
}

const fn ray_table() -> [[Targets; 8]; 64] {
    let mut table = [[Targets::EMPTY; 8]; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let mut dir = 0;
        while dir < 8 {
            let df = DIRECTIONS[dir].0;
            let dr = DIRECTIONS[dir].1;
            let mut f = (sq % 8) as i8 + df;
            let mut r = (sq / 8) as i8 + dr;
            while f >= 0 && f < 8 && r >= 0 && r < 8 {
                let n = table[sq][dir].len as usize;
                table[sq][dir].squares[n] = (r * 8 + f) as u8;
                table[sq][dir].len += 1;
                f += df;
                r += dr;
            }
            dir += 1;
        }
        sq += 1;
    }
    table
}

/// Knight targets for each square.
pub static KNIGHT_TARGETS: [Targets; 64] = jump_table(&KNIGHT_DELTAS);

/// King targets for each square.
pub static KING_TARGETS: [Targets; 64] = jump_table(&DIRECTIONS);

/// Pawn capture targets, indexed by [color][square].
pub static PAWN_ATTACKS: [[Targets; 64]; 2] = [
    jump_table(&[(-1, 1), (1, 1)]),
    jump_table(&[(-1, -1), (1, -1)]),
];

/// RAYS[square][direction] lists the squares in that direction, nearest first.
pub static RAYS: [[Targets; 8]; 64] = ray_table();

#[inline(always)]
pub fn knight_targets(sq: u8) -> &'static [u8] {
    KNIGHT_TARGETS[sq as usize].as_slice()
}

#[inline(always)]
pub fn king_targets(sq: u8) -> &'static [u8] {
    KING_TARGETS[sq as usize].as_slice()
}

#[inline(always)]
pub fn pawn_attacks(sq: u8, color_idx: usize) -> &'static [u8] {
    PAWN_ATTACKS[color_idx][sq as usize].as_slice()
}

#[inline(always)]
pub fn ray(sq: u8, dir: usize) -> &'static [u8] {
    RAYS[sq as usize][dir].as_slice()
}

/// Ray directions a sliding piece walks; empty for non-sliders.
pub fn slider_directions(kind: PieceKind) -> &'static [usize] {
    match kind {
        PieceKind::Bishop => &BISHOP_DIRECTIONS,
        PieceKind::Rook => &ROOK_DIRECTIONS,
        PieceKind::Queen => &QUEEN_DIRECTIONS,
        _ => &[],
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
