//! Chess rules core: immutable positions, position text, legal move
//! generation and draw detection.

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod error;
pub mod fen;
pub mod movegen;
pub mod perft;
pub mod types;
pub mod uci;

pub use bitboard::*;
pub use board::*;
pub use error::*;
pub use fen::STARTPOS_FEN;
pub use movegen::{attacks_square, attacks_where, checks, valid_moves, valid_moves_in_check};
pub use perft::{divide, perft};
pub use types::*;
pub use uci::*;
