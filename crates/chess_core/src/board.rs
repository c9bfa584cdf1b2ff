use crate::{bitboard::Bitboard, types::*};

/// Castling rights still available to one side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CastleRights {
    #[default]
    None,
    Kingside,
    Queenside,
    Both,
}

impl CastleRights {
    pub fn from_flags(kingside: bool, queenside: bool) -> Self {
        match (kingside, queenside) {
            (true, true) => CastleRights::Both,
            (true, false) => CastleRights::Kingside,
            (false, true) => CastleRights::Queenside,
            (false, false) => CastleRights::None,
        }
    }

    pub fn kingside(self) -> bool {
        matches!(self, CastleRights::Kingside | CastleRights::Both)
    }

    pub fn queenside(self) -> bool {
        matches!(self, CastleRights::Queenside | CastleRights::Both)
    }

    pub fn without_kingside(self) -> Self {
        Self::from_flags(false, self.queenside())
    }

    pub fn without_queenside(self) -> Self {
        Self::from_flags(self.kingside(), false)
    }

    /// Rights left after the rook corner `sq` of `color` is vacated.
    fn without_corner(self, color: Color, sq: u8) -> Self {
        let rank = color.home_rank();
        if Some(sq) == crate::types::sq(0, rank) {
            self.without_queenside()
        } else if Some(sq) == crate::types::sq(7, rank) {
            self.without_kingside()
        } else {
            self
        }
    }
}

/// Structural fingerprint used for duplicate detection: two positions with
/// equal keys are the same node regardless of clocks or move history.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PositionKey {
    board: [Option<Piece>; 64],
    side_to_move: Color,
    castling: [CastleRights; 2],
    en_passant: Option<u8>,
}

/// An immutable chess position.
///
/// Every transition goes through [`Position::apply_move`], which returns a
/// new value, so positions can be shared freely between search branches.
/// The per-(color, kind) square sets always agree with `board`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: [Option<Piece>; 64],
    pieces: [[Bitboard; 6]; 2],
    side_to_move: Color,
    castling: [CastleRights; 2],
    en_passant: Option<u8>, // square behind a pawn that just advanced 2
    halfmove_clock: u32,
    fullmove_number: u32,
    line: Vec<Move>,
}

impl Position {
    pub fn startpos() -> Self {
        let mut board = [None; 64];

        // Pawns
        for f in 0..8 {
            board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        }
        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            board[f] = Some(Piece::new(Color::White, kind));
            board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        Self::from_parts(
            board,
            Color::White,
            [CastleRights::Both, CastleRights::Both],
            None,
            0,
            1,
        )
    }

    /// Builds a position from raw fields, deriving the piece-location index.
    pub(crate) fn from_parts(
        board: [Option<Piece>; 64],
        side_to_move: Color,
        castling: [CastleRights; 2],
        en_passant: Option<u8>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Self {
        let mut pieces = [[Bitboard::EMPTY; 6]; 2];
        for (i, slot) in board.iter().enumerate() {
            if let Some(pc) = slot {
                pieces[pc.color.idx()][pc.kind.idx()].set(i as u8);
            }
        }
        Position {
            board,
            pieces,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            line: Vec::new(),
        }
    }

    /// The same position with an empty move history, for use as a search root.
    pub fn as_root(&self) -> Position {
        Position {
            line: Vec::new(),
            ..self.clone()
        }
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    /// Squares occupied by pieces of this color and kind.
    pub fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.idx()][kind.idx()]
    }

    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.pieces[color.idx()]
            .iter()
            .fold(Bitboard::EMPTY, |acc, &bb| acc | bb)
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        self.pieces(c, PieceKind::King).lsb()
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling(&self, c: Color) -> CastleRights {
        self.castling[c.idx()]
    }

    pub fn en_passant(&self) -> Option<u8> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Moves played since the game start or the search root.
    pub fn line(&self) -> &[Move] {
        &self.line
    }

    pub fn key(&self) -> PositionKey {
        PositionKey {
            board: self.board,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
        }
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can possibly mate: bare kings, a single minor piece, or
    /// only bishops that all stand on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        for color in [Color::White, Color::Black] {
            for kind in [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen] {
                if !self.pieces(color, kind).is_empty() {
                    return false;
                }
            }
        }
        let knights =
            self.pieces(Color::White, PieceKind::Knight) | self.pieces(Color::Black, PieceKind::Knight);
        let bishops =
            self.pieces(Color::White, PieceKind::Bishop) | self.pieces(Color::Black, PieceKind::Bishop);

        if knights.popcount() + bishops.popcount() <= 1 {
            return true;
        }
        if knights.is_empty() {
            let light = (bishops & Bitboard::LIGHT_SQUARES).popcount();
            return light == 0 || light == bishops.popcount();
        }
        false
    }

    /// Returns the position after `mv`.
    ///
    /// `mv` must come from [`Position::valid_moves`]; an origin square without
    /// a piece of the side to move is an invariant violation and panics.
    pub fn apply_move(&self, mv: Move) -> Position {
        let mover = self.side_to_move;
        let moved = match self.piece_at(mv.from) {
            Some(pc) if pc.color == mover => pc,
            other => panic!("cannot apply {mv}: origin holds {other:?}"),
        };

        let mut next = self.clone();
        next.en_passant = None;

        // En passant: the victim sits behind the target square
        let mut capture_sq = mv.to;
        if moved.kind == PieceKind::Pawn
            && self.en_passant == Some(mv.to)
            && file_of(mv.from) != file_of(mv.to)
            && self.piece_at(mv.to).is_none()
        {
            if let Some(victim) = sq(file_of(mv.to), rank_of(mv.to) - mover.forward()) {
                capture_sq = victim;
            }
        }

        let captured = next.take(capture_sq);
        next.take(mv.from);
        let placed_kind = match (moved.kind, mv.promo) {
            (PieceKind::Pawn, Some(promo)) => promo,
            _ => moved.kind,
        };
        next.put(mv.to, Piece::new(mover, placed_kind));

        // Castling: the king moves two files, the rook jumps over it
        if moved.kind == PieceKind::King && (file_of(mv.to) - file_of(mv.from)).abs() == 2 {
            let rank = rank_of(mv.from) as u8;
            let (rook_from, rook_to) = if file_of(mv.to) > file_of(mv.from) {
                (rank * 8 + 7, rank * 8 + 5)
            } else {
                (rank * 8, rank * 8 + 3)
            };
            if let Some(rook) = next.take(rook_from) {
                next.put(rook_to, rook);
            }
        }

        let us = mover.idx();
        match moved.kind {
            PieceKind::King => next.castling[us] = CastleRights::None,
            PieceKind::Rook => next.castling[us] = next.castling[us].without_corner(mover, mv.from),
            _ => {}
        }
        if let Some(cp) = captured {
            if cp.kind == PieceKind::Rook {
                let them = cp.color.idx();
                next.castling[them] = next.castling[them].without_corner(cp.color, capture_sq);
            }
        }

        if moved.kind == PieceKind::Pawn && (rank_of(mv.to) - rank_of(mv.from)).abs() == 2 {
            next.en_passant = Some((mv.from + mv.to) / 2);
        }

        next.halfmove_clock = if moved.kind == PieceKind::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        if mover == Color::Black {
            next.fullmove_number = next.fullmove_number.saturating_add(1);
        }
        next.side_to_move = mover.other();
        next.line.push(mv);
        next
    }

    /// Successor positions, one per valid move, in generation order.
    pub fn next_positions(&self) -> Vec<Position> {
        self.valid_moves()
            .into_iter()
            .map(|mv| self.apply_move(mv))
            .collect()
    }

    fn take(&mut self, sq: u8) -> Option<Piece> {
        let pc = self.board[sq as usize].take()?;
        self.pieces[pc.color.idx()][pc.kind.idx()].clear(sq);
        Some(pc)
    }

    fn put(&mut self, sq: u8, pc: Piece) {
        self.board[sq as usize] = Some(pc);
        self.pieces[pc.color.idx()][pc.kind.idx()].set(sq);
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
