use crate::{
    attacks::{king_targets, knight_targets, pawn_attacks, ray, slider_directions},
    bitboard::Bitboard,
    board::Position,
    types::*,
};

/// Every move a piece of `color` could make onto a square accepted by
/// `target`, counting attack geometry only.
///
/// Pawns contribute their diagonal captures (never pushes), expanded into
/// the four promotions on the far rank. Sliders walk each ray: an empty
/// square is reported when accepted and the walk continues past it; the
/// first occupied square is reported when accepted and ends the ray.
///
/// This single primitive answers "what can be captured", "is this square
/// attacked" and "who gives check", depending on the predicate.
pub fn attacks_where<F>(pos: &Position, color: Color, target: F) -> Vec<Move>
where
    F: Fn(u8) -> bool,
{
    let mut out = Vec::new();

    for from in pos.pieces(color, PieceKind::Pawn) {
        for &to in pawn_attacks(from, color.idx()) {
            if target(to) {
                push_pawn_move(from, to, &mut out);
            }
        }
    }
    for from in pos.pieces(color, PieceKind::Knight) {
        for &to in knight_targets(from) {
            if target(to) {
                out.push(Move::new(from, to));
            }
        }
    }
    for kind in [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen] {
        for from in pos.pieces(color, kind) {
            for &dir in slider_directions(kind) {
                for &to in ray(from, dir) {
                    if target(to) {
                        out.push(Move::new(from, to));
                    }
                    if pos.piece_at(to).is_some() {
                        break;
                    }
                }
            }
        }
    }
    for from in pos.pieces(color, PieceKind::King) {
        for &to in king_targets(from) {
            if target(to) {
                out.push(Move::new(from, to));
            }
        }
    }
    out
}

/// True if any piece of `by` attacks `square`.
pub fn attacks_square(pos: &Position, by: Color, square: u8) -> bool {
    !attacks_where(pos, by, |s| s == square).is_empty()
}

/// Opponent attacks that land on the king of the side to move.
pub fn checks(pos: &Position) -> Vec<Move> {
    let us = pos.side_to_move();
    match pos.king_sq(us) {
        Some(king) => attacks_where(pos, us.other(), |s| s == king),
        None => Vec::new(),
    }
}

/// All legal moves for the side to move.
pub fn valid_moves(pos: &Position) -> Vec<Move> {
    let checks = checks(pos);
    if checks.is_empty() {
        retain_legal(pos, candidate_moves(pos))
    } else {
        valid_moves_in_check(pos, &checks)
    }
}

/// Legal moves when the side to move is in check, given the checking
/// attacks from [`checks`].
pub fn valid_moves_in_check(pos: &Position, checks: &[Move]) -> Vec<Move> {
    retain_legal(pos, candidate_moves_in_check(pos, checks))
}

/// Squares strictly between `from` and `to`, walking in unit steps.
///
/// Panics when `to` is not reached within 7 steps: the two squares are not
/// on a common line, which means the board is corrupt.
pub fn squares_between(from: u8, to: u8) -> Vec<u8> {
    let step_f = (file_of(to) - file_of(from)).signum();
    let step_r = (rank_of(to) - rank_of(from)).signum();
    let (mut f, mut r) = (file_of(from), rank_of(from));

    let mut out = Vec::new();
    for _ in 0..7 {
        f += step_f;
        r += step_r;
        match sq(f, r) {
            Some(s) if s == to => return out,
            Some(s) => out.push(s),
            None => break,
        }
    }
    panic!(
        "no line from {} to {}: board state is corrupt",
        sq_to_coord(from),
        sq_to_coord(to)
    );
}

fn push_pawn_move(from: u8, to: u8, out: &mut Vec<Move>) {
    let r = rank_of(to);
    if r == 0 || r == 7 {
        for promo in PieceKind::PROMOTIONS {
            out.push(Move::with_promo(from, to, promo));
        }
    } else {
        out.push(Move::new(from, to));
    }
}

// Candidates when not in check: captures, quiet moves, en passant, castling.
fn candidate_moves(pos: &Position) -> Vec<Move> {
    let us = pos.side_to_move();
    let them = us.other();
    let enemy_king = pos.pieces(them, PieceKind::King);
    let capturable = pos.occupied_by(them) & !enemy_king;

    let mut out = attacks_where(pos, us, |s| capturable.contains(s));
    pawn_pushes(pos, |_| true, &mut out);
    quiet_piece_moves(pos, &mut out);
    en_passant_captures(pos, &mut out);
    castling_moves(pos, &mut out);
    out
}

fn pawn_pushes<F>(pos: &Position, keep: F, out: &mut Vec<Move>)
where
    F: Fn(u8) -> bool,
{
    let us = pos.side_to_move();
    let fwd = us.forward();
    let start_rank = us.home_rank() + fwd;

    for from in pos.pieces(us, PieceKind::Pawn) {
        let (f, r) = (file_of(from), rank_of(from));
        let Some(one) = sq(f, r + fwd) else {
            continue;
        };
        if pos.piece_at(one).is_some() {
            continue;
        }
        if keep(one) {
            push_pawn_move(from, one, out);
        }
        if r == start_rank {
            if let Some(two) = sq(f, r + 2 * fwd) {
                if pos.piece_at(two).is_none() && keep(two) {
                    out.push(Move::new(from, two));
                }
            }
        }
    }
}

fn quiet_piece_moves(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move();
    let empty = |s: u8| pos.piece_at(s).is_none();

    for from in pos.pieces(us, PieceKind::Knight) {
        out.extend(knight_targets(from).iter().filter(|&&to| empty(to)).map(|&to| Move::new(from, to)));
    }
    for kind in [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen] {
        for from in pos.pieces(us, kind) {
            for &dir in slider_directions(kind) {
                for &to in ray(from, dir) {
                    if !empty(to) {
                        break;
                    }
                    out.push(Move::new(from, to));
                }
            }
        }
    }
    for from in pos.pieces(us, PieceKind::King) {
        out.extend(king_targets(from).iter().filter(|&&to| empty(to)).map(|&to| Move::new(from, to)));
    }
}

// Square of the pawn an en-passant capture onto `ep` by `us` removes.
fn en_passant_victim(ep: u8, us: Color) -> Option<u8> {
    sq(file_of(ep), rank_of(ep) - us.forward())
}

fn en_passant_captures(pos: &Position, out: &mut Vec<Move>) {
    let Some(ep) = pos.en_passant() else {
        return;
    };
    let us = pos.side_to_move();
    if pos.piece_at(ep).is_some() {
        return;
    }
    let Some(victim) = en_passant_victim(ep, us) else {
        return;
    };
    if pos.piece_at(victim) != Some(Piece::new(us.other(), PieceKind::Pawn)) {
        return;
    }
    // Our pawns attacking `ep` sit where an enemy pawn on `ep` would attack.
    for &from in pawn_attacks(ep, us.other().idx()) {
        if pos.piece_at(from) == Some(Piece::new(us, PieceKind::Pawn)) {
            out.push(Move::new(from, ep));
        }
    }
}

fn castling_moves(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move();
    let them = us.other();
    let rights = pos.castling(us);
    let rank = us.home_rank();
    let at = |file: i8| sq(file, rank).unwrap_or_default();

    let king = Some(Piece::new(us, PieceKind::King));
    let rook = Some(Piece::new(us, PieceKind::Rook));
    if pos.piece_at(at(4)) != king {
        return;
    }
    let empty = |files: &[i8]| files.iter().all(|&f| pos.piece_at(at(f)).is_none());
    let safe = |files: &[i8]| files.iter().all(|&f| !attacks_square(pos, them, at(f)));

    if rights.kingside() && pos.piece_at(at(7)) == rook && empty(&[5, 6]) && safe(&[5, 6]) {
        out.push(Move::new(at(4), at(6)));
    }
    if rights.queenside() && pos.piece_at(at(0)) == rook && empty(&[1, 2, 3]) && safe(&[3, 2]) {
        out.push(Move::new(at(4), at(2)));
    }
}

fn candidate_moves_in_check(pos: &Position, checks: &[Move]) -> Vec<Move> {
    let us = pos.side_to_move();
    let them = us.other();
    let mut out = Vec::new();
    let Some(king) = pos.king_sq(us) else {
        return out;
    };

    // King escapes
    for &to in king_targets(king) {
        let open = pos.piece_at(to).map_or(true, |p| p.color == them);
        if open && !attacks_square(pos, them, to) {
            out.push(Move::new(king, to));
        }
    }

    let mut checkers: Vec<u8> = checks.iter().map(|m| m.from).collect();
    checkers.sort_unstable();
    checkers.dedup();
    let &[checker] = checkers.as_slice() else {
        // Double check: only the king may move.
        return out;
    };

    // Capture the checker, or block the line when it slides.
    let mut targets = Bitboard::from_square(checker);
    let knight_check = pos
        .piece_at(checker)
        .map_or(false, |p| p.kind == PieceKind::Knight);
    if !knight_check {
        for s in squares_between(king, checker) {
            targets.set(s);
        }
    }

    out.extend(
        attacks_where(pos, us, |s| targets.contains(s))
            .into_iter()
            .filter(|m| match pos.piece_at(m.from).map(|p| p.kind) {
                Some(PieceKind::King) => false,
                Some(PieceKind::Pawn) => pos.piece_at(m.to).is_some(),
                _ => true,
            }),
    );
    pawn_pushes(pos, |to| targets.contains(to), &mut out);

    if let Some(ep) = pos.en_passant() {
        if en_passant_victim(ep, us) == Some(checker) || targets.contains(ep) {
            en_passant_captures(pos, &mut out);
        }
    }
    out
}

// Drop moves that leave the mover's own king attacked (pins, discovered
// checks, en passant along the rank).
fn retain_legal(pos: &Position, mut moves: Vec<Move>) -> Vec<Move> {
    let us = pos.side_to_move();
    moves.retain(|&mv| {
        let next = pos.apply_move(mv);
        match next.king_sq(us) {
            Some(king) => !attacks_square(&next, us.other(), king),
            None => true,
        }
    });
    moves
}

impl Position {
    pub fn valid_moves(&self) -> Vec<Move> {
        valid_moves(self)
    }

    pub fn checks(&self) -> Vec<Move> {
        checks(self)
    }

    pub fn in_check(&self) -> bool {
        !checks(self).is_empty()
    }

    /// In check with no legal reply.
    pub fn is_checkmate(&self) -> bool {
        let checks = checks(self);
        !checks.is_empty() && valid_moves_in_check(self, &checks).is_empty()
    }

    /// Not in check, yet no legal move.
    pub fn is_stalemate(&self) -> bool {
        checks(self).is_empty() && retain_legal(self, candidate_moves(self)).is_empty()
    }

    /// Stalemate, the fifty-move rule, or insufficient material.
    pub fn is_draw(&self) -> bool {
        self.is_fifty_move_draw() || self.is_insufficient_material() || self.is_stalemate()
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
