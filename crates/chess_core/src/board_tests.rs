use super::*;

fn mv(txt: &str) -> Move {
    let from = coord_to_sq(&txt[0..2]).unwrap();
    let to = coord_to_sq(&txt[2..4]).unwrap();
    match txt[4..].chars().next() {
        Some(c) => Move::with_promo(from, to, PieceKind::from_char(c).unwrap()),
        None => Move::new(from, to),
    }
}

fn play(pos: &Position, moves: &[&str]) -> Position {
    moves.iter().fold(pos.clone(), |p, m| p.apply_move(mv(m)))
}

#[test]
fn test_startpos_layout() {
    let pos = Position::startpos();
    assert_eq!(
        pos.piece_at(4),
        Some(Piece::new(Color::White, PieceKind::King))
    );
    assert_eq!(
        pos.piece_at(59),
        Some(Piece::new(Color::Black, PieceKind::Queen))
    );
    assert_eq!(pos.pieces(Color::White, PieceKind::Pawn).popcount(), 8);
    assert_eq!(pos.occupied_by(Color::Black).popcount(), 16);
    assert_eq!(pos.side_to_move(), Color::White);
    assert_eq!(pos.castling(Color::Black), CastleRights::Both);
    assert!(pos.line().is_empty());
}

#[test]
fn test_apply_move_leaves_original_untouched() {
    let pos = Position::startpos();
    let next = pos.apply_move(mv("e2e4"));

    assert_eq!(pos, Position::startpos());
    assert_eq!(next.piece_at(28).map(|p| p.kind), Some(PieceKind::Pawn));
    assert_eq!(next.piece_at(12), None);
    assert_eq!(next.side_to_move(), Color::Black);
    assert_eq!(next.en_passant(), coord_to_sq("e3"));
    assert_eq!(next.line(), &[mv("e2e4")]);
}

#[test]
fn test_piece_index_tracks_board() {
    let pos = play(
        &Position::startpos(),
        &["e2e4", "d7d5", "e4d5", "d8d5", "b1c3", "d5a5"],
    );
    for color in [Color::White, Color::Black] {
        for kind in PieceKind::ALL {
            for s in pos.pieces(color, kind) {
                assert_eq!(pos.piece_at(s), Some(Piece::new(color, kind)));
            }
        }
    }
    let on_board = (0..64).filter(|&s| pos.piece_at(s).is_some()).count() as u32;
    let indexed = pos.occupied_by(Color::White).popcount() + pos.occupied_by(Color::Black).popcount();
    assert_eq!(on_board, indexed);
}

#[test]
fn test_clocks() {
    let pos = Position::startpos();
    let after_knight = pos.apply_move(mv("g1f3"));
    assert_eq!(after_knight.halfmove_clock(), 1);
    assert_eq!(after_knight.fullmove_number(), 1);

    let after_reply = after_knight.apply_move(mv("g8f6"));
    assert_eq!(after_reply.halfmove_clock(), 2);
    assert_eq!(after_reply.fullmove_number(), 2);

    let after_pawn = after_reply.apply_move(mv("e2e4"));
    assert_eq!(after_pawn.halfmove_clock(), 0);
}

#[test]
fn test_castling_relocates_rook() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

    let short = pos.apply_move(mv("e1g1"));
    assert_eq!(short.piece_at(6).map(|p| p.kind), Some(PieceKind::King));
    assert_eq!(short.piece_at(5).map(|p| p.kind), Some(PieceKind::Rook));
    assert_eq!(short.piece_at(7), None);
    assert_eq!(short.castling(Color::White), CastleRights::None);
    assert_eq!(short.castling(Color::Black), CastleRights::Both);

    let long = short.apply_move(mv("e8c8"));
    assert_eq!(long.piece_at(58).map(|p| p.kind), Some(PieceKind::King));
    assert_eq!(long.piece_at(59).map(|p| p.kind), Some(PieceKind::Rook));
    assert_eq!(long.piece_at(56), None);
}

#[test]
fn test_rook_moves_and_captures_revoke_rights() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

    let moved = pos.apply_move(mv("h1h5"));
    assert_eq!(moved.castling(Color::White), CastleRights::Queenside);

    // Rook takes rook on a8: both queenside rights go
    let traded = pos.apply_move(mv("a1a8"));
    assert_eq!(traded.castling(Color::White), CastleRights::Kingside);
    assert_eq!(traded.castling(Color::Black), CastleRights::Kingside);
}

#[test]
fn test_en_passant_removes_victim() {
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let next = pos.apply_move(mv("e5d6"));
    assert_eq!(next.piece_at(coord_to_sq("d5").unwrap()), None);
    assert_eq!(
        next.piece_at(coord_to_sq("d6").unwrap()),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
    assert_eq!(next.pieces(Color::Black, PieceKind::Pawn).popcount(), 0);
    assert_eq!(next.en_passant(), None);
    assert_eq!(next.halfmove_clock(), 0);
}

#[test]
fn test_promotion_places_chosen_piece() {
    let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let next = pos.apply_move(mv("a7a8n"));
    assert_eq!(
        next.piece_at(56),
        Some(Piece::new(Color::White, PieceKind::Knight))
    );
    assert!(next.pieces(Color::White, PieceKind::Pawn).is_empty());
}

#[test]
#[should_panic]
fn test_apply_move_from_empty_square_panics() {
    Position::startpos().apply_move(mv("e4e5"));
}

#[test]
fn test_key_ignores_clocks_and_line() {
    let a = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let b = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 12 40").unwrap();
    assert_eq!(a.key(), b.key());

    let c = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 0 1").unwrap();
    assert_ne!(a.key(), c.key());

    let shuffled = play(&a, &["e1f1", "e8d8", "f1e1", "d8e8"]);
    assert_eq!(shuffled.line().len(), 4);
    assert_eq!(shuffled.castling(Color::White), CastleRights::None);
    assert_ne!(a.key(), shuffled.key());
}

#[test]
fn test_as_root_clears_line() {
    let pos = Position::startpos().apply_move(mv("d2d4"));
    let root = pos.as_root();
    assert!(root.line().is_empty());
    assert_eq!(root.key(), pos.key());
}

#[test]
fn test_clocks_saturate() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 4294967295 4294967295").unwrap();
    let pos = pos.apply_move(Move::new(7, 15));
    assert_eq!(pos.halfmove_clock(), u32::MAX);
    let pos = pos.apply_move(Move::new(60, 59));
    assert_eq!(pos.halfmove_clock(), u32::MAX);
    assert_eq!(pos.fullmove_number(), u32::MAX);
}
