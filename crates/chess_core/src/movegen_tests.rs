use super::*;

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn move_texts(pos: &Position) -> Vec<String> {
    let mut out: Vec<String> = pos.valid_moves().iter().map(|m| m.to_string()).collect();
    out.sort();
    out
}

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = valid_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos = pos("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -");
    let moves = valid_moves(&pos);
    assert_eq!(moves.len(), 48);
}

#[test]
fn test_attacks_where_pawn_promotions() {
    let pos = pos("4k3/P7/8/8/8/8/8/K7 w - - 0 1");
    let b8 = coord_to_sq("b8").unwrap();
    let hits = attacks_where(&pos, Color::White, |s| s == b8);
    assert_eq!(hits.len(), 4);
    assert!(hits.iter().all(|m| m.promo.is_some()));
}

#[test]
fn test_attacks_where_stops_at_first_blocker() {
    let pos = pos("4k3/8/8/8/R2p3r/8/8/4K3 w - - 0 1");
    let rook_targets: Vec<String> = attacks_where(&pos, Color::White, |_| true)
        .into_iter()
        .filter(|m| m.from == coord_to_sq("a4").unwrap())
        .map(|m| m.to.to_string())
        .collect();
    // b4, c4, d4 along the rank, then seven up and down the a-file
    assert_eq!(rook_targets.len(), 3 + 7);
    assert!(!attacks_square(&pos, Color::White, coord_to_sq("e4").unwrap()));
    assert!(attacks_square(&pos, Color::White, coord_to_sq("d4").unwrap()));
}

#[test]
fn test_rook_check_exact_replies() {
    let pos = pos("4k3/4r3/8/8/R7/8/8/4K3 w - - 0 1");
    assert!(pos.in_check());
    assert_eq!(pos.checks().len(), 1);
    assert_eq!(
        move_texts(&pos),
        vec!["a4e4", "e1d1", "e1d2", "e1f1", "e1f2"]
    );
}

#[test]
fn test_pawn_push_blocks_check() {
    let pos = pos("4k3/8/8/b7/8/8/2P5/4K3 w - - 0 1");
    let moves = move_texts(&pos);
    assert!(moves.contains(&"c2c3".to_string()));
    assert!(!moves.contains(&"c2c4".to_string()));
    assert_eq!(moves, vec!["c2c3", "e1d1", "e1e2", "e1f1", "e1f2"]);
}

#[test]
fn test_double_check_only_king_moves() {
    let pos = pos("4k3/8/8/8/1b6/3n4/4P3/R3K2R w KQ - 0 1");
    let mut checkers: Vec<u8> = pos.checks().iter().map(|m| m.from).collect();
    checkers.dedup();
    assert_eq!(checkers.len(), 2);
    assert_eq!(move_texts(&pos), vec!["e1d1", "e1f1"]);
}

#[test]
fn test_knight_check_cannot_be_blocked() {
    let pos = pos("4k3/8/8/8/8/5n2/6B1/R3K3 w Q - 0 1");
    let moves = move_texts(&pos);
    assert_eq!(
        moves,
        vec!["e1d1", "e1e2", "e1f1", "e1f2", "g2f3"]
    );
}

#[test]
fn test_king_cannot_capture_defended_checker() {
    // Queen on e2 checks and is guarded by the rook on e8
    let pos = pos("4r1k1/8/8/8/8/8/4q3/4K3 w - - 0 1");
    assert_eq!(move_texts(&pos), Vec::<String>::new());
    assert!(pos.is_checkmate());
}

#[test]
fn test_king_cannot_step_back_along_check_line() {
    let pos = pos("4r1k1/8/8/8/4K3/8/8/8 w - - 0 1");
    let moves = move_texts(&pos);
    assert!(!moves.contains(&"e4e3".to_string()));
    assert!(moves.contains(&"e4d3".to_string()));
}

#[test]
fn test_pinned_piece_cannot_move() {
    let pos = pos("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1");
    let e2 = coord_to_sq("e2").unwrap();
    assert!(!pos.in_check());
    assert!(pos.valid_moves().iter().all(|m| m.from != e2));
}

#[test]
fn test_en_passant_generated() {
    let pos = pos("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
    let moves = move_texts(&pos);
    assert!(moves.contains(&"e5d6".to_string()));
    assert!(moves.contains(&"e5e6".to_string()));
}

#[test]
fn test_en_passant_captures_checking_pawn() {
    let pos = pos("8/8/8/2k5/3Pp3/8/8/4K3 b - d3 0 1");
    assert!(pos.in_check());
    assert!(move_texts(&pos).contains(&"e4d3".to_string()));
}

#[test]
fn test_en_passant_rank_pin() {
    let pos = pos("8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1");
    assert!(!move_texts(&pos).contains(&"e5d6".to_string()));
}

#[test]
fn test_castling_both_sides() {
    let pos = pos("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let moves = move_texts(&pos);
    assert!(moves.contains(&"e1g1".to_string()));
    assert!(moves.contains(&"e1c1".to_string()));
    assert_eq!(moves.len(), 26);
}

#[test]
fn test_castling_through_attacked_square() {
    let pos = pos("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    let moves = move_texts(&pos);
    assert!(!moves.contains(&"e1g1".to_string()));
    assert!(moves.contains(&"e1c1".to_string()));
}

#[test]
fn test_queenside_castling_with_b_file_attacked() {
    let pos = pos("1r2k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(move_texts(&pos).contains(&"e1c1".to_string()));
}

#[test]
fn test_no_castling_out_of_check_or_without_rights() {
    let checked = pos("4k3/8/8/8/8/8/8/R3K2r w Q - 0 1");
    assert!(checked.in_check());
    assert!(!move_texts(&checked).contains(&"e1c1".to_string()));

    let no_rights = pos("4k3/8/8/8/8/8/8/R3K2R w - - 0 1");
    let moves = move_texts(&no_rights);
    assert!(!moves.contains(&"e1g1".to_string()));
    assert!(!moves.contains(&"e1c1".to_string()));
}

#[test]
fn test_promotions() {
    let quiet = pos("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    let a7 = coord_to_sq("a7").unwrap();
    let pawn_moves: Vec<Move> = quiet.valid_moves().into_iter().filter(|m| m.from == a7).collect();
    assert_eq!(pawn_moves.len(), 4);

    let with_capture = pos("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    let pawn_moves = with_capture
        .valid_moves()
        .into_iter()
        .filter(|m| m.from == a7)
        .count();
    assert_eq!(pawn_moves, 8);
}

#[test]
fn test_mate_by_pawn_capture() {
    let pos = pos("8/8/8/qn6/kn6/1n6/1KP5/8 w - - 0 0");
    let mate = pos.apply_move(Move::new(
        coord_to_sq("c2").unwrap(),
        coord_to_sq("b3").unwrap(),
    ));
    assert!(mate.in_check());
    assert!(mate.is_checkmate());
    assert!(mate.valid_moves().is_empty());
}

#[test]
fn test_mate_by_pawn_capture_black() {
    let pos = pos("8/1kp5/1N6/KN6/QN6/8/8/8 b - - 0 0");
    let mate = pos.apply_move(Move::new(
        coord_to_sq("c7").unwrap(),
        coord_to_sq("b6").unwrap(),
    ));
    assert!(mate.is_checkmate());
}

#[test]
fn test_next_positions_follow_moves() {
    let pos = Position::startpos();
    let moves = pos.valid_moves();
    let next = pos.next_positions();
    assert_eq!(next.len(), moves.len());
    for (child, mv) in next.iter().zip(&moves) {
        assert_eq!(child.line(), &[*mv]);
        assert_eq!(child.side_to_move(), Color::Black);
    }
}

#[test]
fn test_squares_between() {
    let a1 = coord_to_sq("a1").unwrap();
    let h8 = coord_to_sq("h8").unwrap();
    assert_eq!(squares_between(a1, h8).len(), 6);
    assert_eq!(squares_between(4, 60), vec![12, 20, 28, 36, 44, 52]);
    assert!(squares_between(4, 5).is_empty());
}

#[test]
#[should_panic]
fn test_squares_between_off_line_panics() {
    // b1 and c3 share no line
    squares_between(1, 18);
}
