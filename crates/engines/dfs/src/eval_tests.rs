use super::*;

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

#[test]
fn test_material_balanced_at_start() {
    assert_eq!(Material.evaluate(&Position::startpos()), 0.0);
}

#[test]
fn test_material_counts_from_white() {
    // White is a rook up
    let p = pos("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    assert_eq!(Material.evaluate(&p), 5.0);

    // Black has queen and pawn against a knight
    let p = pos("3qk3/4p3/8/8/8/8/8/1N2K3 b - - 0 1");
    assert_eq!(Material.evaluate(&p), 3.0 - 10.0);
}

#[test]
fn test_space_symmetric_at_start() {
    assert_eq!(Space.evaluate(&Position::startpos()), 0.0);
}

#[test]
fn test_space_favours_active_side() {
    // The white queen in the centre sees far more than the black king
    let p = pos("7k/8/8/8/3Q4/8/8/K7 w - - 0 1");
    assert!(Space.evaluate(&p) > 0.0);
}

#[test]
fn test_signed_sum_flips_for_black() {
    let evaluators: Vec<Arc<dyn Evaluator>> = vec![Arc::new(Material)];
    let white_to_move = pos("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    let black_to_move = pos("4k3/8/8/8/8/8/8/R3K3 b - - 0 1");

    assert_eq!(signed_sum(&evaluators, &white_to_move), 5.0);
    assert_eq!(signed_sum(&evaluators, &black_to_move), -5.0);
}

#[test]
fn test_closures_are_evaluators() {
    let evaluators: Vec<Arc<dyn Evaluator>> = vec![
        Arc::new(Material),
        Arc::new(|_: &Position| 0.25),
    ];
    assert_eq!(signed_sum(&evaluators, &Position::startpos()), 0.25);
    assert_eq!(signed_sum(&[], &Position::startpos()), 0.0);
}
