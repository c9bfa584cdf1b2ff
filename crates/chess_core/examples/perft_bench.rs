//! Perft benchmark and move-generator debugging aid.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p chess_core -- [depth] [fen]
//!   cargo run --release --example perft_bench -p chess_core -- divide <depth> [fen]
//!
//! With no FEN the standard suite runs. `divide` prints the node count under
//! each root move, for bisecting a mismatch against a reference engine.

use std::{env, process, time::Instant};

use chess_core::{divide, perft, Position, STARTPOS_FEN};

const SUITE: &[(&str, &str)] = &[
    ("Starting position", STARTPOS_FEN),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ),
    ("Rook endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
    (
        "Promotions",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -",
    ),
    (
        "Queen vs pieces",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ -",
    ),
];

fn load(fen: &str) -> Position {
    Position::from_fen(fen).unwrap_or_else(|e| {
        eprintln!("bad FEN {fen:?}: {e}");
        process::exit(2);
    })
}

fn nps(nodes: u64, secs: f64) -> f64 {
    if secs > 0.0 {
        nodes as f64 / secs
    } else {
        0.0
    }
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("divide") {
        let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);
        let pos = load(args.get(2).map_or(STARTPOS_FEN, String::as_str));
        let mut total = 0;
        for (mv, nodes) in divide(&pos, depth) {
            println!("{mv}: {nodes}");
            total += nodes;
        }
        println!("\nNodes searched: {total}");
        return;
    }

    let depth: u8 = args.first().and_then(|s| s.parse().ok()).unwrap_or(3);
    let positions: Vec<(&str, &str)> = match args.get(1) {
        Some(fen) => vec![("Custom", fen.as_str())],
        None => SUITE.to_vec(),
    };

    println!("=== Perft depth {depth} ===");
    let mut total_nodes = 0u64;
    let mut total_secs = 0.0;
    for (name, fen) in positions {
        let pos = load(fen);
        let start = Instant::now();
        let nodes = perft(&pos, depth);
        let secs = start.elapsed().as_secs_f64();

        total_nodes += nodes;
        total_secs += secs;
        println!(
            "{name:.<30} {nodes:>12} nodes in {secs:>8.3}s ({:>10.0} nps)",
            nps(nodes, secs)
        );
    }
    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_secs:.3}s ({:.0} nps)",
        nps(total_nodes, total_secs)
    );
}
