//! Special positions and permissive inputs.

use crate::board::{Board, Color, Square, Status};

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

#[test]
fn test_castling_right_without_rook_is_ignored() {
    // The FEN claims kingside rights but the rook is gone; the right is
    // simply never exercised instead of producing a broken move.
    let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1").unwrap();
    let moves = board.legal_moves();
    let king = &moves[&sq("e1")];
    assert!(king.iter().all(|m| !m.is_castle()));
}

#[test]
fn test_fen_with_irregular_whitespace() {
    let board =
        Board::from_fen("  rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR   w  KQkq  -  0  1 ")
            .unwrap();
    assert_eq!(board, Board::new());
}

#[test]
fn test_smothered_mate() {
    let board = Board::from_fen("6rk/5Npp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
    assert_eq!(
        board.status(),
        Status::Checkmate {
            winner: Color::White
        }
    );
}

#[test]
fn test_king_in_corner_mobility() {
    let board = Board::from_fen("7k/8/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let king = &board.legal_moves()[&sq("a1")];
    assert_eq!(king.len(), 3);
}

#[test]
fn test_check_by_pawn_is_contact_check() {
    // A pawn check cannot be interposed against; the king must move or
    // the pawn must be captured.
    let board = Board::from_fen("7k/8/8/8/8/4p2R/3K4/8 w - - 0 1").unwrap();
    let moves = board.legal_moves();
    // The rook cannot interpose between a contact checker and the king;
    // its only legal move is capturing the pawn itself.
    let rook = &moves[&sq("h3")];
    assert_eq!(rook.len(), 1);
    assert_eq!(rook[0].to, sq("e3"));
}

#[test]
fn test_halfmove_counters_round_trip() {
    let fen = "8/8/8/8/8/5k2/8/5K2 w - - 37 99";
    let board = Board::from_fen(fen).unwrap();
    assert_eq!(board.to_fen(), fen);
}
