//! Property-based tests using proptest.

use proptest::prelude::*;

use crate::board::{Board, Move};

/// Strategy to generate a random playout length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=12usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn random_playout(seed: u64, num_moves: usize) -> Vec<Board> {
    use rand::prelude::*;

    let mut board = Board::new();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut positions = vec![board.clone()];

    for _ in 0..num_moves {
        let moves: Vec<Move> = board.legal_moves().into_values().flatten().collect();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        board.apply_move(&mv);
        positions.push(board.clone());
    }
    positions
}

proptest! {
    /// Property: FEN round-trips through every reachable position
    #[test]
    fn prop_fen_round_trip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        for board in random_playout(seed, num_moves) {
            let fen = board.to_fen();
            let reparsed = Board::from_fen(&fen).unwrap();
            prop_assert_eq!(&reparsed, &board);
            prop_assert_eq!(reparsed.to_fen(), fen);
        }
    }

    /// Property: resolving a move's own notation returns the move
    #[test]
    fn prop_san_resolution_idempotent(seed in seed_strategy(), num_moves in 1..=6usize) {
        for board in random_playout(seed, num_moves) {
            for moves in board.legal_moves().values() {
                for mv in moves {
                    let san = board.notation_for(mv);
                    let resolved = board.resolve(&san).unwrap();
                    prop_assert_eq!(resolved, *mv, "token {}", san);
                }
            }
        }
    }

    /// Property: the side to move always alternates and exactly one
    /// king of each color survives any playout
    #[test]
    fn prop_kings_survive(seed in seed_strategy(), num_moves in move_count_strategy()) {
        use crate::board::{Color, PieceKind};

        for board in random_playout(seed, num_moves) {
            for color in Color::BOTH {
                let kings = board
                    .pieces(color)
                    .iter()
                    .filter(|&&sq| {
                        board.piece_at(sq).is_some_and(|p| p.kind == PieceKind::King)
                    })
                    .count();
                prop_assert_eq!(kings, 1);
            }
        }
    }
}
