pub mod board;
pub mod pgn;

pub use board::{Board, Color, Move, Piece, PieceKind, Square};
pub use pgn::{annotate, parse_game, parse_games, AnnotatedGame, Game, PgnError};
