//! Chess board representation and rules.
//!
//! The board is a 0x88 mailbox: 128 cells where off-board detection is
//! the single mask test `index & 0x88`. The module owns FEN parsing and
//! serialization, legal-move generation with full check/pin handling,
//! move application, and SAN emission/resolution.
//!
//! # Example
//! ```
//! use pgn_annotator::board::Board;
//!
//! let board = Board::new();
//! let moves = board.legal_moves();
//! let total: usize = moves.values().map(Vec::len).sum();
//! assert_eq!(total, 20);
//! ```

mod apply;
mod error;
mod fen;
mod movegen;
mod san;
mod state;
mod tables;
mod types;

#[cfg(test)]
mod tests;

pub use error::{FenError, PieceError, SanError, SquareError};
pub use fen::START_FEN;
pub use movegen::Status;
pub use state::Board;
pub use types::{Color, Move, Piece, PieceKind, SpecialMove, Square};

pub(crate) use types::{castle_bit, ALL_CASTLING_RIGHTS};
