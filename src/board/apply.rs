//! Move application.

use super::types::{Color, Move, Piece, PieceKind, SpecialMove, Square};
use super::{castle_bit, Board};

/// Castling right lost when this corner square's rook moves or is
/// captured on it.
fn corner_right(sq: Square) -> Option<(Color, bool)> {
    match (sq.rank(), sq.file()) {
        (0, 0) => Some((Color::White, false)),
        (0, 7) => Some((Color::White, true)),
        (7, 0) => Some((Color::Black, false)),
        (7, 7) => Some((Color::Black, true)),
        _ => None,
    }
}

impl Board {
    /// Apply a resolved move to the position.
    ///
    /// The move must come from [`Board::legal_moves`] or
    /// [`Board::resolve`]; applying an arbitrary move leaves the board
    /// in whatever state the relocations produce.
    pub fn apply_move(&mut self, mv: &Move) {
        let us = self.side_to_move;
        let moved = self.piece_at(mv.from);
        let is_pawn = moved.is_some_and(|p| p.kind == PieceKind::Pawn);
        let mut captured = self.move_piece(mv.from, mv.to);

        match mv.special {
            SpecialMove::None => {}
            SpecialMove::Castle { rook_from, rook_to } => {
                self.move_piece(rook_from, rook_to);
            }
            SpecialMove::EnPassant { captured: sq } => {
                captured = self.clear_square(sq);
            }
            SpecialMove::Promotion(kind) => {
                self.set_piece(mv.to, Piece::new(us, kind));
            }
        }

        // Castling rights are only ever removed by a move: a king move
        // drops both of its side's bits, a corner-rook move or a capture
        // on a corner square drops that corner's bit.
        if moved.is_some_and(|p| p.kind == PieceKind::King) {
            self.castling_rights &= !(castle_bit(us, true) | castle_bit(us, false));
        }
        for corner in [mv.from, mv.to] {
            if let Some((color, kingside)) = corner_right(corner) {
                self.castling_rights &= !castle_bit(color, kingside);
            }
        }

        // The en passant target exists only for the single reply to a
        // fresh double push.
        let double_push = is_pawn && mv.to.rank().abs_diff(mv.from.rank()) == 2;
        self.en_passant_target = if double_push {
            mv.from.offset(us.pawn_push())
        } else {
            None
        };

        if is_pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if us == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = us.opponent();
    }

    /// Pass the turn without moving, for the `--` null-move token.
    pub fn apply_null_move(&mut self) {
        self.en_passant_target = None;
        self.halfmove_clock += 1;
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.opponent();
    }
}
