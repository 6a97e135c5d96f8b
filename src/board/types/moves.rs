//! Move types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::PieceKind;
use super::square::Square;

/// Special-move payload.
///
/// Carries enough data for a consumer to animate the move without
/// re-deriving the rules: the rook relocation for castling, the square
/// of the pawn removed by en passant, the piece a promotion creates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpecialMove {
    None,
    Castle { rook_from: Square, rook_to: Square },
    EnPassant { captured: Square },
    Promotion(PieceKind),
}

/// A fully resolved move.
///
/// One unified value with explicit optional fields, used from notation
/// resolution onward; never a bare string or a loosely-typed map.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub special: SpecialMove,
}

impl Move {
    /// A plain relocation (quiet move or ordinary capture).
    #[inline]
    #[must_use]
    pub const fn plain(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
            special: SpecialMove::None,
        }
    }

    /// A castling move; `from`/`to` are the king squares.
    #[inline]
    #[must_use]
    pub const fn castle(from: Square, to: Square, rook_from: Square, rook_to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
            special: SpecialMove::Castle { rook_from, rook_to },
        }
    }

    /// An en passant capture; `captured` is the square of the removed pawn.
    #[inline]
    #[must_use]
    pub const fn en_passant(from: Square, to: Square, captured: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
            special: SpecialMove::EnPassant { captured },
        }
    }

    /// A pawn promotion.
    #[inline]
    #[must_use]
    pub const fn promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(kind),
            special: SpecialMove::Promotion(kind),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_castle(&self) -> bool {
        matches!(self.special, SpecialMove::Castle { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.special, SpecialMove::EnPassant { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Kingside castling moves the king two files toward h.
    #[inline]
    #[must_use]
    pub fn is_castle_kingside(&self) -> bool {
        self.is_castle() && self.to.file() > self.from.file()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.symbol())?;
        }
        Ok(())
    }
}
