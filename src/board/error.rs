//! Error types for board operations.

use std::fmt;

use super::types::Color;

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few space-separated fields (needs at least 4)
    TooFewFields { found: usize },
    /// Placement field does not describe exactly 8 ranks
    BadRankCount { found: usize },
    /// Invalid piece character in the placement field
    InvalidPiece { symbol: char },
    /// A rank's pieces and empty-run digits overflow 8 files
    RankOverflow { rank: usize },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid castling character
    InvalidCastling { symbol: char },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Half-move clock or full-move number is not a number
    InvalidCounter { field: &'static str, found: String },
    /// A color has zero kings or more than one king
    KingCount { color: Color, count: usize },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewFields { found } => {
                write!(f, "FEN must have at least 4 fields, found {found}")
            }
            FenError::BadRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::InvalidPiece { symbol } => {
                write!(f, "Invalid piece character '{symbol}' in FEN")
            }
            FenError::RankOverflow { rank } => {
                write!(f, "Rank {} overflows 8 files", rank + 1)
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { symbol } => {
                write!(f, "Invalid castling character '{symbol}' in FEN")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::InvalidCounter { field, found } => {
                write!(f, "Invalid {field} '{found}' in FEN")
            }
            FenError::KingCount { color, count } => {
                write!(f, "{color} has {count} kings, expected exactly 1")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for piece symbol/code failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PieceError {
    /// Letter is not one of p, n, b, r, q, k in either case
    UnknownSymbol { symbol: char },
    /// Packed code does not decode to a piece
    UnknownCode { code: u8 },
}

impl fmt::Display for PieceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceError::UnknownSymbol { symbol } => {
                write!(f, "Unknown piece symbol '{symbol}'")
            }
            PieceError::UnknownCode { code } => {
                write!(f, "Unknown piece code {code:#x}")
            }
        }
    }
}

impl std::error::Error for PieceError {}

/// Error type for SAN resolution failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanError {
    /// Empty SAN string
    Empty,
    /// Token does not look like a move at all
    Malformed { san: String },
    /// Invalid promotion piece
    InvalidPromotion { symbol: char },
    /// Notation resolves to no legal candidate
    IllegalMove { san: String },
    /// Notation resolves to more than one legal candidate
    AmbiguousMove { san: String },
}

impl fmt::Display for SanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanError::Empty => write!(f, "Empty SAN string"),
            SanError::Malformed { san } => write!(f, "Malformed move token '{san}'"),
            SanError::InvalidPromotion { symbol } => {
                write!(f, "Invalid promotion piece '{symbol}'")
            }
            SanError::IllegalMove { san } => {
                write!(f, "No legal move matches '{san}'")
            }
            SanError::AmbiguousMove { san } => {
                write!(f, "Ambiguous move '{san}'")
            }
        }
    }
}

impl std::error::Error for SanError {}
