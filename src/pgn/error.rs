//! Error types for PGN parsing and annotation.

use std::fmt;

use crate::board::{FenError, SanError};

/// Error type for PGN parsing and annotation failures.
///
/// Syntax errors abort parsing of the single offending game; the batch
/// entry point catches them per game and keeps going. Annotation
/// failures carry the position and token at the point of failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PgnError {
    /// No recognizable move token anywhere in the game text
    NoMovetext,
    /// A `{` comment never closes
    UnterminatedComment,
    /// One or more `(` variations never close
    UnterminatedVariation { depth: usize },
    /// A `)` with no open variation
    UnexpectedVariationClose,
    /// A `(` before any move in the current branch
    DanglingVariation,
    /// A token that is neither a move, a move number, a glyph, nor a
    /// termination marker
    InvalidToken { token: String },
    /// The game's starting FEN does not parse
    BadStartPosition { fen: String, source: FenError },
    /// A move token failed to resolve; `fen` is the position at failure
    BadMove {
        token: String,
        fen: String,
        source: SanError,
    },
}

impl fmt::Display for PgnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PgnError::NoMovetext => write!(f, "No move tokens in game text"),
            PgnError::UnterminatedComment => write!(f, "Unterminated comment"),
            PgnError::UnterminatedVariation { depth } => {
                write!(f, "{depth} unterminated variation(s)")
            }
            PgnError::UnexpectedVariationClose => {
                write!(f, "Variation close with no open variation")
            }
            PgnError::DanglingVariation => {
                write!(f, "Variation before any move in its branch")
            }
            PgnError::InvalidToken { token } => write!(f, "Unrecognizable token '{token}'"),
            PgnError::BadStartPosition { fen, source } => {
                write!(f, "Bad starting position '{fen}': {source}")
            }
            PgnError::BadMove { token, fen, source } => {
                write!(f, "Cannot play '{token}' at '{fen}': {source}")
            }
        }
    }
}

impl std::error::Error for PgnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PgnError::BadStartPosition { source, .. } => Some(source),
            PgnError::BadMove { source, .. } => Some(source),
            _ => None,
        }
    }
}
