//! FEN parsing and serialization.

use std::str::FromStr;

use super::error::FenError;
use super::types::{file_to_index, rank_to_index, Color, Piece, PieceKind, Square};
use super::{castle_bit, Board};

/// The standard initial position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Parse a board position from FEN notation.
    ///
    /// All six fields are understood; the two move counters may be
    /// omitted and default to `0 1`, but when present they must parse.
    /// A color with zero kings or more than one king is rejected.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewFields { found: parts.len() });
        }

        // Piece placement, rank 8 first
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::BadRankCount { found: ranks.len() });
        }
        let mut kings = [0usize; 2];
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8;
            let mut file = 0u32;
            for c in rank_str.chars() {
                if let Some(run) = c.to_digit(10) {
                    file += run;
                } else {
                    let piece =
                        Piece::from_symbol(c).map_err(|_| FenError::InvalidPiece { symbol: c })?;
                    if file >= 8 {
                        return Err(FenError::RankOverflow { rank: rank as usize });
                    }
                    if piece.kind == PieceKind::King {
                        kings[piece.color.index()] += 1;
                    }
                    board.set_piece(Square::from_coords(rank, file as u8), piece);
                    file += 1;
                }
            }
            if file > 8 {
                return Err(FenError::RankOverflow { rank: rank as usize });
            }
        }
        for color in Color::BOTH {
            if kings[color.index()] != 1 {
                return Err(FenError::KingCount {
                    color,
                    count: kings[color.index()],
                });
            }
        }

        // Side to move
        board.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        // Castling rights
        for c in parts[2].chars() {
            match c {
                'K' => board.castling_rights |= castle_bit(Color::White, true),
                'Q' => board.castling_rights |= castle_bit(Color::White, false),
                'k' => board.castling_rights |= castle_bit(Color::Black, true),
                'q' => board.castling_rights |= castle_bit(Color::Black, false),
                '-' => {}
                _ => return Err(FenError::InvalidCastling { symbol: c }),
            }
        }

        // En passant target
        board.en_passant_target = if parts[3] == "-" {
            None
        } else {
            let chars: Vec<char> = parts[3].chars().collect();
            match chars.as_slice() {
                [f @ 'a'..='h', r @ '1'..='8'] => {
                    Some(Square::from_coords(rank_to_index(*r), file_to_index(*f)))
                }
                _ => {
                    return Err(FenError::InvalidEnPassant {
                        found: parts[3].to_string(),
                    })
                }
            }
        };

        // Move counters
        if let Some(field) = parts.get(4) {
            board.halfmove_clock = field.parse().map_err(|_| FenError::InvalidCounter {
                field: "half-move clock",
                found: (*field).to_string(),
            })?;
        }
        if let Some(field) = parts.get(5) {
            board.fullmove_number = field.parse().map_err(|_| FenError::InvalidCounter {
                field: "full-move number",
                found: (*field).to_string(),
            })?;
        }

        Ok(board)
    }

    /// Serialize the position to FEN notation.
    ///
    /// The inverse of [`Board::from_fen`]: empty-square runs collapse to
    /// digit counts and the result round-trips.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::new();
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                let sq = Square::from_coords(rank, file);
                if let Some(piece) = self.piece_at(sq) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.symbol());
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let mut castling = String::new();
        for (color, kingside, symbol) in [
            (Color::White, true, 'K'),
            (Color::White, false, 'Q'),
            (Color::Black, true, 'k'),
            (Color::Black, false, 'q'),
        ] {
            if self.castling_rights & castle_bit(color, kingside) != 0 {
                castling.push(symbol);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }
        let ep = self
            .en_passant_target
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_fen(s)
    }
}
