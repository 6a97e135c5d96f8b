//! Const move-offset tables for the 0x88 board.
//!
//! On a 0x88 board one rank is 16 squares, so a (rank, file) step maps
//! to the offset `16 * rank + file` and off-board detection is the
//! single mask test `index & 0x88`.

use super::types::{Color, Square};

pub(crate) const KNIGHT_OFFSETS: [i16; 8] = [33, 31, 18, 14, -14, -18, -31, -33];
pub(crate) const KING_OFFSETS: [i16; 8] = [17, 16, 15, 1, -1, -15, -16, -17];

pub(crate) const BISHOP_DIRS: [i16; 4] = [17, 15, -15, -17];
pub(crate) const ROOK_DIRS: [i16; 4] = [16, 1, -1, -16];
pub(crate) const QUEEN_DIRS: [i16; 8] = KING_OFFSETS;

/// Diagonal capture offsets for a pawn of the given color.
///
/// These are the squares a pawn attacks; the forward-push offset is
/// deliberately not here, a pawn cannot attack where it cannot capture.
#[inline]
pub(crate) const fn pawn_capture_offsets(color: Color) -> [i16; 2] {
    match color {
        Color::White => [15, 17],
        Color::Black => [-15, -17],
    }
}

const fn sq(rank: u8, file: u8) -> Square {
    Square::from_coords(rank, file)
}

/// Everything castling legality needs about one side of the board:
/// the king and rook relocations, the squares that must be empty, and
/// the start/transit/end squares that must not be attacked.
pub(crate) struct CastleLane {
    pub kingside: bool,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    pub empty: &'static [Square],
    pub path: [Square; 3],
}

const WHITE_KINGSIDE: CastleLane = CastleLane {
    kingside: true,
    king_from: sq(0, 4),
    king_to: sq(0, 6),
    rook_from: sq(0, 7),
    rook_to: sq(0, 5),
    empty: &[sq(0, 5), sq(0, 6)],
    path: [sq(0, 4), sq(0, 5), sq(0, 6)],
};

const WHITE_QUEENSIDE: CastleLane = CastleLane {
    kingside: false,
    king_from: sq(0, 4),
    king_to: sq(0, 2),
    rook_from: sq(0, 0),
    rook_to: sq(0, 3),
    empty: &[sq(0, 1), sq(0, 2), sq(0, 3)],
    path: [sq(0, 4), sq(0, 3), sq(0, 2)],
};

const BLACK_KINGSIDE: CastleLane = CastleLane {
    kingside: true,
    king_from: sq(7, 4),
    king_to: sq(7, 6),
    rook_from: sq(7, 7),
    rook_to: sq(7, 5),
    empty: &[sq(7, 5), sq(7, 6)],
    path: [sq(7, 4), sq(7, 5), sq(7, 6)],
};

const BLACK_QUEENSIDE: CastleLane = CastleLane {
    kingside: false,
    king_from: sq(7, 4),
    king_to: sq(7, 2),
    rook_from: sq(7, 0),
    rook_to: sq(7, 3),
    empty: &[sq(7, 1), sq(7, 2), sq(7, 3)],
    path: [sq(7, 4), sq(7, 3), sq(7, 2)],
};

pub(crate) const fn castle_lanes(color: Color) -> [&'static CastleLane; 2] {
    match color {
        Color::White => [&WHITE_KINGSIDE, &WHITE_QUEENSIDE],
        Color::Black => [&BLACK_KINGSIDE, &BLACK_QUEENSIDE],
    }
}
