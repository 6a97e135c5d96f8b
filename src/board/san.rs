//! Standard Algebraic Notation: emission and resolution.
//!
//! `notation_for` renders a resolved move exactly, with the minimal
//! disambiguation the position requires; `resolve` turns a loosely
//! written token ("Nf3", "exd5", "R1d2", "e8=Q", "e2e4") back into a
//! concrete legal move or fails loudly.

use super::error::SanError;
use super::tables::{pawn_capture_offsets, BISHOP_DIRS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRS};
use super::types::{Color, Move, Piece, PieceKind, Square};
use super::Board;

/// Parsed pieces of a SAN token body (everything after the piece letter).
struct SanParts {
    from_file: Option<u8>,
    from_rank: Option<u8>,
    is_capture: bool,
    dest: Square,
    promotion: Option<PieceKind>,
}

impl Board {
    /// Render a move in Standard Algebraic Notation.
    ///
    /// Returns notation like "e4", "Nf3", "Bxc6+", "O-O-O", "e8=Q#".
    #[must_use]
    pub fn notation_for(&self, mv: &Move) -> String {
        let mut san = String::new();

        if mv.is_castle() {
            san.push_str(if mv.is_castle_kingside() { "O-O" } else { "O-O-O" });
        } else {
            let kind = self
                .piece_at(mv.from)
                .map_or(PieceKind::Pawn, |p| p.kind);
            let is_capture = self.piece_at(mv.to).is_some() || mv.is_en_passant();

            if kind == PieceKind::Pawn {
                if is_capture {
                    san.push((b'a' + mv.from.file()) as char);
                }
            } else {
                san.push(kind.symbol().to_ascii_uppercase());
                let (needs_file, needs_rank) = self.needs_disambiguation(mv, kind);
                if needs_file {
                    san.push((b'a' + mv.from.file()) as char);
                }
                if needs_rank {
                    san.push((b'1' + mv.from.rank()) as char);
                }
            }

            if is_capture {
                san.push('x');
            }
            san.push_str(&mv.to.to_string());
            if let Some(kind) = mv.promotion {
                san.push('=');
                san.push(kind.symbol().to_ascii_uppercase());
            }
        }

        // Check and mate suffixes come from re-running move generation
        // on a scratch copy with the move applied.
        let mut scratch = self.clone();
        scratch.apply_move(mv);
        if scratch.is_in_check(scratch.side_to_move()) {
            if scratch.legal_moves().is_empty() {
                san.push('#');
            } else {
                san.push('+');
            }
        }

        san
    }

    /// Is file and/or rank disambiguation needed for this piece move?
    ///
    /// Only other same-kind pieces that can legally reach the same
    /// destination count; file disambiguation is preferred, rank is
    /// used when the file does not separate them, both when neither
    /// alone does.
    fn needs_disambiguation(&self, mv: &Move, kind: PieceKind) -> (bool, bool) {
        let mut rivals: Vec<Square> = Vec::new();
        for (&from, list) in &self.legal_moves() {
            if from == mv.from || !self.piece_at(from).is_some_and(|p| p.kind == kind) {
                continue;
            }
            if list.iter().any(|m| m.to == mv.to) {
                rivals.push(from);
            }
        }

        if rivals.is_empty() {
            return (false, false);
        }
        let same_file = rivals.iter().any(|sq| sq.file() == mv.from.file());
        let same_rank = rivals.iter().any(|sq| sq.rank() == mv.from.rank());
        match (same_file, same_rank) {
            (false, _) => (true, false),
            (true, false) => (false, true),
            (true, true) => (true, true),
        }
    }

    /// Resolve a notation token into a concrete legal move.
    ///
    /// Accepts SAN with optional disambiguation and suffix glyphs,
    /// castling tokens, and 4-5 character long coordinate notation.
    /// Fails with [`SanError::IllegalMove`] when nothing legal matches
    /// and [`SanError::AmbiguousMove`] when more than one move does;
    /// there is no silent correction.
    pub fn resolve(&self, token: &str) -> Result<Move, SanError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SanError::Empty);
        }
        let stripped = strip_suffix_glyphs(token);
        if stripped.is_empty() {
            return Err(SanError::Malformed {
                san: token.to_string(),
            });
        }

        if stripped == "O-O" || stripped == "0-0" {
            return self.find_castle(true, token);
        }
        if stripped == "O-O-O" || stripped == "0-0-0" {
            return self.find_castle(false, token);
        }

        // Long coordinate notation parses directly.
        if let Some(mv) = self.resolve_coordinates(stripped, token)? {
            return Ok(mv);
        }

        let chars: Vec<char> = stripped.chars().collect();
        let (kind, body) = match chars[0] {
            c @ ('K' | 'Q' | 'R' | 'B' | 'N') => (
                PieceKind::from_symbol(c).map_err(|_| SanError::Malformed {
                    san: token.to_string(),
                })?,
                &chars[1..],
            ),
            _ => (PieceKind::Pawn, &chars[..]),
        };
        let parts = parse_san_body(body, token)?;

        // Candidate origins by direct offset/ray scan (not full
        // legality), narrowed by the token's file/rank hints. A pawn
        // token only means a capture when it says so: bare "e6" is a
        // push even when an en passant capture to e6 is also legal.
        let us = self.side_to_move;
        let pawn_capture =
            parts.is_capture || parts.from_file.is_some_and(|f| f != parts.dest.file());
        let origins: Vec<Square> = self
            .candidate_origins(kind, us, parts.dest, pawn_capture)
            .into_iter()
            .filter(|sq| parts.from_file.is_none_or(|f| sq.file() == f))
            .filter(|sq| parts.from_rank.is_none_or(|r| sq.rank() == r))
            .collect();

        // Whatever survives the hints must also be legal; the legal
        // move list supplies the fully tagged move value.
        let legal = self.legal_moves();
        let mut matching: Vec<Move> = Vec::new();
        for origin in origins {
            let Some(list) = legal.get(&origin) else {
                continue;
            };
            let mut candidates = list.iter().filter(|m| m.to == parts.dest);
            let found = match parts.promotion {
                Some(kind) => candidates.find(|m| m.promotion == Some(kind)),
                // A bare promotion token like "e8" names four moves that
                // differ only in the piece; default to the queen rather
                // than calling distinct origins ambiguous.
                None => candidates
                    .clone()
                    .find(|m| m.promotion.is_none_or(|k| k == PieceKind::Queen)),
            };
            if let Some(mv) = found {
                matching.push(*mv);
            }
        }

        match matching.as_slice() {
            [] => Err(SanError::IllegalMove {
                san: token.to_string(),
            }),
            [mv] => Ok(*mv),
            _ => Err(SanError::AmbiguousMove {
                san: token.to_string(),
            }),
        }
    }

    fn find_castle(&self, kingside: bool, token: &str) -> Result<Move, SanError> {
        let king = self.king(self.side_to_move);
        self.legal_moves()
            .get(&king)
            .and_then(|list| {
                list.iter()
                    .find(|m| m.is_castle() && m.is_castle_kingside() == kingside)
                    .copied()
            })
            .ok_or_else(|| SanError::IllegalMove {
                san: token.to_string(),
            })
    }

    /// Try the 4-5 character "e2e4" / "e7e8q" fast path. Returns
    /// `Ok(None)` when the token is not coordinate-shaped.
    fn resolve_coordinates(&self, stripped: &str, token: &str) -> Result<Option<Move>, SanError> {
        let chars: Vec<char> = stripped.chars().collect();
        let (from, to, promo) = match chars.as_slice() {
            [ff @ 'a'..='h', fr @ '1'..='8', tf @ 'a'..='h', tr @ '1'..='8'] => {
                (square_of(*ff, *fr), square_of(*tf, *tr), None)
            }
            [ff @ 'a'..='h', fr @ '1'..='8', tf @ 'a'..='h', tr @ '1'..='8', p] => {
                let kind = PieceKind::from_symbol(*p)
                    .map_err(|_| SanError::InvalidPromotion { symbol: *p })?;
                (square_of(*ff, *fr), square_of(*tf, *tr), Some(kind))
            }
            _ => return Ok(None),
        };

        let legal = self.legal_moves();
        let Some(list) = legal.get(&from) else {
            return Err(SanError::IllegalMove {
                san: token.to_string(),
            });
        };
        let mut candidates = list.iter().filter(|m| m.to == to);
        let found = match promo {
            Some(kind) => candidates.find(|m| m.promotion == Some(kind)),
            None => candidates
                .clone()
                .find(|m| m.promotion.is_none_or(|k| k == PieceKind::Queen)),
        };
        found.copied().map(Some).ok_or_else(|| SanError::IllegalMove {
            san: token.to_string(),
        })
    }

    /// Squares from which a piece of `kind` could reach `dest` by its
    /// movement pattern alone. `pawn_capture` selects between a pawn's
    /// capture pattern and its push pattern; other kinds ignore it.
    fn candidate_origins(
        &self,
        kind: PieceKind,
        us: Color,
        dest: Square,
        pawn_capture: bool,
    ) -> Vec<Square> {
        let mut origins = Vec::new();
        let mut consider = |sq: Square, origins: &mut Vec<Square>| {
            if self.piece_at(sq) == Some(Piece::new(us, kind)) {
                origins.push(sq);
            }
        };
        match kind {
            PieceKind::Pawn if pawn_capture => {
                // Reverse capture offsets point from the destination
                // back at squares a pawn could capture from.
                for delta in pawn_capture_offsets(us) {
                    if let Some(sq) = dest.offset(-delta) {
                        consider(sq, &mut origins);
                    }
                }
            }
            PieceKind::Pawn => {
                let back = -us.pawn_push();
                if let Some(sq) = dest.offset(back) {
                    if self.is_empty_square(sq) {
                        // Double push: the origin is one rank further.
                        if let Some(two) = sq.offset(back) {
                            consider(two, &mut origins);
                        }
                    } else {
                        consider(sq, &mut origins);
                    }
                }
            }
            PieceKind::Knight => {
                for delta in KNIGHT_OFFSETS {
                    if let Some(sq) = dest.offset(delta) {
                        consider(sq, &mut origins);
                    }
                }
            }
            PieceKind::King => {
                for delta in KING_OFFSETS {
                    if let Some(sq) = dest.offset(delta) {
                        consider(sq, &mut origins);
                    }
                }
            }
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                let dirs: &[i16] = match kind {
                    PieceKind::Bishop => &BISHOP_DIRS,
                    PieceKind::Rook => &ROOK_DIRS,
                    _ => &KING_OFFSETS,
                };
                for &delta in dirs {
                    let mut cursor = dest;
                    while let Some(sq) = cursor.offset(delta) {
                        if !self.is_empty_square(sq) {
                            consider(sq, &mut origins);
                            break;
                        }
                        cursor = sq;
                    }
                }
            }
        }
        origins
    }
}

/// Trailing check/mate markers and annotation glyphs carry no
/// resolution information. `=` and `-` appear here because NAG
/// substitution can append assessment symbols like `=` or `+-` to a
/// token; a promotion's `=` is always followed by a piece letter and a
/// castling token ends in `O`, so neither is ever clipped.
fn strip_suffix_glyphs(token: &str) -> &str {
    token.trim_end_matches(|c: char| {
        matches!(c, '+' | '#' | '!' | '?' | '=' | '-') || !c.is_ascii()
    })
}

fn square_of(file: char, rank: char) -> Square {
    Square::from_coords(rank as u8 - b'1', file as u8 - b'a')
}

fn parse_san_body(body: &[char], token: &str) -> Result<SanParts, SanError> {
    let mut body = body;

    // Promotion suffix: "=Q" or a bare trailing "Q".
    let mut promotion = None;
    if let [rest @ .., p] = body {
        if p.is_ascii_uppercase() {
            if matches!(p, 'Q' | 'R' | 'B' | 'N') {
                promotion = Some(
                    PieceKind::from_symbol(*p)
                        .map_err(|_| SanError::InvalidPromotion { symbol: *p })?,
                );
                body = match rest {
                    [prefix @ .., '='] => prefix,
                    _ => rest,
                };
            } else {
                return Err(SanError::InvalidPromotion { symbol: *p });
            }
        }
    }

    // Destination square is the final file-rank pair.
    let dest = match body {
        [rest @ .., f @ 'a'..='h', r @ '1'..='8'] => {
            body = rest;
            square_of(*f, *r)
        }
        _ => {
            return Err(SanError::Malformed {
                san: token.to_string(),
            })
        }
    };

    // What's left may hint the origin file and/or rank, plus 'x'.
    let mut from_file = None;
    let mut from_rank = None;
    let mut is_capture = false;
    for c in body {
        match c {
            'x' => is_capture = true,
            'a'..='h' => from_file = Some(*c as u8 - b'a'),
            '1'..='8' => from_rank = Some(*c as u8 - b'1'),
            _ => {
                return Err(SanError::Malformed {
                    san: token.to_string(),
                })
            }
        }
    }

    Ok(SanParts {
        from_file,
        from_rank,
        is_capture,
        dest,
        promotion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_pawn_push() {
        let board = Board::new();
        let mv = board.resolve("e4").unwrap();
        assert_eq!(mv.from, sq("e2"));
        assert_eq!(mv.to, sq("e4"));
        assert_eq!(board.notation_for(&mv), "e4");
    }

    #[test]
    fn test_knight_development() {
        let board = Board::new();
        let mv = board.resolve("Nf3").unwrap();
        assert_eq!(mv.from, sq("g1"));
        assert_eq!(mv.to, sq("f3"));
        assert_eq!(board.notation_for(&mv), "Nf3");
    }

    #[test]
    fn test_pawn_capture_includes_file() {
        let board =
            Board::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2")
                .unwrap();
        let mv = board.resolve("exd5").unwrap();
        assert_eq!(mv.from, sq("e4"));
        assert_eq!(board.notation_for(&mv), "exd5");
    }

    #[test]
    fn test_castling_both_sides() {
        let board = Board::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let short = board.resolve("O-O").unwrap();
        assert!(short.is_castle_kingside());
        assert_eq!(board.notation_for(&short), "O-O");
        let long = board.resolve("O-O-O").unwrap();
        assert!(long.is_castle() && !long.is_castle_kingside());
        assert_eq!(board.notation_for(&long), "O-O-O");
    }

    #[test]
    fn test_promotion_suffix_forms() {
        let board = Board::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        for token in ["a8=Q", "a8Q"] {
            let mv = board.resolve(token).unwrap();
            assert_eq!(mv.promotion, Some(PieceKind::Queen));
        }
        let mv = board.resolve("a8=N").unwrap();
        assert_eq!(mv.promotion, Some(PieceKind::Knight));
        // Bare destination defaults to the queen.
        let mv = board.resolve("a8").unwrap();
        assert_eq!(mv.promotion, Some(PieceKind::Queen));
        assert_eq!(board.notation_for(&mv), "a8=Q");
    }

    #[test]
    fn test_bare_pawn_token_is_a_push() {
        // Both the e6 push and the en passant capture are available;
        // the bare token means the push, the file-hinted one the capture.
        let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let push = board.resolve("e6").unwrap();
        assert_eq!(push.from, sq("e5"));
        assert!(!push.is_en_passant());
        let capture = board.resolve("exd6").unwrap();
        assert!(capture.is_en_passant());
        assert_eq!(board.notation_for(&capture), "exd6");
    }

    #[test]
    fn test_file_disambiguation() {
        let board = Board::from_fen("3k4/8/8/8/R6R/8/8/4K3 w - - 0 1").unwrap();
        let mv = board.resolve("Rad4").unwrap();
        assert_eq!(mv.from, sq("a4"));
        assert_eq!(board.notation_for(&mv), "Rad4");
        let mv = board.resolve("Rhd4").unwrap();
        assert_eq!(mv.from, sq("h4"));
    }

    #[test]
    fn test_rank_disambiguation() {
        let board = Board::from_fen("3k4/8/8/8/7R/8/8/4K2R w K - 0 1").unwrap();
        let mv = board.resolve("R4h2").unwrap();
        assert_eq!(mv.from, sq("h4"));
        assert_eq!(board.notation_for(&mv), "R4h2");
    }

    #[test]
    fn test_ambiguous_token_fails_loudly() {
        let board = Board::from_fen("3k4/8/8/8/R6R/8/8/4K3 w - - 0 1").unwrap();
        assert!(matches!(
            board.resolve("Rd4"),
            Err(SanError::AmbiguousMove { .. })
        ));
    }

    #[test]
    fn test_illegal_token_fails_loudly() {
        let board = Board::new();
        assert!(matches!(
            board.resolve("Qh5"),
            Err(SanError::IllegalMove { .. })
        ));
        assert!(matches!(
            board.resolve("e5"),
            Err(SanError::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_pinned_rival_does_not_force_disambiguation() {
        // Both knights reach d5 by pattern, but the e3 knight is pinned
        // by the rook on e8: it is not a legal rival, so "Nd5" resolves
        // to the c3 knight and needs no disambiguation.
        let board = Board::from_fen("4r1k1/8/8/8/8/2N1N3/8/4K3 w - - 0 1").unwrap();
        let mv = board.resolve("Nd5").unwrap();
        assert_eq!(mv.from, sq("c3"));
        assert_eq!(board.notation_for(&mv), "Nd5");
    }

    #[test]
    fn test_check_and_mate_suffixes() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let mv = board.resolve("Rh8").unwrap();
        assert_eq!(board.notation_for(&mv), "Rh8+");

        let board = Board::from_fen("6k1/p6p/P7/7p/8/7r/1r6/2b2K2 b - - 2 54").unwrap();
        let mv = board.resolve("Rh1").unwrap();
        assert_eq!(mv.from, sq("h3"));
        assert_eq!(board.notation_for(&mv), "Rh1#");
        let mut after = board.clone();
        after.apply_move(&mv);
        assert!(after.legal_moves().is_empty());
    }

    #[test]
    fn test_long_coordinates_resolve_castling() {
        let board = Board::from_fen(
            "r1bqk2r/pp1pppbp/2n1n1p1/2p1P3/4Q1P1/2N2N2/PPPP1P1P/R1B1KB1R b KQkq - 6 9",
        )
        .unwrap();
        let mv = board.resolve("e8g8").unwrap();
        assert!(mv.is_castle_kingside());
        assert_eq!(board.notation_for(&mv), "O-O");
    }

    #[test]
    fn test_knight_capture_with_check() {
        let board = Board::from_fen(
            "r1bq1rk1/pp1pppbp/4n1p1/2pNP3/3nQ1PP/5N2/PPPP1P2/R1B1KB1R b KQ - 2 11",
        )
        .unwrap();
        let mv = board.resolve("Nf3").unwrap();
        assert_eq!(mv.from, sq("d4"));
        assert_eq!(mv.to, sq("f3"));
        assert_eq!(board.notation_for(&mv), "Nxf3+");
    }

    #[test]
    fn test_suffix_glyphs_are_ignored() {
        let board = Board::new();
        for token in ["e4!", "e4?", "e4!?", "e4+", "e4±"] {
            assert_eq!(board.resolve(token).unwrap().to, sq("e4"));
        }
    }

    #[test]
    fn test_resolution_round_trip() {
        let board = Board::new();
        for moves in board.legal_moves().values() {
            for mv in moves {
                let san = board.notation_for(mv);
                assert_eq!(board.resolve(&san).unwrap(), *mv, "token {san}");
            }
        }
    }
}
