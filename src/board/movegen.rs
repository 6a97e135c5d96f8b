//! Legal move generation: attack sets, check counting, pins, castling,
//! en passant, and game status.

use std::collections::BTreeMap;

use super::tables::{
    castle_lanes, pawn_capture_offsets, BISHOP_DIRS, KING_OFFSETS, KNIGHT_OFFSETS, QUEEN_DIRS,
    ROOK_DIRS,
};
use super::types::{Color, Move, Piece, PieceKind, Square, PROMOTION_KINDS};
use super::Board;

/// Game state derived from move generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    InProgress,
    /// The side to move is in check with no legal moves.
    Checkmate { winner: Color },
    /// The side to move is not in check but has no legal moves.
    Stalemate,
}

/// Set of 0x88 squares as a 128-bit mask.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub(crate) struct SquareSet(u128);

impl SquareSet {
    pub(crate) const EMPTY: SquareSet = SquareSet(0);

    #[inline]
    pub(crate) fn insert(&mut self, sq: Square) {
        self.0 |= 1u128 << sq.index();
    }

    #[inline]
    pub(crate) fn contains(self, sq: Square) -> bool {
        self.0 & (1u128 << sq.index()) != 0
    }

    #[inline]
    pub(crate) fn union(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 | other.0)
    }
}

impl Board {
    /// Squares attacked by every piece of `by`.
    ///
    /// `ignore` is treated as empty so rays extend through it; passing
    /// the defending king here keeps the king from "blocking" a ray and
    /// stepping to the square directly behind it.
    fn attack_set(&self, by: Color, ignore: Option<Square>) -> SquareSet {
        let mut set = SquareSet::EMPTY;
        for &from in self.pieces(by) {
            if let Some(piece) = self.piece_at(from) {
                set = set.union(self.attacks_from(from, piece, ignore));
            }
        }
        set
    }

    /// Squares attacked by one piece.
    ///
    /// Pawns project their diagonal capture offsets only, never the
    /// forward push: a pawn cannot attack where it cannot capture.
    fn attacks_from(&self, from: Square, piece: Piece, ignore: Option<Square>) -> SquareSet {
        let mut set = SquareSet::EMPTY;
        match piece.kind {
            PieceKind::Pawn => {
                for delta in pawn_capture_offsets(piece.color) {
                    if let Some(to) = from.offset(delta) {
                        set.insert(to);
                    }
                }
            }
            PieceKind::Knight => {
                for delta in KNIGHT_OFFSETS {
                    if let Some(to) = from.offset(delta) {
                        set.insert(to);
                    }
                }
            }
            PieceKind::King => {
                for delta in KING_OFFSETS {
                    if let Some(to) = from.offset(delta) {
                        set.insert(to);
                    }
                }
            }
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                for delta in slider_dirs(piece.kind) {
                    let mut cursor = from;
                    while let Some(to) = cursor.offset(*delta) {
                        set.insert(to);
                        if !self.is_empty_square(to) && Some(to) != ignore {
                            break;
                        }
                        cursor = to;
                    }
                }
            }
        }
        set
    }

    /// Is `sq` attacked by any piece of `by`?
    #[must_use]
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        self.attack_set(by, None).contains(sq)
    }

    /// Is `color`'s king in check?
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_attacked(self.king(color), color.opponent())
    }

    /// Opposing pieces whose attack set includes `color`'s king square.
    fn checkers(&self, color: Color) -> Vec<Square> {
        let king = self.king(color);
        let mut found = Vec::new();
        for &from in self.pieces(color.opponent()) {
            if let Some(piece) = self.piece_at(from) {
                if self.attacks_from(from, piece, None).contains(king) {
                    found.push(from);
                }
            }
        }
        found
    }

    /// Absolute pins against `color`'s king.
    ///
    /// For each opposing slider aligned with the king, walk from the
    /// slider toward the king; if exactly one of `color`'s pieces lies
    /// on the line (and nothing else), that piece is pinned and may only
    /// move along the line, the slider's square included.
    fn pin_lines(&self, color: Color) -> Vec<(Square, SquareSet)> {
        let king = self.king(color);
        let mut pins = Vec::new();
        for &from in self.pieces(color.opponent()) {
            let Some(piece) = self.piece_at(from) else {
                continue;
            };
            if !piece.kind.is_slider() {
                continue;
            }
            let Some(dir) = direction_toward(from, king) else {
                continue;
            };
            let diagonal = dir.abs() == 15 || dir.abs() == 17;
            if diagonal && !piece.kind.attacks_diagonally() {
                continue;
            }
            if !diagonal && !piece.kind.attacks_straight() {
                continue;
            }

            let mut line = SquareSet::EMPTY;
            line.insert(from);
            let mut blocker = None;
            let mut cursor = from;
            loop {
                let Some(next) = cursor.offset(dir) else {
                    break;
                };
                if next == king {
                    if let Some(pinned) = blocker {
                        pins.push((pinned, line));
                    }
                    break;
                }
                match self.piece_at(next) {
                    Some(p) if p.color == color && blocker.is_none() => blocker = Some(next),
                    Some(_) => break,
                    None => {}
                }
                line.insert(next);
                cursor = next;
            }
        }
        pins
    }

    /// Squares a non-king move may land on to address a single check:
    /// the checker's square, plus the squares between a sliding checker
    /// and the king.
    fn evasion_targets(&self, checker: Square, king: Square) -> SquareSet {
        let mut set = SquareSet::EMPTY;
        set.insert(checker);
        let is_slider = self
            .piece_at(checker)
            .is_some_and(|p| p.kind.is_slider());
        if is_slider {
            if let Some(dir) = direction_toward(checker, king) {
                let mut cursor = checker;
                while let Some(next) = cursor.offset(dir) {
                    if next == king {
                        break;
                    }
                    set.insert(next);
                    cursor = next;
                }
            }
        }
        set
    }

    /// Compute every legal move for the side to move, as per-piece
    /// destination lists keyed by origin square.
    ///
    /// Pieces with no legal moves do not appear in the map.
    #[must_use]
    pub fn legal_moves(&self) -> BTreeMap<Square, Vec<Move>> {
        let us = self.side_to_move;
        let them = us.opponent();
        let king = self.king(us);
        let attacked = self.attack_set(them, Some(king));
        let checkers = self.checkers(us);
        let pins = self.pin_lines(us);
        // With two checkers only the king may move; with one, non-king
        // moves are restricted to the evasion targets.
        let evasions = match checkers.as_slice() {
            [] => None,
            [checker] => Some(self.evasion_targets(*checker, king)),
            _ => Some(SquareSet::EMPTY),
        };

        let mut map = BTreeMap::new();
        for &from in self.pieces(us) {
            let Some(piece) = self.piece_at(from) else {
                continue;
            };
            let moves = if piece.kind == PieceKind::King {
                self.king_moves(from, us, attacked, checkers.is_empty())
            } else {
                let pin = pins
                    .iter()
                    .find(|(sq, _)| *sq == from)
                    .map(|(_, line)| *line);
                self.piece_moves(from, piece, evasions, pin)
            };
            if !moves.is_empty() {
                map.insert(from, moves);
            }
        }
        map
    }

    fn king_moves(
        &self,
        from: Square,
        us: Color,
        attacked: SquareSet,
        can_castle: bool,
    ) -> Vec<Move> {
        let mut moves = Vec::new();
        for delta in KING_OFFSETS {
            let Some(to) = from.offset(delta) else {
                continue;
            };
            if self.piece_at(to).is_some_and(|p| p.color == us) {
                continue;
            }
            if attacked.contains(to) {
                continue;
            }
            moves.push(Move::plain(from, to));
        }
        // Castling legality is re-derived every time from the rights
        // mask, emptiness, and the attack set; nothing is cached.
        if can_castle {
            for lane in castle_lanes(us) {
                if !self.has_castling_right(us, lane.kingside) {
                    continue;
                }
                if from != lane.king_from {
                    continue;
                }
                if self.piece_at(lane.rook_from)
                    != Some(Piece::new(us, PieceKind::Rook))
                {
                    continue;
                }
                if !lane.empty.iter().all(|&sq| self.is_empty_square(sq)) {
                    continue;
                }
                if lane.path.iter().any(|&sq| attacked.contains(sq)) {
                    continue;
                }
                moves.push(Move::castle(
                    lane.king_from,
                    lane.king_to,
                    lane.rook_from,
                    lane.rook_to,
                ));
            }
        }
        moves
    }

    fn piece_moves(
        &self,
        from: Square,
        piece: Piece,
        evasions: Option<SquareSet>,
        pin: Option<SquareSet>,
    ) -> Vec<Move> {
        let allowed = |to: Square| {
            evasions.is_none_or(|set| set.contains(to))
                && pin.is_none_or(|line| line.contains(to))
        };
        let mut moves = Vec::new();
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(&mut moves, from, piece.color, evasions, pin),
            PieceKind::Knight => {
                for delta in KNIGHT_OFFSETS {
                    let Some(to) = from.offset(delta) else {
                        continue;
                    };
                    if self.piece_at(to).is_some_and(|p| p.color == piece.color) {
                        continue;
                    }
                    if allowed(to) {
                        moves.push(Move::plain(from, to));
                    }
                }
            }
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                for delta in slider_dirs(piece.kind) {
                    let mut cursor = from;
                    while let Some(to) = cursor.offset(*delta) {
                        match self.piece_at(to) {
                            Some(p) if p.color == piece.color => break,
                            Some(_) => {
                                if allowed(to) {
                                    moves.push(Move::plain(from, to));
                                }
                                break;
                            }
                            None => {
                                if allowed(to) {
                                    moves.push(Move::plain(from, to));
                                }
                                cursor = to;
                            }
                        }
                    }
                }
            }
            PieceKind::King => unreachable!("king moves are generated separately"),
        }
        moves
    }

    fn pawn_moves(
        &self,
        moves: &mut Vec<Move>,
        from: Square,
        us: Color,
        evasions: Option<SquareSet>,
        pin: Option<SquareSet>,
    ) {
        let allowed = |to: Square| {
            evasions.is_none_or(|set| set.contains(to))
                && pin.is_none_or(|line| line.contains(to))
        };
        let push = us.pawn_push();

        // Forward pushes
        if let Some(to) = from.offset(push) {
            if self.is_empty_square(to) {
                if allowed(to) {
                    push_pawn_move(moves, from, to, us);
                }
                if from.rank() == us.pawn_start_rank() {
                    if let Some(two) = to.offset(push) {
                        if self.is_empty_square(two) && allowed(two) {
                            moves.push(Move::plain(from, two));
                        }
                    }
                }
            }
        }

        // Diagonal captures, including en passant
        for delta in pawn_capture_offsets(us) {
            let Some(to) = from.offset(delta) else {
                continue;
            };
            if self.piece_at(to).is_some_and(|p| p.color != us) {
                if allowed(to) {
                    push_pawn_move(moves, from, to, us);
                }
            } else if Some(to) == self.en_passant_target {
                let Some(captured) = to.offset(-push) else {
                    continue;
                };
                // Capturing the checking pawn via the en passant square
                // addresses the check even though the destination is
                // not the checker's square.
                let addresses_check = evasions
                    .is_none_or(|set| set.contains(to) || set.contains(captured));
                if !addresses_check || !pin.is_none_or(|line| line.contains(to)) {
                    continue;
                }
                let mv = Move::en_passant(from, to, captured);
                // Removing two pawns from one rank can expose the king
                // sideways; replay on a scratch board to be sure.
                let mut scratch = self.clone();
                scratch.apply_move(&mv);
                if !scratch.is_in_check(us) {
                    moves.push(mv);
                }
            }
        }
    }

    /// Game status for the side to move.
    ///
    /// Checkmate means in check with zero legal moves, and the winner is
    /// the side that is not to move; stalemate means zero legal moves
    /// without check.
    #[must_use]
    pub fn status(&self) -> Status {
        if !self.legal_moves().is_empty() {
            return Status::InProgress;
        }
        if self.is_in_check(self.side_to_move) {
            Status::Checkmate {
                winner: self.side_to_move.opponent(),
            }
        } else {
            Status::Stalemate
        }
    }
}

fn slider_dirs(kind: PieceKind) -> &'static [i16] {
    match kind {
        PieceKind::Bishop => &BISHOP_DIRS,
        PieceKind::Rook => &ROOK_DIRS,
        _ => &QUEEN_DIRS,
    }
}

/// The 0x88 direction stepping from `from` toward `to`, if the squares
/// share a rank, file, or diagonal.
fn direction_toward(from: Square, to: Square) -> Option<i16> {
    let dr = i16::from(to.rank()) - i16::from(from.rank());
    let df = i16::from(to.file()) - i16::from(from.file());
    if dr == 0 && df == 0 {
        return None;
    }
    if dr != 0 && df != 0 && dr.abs() != df.abs() {
        return None;
    }
    Some(16 * dr.signum() + df.signum())
}

fn push_pawn_move(moves: &mut Vec<Move>, from: Square, to: Square, us: Color) {
    if to.rank() == us.pawn_promotion_rank() {
        for kind in PROMOTION_KINDS {
            moves.push(Move::promotion(from, to, kind));
        }
    } else {
        moves.push(Move::plain(from, to));
    }
}
