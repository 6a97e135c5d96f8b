//! Replaying the move tree through the rules engine.
//!
//! The annotator walks a game's move tree, resolves each token against
//! the board, and records the serialized position, flat coordinates,
//! regenerated SAN, and special-move data for every ply. Variations
//! replay on an owned snapshot of the pre-branch board, so the parent
//! position is restored by construction on every exit path, error
//! paths included.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::ser::{Serialize, SerializeTuple, Serializer};

use super::actions::Action;
use super::error::PgnError;
use super::game::Game;
use super::tree::Branch;
use crate::board::{Board, Move, SpecialMove};

/// Special-move tag on an output ply, with flat 0-63 coordinates.
///
/// Carries enough data for a consumer to animate the move without
/// re-deriving any rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialTag {
    Plain,
    Castle { rook_from: u8, rook_to: u8 },
    EnPassant { captured: u8 },
    Promotion { piece: char },
}

impl SpecialTag {
    fn for_move(mv: &Move) -> SpecialTag {
        match mv.special {
            SpecialMove::None => SpecialTag::Plain,
            SpecialMove::Castle { rook_from, rook_to } => SpecialTag::Castle {
                rook_from: rook_from.flat(),
                rook_to: rook_to.flat(),
            },
            SpecialMove::EnPassant { captured } => SpecialTag::EnPassant {
                captured: captured.flat(),
            },
            SpecialMove::Promotion(kind) => SpecialTag::Promotion {
                piece: kind.symbol().to_ascii_uppercase(),
            },
        }
    }
}

/// Serializes as the `[type, action]` pair the rendering layer expects:
/// `["move", null]`, `["castle", [rookFrom, rookTo]]`,
/// `["en passant", captured]`, `["promotion", "Q"]`.
#[cfg(feature = "serde")]
impl Serialize for SpecialTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        match self {
            SpecialTag::Plain => {
                tuple.serialize_element("move")?;
                tuple.serialize_element(&Option::<u8>::None)?;
            }
            SpecialTag::Castle { rook_from, rook_to } => {
                tuple.serialize_element("castle")?;
                tuple.serialize_element(&[rook_from, rook_to])?;
            }
            SpecialTag::EnPassant { captured } => {
                tuple.serialize_element("en passant")?;
                tuple.serialize_element(captured)?;
            }
            SpecialTag::Promotion { piece } => {
                tuple.serialize_element("promotion")?;
                tuple.serialize_element(&piece.to_string())?;
            }
        }
        tuple.end()
    }
}

/// One annotated ply.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ply {
    /// Origin as a flat 0-63 index
    pub from: u8,
    /// Destination as a flat 0-63 index
    pub to: u8,
    pub special: SpecialTag,
    pub comment: Option<String>,
    pub actions: Vec<Action>,
}

/// The annotated output for one branch: the plain data interface the
/// rendering layer consumes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnnotatedGame {
    /// Tag-pair metadata; empty on variation objects
    pub metadata: BTreeMap<String, String>,
    /// FEN before the first ply, then after every ply
    pub boards: Vec<String>,
    pub plys: Vec<Ply>,
    /// Final disambiguated SAN per ply
    pub tokens: Vec<String>,
    /// Variations keyed by the ply index they replace, in source order
    pub variations: Vec<(usize, Vec<AnnotatedGame>)>,
    /// Comment appearing before the branch's first move
    pub lead_comment: Option<String>,
}

/// Annotate a parsed game: replay its tree through the rules engine.
pub fn annotate(game: &Game) -> Result<AnnotatedGame, PgnError> {
    let board = Board::from_fen(&game.start_fen).map_err(|source| PgnError::BadStartPosition {
        fen: game.start_fen.clone(),
        source,
    })?;
    let mut out = annotate_branch(board, &game.root)?;
    out.metadata = game.tags.clone();
    if let Some(result) = &game.result {
        out.metadata
            .entry("result".to_string())
            .or_insert_with(|| result.clone());
    }
    log::debug!(
        "annotated game: {} plies, {} variation points",
        out.plys.len(),
        out.variations.len()
    );
    Ok(out)
}

/// Replay one branch on an owned board.
///
/// Variations recurse with a clone of the position before the move they
/// replace; the caller's board is never touched by a variation, which
/// is what guarantees restoration however the recursion exits.
fn annotate_branch(mut board: Board, branch: &Branch) -> Result<AnnotatedGame, PgnError> {
    let mut out = AnnotatedGame {
        boards: vec![board.to_fen()],
        lead_comment: branch.pre_comment.clone(),
        ..AnnotatedGame::default()
    };

    for (idx, node) in branch.moves.iter().enumerate() {
        if !node.variations.is_empty() {
            let mut alternates = Vec::with_capacity(node.variations.len());
            for variation in &node.variations {
                alternates.push(annotate_branch(board.clone(), variation)?);
            }
            out.variations.push((idx, alternates));
        }

        if node.san.starts_with("--") {
            // A null move passes the turn; anchor the ply on the moving
            // side's king so output arrays stay aligned with tokens.
            let king = board.king(board.side_to_move()).flat();
            board.apply_null_move();
            out.boards.push(board.to_fen());
            out.tokens.push(node.san.clone());
            out.plys.push(Ply {
                from: king,
                to: king,
                special: SpecialTag::Plain,
                comment: node.comment.clone(),
                actions: node.actions.clone(),
            });
            continue;
        }

        let mv = board.resolve(&node.san).map_err(|source| PgnError::BadMove {
            token: node.san.clone(),
            fen: board.to_fen(),
            source,
        })?;
        let san = board.notation_for(&mv);
        let special = SpecialTag::for_move(&mv);
        board.apply_move(&mv);

        out.boards.push(board.to_fen());
        out.tokens.push(san);
        out.plys.push(Ply {
            from: mv.from.flat(),
            to: mv.to.flat(),
            special,
            comment: node.comment.clone(),
            actions: node.actions.clone(),
        });
    }

    Ok(out)
}
