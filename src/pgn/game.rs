//! One game: tag pairs, starting position, move tree.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::PgnError;
use super::tokenizer::contains_move_token;
use super::tree::{build_tree, Branch};
use crate::board::START_FEN;

/// A parsed game, not yet checked for chess legality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    /// Tag-pair metadata with lowercased keys
    pub tags: BTreeMap<String, String>,
    /// Starting position: the `FEN` tag, or the standard initial
    /// position when absent
    pub start_fen: String,
    /// The root move sequence
    pub root: Branch,
    /// Termination marker from the movetext, when present
    pub result: Option<String>,
}

static TAG_PAIR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\[\s*(\w+)\s*"((?:[^"\\]|\\.)*)"\s*\]"#).expect("tag pair regex"));

impl Game {
    /// Parse one normalized game text: tag-pair section plus movetext.
    ///
    /// Tag pairs are optional; at least one recognizable move token is
    /// not.
    pub fn parse(text: &str) -> Result<Game, PgnError> {
        let mut tags = BTreeMap::new();
        for caps in TAG_PAIR_RE.captures_iter(text) {
            tags.insert(caps[1].to_ascii_lowercase(), unescape(&caps[2]));
        }
        let movetext = TAG_PAIR_RE.replace_all(text, " ");

        if !contains_move_token(&movetext) {
            return Err(PgnError::NoMovetext);
        }
        let (root, result) = build_tree(&movetext)?;

        let start_fen = tags
            .get("fen")
            .cloned()
            .unwrap_or_else(|| START_FEN.to_string());

        Ok(Game {
            tags,
            start_fen,
            root,
            result,
        })
    }
}

fn unescape(value: &str) -> String {
    value.replace("\\\"", "\"").replace("\\\\", "\\")
}
