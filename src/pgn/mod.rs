//! PGN parsing and annotation.
//!
//! The pipeline: [`tokenizer`] normalizes raw text and slices a blob
//! into game texts; [`Game::parse`] extracts tag pairs and builds the
//! move tree; [`annotate`] replays the tree through the rules engine
//! into the output object the rendering layer consumes.
//!
//! # Example
//! ```
//! use pgn_annotator::pgn::parse_game;
//!
//! let out = parse_game("1. e4 e5 (1... c5 2. Nf3) 2. Nf3").unwrap();
//! assert_eq!(out.tokens, ["e4", "e5", "Nf3"]);
//! assert_eq!(out.variations[0].0, 1);
//! ```

mod actions;
mod annotate;
mod error;
mod game;
pub mod tokenizer;
mod tree;

pub use actions::Action;
pub use annotate::{annotate, AnnotatedGame, Ply, SpecialTag};
pub use error::PgnError;
pub use game::Game;
pub use tree::{Branch, MoveNode};

/// A game dropped from a batch, with the reason.
#[derive(Clone, Debug)]
pub struct SkippedGame {
    /// Index of the game within the batch
    pub index: usize,
    /// The offending game text
    pub text: String,
    pub reason: PgnError,
}

/// Result of parsing a multi-game blob: every game that annotated
/// cleanly, plus the ones that were skipped and why.
#[derive(Clone, Debug, Default)]
pub struct BatchResult {
    pub games: Vec<AnnotatedGame>,
    pub skipped: Vec<SkippedGame>,
}

/// Parse and annotate a single game text.
pub fn parse_game(text: &str) -> Result<AnnotatedGame, PgnError> {
    let normalized = tokenizer::normalize(text);
    let game = Game::parse(&normalized)?;
    annotate(&game)
}

/// Parse and annotate every game in a blob.
///
/// A failure in one game neither corrupts nor blocks the others: the
/// offending game is logged, recorded in the skipped list, and the
/// batch continues.
#[must_use]
pub fn parse_games(text: &str) -> BatchResult {
    let normalized = tokenizer::normalize(text);
    let mut batch = BatchResult::default();

    for (index, game_text) in tokenizer::split_games(&normalized).into_iter().enumerate() {
        match Game::parse(&game_text).and_then(|game| annotate(&game)) {
            Ok(annotated) => batch.games.push(annotated),
            Err(reason) => {
                log::warn!("skipping game {index}: {reason}");
                batch.skipped.push(SkippedGame {
                    index,
                    text: game_text,
                    reason,
                });
            }
        }
    }
    batch
}
