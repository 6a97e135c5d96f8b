//! Raw-text normalization and game splitting.
//!
//! PGN in the wild is loosely written: zero-based castling tokens,
//! `$n` annotation glyphs, clock directives, stray escapes, several
//! games pasted into one blob. This module cleans a blob up and slices
//! it into individual game texts before any real parsing happens.

use once_cell::sync::Lazy;
use regex::Regex;

/// `$n` Numeric Annotation Glyphs and their display symbols.
///
/// Ordered longest-key-first so that `$1` never clips `$10` or `$132`
/// during plain in-order replacement.
const NAG_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("$132", "⇆"),
    ("$138", "⨁"),
    ("$140", "∆"),
    ("$10", "="),
    ("$13", "∞"),
    ("$14", "⩲"),
    ("$15", "⩱"),
    ("$16", "±"),
    ("$17", "∓"),
    ("$18", "+-"),
    ("$19", "-+"),
    ("$22", "⨀"),
    ("$23", "⨀"),
    ("$32", "⟳"),
    ("$36", "↑"),
    ("$40", "→"),
    ("$1", "!"),
    ("$2", "?"),
    ("$3", "!!"),
    ("$4", "??"),
    ("$5", "!?"),
    ("$6", "?!"),
    ("$7", "□"),
];

/// Fragments shorter than this between game boundaries are noise, not
/// games.
const MIN_VIABLE_LEN: usize = 4;

static EMT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\s*\[%emt[^\]]*\]\s*\}|\[%emt[^\]]*\]").expect("emt regex"));

static TAG_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^\[\s*\w+\s*""#).expect("tag regex"));

/// Normalize raw PGN text before splitting and tokenization.
///
/// Collapses escape variants, rewrites zero-based castling to letter
/// form, strips `[%emt]` clock-display directives, and substitutes
/// every `$n` glyph from the NAG table.
#[must_use]
pub fn normalize(text: &str) -> String {
    // Quote escapes survive until tag extraction; only slash and
    // whitespace variants collapse here.
    let mut text = text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', " ")
        .replace("\\/", "/");

    // Longest token first, same as the NAG table below.
    text = text.replace("0-0-0", "O-O-O").replace("0-0", "O-O");
    text = EMT_RE.replace_all(&text, "").into_owned();

    for (key, symbol) in NAG_SUBSTITUTIONS {
        text = text.replace(key, symbol);
    }
    text
}

/// Slice a multi-game blob into individual game texts.
///
/// A new game starts at a tag-pair line that follows movetext of the
/// previous game; fragments shorter than the minimum viable length are
/// discarded.
#[must_use]
pub fn split_games(text: &str) -> Vec<String> {
    let mut games = Vec::new();
    let mut current = String::new();
    let mut seen_movetext = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if seen_movetext && TAG_LINE_RE.is_match(trimmed) {
            games.push(std::mem::take(&mut current));
            seen_movetext = false;
        }
        if !trimmed.is_empty() && !TAG_LINE_RE.is_match(trimmed) {
            seen_movetext = true;
        }
        current.push_str(line);
        current.push('\n');
    }
    games.push(current);

    games
        .into_iter()
        .map(|g| g.trim().to_string())
        .filter(|g| g.len() >= MIN_VIABLE_LEN)
        .collect()
}

/// Permissive validity check: does the text contain at least one token
/// that could be a move?
///
/// Tag pairs are optional and move numbers are tolerated; what is
/// required is a single recognizable move token.
#[must_use]
pub fn contains_move_token(movetext: &str) -> bool {
    // Comments may contain arbitrary prose; drop them before scanning.
    let without_comments = strip_comments(movetext);
    without_comments
        .split(|c: char| c.is_whitespace() || matches!(c, '(' | ')'))
        .flat_map(|token| token.split('.'))
        .any(is_move_shaped)
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

static MOVE_SHAPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(O-O(-O)?|--|[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](=?[QRBN])?|[a-h][1-8][a-h][1-8][QRBNqrbn]?)[+#]?$",
    )
    .expect("move shape regex")
});

fn is_move_shaped(token: &str) -> bool {
    let token = token.trim_end_matches(|c: char| matches!(c, '!' | '?') || !c.is_ascii());
    !token.is_empty() && MOVE_SHAPE_RE.is_match(token)
}
