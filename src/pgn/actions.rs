//! Structured actions embedded in PGN comments.
//!
//! Annotation tools hide display directives inside comments, e.g.
//! `{[%clk 0:05:00]}`, `{[%cal Ge2e4,Rd1h5]}`, `{[%csl Gd4]}`. These
//! are extracted into [`Action`] records and removed from the visible
//! comment text.

use once_cell::sync::Lazy;
use regex::Regex;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::board::Square;

/// One display directive attached to a move.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Action {
    /// Remaining clock time, verbatim (e.g. "0:05:00")
    Clock { display: String },
    /// An arrow drawn between two squares; `color` is the annotation
    /// color letter (G/R/Y/B)
    Arrow { color: char, from: Square, to: Square },
    /// A highlighted square
    Highlight { color: char, square: Square },
    ClearArrows,
    ClearHighlights,
}

static DIRECTIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[%(\w+)\s*([^\]]*)\]").expect("directive regex"));

/// Split a raw comment into its visible text and extracted actions.
///
/// Known directives are removed from the text; anything else stays
/// visible. A remainder that is empty after extraction is dropped.
pub(crate) fn extract_actions(raw: &str) -> (Option<String>, Vec<Action>) {
    let mut actions = Vec::new();
    let visible = DIRECTIVE_RE.replace_all(raw, |caps: &regex::Captures<'_>| {
        let payload = caps[2].trim();
        match &caps[1] {
            "clk" => {
                actions.push(Action::Clock {
                    display: payload.to_string(),
                });
            }
            "cal" => {
                for item in payload.split(',') {
                    if let Some((color, rest)) = split_color(item.trim()) {
                        let (from, to) = (rest.get(0..2), rest.get(2..4));
                        if let (Some(Ok(from)), Some(Ok(to))) =
                            (from.map(str::parse), to.map(str::parse))
                        {
                            actions.push(Action::Arrow { color, from, to });
                        }
                    }
                }
            }
            "csl" | "sq" => {
                for item in payload.split(',') {
                    let item = item.trim();
                    // A bare square (no color letter) defaults to green.
                    let (color, rest) = split_color(item).unwrap_or(('G', item));
                    if let Ok(square) = rest.parse::<Square>() {
                        actions.push(Action::Highlight { color, square });
                    }
                }
            }
            "ccal" => actions.push(Action::ClearArrows),
            "ccsl" => actions.push(Action::ClearHighlights),
            // Unknown directives stay visible.
            _ => return caps[0].to_string(),
        }
        String::new()
    });

    let visible = visible.split_whitespace().collect::<Vec<_>>().join(" ");
    let visible = if visible.is_empty() {
        None
    } else {
        Some(visible)
    };
    (visible, actions)
}

fn split_color(item: &str) -> Option<(char, &str)> {
    let mut chars = item.chars();
    match chars.next() {
        Some(c @ ('G' | 'R' | 'Y' | 'B')) => Some((c, chars.as_str())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_clock_extraction() {
        let (visible, actions) = extract_actions("[%clk 0:05:00] sharpest try");
        assert_eq!(visible.as_deref(), Some("sharpest try"));
        assert_eq!(
            actions,
            vec![Action::Clock {
                display: "0:05:00".to_string()
            }]
        );
    }

    #[test]
    fn test_arrow_list() {
        let (visible, actions) = extract_actions("[%cal Ge2e4,Rd1h5]");
        assert_eq!(visible, None);
        assert_eq!(
            actions,
            vec![
                Action::Arrow {
                    color: 'G',
                    from: sq("e2"),
                    to: sq("e4")
                },
                Action::Arrow {
                    color: 'R',
                    from: sq("d1"),
                    to: sq("h5")
                },
            ]
        );
    }

    #[test]
    fn test_highlight_and_bare_square() {
        let (_, actions) = extract_actions("[%csl Rd4] [%sq e5]");
        assert_eq!(
            actions,
            vec![
                Action::Highlight {
                    color: 'R',
                    square: sq("d4")
                },
                Action::Highlight {
                    color: 'G',
                    square: sq("e5")
                },
            ]
        );
    }

    #[test]
    fn test_clear_variants() {
        let (visible, actions) = extract_actions("[%ccal][%ccsl] done");
        assert_eq!(visible.as_deref(), Some("done"));
        assert_eq!(actions, vec![Action::ClearArrows, Action::ClearHighlights]);
    }

    #[test]
    fn test_unknown_directive_stays_visible() {
        let (visible, actions) = extract_actions("[%eval 0.31]");
        assert_eq!(visible.as_deref(), Some("[%eval 0.31]"));
        assert!(actions.is_empty());
    }

    #[test]
    fn test_malformed_items_are_skipped() {
        let (visible, actions) = extract_actions("[%cal Gz9z9,Ge2e4]");
        assert_eq!(visible, None);
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn test_empty_remainder_is_dropped() {
        let (visible, _) = extract_actions("  [%clk 1:00:00]  ");
        assert_eq!(visible, None);
    }
}
