//! Move-tree building from one game's movetext.
//!
//! The scanner interleaves `{}` comments and `()` variations with move
//! tokens. Branches under construction live in an arena of owned nodes
//! addressed by index, and the current insertion point is an explicit
//! stack of branch indices; closing a variation pops back to the
//! parent branch no matter how deep or empty the nesting was.

use once_cell::sync::Lazy;
use regex::Regex;

use super::actions::{extract_actions, Action};
use super::error::PgnError;

/// One parsed move token with everything that hangs off it.
///
/// Structurally immutable once the tree is built, and not yet checked
/// for chess legality.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveNode {
    /// The token as written (suffix glyphs included)
    pub san: String,
    pub comment: Option<String>,
    pub actions: Vec<Action>,
    /// Alternate lines that replace this move
    pub variations: Vec<Branch>,
}

/// An ordered line of moves: the game's root sequence or one variation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Branch {
    /// Comment appearing before any move of the branch
    pub pre_comment: Option<String>,
    pub pre_actions: Vec<Action>,
    pub moves: Vec<MoveNode>,
}

/// Game termination markers that end the movetext.
const TERMINATION_MARKERS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

static MOVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(O-O(-O)?|[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](=?[QRBN])?|[a-h][1-8][a-h][1-8][QRBNqrbn]?)[+#]?$",
    )
    .expect("move regex")
});

static GLYPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+!?#=±∓⩲⩱∞□⇆↑→⟳∆⨁⨀○]+$").expect("glyph regex"));

static MOVE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.*").expect("number regex"));

fn is_move_token(token: &str) -> bool {
    let core = token.trim_end_matches(|c: char| matches!(c, '!' | '?') || !c.is_ascii());
    !core.is_empty() && MOVE_RE.is_match(core)
}

struct Slot {
    branch: Branch,
    /// (parent branch index, parent move index); `None` for the root
    parent: Option<(usize, usize)>,
}

/// Parse one game's movetext into a move tree.
///
/// Returns the root branch and the termination marker, if one appeared.
pub(crate) fn build_tree(movetext: &str) -> Result<(Branch, Option<String>), PgnError> {
    let mut arena = vec![Slot {
        branch: Branch::default(),
        parent: None,
    }];
    let mut stack: Vec<usize> = vec![0];
    let mut result: Option<String> = None;
    let mut token = String::new();

    let mut chars = movetext.chars();
    while let Some(c) = chars.next() {
        match c {
            '{' => {
                flush_token(&mut token, &mut arena, &stack, &mut result)?;
                let mut comment = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    comment.push(c);
                }
                if !closed {
                    return Err(PgnError::UnterminatedComment);
                }
                attach_comment(&mut arena, stack[stack.len() - 1], &comment);
            }
            '}' => {
                return Err(PgnError::InvalidToken {
                    token: "}".to_string(),
                })
            }
            '(' => {
                flush_token(&mut token, &mut arena, &stack, &mut result)?;
                let cur = stack[stack.len() - 1];
                let Some(parent_move) = arena[cur].branch.moves.len().checked_sub(1) else {
                    return Err(PgnError::DanglingVariation);
                };
                arena.push(Slot {
                    branch: Branch::default(),
                    parent: Some((cur, parent_move)),
                });
                stack.push(arena.len() - 1);
            }
            ')' => {
                flush_token(&mut token, &mut arena, &stack, &mut result)?;
                stack.pop();
                if stack.is_empty() {
                    return Err(PgnError::UnexpectedVariationClose);
                }
            }
            c if c.is_whitespace() => {
                flush_token(&mut token, &mut arena, &stack, &mut result)?;
            }
            c => token.push(c),
        }
    }
    flush_token(&mut token, &mut arena, &stack, &mut result)?;

    if stack.len() > 1 {
        return Err(PgnError::UnterminatedVariation {
            depth: stack.len() - 1,
        });
    }
    Ok((materialize(arena), result))
}

/// Classify and consume the accumulated token, if any.
fn flush_token(
    token: &mut String,
    arena: &mut [Slot],
    stack: &[usize],
    result: &mut Option<String>,
) -> Result<(), PgnError> {
    if token.is_empty() {
        return Ok(());
    }
    let raw = std::mem::take(token);

    if TERMINATION_MARKERS.contains(&raw.as_str()) {
        *result = Some(raw);
        return Ok(());
    }

    // Strip any move-number prefix ("1.", "12...", possibly glued to
    // the move itself) and bare continuation dots.
    let body = MOVE_NUMBER_RE.replace(&raw, "");
    let body = body.trim_start_matches('.');
    if body.is_empty() {
        return Ok(());
    }

    let branch = &mut arena[stack[stack.len() - 1]].branch;
    if body == "--" || is_move_token(body) {
        branch.moves.push(MoveNode {
            san: body.to_string(),
            ..MoveNode::default()
        });
        return Ok(());
    }
    if GLYPH_RE.is_match(body) {
        // A free-standing annotation glyph belongs to the move before it.
        if let Some(node) = branch.moves.last_mut() {
            node.san.push_str(body);
        }
        return Ok(());
    }
    Err(PgnError::InvalidToken { token: raw })
}

fn attach_comment(arena: &mut [Slot], branch_idx: usize, raw: &str) {
    let (visible, actions) = extract_actions(raw);
    let branch = &mut arena[branch_idx].branch;
    if let Some(node) = branch.moves.last_mut() {
        node.comment = merge_comments(node.comment.take(), visible);
        node.actions.extend(actions);
    } else {
        branch.pre_comment = merge_comments(branch.pre_comment.take(), visible);
        branch.pre_actions.extend(actions);
    }
}

fn merge_comments(existing: Option<String>, added: Option<String>) -> Option<String> {
    match (existing, added) {
        (Some(a), Some(b)) => Some(format!("{a} {b}")),
        (a, b) => a.or(b),
    }
}

/// Fold the arena into an owned recursive tree.
///
/// Child branches always have larger indices than their parents, so a
/// reverse walk completes every subtree before attaching it; insertion
/// at the front restores source order for moves with several
/// variations.
fn materialize(mut arena: Vec<Slot>) -> Branch {
    for idx in (1..arena.len()).rev() {
        let branch = std::mem::take(&mut arena[idx].branch);
        let (pb, pm) = arena[idx].parent.expect("non-root slots have parents");
        arena[pb].branch.moves[pm].variations.insert(0, branch);
    }
    std::mem::take(&mut arena[0].branch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sans(branch: &Branch) -> Vec<&str> {
        branch.moves.iter().map(|m| m.san.as_str()).collect()
    }

    #[test]
    fn test_plain_sequence() {
        let (root, result) = build_tree("1. e4 e5 2. Nf3").unwrap();
        assert_eq!(sans(&root), ["e4", "e5", "Nf3"]);
        assert_eq!(result, None);
    }

    #[test]
    fn test_variation_attaches_to_preceding_move() {
        let (root, _) = build_tree("1. e4 e5 (1... c5 2. Nf3) 2. Nf3").unwrap();
        assert_eq!(sans(&root), ["e4", "e5", "Nf3"]);
        assert!(root.moves[0].variations.is_empty());
        let vars = &root.moves[1].variations;
        assert_eq!(vars.len(), 1);
        assert_eq!(sans(&vars[0]), ["c5", "Nf3"]);
    }

    #[test]
    fn test_nested_variations_restore_parent() {
        let (root, _) = build_tree("1. d4 d5 (1... Nf6 2. c4 (2. Bg5 e6) g6) 2. c4").unwrap();
        assert_eq!(sans(&root), ["d4", "d5", "c4"]);
        let var = &root.moves[1].variations[0];
        assert_eq!(sans(var), ["Nf6", "c4", "g6"]);
        let inner = &var.moves[1].variations[0];
        assert_eq!(sans(inner), ["Bg5", "e6"]);
    }

    #[test]
    fn test_empty_variation_is_tolerated() {
        let (root, _) = build_tree("1. e4 e5 ( ) 2. Nf3").unwrap();
        assert_eq!(sans(&root), ["e4", "e5", "Nf3"]);
        assert_eq!(root.moves[1].variations.len(), 1);
        assert!(root.moves[1].variations[0].moves.is_empty());
    }

    #[test]
    fn test_sibling_variations_keep_order() {
        let (root, _) = build_tree("1. e4 e5 (1... c5) (1... e6) 2. Nf3").unwrap();
        let vars = &root.moves[1].variations;
        assert_eq!(vars.len(), 2);
        assert_eq!(sans(&vars[0]), ["c5"]);
        assert_eq!(sans(&vars[1]), ["e6"]);
    }

    #[test]
    fn test_comment_attaches_to_preceding_move() {
        let (root, _) = build_tree("1. e4 {the classic} e5").unwrap();
        assert_eq!(root.moves[0].comment.as_deref(), Some("the classic"));
        assert_eq!(root.moves[1].comment, None);
    }

    #[test]
    fn test_leading_comment_fills_pre_slot() {
        let (root, _) = build_tree("{from the diagram} 1. e4").unwrap();
        assert_eq!(root.pre_comment.as_deref(), Some("from the diagram"));
    }

    #[test]
    fn test_comment_directives_become_actions() {
        let (root, _) = build_tree("1. e4 {[%clk 0:05:00] solid} e5").unwrap();
        let node = &root.moves[0];
        assert_eq!(node.comment.as_deref(), Some("solid"));
        assert_eq!(
            node.actions,
            vec![Action::Clock {
                display: "0:05:00".to_string()
            }]
        );
    }

    #[test]
    fn test_directive_only_comment_is_dropped() {
        let (root, _) = build_tree("1. e4 {[%clk 0:05:00]} e5").unwrap();
        assert_eq!(root.moves[0].comment, None);
        assert_eq!(root.moves[0].actions.len(), 1);
    }

    #[test]
    fn test_termination_marker_recorded() {
        let (root, result) = build_tree("1. e4 e5 1-0").unwrap();
        assert_eq!(sans(&root), ["e4", "e5"]);
        assert_eq!(result.as_deref(), Some("1-0"));
    }

    #[test]
    fn test_null_move_token() {
        let (root, _) = build_tree("1. e4 -- 2. d4").unwrap();
        assert_eq!(sans(&root), ["e4", "--", "d4"]);
    }

    #[test]
    fn test_standalone_glyph_joins_previous_move() {
        let (root, _) = build_tree("1. e4 ! e5 ⩲").unwrap();
        assert_eq!(sans(&root), ["e4!", "e5⩲"]);
    }

    #[test]
    fn test_glued_move_numbers() {
        let (root, _) = build_tree("1.e4 e5 2.Nf3 1...Nc6").unwrap();
        assert_eq!(sans(&root), ["e4", "e5", "Nf3", "Nc6"]);
    }

    #[test]
    fn test_unterminated_comment() {
        assert!(matches!(
            build_tree("1. e4 {no close"),
            Err(PgnError::UnterminatedComment)
        ));
    }

    #[test]
    fn test_unterminated_variation() {
        assert!(matches!(
            build_tree("1. e4 e5 (1... c5"),
            Err(PgnError::UnterminatedVariation { depth: 1 })
        ));
    }

    #[test]
    fn test_unexpected_close() {
        assert!(matches!(
            build_tree("1. e4 )"),
            Err(PgnError::UnexpectedVariationClose)
        ));
    }

    #[test]
    fn test_variation_before_any_move() {
        assert!(matches!(
            build_tree("(1. e4)"),
            Err(PgnError::DanglingVariation)
        ));
    }

    #[test]
    fn test_gibberish_token_rejected() {
        assert!(matches!(
            build_tree("1. e4 zz9"),
            Err(PgnError::InvalidToken { .. })
        ));
    }
}
