//! Inline rules for footnote references
//!
//! Two scanners share the `FootnoteRefNode` placeholder: `^[...]`
//! carries its content inline and always claims a fresh slot, while
//! `[^label]` only matches labels that a definition has declared and
//! reuses one slot across repeated references. Both must be registered
//! after the host's cmark rules so ordinary links keep priority at the
//! `[` marker.

use std::sync::LazyLock;

use markdown_it::parser::inline::{InlineRule, InlineState};
use markdown_it::plugins::cmark::block::paragraph::Paragraph;
use markdown_it::Node;
use regex::Regex;

use crate::nodes::FootnoteRefNode;
use crate::options::FootnoteOptions;
use crate::registry::FootnoteMap;

static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\^([^\s\]]+)\]").expect("footnote reference regex"));

/// Find the `]` closing the bracket at `open`, skipping over nested
/// brackets and anything the host tokenizes as a unit (escapes, code
/// spans). Returns its byte offset, leaving `state.pos` untouched.
fn parse_label_end(state: &mut InlineState, open: usize) -> Option<usize> {
    let old_pos = state.pos;
    let mut level = 1;
    let mut label_end = None;

    state.pos = open + 1;
    while state.pos < state.pos_max {
        let Some(ch) = state.src[state.pos..state.pos_max].chars().next() else {
            break;
        };
        if ch == ']' {
            level -= 1;
            if level == 0 {
                label_end = Some(state.pos);
                break;
            }
        }
        let previous_pos = state.pos;
        state.md.inline.skip_token(state);
        // a bare bracket the tokenizer stepped over opens a nested pair
        if ch == '[' && state.pos == previous_pos + 1 {
            level += 1;
        }
    }

    state.pos = old_pos;
    label_end
}

/// Scanner for inline footnotes (`^[...]`).
pub struct InlineFootnoteScanner;

impl InlineRule for InlineFootnoteScanner {
    const MARKER: char = '^';

    fn check(state: &mut InlineState) -> Option<usize> {
        if !state.src[state.pos..state.pos_max].starts_with("^[") {
            return None;
        }
        let close = parse_label_end(state, state.pos + 1)?;
        Some(close + 1 - state.pos)
    }

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let start = state.pos;
        if !state.src[start..state.pos_max].starts_with("^[") {
            return None;
        }
        let close = parse_label_end(state, start + 1)?;

        let label_start = start + 2;
        let label_end = close;
        let content = state.src[label_start..label_end].to_string();

        // The bracketed span is parsed through the same state, so the
        // document-level registry in `root_ext` stays in scope while
        // the span's own output buffer is swapped in and out.
        let outer_node = std::mem::replace(&mut state.node, Node::new(Paragraph));
        let outer_pos = state.pos;
        let outer_pos_max = state.pos_max;
        state.pos = label_start;
        state.pos_max = label_end;
        state.md.inline.tokenize(state);
        state.pos = outer_pos;
        state.pos_max = outer_pos_max;
        let mut buffer = std::mem::replace(&mut state.node, outer_node);

        let id = state
            .root_ext
            .get_or_insert_default::<FootnoteMap>()
            .add_inline(content, std::mem::take(&mut buffer.children));

        let options = state
            .md
            .ext
            .get::<FootnoteOptions>()
            .cloned()
            .unwrap_or_default();
        let node = Node::new(FootnoteRefNode::new(id, 0, None, &options));
        Some((node, close + 1 - start))
    }
}

/// Scanner for labeled references (`[^label]`).
pub struct FootnoteRefScanner;

impl FootnoteRefScanner {
    fn scan_label(input: &str) -> Option<(&str, usize)> {
        let captures = REFERENCE_RE.captures(input)?;
        let label = captures.get(1)?.as_str();
        Some((label, captures.get(0)?.end()))
    }
}

impl InlineRule for FootnoteRefScanner {
    const MARKER: char = '[';

    fn check(state: &mut InlineState) -> Option<usize> {
        let (label, len) = Self::scan_label(&state.src[state.pos..state.pos_max])?;
        // a label without a definition is not a footnote reference
        if !state.root_ext.get::<FootnoteMap>()?.is_declared(label) {
            return None;
        }
        Some(len)
    }

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let (label, len) = {
            let (label, len) = Self::scan_label(&state.src[state.pos..state.pos_max])?;
            (label.to_string(), len)
        };
        let (id, sub_id) = state.root_ext.get_mut::<FootnoteMap>()?.reference(&label)?;

        let options = state
            .md
            .ext
            .get::<FootnoteOptions>()
            .cloned()
            .unwrap_or_default();
        let node = Node::new(FootnoteRefNode::new(id, sub_id, Some(label), &options));
        Some((node, len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> markdown_it::MarkdownIt {
        let mut md = markdown_it::MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut md);
        crate::add(&mut md);
        md
    }

    #[test]
    fn label_scan_rejects_malformed_references() {
        assert_eq!(FootnoteRefScanner::scan_label("[^a]"), Some(("a", 4)));
        assert_eq!(FootnoteRefScanner::scan_label("[^a] tail"), Some(("a", 4)));
        assert_eq!(FootnoteRefScanner::scan_label("[^]"), None);
        assert_eq!(FootnoteRefScanner::scan_label("[^a b]"), None);
        assert_eq!(FootnoteRefScanner::scan_label("[a]"), None);
    }

    #[test]
    fn undeclared_label_falls_through_to_plain_text() {
        let md = setup();
        let html = md.parse("Nothing defines [^ghost] here.\n").render();
        assert!(html.contains("[^ghost]"));
        assert!(!html.contains("footnote-ref"));
        assert!(!html.contains("footnotes"));
    }

    #[test]
    fn inline_footnote_parses_its_own_markup() {
        let md = setup();
        let html = md.parse("Text^[with *emphasis* inside].\n").render();
        assert!(html.contains("footnote-ref"));
        assert!(html.contains("<em>emphasis</em>"));
        // the note text lives in the footnote section, not the paragraph
        let note_at = html.find("with <em>").expect("note rendered");
        let section_at = html.find("footnotes-sep").expect("section rendered");
        assert!(note_at > section_at);
    }

    #[test]
    fn inline_footnote_may_contain_a_link() {
        let md = setup();
        let html = md
            .parse("Claim^[see [the source](https://example.com) for details].\n")
            .render();
        assert!(html.contains("footnote-ref"));
        assert!(html.contains("<a href=\"https://example.com\">the source</a>"));
        assert!(html.contains("for details"));
    }

    #[test]
    fn inline_footnote_may_contain_escaped_brackets() {
        let md = setup();
        let html = md.parse("Text^[a \\] bracket].\n").render();
        assert!(html.contains("footnote-item"));
        assert!(html.contains("a ] bracket"));
    }

    #[test]
    fn unterminated_inline_footnote_is_plain_text() {
        let md = setup();
        let html = md.parse("A caret^[ that never closes\n").render();
        assert!(!html.contains("footnote"));
        assert!(html.contains("^[ that never closes"));
    }

    #[test]
    fn empty_inline_footnote_is_accepted() {
        let md = setup();
        let html = md.parse("Empty^[] note.\n").render();
        assert!(html.contains("footnote-ref"));
        assert!(html.contains("footnote-item"));
    }

    #[test]
    fn labels_and_inline_footnotes_share_one_numbering() {
        let md = setup();
        let html = md
            .parse("First[^a] then^[inline note] done.\n\n[^a]: Labeled note.\n")
            .render();
        assert!(html.contains("#fn1"));
        assert!(html.contains("#fn2"));
        assert!(html.contains("[1]"));
        assert!(html.contains("[2]"));
    }
}
