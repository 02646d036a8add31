//! Block rule for footnote definitions (`[^label]: body`)
//!
//! The definition line is rewritten to start just past the `[^label]:`
//! opener and the body is tokenized recursively under a 4-column
//! virtual indent, the same way an indented block continuation is
//! scanned. The resulting container node stays in the tree until the
//! resolution pass harvests it, so the body's inline content is parsed
//! by the host's normal inline pass first.

use std::sync::LazyLock;

use markdown_it::parser::block::{BlockRule, BlockState};
use markdown_it::Node;
use regex::Regex;

use crate::nodes::FootnoteDefinitionNode;
use crate::registry::FootnoteMap;

static DEFINITION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\^([^\s\]]+)\]:").expect("footnote definition regex"));

/// Scanner for `[^label]:` definition openers.
pub struct FootnoteDefinitionScanner;

impl FootnoteDefinitionScanner {
    fn scan_opener(line: &str) -> Option<(String, usize)> {
        let captures = DEFINITION_RE.captures(line)?;
        let label = captures.get(1)?.as_str().to_string();
        let opener = captures.get(0)?;
        Some((label, opener.end()))
    }
}

impl BlockRule for FootnoteDefinitionScanner {
    fn check(state: &mut BlockState) -> Option<()> {
        // 4+ columns of indent would be an indented code block
        if state.line_indent(state.line) >= 4 {
            return None;
        }
        Self::scan_opener(state.get_line(state.line))?;
        Some(())
    }

    fn run(state: &mut BlockState) -> Option<(Node, usize)> {
        if state.line_indent(state.line) >= 4 {
            return None;
        }

        let start_line = state.line;
        let (label, opener_len) = Self::scan_opener(state.get_line(start_line))?;

        // The label is declared as soon as its definition is seen; the
        // list slot is only claimed by the first reference.
        state
            .root_ext
            .get_or_insert_default::<FootnoteMap>()
            .declare(&label);

        let old_line_start = state.line_offsets[start_line].line_start;
        let old_first_nonspace = state.line_offsets[start_line].first_nonspace;
        let old_indent_nonspace = state.line_offsets[start_line].indent_nonspace;
        let line_end = state.line_offsets[start_line].line_end;

        // Re-point the definition line past "[^label]:" and any
        // whitespace after it, tracking columns for tab stops.
        let pos_after_colon = old_first_nonspace + opener_len;
        let initial = old_indent_nonspace + opener_len as i32;
        let mut pos = pos_after_colon;
        let mut column = initial;
        for byte in state.src[pos..line_end].bytes() {
            match byte {
                b' ' => {
                    column += 1;
                    pos += 1;
                }
                b'\t' => {
                    column += 4 - column % 4;
                    pos += 1;
                }
                _ => break,
            }
        }

        state.line_offsets[start_line].line_start = pos_after_colon;
        state.line_offsets[start_line].first_nonspace = pos;
        state.line_offsets[start_line].indent_nonspace = column - initial;
        state.blk_indent += 4;
        if state.line_offsets[start_line].indent_nonspace < state.blk_indent as i32 {
            state.line_offsets[start_line].indent_nonspace += state.blk_indent as i32;
        }

        let old_node = std::mem::replace(&mut state.node, Node::new(FootnoteDefinitionNode { label }));
        state.md.block.tokenize(state);

        state.blk_indent -= 4;
        state.line_offsets[start_line].line_start = old_line_start;
        state.line_offsets[start_line].first_nonspace = old_first_nonspace;
        state.line_offsets[start_line].indent_nonspace = old_indent_nonspace;

        let mut node = std::mem::replace(&mut state.node, old_node);
        node.srcmap = state.get_map(start_line, state.line - 1);

        let consumed = state.line - start_line;
        state.line = start_line;
        Some((node, consumed))
    }
}
