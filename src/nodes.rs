//! AST node types emitted by the footnote rules
//!
//! Anchor, caption and id strings are computed when a node is created
//! (the reference scanners and the resolution pass both have the parser
//! at hand), so rendering is a plain write-out. All fields are public
//! so host applications can walk the tree and extract footnote data the
//! same way they extract any other custom node.

use markdown_it::{Node, NodeValue, Renderer};

use crate::options::FootnoteOptions;

/// Inline reference marker left at the reference site.
#[derive(Debug, Clone)]
pub struct FootnoteRefNode {
    /// Slot in the document's footnote list.
    pub id: usize,
    /// Zero-based repetition index for repeated references to one
    /// label; always 0 for inline footnotes.
    pub sub_id: usize,
    /// Referenced label; `None` for inline footnotes.
    pub label: Option<String>,
    /// Fragment id of the footnote item this reference points at.
    pub def_anchor: String,
    /// Fragment id of this reference itself (back-link target).
    pub ref_anchor: String,
    /// Visible caption, e.g. `[1]` or `[1:2]`.
    pub caption: String,
}

impl FootnoteRefNode {
    pub fn new(id: usize, sub_id: usize, label: Option<String>, options: &FootnoteOptions) -> Self {
        Self {
            id,
            sub_id,
            label,
            def_anchor: options.anchor_text(id, sub_id, true),
            ref_anchor: options.anchor_text(id, sub_id, false),
            caption: options.caption_text(id, sub_id),
        }
    }
}

impl NodeValue for FootnoteRefNode {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        fmt.open("sup", &[("class", "footnote-ref".to_string())]);
        fmt.open(
            "a",
            &[
                ("href", format!("#fn{}", self.def_anchor)),
                ("id", format!("fnref{}", self.ref_anchor)),
            ],
        );
        fmt.text(&self.caption);
        fmt.close("a");
        fmt.close("sup");
    }
}

/// Block container produced by the definition scanner.
///
/// Holds the tokenized definition body until the resolution pass
/// harvests it; never part of the final tree. Renders its children
/// transparently in case resolution was skipped.
#[derive(Debug, Clone)]
pub struct FootnoteDefinitionNode {
    pub label: String,
}

impl NodeValue for FootnoteDefinitionNode {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        fmt.contents(&node.children);
    }
}

/// The footnote section appended at the end of the document.
#[derive(Debug, Clone)]
pub struct FootnoteSectionNode {
    /// Heading text; empty suppresses the heading element.
    pub header: String,
}

impl NodeValue for FootnoteSectionNode {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        fmt.cr();
        fmt.self_close("hr", &[("class", "footnotes-sep".to_string())]);
        fmt.cr();
        fmt.open("section", &[("class", "footnotes".to_string())]);
        fmt.cr();
        if !self.header.is_empty() {
            fmt.open("h3", &[("class", "footnotes-header".to_string())]);
            fmt.text(&self.header);
            fmt.close("h3");
            fmt.cr();
        }
        fmt.open("ol", &[("class", "footnotes-list".to_string())]);
        fmt.cr();
        fmt.contents(&node.children);
        fmt.cr();
        fmt.close("ol");
        fmt.cr();
        fmt.close("section");
        fmt.cr();
    }
}

/// One footnote item inside the section list.
#[derive(Debug, Clone)]
pub struct FootnoteItemNode {
    pub id: usize,
    pub label: Option<String>,
    /// Fragment id of this item.
    pub anchor: String,
}

impl NodeValue for FootnoteItemNode {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        fmt.open(
            "li",
            &[
                ("id", format!("fn{}", self.anchor)),
                ("class", "footnote-item".to_string()),
            ],
        );
        fmt.contents(&node.children);
        fmt.close("li");
        fmt.cr();
    }
}

/// Back-reference link from a footnote item to one reference site.
#[derive(Debug, Clone)]
pub struct FootnoteAnchorNode {
    pub id: usize,
    pub sub_id: usize,
    pub label: Option<String>,
    /// Fragment id of the reference this anchor jumps back to.
    pub ref_anchor: String,
}

impl NodeValue for FootnoteAnchorNode {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        fmt.text(" ");
        fmt.open(
            "a",
            &[
                ("href", format!("#fnref{}", self.ref_anchor)),
                ("class", "footnote-backref".to_string()),
            ],
        );
        // U+FE0E keeps the arrow from rendering as an emoji on iOS
        fmt.text("\u{21A9}\u{FE0E}");
        fmt.close("a");
    }
}
