//! Naming policy for anchors, captions and the section header
//!
//! All rendered identifiers go through three pluggable functions,
//! mirroring the knobs of the original markdown-it plugin. Overrides
//! are installed on the parser itself:
//!
//! ```
//! use markdown_it::MarkdownIt;
//! use markdown_it_footnote::FootnoteOptions;
//!
//! let mut md = MarkdownIt::new();
//! markdown_it::plugins::cmark::add(&mut md);
//! markdown_it_footnote::add(&mut md);
//! md.ext.insert(FootnoteOptions {
//!     doc_id: Some("chapter-1".to_string()),
//!     ..Default::default()
//! });
//! ```

use markdown_it::parser::extset::MarkdownItExt;

/// Maps a footnote ordinal to the fragment identifier used in
/// `fn…`/`fnref…` ids. `exclude_sub_id` is true when naming the
/// footnote item itself rather than one of its references.
pub type AnchorFn = fn(n: &str, exclude_sub_id: bool, doc_id: Option<&str>) -> String;

/// Maps a footnote ordinal to the visible reference caption.
pub type CaptionFn = fn(n: &str) -> String;

/// Produces the footnote section heading; an empty string suppresses
/// the heading element.
pub type HeaderFn = fn() -> String;

/// Naming configuration, stored in `MarkdownIt::ext`.
///
/// Parses fall back to `FootnoteOptions::default()` when none is
/// installed.
#[derive(Debug, Clone)]
pub struct FootnoteOptions {
    /// Optional document id mixed into every anchor, for pages that
    /// concatenate several rendered documents.
    pub doc_id: Option<String>,
    pub anchor: AnchorFn,
    pub caption: CaptionFn,
    pub header: HeaderFn,
}

impl MarkdownItExt for FootnoteOptions {}

impl Default for FootnoteOptions {
    fn default() -> Self {
        Self {
            doc_id: None,
            anchor: default_anchor,
            caption: default_caption,
            header: default_header,
        }
    }
}

impl FootnoteOptions {
    /// Anchor text for footnote `id`, reference repetition `sub_id`.
    pub fn anchor_text(&self, id: usize, sub_id: usize, exclude_sub_id: bool) -> String {
        (self.anchor)(
            &ordinal(id, sub_id, exclude_sub_id),
            exclude_sub_id,
            self.doc_id.as_deref(),
        )
    }

    /// Visible caption for a reference to footnote `id`.
    pub fn caption_text(&self, id: usize, sub_id: usize) -> String {
        (self.caption)(&ordinal(id, sub_id, false))
    }

    /// Section heading text.
    pub fn header_text(&self) -> String {
        (self.header)()
    }
}

/// Human-visible ordinal: ids are zero-based internally, rendered
/// one-based, with `:sub` appended for repeated references.
fn ordinal(id: usize, sub_id: usize, exclude_sub_id: bool) -> String {
    if !exclude_sub_id && sub_id > 0 {
        format!("{}:{}", id + 1, sub_id)
    } else {
        (id + 1).to_string()
    }
}

fn default_anchor(n: &str, _exclude_sub_id: bool, doc_id: Option<&str>) -> String {
    match doc_id {
        Some(doc_id) => format!("-{}-{}", doc_id, n),
        None => n.to_string(),
    }
}

fn default_caption(n: &str) -> String {
    format!("[{}]", n)
}

fn default_header() -> String {
    String::new()
}
