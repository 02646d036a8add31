//! Footnote plugin for [`markdown-it`](https://crates.io/crates/markdown-it)
//!
//! Adds the three footnote forms used by pandoc and friends:
//! - labeled references: `[^label]`
//! - labeled definitions: `[^label]: body`, with indented continuation
//! - inline footnotes: `^[body]`
//!
//! Footnotes are numbered in first-reference order and re-emitted as a
//! section at the end of the document, one list item per footnote, each
//! ending in back-reference links to its reference sites.
//!
//! ```
//! use markdown_it::MarkdownIt;
//!
//! let mut md = MarkdownIt::new();
//! markdown_it::plugins::cmark::add(&mut md);
//! markdown_it_footnote::add(&mut md);
//!
//! let html = md.parse("text[^a]\n\n[^a]: a note\n").render();
//! assert!(html.contains("footnote-ref"));
//! assert!(html.contains("footnote-backref"));
//! ```
//!
//! Anchor ids, reference captions and the section header can be
//! customized through [`FootnoteOptions`].

pub mod definitions;
pub mod nodes;
pub mod options;
pub mod references;
pub mod registry;
pub mod resolve;

pub use nodes::{
    FootnoteAnchorNode, FootnoteDefinitionNode, FootnoteItemNode, FootnoteRefNode,
    FootnoteSectionNode,
};
pub use options::FootnoteOptions;
pub use registry::{FootnoteEntry, FootnoteMap};

use markdown_it::parser::inline::builtin::InlineParserRule;
use markdown_it::plugins::cmark::block::reference::ReferenceScanner;
use markdown_it::MarkdownIt;

/// Register the footnote rules. Call after the cmark plugin so ordinary
/// link parsing keeps priority at the `[` marker.
pub fn add(md: &mut MarkdownIt) {
    // definitions would otherwise be swallowed as link reference blocks
    md.block
        .add_rule::<definitions::FootnoteDefinitionScanner>()
        .before::<ReferenceScanner>();
    md.inline.add_rule::<references::InlineFootnoteScanner>();
    md.inline.add_rule::<references::FootnoteRefScanner>();
    md.add_rule::<resolve::FootnoteResolver>()
        .after::<InlineParserRule>();
}
