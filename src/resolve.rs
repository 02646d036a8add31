//! Document-level resolution pass
//!
//! Runs once per parse, after the host's inline pass. Definition
//! containers are pulled out of the tree wherever they ended up
//! (including inside blockquotes and list items), their bodies are
//! keyed by label, and a footnote section is appended holding one item
//! per referenced footnote in first-reference order.

use std::collections::HashMap;

use markdown_it::parser::core::{CoreRule, Root};
use markdown_it::plugins::cmark::block::paragraph::Paragraph;
use markdown_it::{MarkdownIt, Node};

use crate::nodes::{
    FootnoteAnchorNode, FootnoteDefinitionNode, FootnoteItemNode, FootnoteSectionNode,
};
use crate::options::FootnoteOptions;
use crate::registry::{FootnoteEntry, FootnoteMap};

/// Core rule splicing the footnote section onto the document.
pub struct FootnoteResolver;

/// Remove every definition container below `node`, keeping each body
/// under its label. A label defined twice keeps the later body.
fn harvest_definitions(node: &mut Node, bodies: &mut HashMap<String, Vec<Node>>) {
    let mut index = 0;
    while index < node.children.len() {
        if node.children[index].cast::<FootnoteDefinitionNode>().is_some() {
            let mut definition = node.children.remove(index);
            // definitions do not nest, but a stray inner one would
            // otherwise survive inside a harvested body
            harvest_definitions(&mut definition, bodies);
            if let Some(value) = definition.cast::<FootnoteDefinitionNode>() {
                let label = value.label.clone();
                bodies.insert(label, std::mem::take(&mut definition.children));
            }
        } else {
            harvest_definitions(&mut node.children[index], bodies);
            index += 1;
        }
    }
}

impl CoreRule for FootnoteResolver {
    fn run(root: &mut Node, md: &MarkdownIt) {
        // no registry means the document had no footnote syntax at all
        let map = {
            let Some(data) = root.cast_mut::<Root>() else { return };
            match data.ext.remove::<FootnoteMap>() {
                Some(map) => map,
                None => return,
            }
        };

        let mut bodies = HashMap::new();
        harvest_definitions(root, &mut bodies);

        // declarations without references produce nothing
        if map.is_empty() {
            return;
        }

        let options = md.ext.get::<FootnoteOptions>().cloned().unwrap_or_default();

        let mut section = Node::new(FootnoteSectionNode {
            header: options.header_text(),
        });

        for (id, entry) in map.into_list().into_iter().enumerate() {
            let (label, count) = match &entry {
                FootnoteEntry::Inline { .. } => (None, 0),
                FootnoteEntry::Labeled { label, count } => (Some(label.clone()), *count),
            };

            let mut item = Node::new(FootnoteItemNode {
                id,
                label: label.clone(),
                anchor: options.anchor_text(id, 0, true),
            });

            match entry {
                FootnoteEntry::Inline { tokens, .. } => {
                    let mut paragraph = Node::new(Paragraph);
                    paragraph.children = tokens;
                    item.children.push(paragraph);
                }
                FootnoteEntry::Labeled { ref label, .. } => {
                    // a referenced label whose body was never captured
                    // still gets its item and anchors
                    if let Some(body) = bodies.remove(label) {
                        item.children.extend(body);
                    }
                }
            }

            let anchors: Vec<Node> = (0..count.max(1))
                .map(|sub_id| {
                    Node::new(FootnoteAnchorNode {
                        id,
                        sub_id,
                        label: label.clone(),
                        ref_anchor: options.anchor_text(id, sub_id, false),
                    })
                })
                .collect();

            // back-references sit inside the trailing paragraph when
            // there is one, after the body otherwise
            match item.children.last_mut() {
                Some(last) if last.cast::<Paragraph>().is_some() => last.children.extend(anchors),
                _ => item.children.extend(anchors),
            }

            section.children.push(item);
        }

        root.children.push(section);
    }
}
