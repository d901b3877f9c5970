//! Text rendering of trees and traversal results.

use std::fmt::Display;

use colored::Colorize;
use itertools::Itertools;
use termtree::Tree as TermTree;
use tracing::instrument;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::layout::LayeredGraph;
use crate::domain::{NodeId, Tree};

/// Parse `#rgb` or `#rrggbb` into an RGB triple.
pub fn parse_color(color: &str) -> ApplicationResult<(u8, u8, u8)> {
    let invalid = |reason: &str| ApplicationError::InvalidColor {
        color: color.to_string(),
        reason: reason.to_string(),
    };
    let hex = color
        .strip_prefix('#')
        .ok_or_else(|| invalid("missing leading '#'"))?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid("not a hex number"));
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|e| invalid(&e.to_string()));

    match hex.len() {
        // Each nibble is repeated: #5af == #55aaff
        3 => {
            let r = channel(&hex[0..1])?;
            let g = channel(&hex[1..2])?;
            let b = channel(&hex[2..3])?;
            Ok((r * 17, g * 17, b * 17))
        }
        6 => Ok((
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => Err(invalid("expected 3 or 6 hex digits")),
    }
}

/// Draws the tree with every label filled in its layer color.
///
/// Returns None for a tree without root. Subtrees are assembled bottom-up
/// from an explicit stack, so deep trees do not grow the call stack.
#[instrument(level = "debug", skip(tree, graph))]
pub fn render_tree<T: Display>(
    tree: &Tree<T>,
    graph: &LayeredGraph,
) -> ApplicationResult<Option<TermTree<String>>> {
    let Some(root) = tree.root() else {
        return Ok(None);
    };

    // (node, index of the next child to draw), parallel to `pending`
    let mut frames: Vec<(NodeId, usize)> = vec![(root, 0)];
    let mut pending: Vec<TermTree<String>> = vec![TermTree::new(label(tree, graph, root)?)];

    while let Some(&(id, next)) = frames.last() {
        let children = tree.children(id).unwrap_or_default();
        if let Some(&child) = children.get(next) {
            if let Some(frame) = frames.last_mut() {
                frame.1 += 1;
            }
            frames.push((child, 0));
            pending.push(TermTree::new(label(tree, graph, child)?));
            continue;
        }

        frames.pop();
        let Some(done) = pending.pop() else {
            break;
        };
        match pending.last_mut() {
            Some(parent) => {
                parent.push(done);
            }
            None => return Ok(Some(done)),
        }
    }
    Ok(None)
}

fn label<T: Display>(tree: &Tree<T>, graph: &LayeredGraph, id: NodeId) -> ApplicationResult<String> {
    let content = tree.content(id).map(|c| c.to_string()).unwrap_or_default();
    match graph.node(id) {
        Some(layout) => {
            let (r, g, b) = parse_color(&layout.color)?;
            Ok(format!(" {} ", content)
                .black()
                .on_truecolor(r, g, b)
                .to_string())
        }
        None => Ok(content),
    }
}

/// One line per layer: `depth: a b c`.
pub fn render_layers(graph: &LayeredGraph) -> String {
    graph
        .layers()
        .into_iter()
        .map(|(depth, labels)| format!("{}: {}", depth, labels.join(" ")))
        .join("\n")
}

/// Bracketed, quoted listing of node contents: `["1", "2"]`.
pub fn format_order<T: Display>(tree: &Tree<T>, nodes: &[NodeId]) -> String {
    let items = nodes
        .iter()
        .filter_map(|&id| tree.content(id))
        .map(|c| format!("\"{}\"", c))
        .join(", ");
    format!("[{}]", items)
}
