//! Graphviz DOT rendering of a [`HuffmanTree`].
//!
//! Internal nodes are labelled with their frequency, leaves with
//! `[symbol, frequency]/code`, and every edge with the bit it stands for.
//! Turning the DOT source into an image is left to the `dot` tool.

use alloc::string::String;
use alloc::vec;
use core::fmt::{self, Write};

use crate::common::Symbol;
use crate::tree::{HuffmanTree, Node};

/// Render `tree` as a DOT digraph
pub fn to_dot<S: Symbol>(tree: &HuffmanTree<S>) -> String {
    let mut dot = String::new();
    // a String sink never reports an error
    let _ = write_dot(tree, &mut dot);
    dot
}

/// Write the DOT source for `tree` into `out`
pub fn write_dot<S: Symbol, W: Write>(tree: &HuffmanTree<S>, out: &mut W) -> fmt::Result {
    let table = tree.code_table();

    writeln!(out, "digraph huffman {{")?;
    writeln!(out, "    node [shape=box];")?;
    writeln!(out, "    edge [arrowhead=none];")?;

    let mut next_id = 1usize;
    let mut stack = vec![(tree.root(), 0usize)];
    while let Some((node, id)) = stack.pop() {
        match node {
            Node::Leaf { symbol, frequency } => {
                let mut label = String::new();
                write!(label, "[{:?}, {}]/", symbol, frequency)?;
                if let Some(code) = table.get(symbol) {
                    write!(label, "{}", code)?;
                }
                writeln!(out, "    n{} [label=\"{}\"];", id, escape(&label))?;
            }
            Node::Internal {
                frequency,
                left,
                right,
            } => {
                writeln!(out, "    n{} [label=\"{}\"];", id, frequency)?;
                let (left_id, right_id) = (next_id, next_id + 1);
                next_id += 2;
                writeln!(out, "    n{} -> n{} [label=\"0\"];", id, left_id)?;
                writeln!(out, "    n{} -> n{} [label=\"1\"];", id, right_id)?;
                stack.push((&**right, right_id));
                stack.push((&**left, left_id));
            }
        }
    }

    writeln!(out, "}}")
}

fn escape(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
