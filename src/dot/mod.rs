//! Graphviz DOT serializer: ordered outline nodes → directed tree diagram.
//!
//! DESIGN
//! ======
//! Parent links come from [`tree::parents`]: a node's parent is the nearest
//! earlier node with strictly smaller depth. Nodes with no such ancestor are
//! extra roots, so a forest is valid output.
//!
//! Node identity is the integer [`NodeId`]. The sanitized identifier only
//! seeds the DOT vertex name; a later node whose identifier is already taken
//! gets an `_<id>` suffix instead of silently merging into the first one.

pub mod tree;

use std::collections::{HashMap, HashSet};
use std::fmt::{self, Write};
use std::str::FromStr;

use tracing::debug;

use crate::outline::{Node, NodeId};

pub const PENWIDTH_EMPHASIS: u8 = 3;
pub const PENWIDTH_DEFAULT: u8 = 1;
const RANK_SEP: &str = "1.0";
const NODE_SEP: &str = "0.4";

// =============================================================================
// OPTIONS
// =============================================================================

/// Graph layout direction (`rankdir`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankDir {
    /// Root on the left, children fan out to the right.
    #[default]
    LeftRight,
    /// Root on top, children below.
    TopBottom,
}

impl RankDir {
    fn as_dot(self) -> &'static str {
        match self {
            Self::LeftRight => "LR",
            Self::TopBottom => "TB",
        }
    }
}

impl FromStr for RankDir {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lr" | "left-right" => Ok(Self::LeftRight),
            "tb" | "top-bottom" => Ok(Self::TopBottom),
            other => Err(format!("unknown direction '{other}' (expected 'lr' or 'tb')")),
        }
    }
}

impl fmt::Display for RankDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_dot())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DotOptions {
    pub rank_dir: RankDir,
}

// =============================================================================
// SERIALIZER
// =============================================================================

/// Serialize nodes into a complete `digraph`. Always well-formed, including
/// for an empty slice.
#[must_use]
pub fn to_dot(nodes: &[Node], options: &DotOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph G {{");
    let _ = writeln!(out, "    rankdir={};", options.rank_dir.as_dot());
    let _ = writeln!(out, "    node [shape=box];");
    let _ = writeln!(out, "    splines=ortho;");
    let _ = writeln!(out, "    ranksep={RANK_SEP};");
    let _ = writeln!(out, "    nodesep={NODE_SEP};");

    let parents = tree::parents(nodes);
    let mut names = VertexNames::default();
    let mut by_id: HashMap<NodeId, String> = HashMap::with_capacity(nodes.len());

    for (node, parent) in nodes.iter().zip(parents) {
        let name = names.assign(node);
        write_node(&mut out, &name, node);

        if let Some(parent_name) = parent.and_then(|id| by_id.get(&id)) {
            let _ = writeln!(out, "    \"{}\" -> \"{}\";", escape(parent_name), escape(&name));
        }
        by_id.insert(node.id(), name);
    }

    out.push_str("}\n");
    out
}

fn write_node(out: &mut String, name: &str, node: &Node) {
    let penwidth = if node.emphasis() { PENWIDTH_EMPHASIS } else { PENWIDTH_DEFAULT };
    let _ = write!(out, "    \"{}\" [label=\"{}\", penwidth={penwidth}", escape(name), escape(node.title()));
    if let Some(annotation) = node.annotation() {
        let _ = write!(out, ", tooltip=\"{}\"", escape(annotation));
    }
    out.push_str("];\n");
}

/// Escape a value for use inside a double-quoted DOT string.
#[must_use]
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

// =============================================================================
// VERTEX NAMES
// =============================================================================

/// Hands out unique vertex names per document.
#[derive(Default)]
struct VertexNames {
    taken: HashSet<String>,
}

impl VertexNames {
    fn assign(&mut self, node: &Node) -> String {
        let base = node.identifier();
        if self.taken.insert(base.to_owned()) {
            return base.to_owned();
        }

        let mut candidate = format!("{base}_{}", node.id());
        let mut attempt = 1;
        while !self.taken.insert(candidate.clone()) {
            attempt += 1;
            candidate = format!("{base}_{}_{attempt}", node.id());
        }
        debug!(id = %node.id(), identifier = base, vertex = %candidate, "identifier collision; renamed vertex");
        candidate
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
