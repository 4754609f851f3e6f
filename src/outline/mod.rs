//! Outline model: the ordered node sequence shared by both parsers.
//!
//! DESIGN
//! ======
//! Parsers never build an explicit tree. Each [`Node`] carries a `depth` and
//! document order does the rest: a node's parent is the nearest earlier node
//! with strictly smaller depth, resolved later by [`crate::dot`].
//!
//! Nodes are immutable once appended. The one exception is the annotation,
//! which only [`OutlineBuilder::attach_annotation`] can set, and only on the
//! last node appended.

pub mod markdown;
pub mod sanitize;
pub mod text;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use markdown::parse_markdown;
pub use text::parse_text;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while selecting or running an outline parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutlineError {
    /// The requested format name does not map to a parser.
    #[error("unsupported outline format '{0}' (expected 'auto', 'text' or 'markdown')")]
    UnsupportedFormat(String),

    /// A block quote appeared before any heading, so there is no node to annotate.
    #[error("block quote on line {line} has no preceding heading to annotate")]
    AnnotationWithoutNode { line: usize },
}

// =============================================================================
// NODE
// =============================================================================

/// Document-order identity of a node. Assigned by the parser, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One outline entry; becomes one vertex in the output graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    title: String,
    identifier: String,
    depth: usize,
    emphasis: bool,
    annotation: Option<String>,
}

impl Node {
    /// Build a node from a raw title. The bullet marker and surrounding
    /// whitespace are stripped and the identifier derived from what remains.
    #[must_use]
    pub fn new(id: NodeId, raw_title: &str, depth: usize, emphasis: bool) -> Self {
        let (title, identifier) = sanitize::create_node_label(raw_title);
        Self { id, title, identifier, depth, emphasis, annotation: None }
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Clean display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sanitized identifier. Two nodes may share one.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn emphasis(&self) -> bool {
        self.emphasis
    }

    #[must_use]
    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Accumulates nodes in document order and hands out sequential ids.
#[derive(Debug, Default)]
pub struct OutlineBuilder {
    nodes: Vec<Node>,
}

impl OutlineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its id.
    pub fn push(&mut self, raw_title: &str, depth: usize, emphasis: bool) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, raw_title, depth, emphasis));
        id
    }

    /// Attach `text` to the most recently appended node.
    ///
    /// Returns `Ok(None)` when attached, or `Ok(Some(id))` when that node was
    /// already annotated; the existing annotation is kept.
    ///
    /// # Errors
    ///
    /// Returns [`OutlineError::AnnotationWithoutNode`] when no node exists yet.
    pub fn attach_annotation(&mut self, text: &str, line: usize) -> Result<Option<NodeId>, OutlineError> {
        let node = self
            .nodes
            .last_mut()
            .ok_or(OutlineError::AnnotationWithoutNode { line })?;
        if node.annotation.is_some() {
            return Ok(Some(node.id));
        }
        node.annotation = Some(text.trim().to_owned());
        Ok(None)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn finish(self) -> Vec<Node> {
        self.nodes
    }
}

// =============================================================================
// FORMAT SELECTION
// =============================================================================

/// Outline source format; selects which parser runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineFormat {
    /// Indented bullet list, depth = leading whitespace.
    Text,
    /// Markdown headings, depth = heading level, block quotes become tooltips.
    Markdown,
}

impl OutlineFormat {
    /// Guess the format from a file extension. Anything that is not
    /// `.md`/`.markdown` is treated as indented text.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("md" | "markdown") => Self::Markdown,
            _ => Self::Text,
        }
    }

    /// Resolve a user-supplied format name, where `auto` defers to the path.
    ///
    /// # Errors
    ///
    /// Returns [`OutlineError::UnsupportedFormat`] for unknown names.
    pub fn resolve(requested: &str, path: &Path) -> Result<Self, OutlineError> {
        if requested.eq_ignore_ascii_case("auto") {
            return Ok(Self::from_path(path));
        }
        requested.parse()
    }

    /// File extension used when saving a generated outline.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Markdown => "md",
        }
    }

    /// Run the matching parser.
    ///
    /// # Errors
    ///
    /// Propagates parser errors; only the Markdown parser can fail.
    pub fn parse(self, input: &str) -> Result<Vec<Node>, OutlineError> {
        match self {
            Self::Text => Ok(parse_text(input)),
            Self::Markdown => parse_markdown(input),
        }
    }
}

impl FromStr for OutlineFormat {
    type Err = OutlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(OutlineError::UnsupportedFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for OutlineFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Markdown => f.write_str("markdown"),
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
