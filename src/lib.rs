//! coresnap: turn indented-text or Markdown outlines into Graphviz mind maps.
//!
//! ```text
//! outline text → outline::{parse_text, parse_markdown} → Vec<Node> → dot::to_dot → DOT
//! ```
//!
//! The outer layers ([`llm`], [`render`], [`pipeline`]) draft outlines with a
//! language model and hand DOT files to the Graphviz binary.

pub mod dot;
pub mod error;
pub mod llm;
pub mod outline;
pub mod pipeline;
pub mod render;

/// Parse `input` in the given format and serialize it as DOT.
///
/// # Errors
///
/// Returns [`outline::OutlineError::AnnotationWithoutNode`] when a Markdown
/// blockquote precedes every heading.
pub fn outline_to_dot(
    input: &str,
    format: outline::OutlineFormat,
    options: &dot::DotOptions,
) -> Result<String, outline::OutlineError> {
    let nodes = format.parse(input)?;
    Ok(dot::to_dot(&nodes, options))
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
