//! Indented-text parser. Depth is the count of leading whitespace characters.

use super::{Node, OutlineBuilder};

/// Parse an indented bullet list into nodes in document order.
///
/// Blank lines produce nothing and reset nothing. Every other line becomes a
/// node, even if its title ends up empty. Only the first node is emphasized.
#[must_use]
pub fn parse_text(input: &str) -> Vec<Node> {
    let mut builder = OutlineBuilder::new();

    for line in input.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let depth = line.chars().take_while(|c| c.is_whitespace()).count();
        let emphasis = builder.is_empty();
        builder.push(line, depth, emphasis);
    }

    builder.finish()
}

#[cfg(test)]
#[path = "text_test.rs"]
mod tests;
