//! Markdown outline parser.
//!
//! Headings become nodes (depth = heading level). The first paragraph or list
//! item of a block quote becomes the annotation of the most recent heading. Everything
//! else in the document (paragraphs, lists, code, tables) is ignored.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use tracing::debug;

use super::{Node, OutlineBuilder, OutlineError};

/// Heading currently being collected.
struct OpenHeading {
    level: usize,
    text: String,
}

/// Block quote currently being walked. Nested quotes fold into the outermost.
#[derive(Default)]
struct OpenQuote {
    nesting: usize,
    line: usize,
    text: Option<String>,
    in_first_block: bool,
    first_block_done: bool,
}

/// Parse a Markdown document into nodes in document order.
///
/// # Errors
///
/// Returns [`OutlineError::AnnotationWithoutNode`] if a block quote appears
/// before the first heading.
pub fn parse_markdown(input: &str) -> Result<Vec<Node>, OutlineError> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut builder = OutlineBuilder::new();
    let mut heading: Option<OpenHeading> = None;
    let mut quote = OpenQuote::default();

    for (event, range) in Parser::new_ext(input, options).into_offset_iter() {
        match event {
            Event::Start(Tag::Heading { level, .. }) if quote.nesting == 0 => {
                heading = Some(OpenHeading { level: level as usize, text: String::new() });
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(open) = heading.take() {
                    builder.push(&open.text, open.level, open.level == 1);
                }
            }
            Event::Start(Tag::BlockQuote { .. }) => {
                if quote.nesting == 0 {
                    quote = OpenQuote { line: line_of(input, range.start), ..OpenQuote::default() };
                }
                quote.nesting += 1;
            }
            Event::End(TagEnd::BlockQuote { .. }) => {
                quote.nesting = quote.nesting.saturating_sub(1);
                if quote.nesting == 0 {
                    close_quote(&mut builder, &mut quote)?;
                }
            }
            Event::Start(Tag::Paragraph | Tag::Item)
                if quote.nesting > 0 && !quote.first_block_done && !quote.in_first_block =>
            {
                quote.in_first_block = true;
                quote.text.get_or_insert_with(String::new);
            }
            // A nested list ends the first item's own text.
            Event::Start(Tag::List(_)) if quote.in_first_block => {
                quote.in_first_block = false;
                quote.first_block_done = true;
            }
            Event::End(TagEnd::Paragraph | TagEnd::Item) if quote.in_first_block => {
                quote.in_first_block = false;
                quote.first_block_done = true;
            }
            Event::Text(text) | Event::Code(text) => push_inline(&mut heading, &mut quote, &text),
            Event::SoftBreak | Event::HardBreak => push_inline(&mut heading, &mut quote, " "),
            _ => {}
        }
    }

    Ok(builder.finish())
}

fn push_inline(heading: &mut Option<OpenHeading>, quote: &mut OpenQuote, text: &str) {
    if let Some(open) = heading.as_mut() {
        open.text.push_str(text);
    } else if quote.in_first_block {
        if let Some(buf) = quote.text.as_mut() {
            buf.push_str(text);
        }
    }
}

fn close_quote(builder: &mut OutlineBuilder, quote: &mut OpenQuote) -> Result<(), OutlineError> {
    let line = quote.line;
    if builder.is_empty() {
        return Err(OutlineError::AnnotationWithoutNode { line });
    }
    let Some(text) = quote.text.take().filter(|t| !t.trim().is_empty()) else {
        debug!(line, "block quote without text; nothing to attach");
        return Ok(());
    };
    if let Some(id) = builder.attach_annotation(&text, line)? {
        debug!(%id, line, "node already annotated; ignoring later block quote");
    }
    Ok(())
}

/// 1-based line number of a byte offset.
fn line_of(input: &str, offset: usize) -> usize {
    input.as_bytes()[..offset.min(input.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

#[cfg(test)]
#[path = "markdown_test.rs"]
mod tests;
