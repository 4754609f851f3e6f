//! Outline generation: topic title → outline text in the requested format.

use tracing::{debug, info};

use super::retry::{RetryPolicy, with_retry};
use super::types::{LlmChat, LlmError, Message};
use crate::outline::OutlineFormat;

const TEXT_SYSTEM_PROMPT: &str = "\
You will be given the title of a published work such as a book, research paper or article, \
possibly with its author. Build a mind map of the core ideas of that work. \
Output it as an indented list of bullet points, one idea per line, using '-' bullets and \
two spaces of indentation per level, with the title of the work as the single top-level bullet. \
Output nothing except the indented list.";

const MARKDOWN_SYSTEM_PROMPT: &str = "\
You will be given the title of a published work such as a book, research paper or article, \
possibly with its author. Build a mind map of the core ideas of that work. \
Output it as Markdown headings: a single '#' heading with the title of the work, then '##', \
'###' and deeper headings for its ideas. Directly under any heading you may add one '>' block \
quote line with a short explanation of that idea. Output nothing except the headings and block quotes.";

/// System prompt asking for an outline in `format`.
#[must_use]
pub fn system_prompt(format: OutlineFormat) -> &'static str {
    match format {
        OutlineFormat::Text => TEXT_SYSTEM_PROMPT,
        OutlineFormat::Markdown => MARKDOWN_SYSTEM_PROMPT,
    }
}

/// Ask the model for an outline of `title`, retrying transient failures.
///
/// # Errors
///
/// Returns the final [`LlmError`] once retries are exhausted, or immediately
/// for credential and other non-retryable failures. A reply cut off by the
/// token budget is [`LlmError::Truncated`] and is not retried.
pub async fn generate_outline(
    llm: &dyn LlmChat,
    title: &str,
    format: OutlineFormat,
    max_tokens: u32,
    policy: &RetryPolicy,
) -> Result<String, LlmError> {
    info!(%title, %format, "llm: generating outline");
    let system = system_prompt(format);
    let messages = [Message::user(format!("Generate a mindmap of: {title}"))];
    let messages = &messages;

    let text = with_retry(policy, move || async move {
        let response = llm.chat(max_tokens, system, messages).await?;
        debug!(
            model = %response.model,
            stop_reason = %response.stop_reason,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "llm: outline response"
        );
        if response.is_truncated() {
            return Err(LlmError::Truncated { max_tokens });
        }
        response.text().ok_or(LlmError::EmptyResponse)
    })
    .await?;

    Ok(strip_code_fence(&text).to_owned())
}

/// Drop a surrounding Markdown code fence (```` ``` ```` or ```` ```markdown ````),
/// which models sometimes add despite instructions.
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return text;
    };
    let Some((_, body)) = rest.split_once('\n') else {
        return text;
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim_matches('\n')
}

#[cfg(test)]
#[path = "outline_test.rs"]
mod tests;
