use std::sync::Mutex;
use std::time::Duration;

use super::*;
use crate::error::ErrorCode;
use crate::llm::types::{ChatResponse, ContentBlock};

struct MockLlm {
    replies: Mutex<Vec<Result<ChatResponse, LlmError>>>,
    seen: Mutex<Vec<(u32, String, Vec<Message>)>>,
}

impl MockLlm {
    fn new(replies: Vec<Result<ChatResponse, LlmError>>) -> Self {
        Self { replies: Mutex::new(replies), seen: Mutex::new(Vec::new()) }
    }

    fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl LlmChat for MockLlm {
    async fn chat(&self, max_tokens: u32, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        self.seen
            .lock()
            .unwrap()
            .push((max_tokens, system.to_owned(), messages.to_vec()));
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() { Err(LlmError::ApiRequest("no more replies".into())) } else { replies.remove(0) }
    }
}

fn text_reply(text: &str) -> Result<ChatResponse, LlmError> {
    Ok(ChatResponse {
        content: vec![ContentBlock::Text { text: text.into() }],
        model: "mock".into(),
        stop_reason: "end_turn".into(),
        input_tokens: 3,
        output_tokens: 7,
    })
}

fn instant() -> RetryPolicy {
    RetryPolicy { max_attempts: 3, multiplier: Duration::ZERO, max_delay: Duration::ZERO }
}

// =============================================================================
// generate_outline
// =============================================================================

#[tokio::test]
async fn sends_title_and_text_prompt() {
    let llm = MockLlm::new(vec![text_reply("- Walden\n  - Simplicity")]);
    let outline = generate_outline(&llm, "Walden by Thoreau", OutlineFormat::Text, 512, &instant())
        .await
        .unwrap();
    assert_eq!(outline, "- Walden\n  - Simplicity");

    let seen = llm.seen.lock().unwrap();
    let (max_tokens, system, messages) = &seen[0];
    assert_eq!(*max_tokens, 512);
    assert_eq!(system, system_prompt(OutlineFormat::Text));
    assert_eq!(messages, &vec![Message::user("Generate a mindmap of: Walden by Thoreau")]);
}

#[tokio::test]
async fn markdown_format_uses_markdown_prompt() {
    let llm = MockLlm::new(vec![text_reply("# Dune\n## Ecology")]);
    generate_outline(&llm, "Dune", OutlineFormat::Markdown, 256, &instant())
        .await
        .unwrap();
    assert_eq!(llm.seen.lock().unwrap()[0].1, system_prompt(OutlineFormat::Markdown));
}

#[tokio::test]
async fn retries_server_errors() {
    let llm = MockLlm::new(vec![
        Err(LlmError::ApiResponse { status: 500, body: String::new() }),
        Err(LlmError::ApiRequest("reset".into())),
        text_reply("- Ok"),
    ]);
    let outline = generate_outline(&llm, "t", OutlineFormat::Text, 64, &instant())
        .await
        .unwrap();
    assert_eq!(outline, "- Ok");
    assert_eq!(llm.calls(), 3);
}

#[tokio::test]
async fn empty_reply_is_retried() {
    let llm = MockLlm::new(vec![text_reply("   "), text_reply("- Second try")]);
    let outline = generate_outline(&llm, "t", OutlineFormat::Text, 64, &instant())
        .await
        .unwrap();
    assert_eq!(outline, "- Second try");
    assert_eq!(llm.calls(), 2);
}

#[tokio::test]
async fn authentication_failure_is_not_retried() {
    let llm = MockLlm::new(vec![Err(LlmError::ApiResponse { status: 401, body: "bad key".into() }), text_reply("- never")]);
    let err = generate_outline(&llm, "t", OutlineFormat::Text, 64, &instant())
        .await
        .unwrap_err();
    assert!(err.is_auth_failure());
    assert_eq!(llm.calls(), 1);
}

#[tokio::test]
async fn exhausted_retries_return_last_error() {
    let llm = MockLlm::new(vec![]);
    let err = generate_outline(&llm, "t", OutlineFormat::Text, 64, &instant())
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::ApiRequest(_)));
    assert_eq!(llm.calls(), 3);
}

#[tokio::test]
async fn code_fenced_reply_is_unwrapped() {
    let llm = MockLlm::new(vec![text_reply("```markdown\n# Title\n## Sub\n```")]);
    let outline = generate_outline(&llm, "t", OutlineFormat::Markdown, 64, &instant())
        .await
        .unwrap();
    assert_eq!(outline, "# Title\n## Sub");
}

#[tokio::test]
async fn truncated_reply_is_an_error_and_not_retried() {
    let mut cut = text_reply("- Walden\n  - Simplic");
    if let Ok(response) = cut.as_mut() {
        response.stop_reason = "max_tokens".into();
    }
    let llm = MockLlm::new(vec![cut, text_reply("- never")]);
    let err = generate_outline(&llm, "Walden", OutlineFormat::Text, 64, &instant())
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::Truncated { max_tokens: 64 }));
    assert_eq!(err.error_code(), "E_TRUNCATED");
    assert_eq!(llm.calls(), 1);
}

// =============================================================================
// strip_code_fence
// =============================================================================

#[test]
fn strip_code_fence_leaves_plain_text() {
    assert_eq!(strip_code_fence("- A\n  - B"), "- A\n  - B");
}

#[test]
fn strip_code_fence_keeps_inner_indentation() {
    assert_eq!(strip_code_fence("```\n- A\n  - B\n```"), "- A\n  - B");
}

#[test]
fn strip_code_fence_without_closing_fence() {
    assert_eq!(strip_code_fence("```text\n- A\n  - B"), "- A\n  - B");
}

#[test]
fn strip_code_fence_single_line_is_untouched() {
    assert_eq!(strip_code_fence("```"), "```");
}
