use super::*;

fn make_response(content: serde_json::Value) -> String {
    serde_json::json!({
        "id": "msg_123",
        "type": "message",
        "role": "assistant",
        "content": content,
        "model": "claude-sonnet-4-5-20250929",
        "stop_reason": "end_turn",
        "usage": { "input_tokens": 100, "output_tokens": 50 }
    })
    .to_string()
}

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([
        { "type": "text", "text": "- Deep Work\n  - Focus" }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert!(matches!(&resp.content[0], ContentBlock::Text { text } if text == "- Deep Work\n  - Focus"));
    assert_eq!(resp.model, "claude-sonnet-4-5-20250929");
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 100);
    assert_eq!(resp.output_tokens, 50);
}

#[test]
fn parse_thinking_then_text() {
    let json = make_response(serde_json::json!([
        { "type": "thinking", "thinking": "let me outline" },
        { "type": "text", "text": "# Title" }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.content.len(), 2);
    assert_eq!(resp.text().as_deref(), Some("# Title"));
}

#[test]
fn parse_unknown_content_filtered() {
    let json = make_response(serde_json::json!([
        { "type": "text", "text": "hi" },
        { "type": "some_future_type", "data": {} }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
}

#[test]
fn parse_missing_stop_reason_defaults() {
    let json = serde_json::json!({
        "content": [{ "type": "text", "text": "x" }],
        "model": "m",
        "usage": { "input_tokens": 1, "output_tokens": 1 }
    })
    .to_string();
    assert_eq!(parse_response(&json).unwrap().stop_reason, "end_turn");
}

#[test]
fn parse_invalid_json() {
    let err = parse_response("not json").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn request_serializes_text_messages() {
    let messages = vec![Message::user("Generate a mindmap of: Walden")];
    let body = MessagesRequest { model: "m", max_tokens: 64, system: "sys", messages: &messages };
    let value = serde_json::to_value(&body).unwrap();
    assert_eq!(value["system"], "sys");
    assert_eq!(value["messages"][0]["role"], "user");
    assert_eq!(value["messages"][0]["content"], "Generate a mindmap of: Walden");
}

#[test]
fn budget_stop_reasons_normalize_to_max_tokens() {
    for reason in ["max_tokens", "model_context_window_exceeded"] {
        let json = make_response(serde_json::json!([{ "type": "text", "text": "- Walden\n  - Simplic" }]))
            .replace("\"end_turn\"", &format!("\"{reason}\""));
        let resp = parse_response(&json).unwrap();
        assert_eq!(resp.stop_reason, STOP_MAX_TOKENS, "{reason}");
        assert!(resp.is_truncated());
    }
}

#[test]
fn other_stop_reasons_pass_through() {
    assert_eq!(normalize_stop_reason(Some("stop_sequence")), "stop_sequence");
    assert_eq!(normalize_stop_reason(None), STOP_END_TURN);
}
