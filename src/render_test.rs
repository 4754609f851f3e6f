use std::path::Path;

use super::*;

fn request(format: &str) -> Result<RenderRequest, RenderError> {
    RenderRequest::new("out/mind.dot".into(), "out/mind.png".into(), format)
}

#[test]
fn accepts_graphviz_format_tokens() {
    for format in ["png", "svg", "pdf", "png:cairo", "svg_inline"] {
        assert!(request(format).is_ok(), "{format}");
    }
}

#[test]
fn rejects_suspicious_formats() {
    for format in ["", "png -o /etc/passwd", "svg;rm", "../png"] {
        let err = request(format).unwrap_err();
        assert!(matches!(err, RenderError::InvalidFormat(_)), "{format}");
        assert_eq!(err.error_code(), "E_RENDER_FORMAT");
    }
}

#[test]
fn args_match_graphviz_cli() {
    let req = request("svg").unwrap();
    let args: Vec<String> = req
        .args()
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    assert_eq!(args, vec!["-Tsvg", "out/mind.dot", "-o", "out/mind.png"]);
}

#[test]
fn command_line_hint() {
    let req = request("png").unwrap();
    assert_eq!(req.command_line(DEFAULT_DOT_PROGRAM), "dot -Tpng out/mind.dot -o out/mind.png");
    assert_eq!(req.dot_path, Path::new("out/mind.dot"));
}

#[tokio::test]
async fn missing_program_is_a_spawn_error() {
    let req = request("png").unwrap();
    let err = req
        .run("coresnap-test-no-such-graphviz-binary")
        .await
        .unwrap_err();
    assert!(matches!(err, RenderError::Spawn { .. }));
    assert_eq!(err.error_code(), "E_RENDER_SPAWN");
    assert!(err.to_string().contains("coresnap-test-no-such-graphviz-binary"));
}

#[cfg(unix)]
#[tokio::test]
async fn non_zero_exit_is_a_failure() {
    let req = request("png").unwrap();
    let err = req.run("false").await.unwrap_err();
    assert!(matches!(err, RenderError::Failed { .. }));
    assert_eq!(err.error_code(), "E_RENDER_FAILED");
}
