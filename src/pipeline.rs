//! File-level workflows behind the CLI: outline file → DOT file, and
//! topic title → generated outline file.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::dot::{self, DotOptions};
use crate::error::ErrorCode;
use crate::llm::{LlmChat, LlmError, RetryPolicy, generate_outline};
use crate::outline::{OutlineError, OutlineFormat, sanitize};
use crate::render::RenderError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Outline(#[from] OutlineError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "E_READ",
            Self::Write { .. } => "E_WRITE",
            Self::Outline(e) => e.error_code(),
            Self::Llm(e) => e.error_code(),
            Self::Render(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Llm(e) if e.retryable())
    }
}

// =============================================================================
// CONVERT
// =============================================================================

/// What a conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    pub format: OutlineFormat,
    pub dot_path: PathBuf,
    pub nodes: usize,
    pub roots: usize,
}

/// `notes/book.txt` → `notes/book.dot`.
#[must_use]
pub fn default_dot_path(input: &Path) -> PathBuf {
    input.with_extension("dot")
}

/// `notes/book.txt` + `png` → `notes/book.png`.
#[must_use]
pub fn image_path(input: &Path, format: &str) -> PathBuf {
    let extension = format.split(':').next().unwrap_or(format);
    input.with_extension(extension)
}

/// Read `input`, parse it with the requested format (`auto`, `text` or
/// `markdown`) and write the DOT description to `output`.
///
/// # Errors
///
/// An unsupported format fails before the file is read. Read, parse and write
/// failures are returned as-is.
pub fn convert_file(
    input: &Path,
    output: &Path,
    requested_format: &str,
    options: &DotOptions,
) -> Result<ConvertReport, PipelineError> {
    let format = OutlineFormat::resolve(requested_format, input)?;
    let source = std::fs::read_to_string(input).map_err(|source| PipelineError::Read { path: input.to_path_buf(), source })?;

    let nodes = format.parse(&source)?;
    let roots = dot::tree::root_count(&nodes);
    let text = dot::to_dot(&nodes, options);

    std::fs::write(output, text).map_err(|source| PipelineError::Write { path: output.to_path_buf(), source })?;
    info!(
        input = %input.display(),
        output = %output.display(),
        %format,
        nodes = nodes.len(),
        roots,
        "convert: dot file written"
    );

    Ok(ConvertReport { format, dot_path: output.to_path_buf(), nodes: nodes.len(), roots })
}

// =============================================================================
// GENERATE
// =============================================================================

/// File stem for a generated outline when none is given: the sanitized title.
#[must_use]
pub fn default_stem(title: &str) -> String {
    let stem = sanitize::sanitize(title.trim());
    if stem.is_empty() { "outline".to_owned() } else { stem }
}

/// Generate an outline for `title` and save it next to `stem` with the
/// format's extension. Returns the path written.
///
/// # Errors
///
/// Returns LLM failures (after retries) or the write failure.
pub async fn generate_file(
    llm: &dyn LlmChat,
    title: &str,
    format: OutlineFormat,
    stem: &Path,
    max_tokens: u32,
    policy: &RetryPolicy,
) -> Result<PathBuf, PipelineError> {
    let outline = generate_outline(llm, title, format, max_tokens, policy).await?;
    let path = stem.with_extension(format.extension());
    std::fs::write(&path, format!("{outline}\n")).map_err(|source| PipelineError::Write { path: path.clone(), source })?;
    info!(%title, path = %path.display(), lines = outline.lines().count(), "generate: outline written");
    Ok(path)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
