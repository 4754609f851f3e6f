//! Graphviz delegation: DOT file → image via the `dot` binary.

use std::ffi::OsString;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::ErrorCode;

pub const DEFAULT_DOT_PROGRAM: &str = "dot";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The output format name is not a plain Graphviz format token.
    #[error("invalid output format '{0}'")]
    InvalidFormat(String),

    /// The Graphviz binary could not be started.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Graphviz ran but reported failure.
    #[error("`{program}` exited with {status}: {stderr}")]
    Failed { program: String, status: String, stderr: String },
}

impl ErrorCode for RenderError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidFormat(_) => "E_RENDER_FORMAT",
            Self::Spawn { .. } => "E_RENDER_SPAWN",
            Self::Failed { .. } => "E_RENDER_FAILED",
        }
    }
}

/// One `dot -T<format> <input> -o <output>` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub dot_path: PathBuf,
    pub output_path: PathBuf,
    pub format: String,
}

impl RenderRequest {
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidFormat`] unless `format` is a non-empty
    /// run of ASCII letters, digits, `:` or `_` (e.g. `png`, `svg`, `png:cairo`).
    pub fn new(dot_path: PathBuf, output_path: PathBuf, format: &str) -> Result<Self, RenderError> {
        let valid = !format.is_empty()
            && format
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '_'));
        if !valid {
            return Err(RenderError::InvalidFormat(format.to_owned()));
        }
        Ok(Self { dot_path, output_path, format: format.to_owned() })
    }

    /// Arguments passed to the Graphviz binary.
    #[must_use]
    pub fn args(&self) -> Vec<OsString> {
        vec![
            format!("-T{}", self.format).into(),
            self.dot_path.clone().into_os_string(),
            "-o".into(),
            self.output_path.clone().into_os_string(),
        ]
    }

    /// Shell command a user can run by hand.
    #[must_use]
    pub fn command_line(&self, program: &str) -> String {
        format!(
            "{program} -T{} {} -o {}",
            self.format,
            self.dot_path.display(),
            self.output_path.display()
        )
    }

    /// Run Graphviz and wait for it to finish.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Spawn`] if the binary cannot be started and
    /// [`RenderError::Failed`] on a non-zero exit.
    pub async fn run(&self, program: &str) -> Result<(), RenderError> {
        debug!(program, args = ?self.args(), "render: spawning graphviz");
        let output = tokio::process::Command::new(program)
            .args(self.args())
            .output()
            .await
            .map_err(|source| RenderError::Spawn { program: program.to_owned(), source })?;

        if !output.status.success() {
            return Err(RenderError::Failed {
                program: program.to_owned(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        info!(output = %self.output_path.display(), format = %self.format, "render: image written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
