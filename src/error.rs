//! Grepable error codes shared by every layer.

use crate::outline::OutlineError;

/// Stable error code plus a retryable flag, logged alongside the message.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

impl ErrorCode for OutlineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat(_) => "E_UNSUPPORTED_FORMAT",
            Self::AnnotationWithoutNode { .. } => "E_ANNOTATION_WITHOUT_NODE",
        }
    }
}
