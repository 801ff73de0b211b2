//! Error boundary: turns failures into a full-screen notice.

use crate::error::{ConsoleError, FailureKind, SourceErrorKind};
use std::fmt;

/// Title and message shown in place of the console after a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub kind: FailureKind,
    pub title: String,
    pub message: String,
}

impl ErrorNotice {
    #[must_use]
    pub fn from_error(err: &ConsoleError) -> Self {
        let kind = err.kind();
        let (title, message) = match (kind, err) {
            (
                FailureKind::Status(code),
                ConsoleError::Source {
                    source: SourceErrorKind::Status { reason, .. },
                    ..
                },
            ) => (format!("status: {code}"), format!("message: {reason}")),
            (FailureKind::Status(code), _) => (format!("status: {code}"), err.to_string()),
            (FailureKind::Transport, _) => (
                "Something went wrong!".to_string(),
                "Try again later.".to_string(),
            ),
            (FailureKind::AccessDenied, _) => (
                "Access denied!".to_string(),
                "Try contact support.".to_string(),
            ),
            (FailureKind::Other, _) => ("Something went wrong!".to_string(), err.to_string()),
        };
        Self {
            kind,
            title,
            message,
        }
    }
}

impl fmt::Display for ErrorNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.title, self.message)
    }
}

/// Holds the notice of the last captured failure until the next navigation.
#[derive(Debug, Clone, Default)]
pub struct ErrorBoundary {
    notice: Option<ErrorNotice>,
}

impl ErrorBoundary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure.
    pub fn capture(&mut self, err: &ConsoleError) {
        let notice = ErrorNotice::from_error(err);
        tracing::warn!(kind = ?notice.kind, "{err}");
        self.notice = Some(notice);
    }

    #[must_use]
    pub const fn notice(&self) -> Option<&ErrorNotice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.notice.is_some()
    }

    /// Called on navigation; the fallback goes away.
    pub fn clear(&mut self) {
        self.notice = None;
    }
}
