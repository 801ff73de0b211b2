//! Unified error types for postdesk.
//!
//! This module provides the error hierarchy shared by the table engine,
//! the collection sources and the console, with enough context to tell a
//! transport failure from a status failure from an access-denied refusal.

use crate::table::Permission;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for postdesk operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConsoleError {
    /// Errors talking to the collection source
    #[error("Collection source request failed: {context}")]
    Source {
        context: String,
        #[source]
        source: SourceErrorKind,
    },

    /// A mutating action was attempted without the required role
    #[error("Access denied: {action} is not permitted for role '{role}'")]
    AccessDenied { action: Permission, role: String },

    /// A mutation is already awaiting its response
    #[error("A submission is already in flight for this dialog")]
    MutationInFlight,

    /// The action needs a dialog that is not open
    #[error("No matching dialog is open: {0}")]
    NoDialog(String),

    /// A column key that the table does not declare
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    /// An item identity that is not present in the collection
    #[error("No item with id {0}")]
    UnknownItem(String),

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific collection source error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SourceErrorKind {
    /// The request never reached the server
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Server responded with status {code}: {reason}")]
    Status { code: u16, reason: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Coarse classification used by the error boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Status(u16),
    AccessDenied,
    Other,
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for postdesk operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ConsoleError {
    /// Create a source error with context
    pub fn source(context: impl Into<String>, source: SourceErrorKind) -> Self {
        Self::Source {
            context: context.into(),
            source,
        }
    }

    /// Create a transport error (no response reached the server)
    pub fn transport(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::source(context, SourceErrorKind::Transport(message.into()))
    }

    /// Create a status error from a non-success response
    pub fn status(context: impl Into<String>, code: u16, reason: impl Into<String>) -> Self {
        Self::source(
            context,
            SourceErrorKind::Status {
                code,
                reason: reason.into(),
            },
        )
    }

    /// Create an invalid-response error
    pub fn invalid_response(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::source(context, SourceErrorKind::InvalidResponse(message.into()))
    }

    /// Create an access-denied error for an action and role
    pub fn access_denied(action: Permission, role: impl Into<String>) -> Self {
        Self::AccessDenied {
            action,
            role: role.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Classify this error for the error boundary.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Source {
                source: SourceErrorKind::Transport(_),
                ..
            } => FailureKind::Transport,
            Self::Source {
                source: SourceErrorKind::Status { code, .. },
                ..
            } => FailureKind::Status(*code),
            Self::AccessDenied { .. } => FailureKind::AccessDenied,
            _ => FailureKind::Other,
        }
    }

    /// Whether this error is an access-denied refusal.
    #[must_use]
    pub const fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for ConsoleError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_response("JSON deserialization", err.to_string())
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// ```ignore
/// use postdesk::error::ErrorContext;
///
/// let posts = source.list().context("loading posts")?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    ///
    /// The context string is prepended to the error's existing context.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, only evaluated on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ConsoleError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: ConsoleError, new_ctx: &str) -> ConsoleError {
    match err {
        ConsoleError::Source {
            context: existing,
            source,
        } => ConsoleError::Source {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ConsoleError::Io {
            path,
            message,
            source,
        } => ConsoleError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        ConsoleError::Config(msg) => ConsoleError::Config(chain_context(new_ctx, &msg)),
        ConsoleError::Validation(msg) => ConsoleError::Validation(chain_context(new_ctx, &msg)),
        // Access and dialog errors carry their own message
        other => other,
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
