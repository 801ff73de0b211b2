//! Configuration validation for postdesk.

use super::types::{AppConfig, RemoteConfig, TableConfig, UserConfig};
use crate::model::{Role, post_columns};

// ============================================================================
// Configuration Error
// ============================================================================

/// A field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Dotted path of the field
    pub field: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.remote.validate());
        errors.extend(self.table.validate());
        errors.extend(self.user.validate());
        errors
    }
}

impl Validatable for RemoteConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            errors.push(ConfigError::new(
                "remote.base_url",
                format!("Expected an http(s) URL, got '{}'", self.base_url),
            ));
        }
        if self.resource.trim_matches('/').is_empty() {
            errors.push(ConfigError::new("remote.resource", "Resource must not be empty"));
        }
        if self.timeout_secs == 0 {
            errors.push(ConfigError::new(
                "remote.timeout_secs",
                "Timeout must be at least 1 second",
            ));
        }
        errors
    }
}

impl Validatable for TableConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.page_size == 0 {
            errors.push(ConfigError::new("table.page_size", "Page size must be at least 1"));
        }
        if self.truncate_at == 0 {
            errors.push(ConfigError::new(
                "table.truncate_at",
                "Truncation length must be at least 1",
            ));
        }
        if let Some(key) = &self.search_key {
            let columns = post_columns(self.truncate_at.max(1));
            let known: Vec<&str> = columns.iter().map(|c| c.key()).collect();
            if !known.contains(&key.as_str()) {
                errors.push(ConfigError::new(
                    "table.search_key",
                    format!(
                        "Unknown column '{key}'. Valid options: {}",
                        known.join(", ")
                    ),
                ));
            }
        }
        if self.name.trim().is_empty() {
            errors.push(ConfigError::new("table.name", "Item name must not be empty"));
        }
        errors
    }
}

impl Validatable for UserConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.role != Role::None && self.id == 0 {
            errors.push(ConfigError::new(
                "user.id",
                "A signed-in user needs a non-zero id",
            ));
        }
        if !self.email.is_empty() && !self.email.contains('@') {
            errors.push(ConfigError::new(
                "user.email",
                format!("'{}' is not an email address", self.email),
            ));
        }
        errors
    }
}
