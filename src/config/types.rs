//! Configuration types for postdesk.

use crate::error::{ConsoleError, Result};
use crate::model::{Role, User};
use crate::table::{MatchMode, TableOptions, TextMatcher};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::time::Duration;

use super::defaults;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration, loaded from a config file and
/// overridden by command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Where posts come from
    pub remote: RemoteConfig,
    /// How the post table searches, filters and pages
    pub table: TableConfig,
    /// The signed-in user
    pub user: UserConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.remote.base_url = url.into();
        self
    }

    pub const fn offline(mut self, offline: bool) -> Self {
        self.config.remote.offline = offline;
        self
    }

    pub const fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.remote.timeout_secs = secs;
        self
    }

    pub const fn page_size(mut self, size: usize) -> Self {
        self.config.table.page_size = size;
        self
    }

    pub fn search_key(mut self, key: Option<String>) -> Self {
        self.config.table.search_key = key;
        self
    }

    pub const fn match_mode(mut self, mode: MatchMode) -> Self {
        self.config.table.match_mode = mode;
        self
    }

    pub const fn case_sensitive(mut self, yes: bool) -> Self {
        self.config.table.case_sensitive = yes;
        self
    }

    pub const fn user_id(mut self, id: u64) -> Self {
        self.config.user.id = id;
        self
    }

    pub const fn role(mut self, role: Role) -> Self {
        self.config.user.role = role;
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Collection source settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the REST API
    pub base_url: String,
    /// Collection path under the base URL
    pub resource: String,
    /// Request timeout in seconds
    #[schemars(range(min = 1))]
    pub timeout_secs: u64,
    /// Use built-in demo data instead of the network
    pub offline: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_BASE_URL.to_string(),
            resource: defaults::DEFAULT_RESOURCE.to_string(),
            timeout_secs: defaults::DEFAULT_TIMEOUT_SECS,
            offline: false,
        }
    }
}

impl RemoteConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Settings for the HTTP collection source.
    #[cfg(feature = "remote")]
    #[must_use]
    pub fn to_source_config(&self) -> crate::source::HttpSourceConfig {
        crate::source::HttpSourceConfig {
            base_url: self.base_url.clone(),
            resource: self.resource.clone(),
            timeout: self.timeout(),
        }
    }
}

/// Post table settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page
    #[schemars(range(min = 1))]
    pub page_size: usize,
    /// Field the search box looks at; omit to search every field
    pub search_key: Option<String>,
    /// Free-text matching: substring or regex
    pub match_mode: MatchMode,
    /// Match case exactly
    pub case_sensitive: bool,
    /// Search box label
    pub filter_label: String,
    /// Display name of one item
    pub name: String,
    /// Characters shown for long text cells
    #[schemars(range(min = 1))]
    pub truncate_at: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::DEFAULT_PAGE_SIZE,
            search_key: Some(defaults::DEFAULT_SEARCH_KEY.to_string()),
            match_mode: MatchMode::Substring,
            case_sensitive: false,
            filter_label: defaults::DEFAULT_FILTER_LABEL.to_string(),
            name: defaults::DEFAULT_ITEM_NAME.to_string(),
            truncate_at: crate::model::MAX_CHARS_PER_COLUMN,
        }
    }
}

impl TableConfig {
    #[must_use]
    pub const fn matcher(&self) -> TextMatcher {
        TextMatcher::new(self.match_mode, self.case_sensitive)
    }

    /// Table construction options.
    pub fn to_options(&self) -> Result<TableOptions> {
        let page_size = NonZeroUsize::new(self.page_size)
            .ok_or_else(|| ConsoleError::config("table.page_size must be at least 1"))?;
        Ok(TableOptions::default()
            .with_page_size(page_size)
            .with_search_key(self.search_key.clone())
            .with_filter_label(self.filter_label.clone())
            .with_name(self.name.clone())
            .with_matcher(self.matcher()))
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct UserConfig {
    /// Written as the owner of saved posts
    pub id: u64,
    pub email: String,
    /// `none` means nobody is signed in
    pub role: Role,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            id: defaults::DEFAULT_USER_ID,
            email: String::new(),
            role: Role::Reader,
        }
    }
}

impl UserConfig {
    /// The configured user; `None` when the role is `none`.
    #[must_use]
    pub fn to_user(&self) -> Option<User> {
        (self.role != Role::None).then(|| User::new(self.id, self.email.clone(), self.role))
    }
}
