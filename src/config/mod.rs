//! Configuration module for postdesk.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets
//! - YAML config file loading and discovery
//! - Command-line flag merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use postdesk::config::{AppConfig, ConfigPreset};
//!
//! let config = AppConfig::from_preset(ConfigPreset::Offline);
//!
//! let config = AppConfig::builder()
//!     .page_size(20)
//!     .role(Role::Editor)
//!     .build();
//!
//! use postdesk::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.postdesk.yaml` file in your working directory or
//! `~/.config/postdesk/`:
//!
//! ```yaml
//! table:
//!   page_size: 20
//! user:
//!   id: 2
//!   role: editor
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    ConfigPreset, DEFAULT_BASE_URL, DEFAULT_FILTER_LABEL, DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_KEY,
    demo_users,
};
pub use types::{AppConfig, AppConfigBuilder, RemoteConfig, TableConfig, UserConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    ConfigFileError, ConfigOverrides, discover_config_file, generate_example_config,
    generate_full_example_config, load_config_file, load_or_default,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// The schema documents every option that can be set in `.postdesk.yaml`
/// and can be used by editors for validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
