//! Configuration file loading and discovery.

use super::types::AppConfig;
use crate::model::Role;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".postdesk.yaml",
    ".postdesk.yml",
    "postdesk.yaml",
    "postdesk.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (`~/.config/postdesk/`)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir()
        && let Some(path) = find_config_in_dir(&config_dir.join("postdesk"))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

/// Settings given explicitly on the command line or in the environment.
///
/// Every field that is set replaces the loaded value, even when it equals
/// the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub offline: bool,
    pub page_size: Option<usize>,
    pub user_id: Option<u64>,
    pub role: Option<Role>,
}

impl AppConfig {
    /// Layer command-line overrides on top of this config.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = &overrides.base_url {
            self.remote.base_url.clone_from(url);
        }
        if overrides.offline {
            self.remote.offline = true;
        }
        if let Some(size) = overrides.page_size {
            self.table.page_size = size;
        }
        if let Some(id) = overrides.user_id {
            self.user.id = id;
        }
        if let Some(role) = overrides.role {
            self.user.role = role;
        }
    }

    /// Load from file and apply command-line overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.apply_overrides(overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file from the defaults.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# postdesk configuration
# Place this file at .postdesk.yaml in your working directory or ~/.config/postdesk/

{}",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# postdesk configuration file
# ============================
#
# Place it at:
#   - .postdesk.yaml in your working directory
#   - ~/.config/postdesk/postdesk.yaml for global config
#
# Command-line flags always override file settings.

remote:
  # REST API serving the post collection
  base_url: https://jsonplaceholder.typicode.com
  resource: posts
  timeout_secs: 30
  # Use built-in demo posts instead of the network
  offline: false

table:
  page_size: 10
  # Field searched by the search box; remove to search every field
  search_key: title
  # substring or regex
  match_mode: substring
  case_sensitive: false
  filter_label: Search by Title
  name: Post
  # Long text cells are cut after this many characters
  truncate_at: 30

user:
  id: 1
  email: reader@gmail.com
  # admin, editor, reader or none
  role: reader
"
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".postdesk.yaml");
        std::fs::write(&config_path, "table:\n  page_size: 5\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/postdesk.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_overrides_replace_loaded_values() {
        let mut base = AppConfig::default();
        base.table.page_size = 25;
        base.user.role = Role::Admin;
        base.user.id = 5;
        let overrides = ConfigOverrides {
            role: Some(Role::Reader),
            user_id: Some(1),
            ..ConfigOverrides::default()
        };

        base.apply_overrides(&overrides);

        assert_eq!(base.user.role, Role::Reader);
        assert_eq!(base.user.id, 1);
        // untouched by the override
        assert_eq!(base.table.page_size, 25);
    }

    #[test]
    fn test_full_example_parses_to_defaults() {
        let parsed: AppConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        let mut expected = AppConfig::default();
        expected.user.email = "reader@gmail.com".into();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("remote:"));
        assert!(example.contains("page_size"));
    }
}
