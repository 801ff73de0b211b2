//! Default values and presets for postdesk.

use super::types::{AppConfig, RemoteConfig, TableConfig, UserConfig};
use crate::model::{Role, User};
use crate::table::MatchMode;

// ============================================================================
// Default values
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_RESOURCE: &str = "posts";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_SEARCH_KEY: &str = "title";
pub const DEFAULT_FILTER_LABEL: &str = "Search by Title";
pub const DEFAULT_ITEM_NAME: &str = "Post";
pub const DEFAULT_USER_ID: u64 = 1;

/// Base URL of a local `json-server` instance.
pub const LOCAL_BASE_URL: &str = "http://localhost:3000";

/// The demo accounts: one per role.
#[must_use]
pub fn demo_users() -> Vec<User> {
    vec![
        User::new(1, "admin@gmail.com", Role::Admin),
        User::new(2, "editor@gmail.com", Role::Editor),
        User::new(3, "reader@gmail.com", Role::Reader),
    ]
}

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Public demo API, substring search on titles
    Default,
    /// A `json-server` on localhost
    Local,
    /// Built-in demo data, signed in as the admin
    Offline,
    /// Case-sensitive regex search over every field
    Strict,
}

impl ConfigPreset {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Local => "local",
            Self::Offline => "offline",
            Self::Strict => "strict",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "local" | "json-server" => Some(Self::Local),
            "offline" | "demo" => Some(Self::Offline),
            "strict" | "regex" => Some(Self::Strict),
            _ => None,
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Local, Self::Offline, Self::Strict]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Local => Self {
                remote: RemoteConfig {
                    base_url: LOCAL_BASE_URL.to_string(),
                    ..RemoteConfig::default()
                },
                ..Self::default()
            },
            ConfigPreset::Offline => Self {
                remote: RemoteConfig {
                    offline: true,
                    ..RemoteConfig::default()
                },
                user: UserConfig {
                    id: 1,
                    email: "admin@gmail.com".to_string(),
                    role: Role::Admin,
                },
                ..Self::default()
            },
            ConfigPreset::Strict => Self {
                table: TableConfig {
                    search_key: None,
                    match_mode: MatchMode::Regex,
                    case_sensitive: true,
                    filter_label: "Search".to_string(),
                    ..TableConfig::default()
                },
                ..Self::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
        }
        assert_eq!(ConfigPreset::from_name("demo"), Some(ConfigPreset::Offline));
        assert_eq!(ConfigPreset::from_name("nope"), None);
    }

    #[test]
    fn test_offline_preset_signs_in_admin() {
        let config = AppConfig::from_preset(ConfigPreset::Offline);
        assert!(config.remote.offline);
        assert_eq!(config.user.role, Role::Admin);
    }

    #[test]
    fn test_demo_users_cover_roles() {
        let roles: Vec<Role> = demo_users().iter().map(|u| u.role).collect();
        assert_eq!(roles, vec![Role::Admin, Role::Editor, Role::Reader]);
    }
}
