//! Users and roles.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Role of the signed-in user.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Create, edit and delete
    Admin,
    /// Edit only
    Editor,
    /// Read only
    Reader,
    /// Nobody is signed in
    #[default]
    None,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Editor => write!(f, "editor"),
            Self::Reader => write!(f, "reader"),
            Self::None => write!(f, "none"),
        }
    }
}

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Numeric id, written as the owner of posts this user saves
    pub id: u64,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn new(id: u64, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            email: email.into(),
            role,
        }
    }
}

/// Anything that can report the current user's role.
pub trait RoleProvider {
    fn current_role(&self) -> Role;
}

impl RoleProvider for User {
    fn current_role(&self) -> Role {
        self.role
    }
}

impl RoleProvider for Option<User> {
    fn current_role(&self) -> Role {
        self.as_ref().map_or(Role::None, |user| user.role)
    }
}

impl RoleProvider for Role {
    fn current_role(&self) -> Role {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_provider() {
        let user = User::new(1, "admin@example.com", Role::Admin);
        assert_eq!(user.current_role(), Role::Admin);
        assert_eq!(Some(user).current_role(), Role::Admin);
        assert_eq!(None::<User>.current_role(), Role::None);
    }

    #[test]
    fn test_role_serde() {
        let role: Role = serde_json::from_str("\"editor\"").unwrap();
        assert_eq!(role, Role::Editor);
        assert_eq!(serde_json::to_string(&Role::Reader).unwrap(), "\"reader\"");
        assert_eq!(Role::default().to_string(), "none");
    }
}
