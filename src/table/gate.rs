//! Role gate for mutating actions.
//!
//! | role   | create | edit | delete |
//! |--------|--------|------|--------|
//! | admin  | yes    | yes  | yes    |
//! | editor | no     | yes  | no     |
//! | reader | no     | no   | no     |
//! | none   | no     | no   | no     |

use crate::error::{ConsoleError, Result};
use crate::model::Role;
use serde::{Deserialize, Serialize};

/// A mutating action guarded by the role gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Create,
    Edit,
    Delete,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Edit => write!(f, "edit"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

#[must_use]
pub const fn can_create(role: Role) -> bool {
    matches!(role, Role::Admin)
}

#[must_use]
pub const fn can_edit(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Editor)
}

#[must_use]
pub const fn can_delete(role: Role) -> bool {
    matches!(role, Role::Admin)
}

/// Whether `role` holds `permission`.
#[must_use]
pub const fn allows(role: Role, permission: Permission) -> bool {
    match permission {
        Permission::Create => can_create(role),
        Permission::Edit => can_edit(role),
        Permission::Delete => can_delete(role),
    }
}

/// Fail with `AccessDenied` unless `role` holds `permission`.
pub fn require(role: Role, permission: Permission) -> Result<()> {
    if allows(role, permission) {
        Ok(())
    } else {
        tracing::warn!(%role, %permission, "Access denied");
        Err(ConsoleError::access_denied(permission, role.to_string()))
    }
}

/// Which mutating controls a role sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Affordances {
    pub new: bool,
    pub edit: bool,
    pub delete: bool,
}

impl Affordances {
    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        Self {
            new: can_create(role),
            edit: can_edit(role),
            delete: can_delete(role),
        }
    }

    /// Whether any row-level control is shown.
    #[must_use]
    pub const fn has_row_actions(&self) -> bool {
        self.edit || self.delete
    }
}
