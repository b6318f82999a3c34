//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dashboard role (closed set, every access decision matches on it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Distributor,
    Manager,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::SuperAdmin, Role::Admin, Role::Distributor, Role::Manager];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Distributor => "distributor",
            Role::Manager => "manager",
        }
    }

    /// Whether the role administers every distributor rather than its own
    pub fn is_platform_staff(&self) -> bool {
        match self {
            Role::SuperAdmin | Role::Admin => true,
            Role::Distributor | Role::Manager => false,
        }
    }

    /// Landing page after login
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::SuperAdmin | Role::Admin | Role::Manager => "/",
            Role::Distributor => "/distributor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown role string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
