//! Well-known role names and the typed [`Role`].
//!
//! The string values must match the `role` column of the `profiles` table
//! and the `role` key written into auth metadata at signup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_INTERN: &str = "intern";

/// Signup without an explicit choice registers an intern.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Intern,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Intern => ROLE_INTERN,
        }
    }

    /// Capitalised name used in headings ("Sign in as Admin").
    pub fn display_name(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Intern => "Intern",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_INTERN => Ok(Role::Intern),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: {:?}",
                [ROLE_ADMIN, ROLE_INTERN]
            ))),
        }
    }
}
