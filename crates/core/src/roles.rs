//! Organization role hierarchy.
//!
//! Role names travel in the `role` claim of the identity provider's access
//! token and must match the values below.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_MEMBER: &str = "member";
pub const ROLE_HOD: &str = "hod";
pub const ROLE_SUB_ADMIN: &str = "sub_admin";
pub const ROLE_ADMIN: &str = "admin";

/// All valid role names, lowest rank first.
pub const VALID_ROLES: &[&str] = &[ROLE_MEMBER, ROLE_HOD, ROLE_SUB_ADMIN, ROLE_ADMIN];

/// A user's position in the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Member,
    Hod,
    SubAdmin,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Member => ROLE_MEMBER,
            Role::Hod => ROLE_HOD,
            Role::SubAdmin => ROLE_SUB_ADMIN,
            Role::Admin => ROLE_ADMIN,
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
            ROLE_MEMBER => Ok(Role::Member),
            ROLE_HOD => Ok(Role::Hod),
            ROLE_SUB_ADMIN => Ok(Role::SubAdmin),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!(
                "Unknown role '{other}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }
}
