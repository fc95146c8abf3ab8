use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of an authenticated user.
///
/// Only admins may mutate customer and address records; everyone
/// authenticated may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl UserRole {
    /// Wire/store code for this role.
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }

    /// Parse a role code.
    ///
    /// Fallible because codes also arrive from token claims, which are
    /// untrusted until signature-verified and may still be stale.
    #[inline]
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "admin" => Some(UserRole::Admin),
            "user" => Some(UserRole::User),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
