//! User Entity
//!
//! Account record used for authentication and profile self-service.

use platform::password::HashedPassword;

use crate::domain::value_object::{UserId, UserRole};

/// User entity
///
/// The password hash never leaves the domain: profile reads expose only
/// id, username and role.
#[derive(Debug, Clone)]
pub struct User {
    /// Store surrogate key
    pub id: UserId,
    /// Login name (unique)
    pub username: String,
    /// Argon2id PHC hash
    pub password_hash: HashedPassword,
    /// Role (admin or user)
    pub role: UserRole,
}
