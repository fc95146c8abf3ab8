//! Profile Use Cases
//!
//! Self-service over the authenticated user's own account. Any change
//! requires re-entry of the current password; the password hash never
//! leaves this layer.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::CrmConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, UserRole};
use crate::error::{CrmError, CrmResult};

/// Profile view returned to the caller. Carries no secret material.
pub struct ProfileView {
    pub id: UserId,
    pub username: String,
    pub role: UserRole,
}

/// Get profile use case
pub struct GetProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, id: UserId) -> CrmResult<ProfileView> {
        let user = self
            .user_repo
            .find_user_by_id(id)
            .await?
            .ok_or(CrmError::UserNotFound)?;

        Ok(ProfileView {
            id: user.id,
            username: user.username,
            role: user.role,
        })
    }
}

/// Update profile input
pub struct UpdateProfileInput {
    pub username: String,
    /// Re-entered current password; required for any change
    pub current_password: Option<String>,
    /// New password to set; subject to the password policy
    pub new_password: Option<String>,
}

/// Update profile use case
pub struct UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<CrmConfig>,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<CrmConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, id: UserId, input: UpdateProfileInput) -> CrmResult<()> {
        let current = match input.current_password.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => return Err(CrmError::CurrentPasswordRequired),
        };

        let user = self
            .user_repo
            .find_user_by_id(id)
            .await?
            .ok_or(CrmError::UserNotFound)?;

        let presented = ClearTextPassword::unchecked(current.to_string());
        if !user.password_hash.verify(&presented, self.config.pepper())? {
            return Err(CrmError::IncorrectPassword);
        }

        // Only a non-empty new password triggers a rehash; the policy
        // applies because this is the choose-a-password path
        let new_hash = match input.new_password.filter(|p| !p.is_empty()) {
            Some(raw) => {
                let password = ClearTextPassword::new(raw)?;
                Some(password.hash(&self.config.argon2_cost, self.config.pepper())?)
            }
            None => None,
        };

        let affected = self
            .user_repo
            .update_user_profile(id, &input.username, new_hash.as_ref())
            .await?;

        if affected == 0 {
            return Err(CrmError::UserNotFound);
        }

        tracing::info!(user_id = %id, "Profile updated");

        Ok(())
    }
}
