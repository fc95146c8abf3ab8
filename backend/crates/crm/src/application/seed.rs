//! Seed Users Use Case
//!
//! Ensures the reserved "admin" and "user" accounts exist. Idempotent:
//! safe to run on every boot.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::CrmConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserRole;
use crate::error::CrmResult;

/// Seed users use case
pub struct SeedUsersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<CrmConfig>,
}

impl<U> SeedUsersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<CrmConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self) -> CrmResult<()> {
        let seeds = [
            ("admin", &self.config.seed_admin_password, UserRole::Admin),
            ("user", &self.config.seed_user_password, UserRole::User),
        ];

        for (username, password, role) in seeds {
            if self.user_repo.find_user_by_username(username).await?.is_some() {
                continue;
            }

            // Seed passwords come from config, not the choose-a-password
            // path, so the policy does not apply here
            let password = ClearTextPassword::unchecked(password.clone());
            let hash = password.hash(&self.config.argon2_cost, self.config.pepper())?;

            self.user_repo.create_user(username, &hash, role).await?;

            tracing::info!(username, role = %role, "Seeded {} account", username);
        }

        Ok(())
    }
}
