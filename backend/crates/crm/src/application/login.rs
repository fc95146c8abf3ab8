//! Login Use Case
//!
//! Authenticates a user and issues a signed bearer token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::CrmConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserRole;
use crate::error::{CrmError, CrmResult};

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed bearer token carrying {sub, role, iat, exp}
    pub token: String,
    pub role: UserRole,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<CrmConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<CrmConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> CrmResult<LoginOutput> {
        // Missing user and wrong password collapse into the same error
        let user = self
            .user_repo
            .find_user_by_username(&input.username)
            .await?
            .ok_or(CrmError::InvalidCredentials)?;

        // No policy check on presented passwords; only normalization
        let password = ClearTextPassword::unchecked(input.password);

        let password_valid = user
            .password_hash
            .verify(&password, self.config.pepper())?;

        if !password_valid {
            return Err(CrmError::InvalidCredentials);
        }

        let token = self
            .config
            .token_codec()
            .issue(user.id.as_i64(), user.role.code())?;

        tracing::info!(username = %user.username, role = %user.role, "User logged in");

        Ok(LoginOutput {
            token,
            role: user.role,
        })
    }
}
