//! Application Configuration
//!
//! Configuration for the CRM application layer. All secret material is
//! injected here at process start; nothing is embedded in source.

use std::time::Duration;

use platform::token::TokenCodec;

/// Re-export the Argon2 cost knob so the binary can tune it from env
pub use platform::password::Argon2Cost;

/// CRM application configuration
#[derive(Debug, Clone)]
pub struct CrmConfig {
    /// HS256 secret for bearer token signing
    pub token_secret: Vec<u8>,
    /// Token lifetime (24 hours by default)
    pub token_ttl: Duration,
    /// Argon2id cost parameters
    pub argon2_cost: Argon2Cost,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Seed password for the reserved "admin" account
    pub seed_admin_password: String,
    /// Seed password for the reserved "user" account
    pub seed_user_password: String,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            token_secret: Vec::new(),
            token_ttl: Duration::from_secs(24 * 3600),
            argon2_cost: Argon2Cost::default(),
            password_pepper: None,
            seed_admin_password: "admin123".to_string(),
            seed_user_password: "user123".to_string(),
        }
    }
}

impl CrmConfig {
    /// Create config with a random token secret (for development).
    ///
    /// Tokens do not survive a restart with a random secret; production
    /// must inject stable secret material instead.
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Build a token codec over the configured secret and TTL
    pub fn token_codec(&self) -> TokenCodec {
        TokenCodec::new(&self.token_secret, self.token_ttl)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
