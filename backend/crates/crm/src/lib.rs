//! CRM (Customer Relationship Management) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Username + password login issuing signed bearer tokens
//! - Role-based access (admin, user); mutations are admin-only
//! - Customer CRUD with phone/email uniqueness
//! - Customer-owned addresses with cascade delete
//! - Profile self-service gated by current-password re-entry
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Bearer tokens signed HS256 with an injected secret; 24h expiry
//! - Store-level constraints back every uniqueness and ownership rule

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::CrmConfig;
pub use error::{CrmError, CrmResult};
pub use infra::sqlite::SqliteCrmRepository;
pub use presentation::router::crm_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::schema;
    pub use crate::infra::sqlite::SqliteCrmRepository as CrmStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

#[cfg(test)]
mod tests;
