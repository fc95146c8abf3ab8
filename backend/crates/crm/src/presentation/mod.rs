//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::CrmAppState;
pub use middleware::{AuthGateState, AuthUser, require_admin, require_auth};
pub use router::{crm_router, crm_router_generic};
