//! CRM Error Types
//!
//! This module provides domain-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// CRM-specific result type alias
pub type CrmResult<T> = Result<T, CrmError>;

/// CRM-specific error variants
#[derive(Debug, Error)]
pub enum CrmError {
    /// Unknown user or wrong password (never distinguished, to avoid
    /// user enumeration)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No bearer token presented
    #[error("Unauthorized")]
    Unauthorized,

    /// Token failed signature, format, or expiry verification
    #[error("Invalid token")]
    InvalidToken,

    /// Authenticated but not an admin
    #[error("Forbidden: Admins only")]
    Forbidden,

    /// Customer row not found
    #[error("Customer not found")]
    CustomerNotFound,

    /// Address row not found
    #[error("Address not found")]
    AddressNotFound,

    /// User row not found
    #[error("User not found")]
    UserNotFound,

    /// Profile update submitted without the current password
    #[error("Current password required")]
    CurrentPasswordRequired,

    /// Profile update with a wrong current password
    #[error("Current password is incorrect")]
    IncorrectPassword,

    /// Constraint violation or malformed input
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CrmError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 (not 401) for bad credentials: the login endpoint's wire
            // contract predates this implementation
            CrmError::InvalidCredentials => StatusCode::BAD_REQUEST,
            CrmError::Unauthorized | CrmError::InvalidToken => StatusCode::UNAUTHORIZED,
            CrmError::Forbidden => StatusCode::FORBIDDEN,
            CrmError::CustomerNotFound | CrmError::AddressNotFound => StatusCode::NOT_FOUND,
            CrmError::UserNotFound
            | CrmError::CurrentPasswordRequired
            | CrmError::IncorrectPassword
            | CrmError::Validation(_) => StatusCode::BAD_REQUEST,
            CrmError::Database(_) | CrmError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CrmError::InvalidCredentials => ErrorKind::BadRequest,
            CrmError::Unauthorized | CrmError::InvalidToken => ErrorKind::Unauthorized,
            CrmError::Forbidden => ErrorKind::Forbidden,
            CrmError::CustomerNotFound | CrmError::AddressNotFound => ErrorKind::NotFound,
            CrmError::UserNotFound
            | CrmError::CurrentPasswordRequired
            | CrmError::IncorrectPassword
            | CrmError::Validation(_) => ErrorKind::BadRequest,
            CrmError::Database(_) | CrmError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CrmError::Database(e) => {
                tracing::error!(error = %e, "CRM database error");
            }
            CrmError::Internal(msg) => {
                tracing::error!(message = %msg, "CRM internal error");
            }
            CrmError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            CrmError::InvalidToken => {
                tracing::warn!("Rejected invalid bearer token");
            }
            CrmError::Forbidden => {
                tracing::warn!("Non-admin attempted a mutating operation");
            }
            _ => {
                tracing::debug!(error = %self, "CRM error");
            }
        }
    }
}

impl IntoResponse for CrmError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<sqlx::Error> for CrmError {
    fn from(err: sqlx::Error) -> Self {
        // Constraint violations are client errors carrying the store's
        // message (duplicate phone/email, bad gender, broken FK). Anything
        // else is a server-side database failure.
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation
                | sqlx::error::ErrorKind::ForeignKeyViolation
                | sqlx::error::ErrorKind::NotNullViolation
                | sqlx::error::ErrorKind::CheckViolation => {
                    return CrmError::Validation(db_err.message().to_string());
                }
                _ => {}
            }
        }
        CrmError::Database(err)
    }
}

impl From<AppError> for CrmError {
    fn from(err: AppError) -> Self {
        CrmError::Internal(err.to_string())
    }
}

impl From<platform::token::TokenError> for CrmError {
    fn from(err: platform::token::TokenError) -> Self {
        match err {
            platform::token::TokenError::Signing(msg) => CrmError::Internal(msg),
            _ => CrmError::InvalidToken,
        }
    }
}

impl From<platform::password::PasswordHashError> for CrmError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        CrmError::Internal(err.to_string())
    }
}

impl From<platform::password::PasswordPolicyError> for CrmError {
    fn from(err: platform::password::PasswordPolicyError) -> Self {
        CrmError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CrmError::InvalidCredentials.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CrmError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            CrmError::InvalidToken.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(CrmError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            CrmError::CustomerNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CrmError::AddressNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CrmError::Validation("dup".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CrmError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            CrmError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
        assert_eq!(CrmError::Forbidden.to_string(), "Forbidden: Admins only");
        assert_eq!(
            CrmError::CustomerNotFound.to_string(),
            "Customer not found"
        );
        assert_eq!(
            CrmError::IncorrectPassword.to_string(),
            "Current password is incorrect"
        );
        assert_eq!(
            CrmError::Validation("UNIQUE constraint failed".into()).to_string(),
            "UNIQUE constraint failed"
        );
    }
}
