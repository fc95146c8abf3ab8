//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::ProfileView;
use crate::domain::entity::{Address, Customer};

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
}

// ============================================================================
// Generic envelopes
// ============================================================================

/// Success envelope carrying data: `{"message":"success","data":...}`
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub message: &'static str,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            message: "success",
            data,
        }
    }
}

/// Success envelope with a message only
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Success envelope for creations, carrying the assigned id
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: i64,
}

// ============================================================================
// Customers
// ============================================================================

/// Customer create/update request body
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerPayload {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Gender code; validated against the allowed set before it reaches
    /// the store
    #[serde(default)]
    pub gender: Option<String>,
}

/// Customer record as returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct CustomerData {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub gender: Option<&'static str>,
}

impl From<Customer> for CustomerData {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.as_i64(),
            first_name: customer.first_name,
            last_name: customer.last_name,
            phone_number: customer.phone_number,
            email: customer.email,
            gender: customer.gender.map(|g| g.code()),
        }
    }
}

// ============================================================================
// Addresses
// ============================================================================

/// Address create request body
#[derive(Debug, Clone, Deserialize)]
pub struct AddressPayload {
    pub address_details: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

/// Address record as returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct AddressData {
    pub id: i64,
    pub customer_id: i64,
    pub address_details: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

impl From<Address> for AddressData {
    fn from(address: Address) -> Self {
        Self {
            id: address.id.as_i64(),
            customer_id: address.customer_id.as_i64(),
            address_details: address.address_details,
            city: address.city,
            state: address.state,
            pin_code: address.pin_code,
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Profile record as returned to clients; never carries the hash
#[derive(Debug, Clone, Serialize)]
pub struct ProfileData {
    pub id: i64,
    pub username: String,
    pub role: String,
}

impl From<ProfileView> for ProfileData {
    fn from(view: ProfileView) -> Self {
        Self {
            id: view.id.as_i64(),
            username: view.username,
            role: view.role.code().to_string(),
        }
    }
}

/// Profile update request body (camelCase, matching the web client)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub username: String,
    #[serde(default)]
    pub current_password: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}
