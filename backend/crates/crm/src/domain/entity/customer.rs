//! Customer Entity

use crate::domain::value_object::{CustomerId, Gender};

/// Customer entity
#[derive(Debug, Clone)]
pub struct Customer {
    /// Store surrogate key
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    /// Unique, required
    pub phone_number: String,
    /// Unique, optional
    pub email: Option<String>,
    pub gender: Option<Gender>,
}

/// Field set for customer create and full-record update.
#[derive(Debug, Clone)]
pub struct CustomerFields {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub gender: Option<Gender>,
}
