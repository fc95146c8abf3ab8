//! Address Entity
//!
//! Owned exclusively by one customer; deleting the customer cascades here.

use crate::domain::value_object::{AddressId, CustomerId};

/// Address entity
#[derive(Debug, Clone)]
pub struct Address {
    /// Store surrogate key
    pub id: AddressId,
    /// Owning customer
    pub customer_id: CustomerId,
    pub address_details: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

/// Field set for address creation. Addresses have no update operation.
#[derive(Debug, Clone)]
pub struct AddressFields {
    pub address_details: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}
