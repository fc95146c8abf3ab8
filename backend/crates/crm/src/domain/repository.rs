//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in the infrastructure
//! layer. Handlers receive a repository through these traits, so tests can
//! substitute an in-memory store through the same seam.

use platform::password::HashedPassword;

use crate::domain::entity::{Address, AddressFields, Customer, CustomerFields, User};
use crate::domain::value_object::{AddressId, CustomerId, UserId, UserRole};
use crate::error::CrmResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user, returning the assigned id
    async fn create_user(
        &self,
        username: &str,
        password_hash: &HashedPassword,
        role: UserRole,
    ) -> CrmResult<UserId>;

    /// Find user by ID
    async fn find_user_by_id(&self, id: UserId) -> CrmResult<Option<User>>;

    /// Find user by username
    async fn find_user_by_username(&self, username: &str) -> CrmResult<Option<User>>;

    /// Update username and, when supplied, the password hash.
    /// Returns the number of affected rows.
    async fn update_user_profile(
        &self,
        id: UserId,
        username: &str,
        password_hash: Option<&HashedPassword>,
    ) -> CrmResult<u64>;
}

/// Customer repository trait
#[trait_variant::make(CustomerRepository: Send)]
pub trait LocalCustomerRepository {
    /// Insert a new customer, returning the assigned id
    async fn create_customer(&self, fields: &CustomerFields) -> CrmResult<CustomerId>;

    /// All customers, no pagination, insertion order not guaranteed
    async fn list_customers(&self) -> CrmResult<Vec<Customer>>;

    /// Find customer by ID
    async fn find_customer_by_id(&self, id: CustomerId) -> CrmResult<Option<Customer>>;

    /// Full-record replace. Returns the number of affected rows.
    async fn update_customer(&self, id: CustomerId, fields: &CustomerFields) -> CrmResult<u64>;

    /// Delete the customer; owned addresses go with it by cascade.
    /// Returns the number of affected rows.
    async fn delete_customer(&self, id: CustomerId) -> CrmResult<u64>;

    /// Whether a customer row exists
    async fn customer_exists(&self, id: CustomerId) -> CrmResult<bool>;
}

/// Address repository trait
#[trait_variant::make(AddressRepository: Send)]
pub trait LocalAddressRepository {
    /// Insert an address for a customer, returning the assigned id
    async fn create_address(
        &self,
        customer_id: CustomerId,
        fields: &AddressFields,
    ) -> CrmResult<AddressId>;

    /// All addresses owned by a customer; empty is not an error
    async fn list_addresses_by_customer(&self, customer_id: CustomerId)
    -> CrmResult<Vec<Address>>;

    /// Delete one address, scoped to its owning customer.
    /// Returns the number of affected rows.
    async fn delete_address(
        &self,
        customer_id: CustomerId,
        address_id: AddressId,
    ) -> CrmResult<u64>;
}
