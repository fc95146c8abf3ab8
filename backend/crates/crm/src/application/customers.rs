//! Customer Use Cases
//!
//! CRUD over the customers relation. Uniqueness of phone number and email
//! is enforced by the store; violations surface as validation errors
//! carrying the store's constraint message.

use std::sync::Arc;

use crate::domain::entity::{Customer, CustomerFields};
use crate::domain::repository::CustomerRepository;
use crate::domain::value_object::CustomerId;
use crate::error::{CrmError, CrmResult};

/// Create customer use case
pub struct CreateCustomerUseCase<C>
where
    C: CustomerRepository,
{
    customer_repo: Arc<C>,
}

impl<C> CreateCustomerUseCase<C>
where
    C: CustomerRepository,
{
    pub fn new(customer_repo: Arc<C>) -> Self {
        Self { customer_repo }
    }

    pub async fn execute(&self, fields: CustomerFields) -> CrmResult<CustomerId> {
        let id = self.customer_repo.create_customer(&fields).await?;

        tracing::info!(customer_id = %id, "Customer created");

        Ok(id)
    }
}

/// List customers use case
pub struct ListCustomersUseCase<C>
where
    C: CustomerRepository,
{
    customer_repo: Arc<C>,
}

impl<C> ListCustomersUseCase<C>
where
    C: CustomerRepository,
{
    pub fn new(customer_repo: Arc<C>) -> Self {
        Self { customer_repo }
    }

    pub async fn execute(&self) -> CrmResult<Vec<Customer>> {
        self.customer_repo.list_customers().await
    }
}

/// Get customer use case
pub struct GetCustomerUseCase<C>
where
    C: CustomerRepository,
{
    customer_repo: Arc<C>,
}

impl<C> GetCustomerUseCase<C>
where
    C: CustomerRepository,
{
    pub fn new(customer_repo: Arc<C>) -> Self {
        Self { customer_repo }
    }

    pub async fn execute(&self, id: CustomerId) -> CrmResult<Customer> {
        self.customer_repo
            .find_customer_by_id(id)
            .await?
            .ok_or(CrmError::CustomerNotFound)
    }
}

/// Update customer use case (full-record replace)
pub struct UpdateCustomerUseCase<C>
where
    C: CustomerRepository,
{
    customer_repo: Arc<C>,
}

impl<C> UpdateCustomerUseCase<C>
where
    C: CustomerRepository,
{
    pub fn new(customer_repo: Arc<C>) -> Self {
        Self { customer_repo }
    }

    pub async fn execute(&self, id: CustomerId, fields: CustomerFields) -> CrmResult<()> {
        let affected = self.customer_repo.update_customer(id, &fields).await?;

        if affected == 0 {
            return Err(CrmError::CustomerNotFound);
        }

        tracing::info!(customer_id = %id, "Customer updated");

        Ok(())
    }
}

/// Delete customer use case
///
/// Owned addresses are removed by the store's cascade.
pub struct DeleteCustomerUseCase<C>
where
    C: CustomerRepository,
{
    customer_repo: Arc<C>,
}

impl<C> DeleteCustomerUseCase<C>
where
    C: CustomerRepository,
{
    pub fn new(customer_repo: Arc<C>) -> Self {
        Self { customer_repo }
    }

    pub async fn execute(&self, id: CustomerId) -> CrmResult<()> {
        let affected = self.customer_repo.delete_customer(id).await?;

        if affected == 0 {
            return Err(CrmError::CustomerNotFound);
        }

        tracing::info!(customer_id = %id, "Customer deleted");

        Ok(())
    }
}
