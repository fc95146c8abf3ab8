//! Address Use Cases
//!
//! Addresses are owned by exactly one customer. Creation verifies the
//! parent exists before inserting; the store's foreign key (enforced on
//! every connection) is the backstop, not the primary check.

use std::sync::Arc;

use crate::domain::entity::{Address, AddressFields};
use crate::domain::repository::{AddressRepository, CustomerRepository};
use crate::domain::value_object::{AddressId, CustomerId};
use crate::error::{CrmError, CrmResult};

/// Create address use case
pub struct CreateAddressUseCase<C, A>
where
    C: CustomerRepository,
    A: AddressRepository,
{
    customer_repo: Arc<C>,
    address_repo: Arc<A>,
}

impl<C, A> CreateAddressUseCase<C, A>
where
    C: CustomerRepository,
    A: AddressRepository,
{
    pub fn new(customer_repo: Arc<C>, address_repo: Arc<A>) -> Self {
        Self {
            customer_repo,
            address_repo,
        }
    }

    pub async fn execute(
        &self,
        customer_id: CustomerId,
        fields: AddressFields,
    ) -> CrmResult<AddressId> {
        if !self.customer_repo.customer_exists(customer_id).await? {
            return Err(CrmError::CustomerNotFound);
        }

        let id = self.address_repo.create_address(customer_id, &fields).await?;

        tracing::info!(customer_id = %customer_id, address_id = %id, "Address added");

        Ok(id)
    }
}

/// List addresses use case
pub struct ListAddressesUseCase<A>
where
    A: AddressRepository,
{
    address_repo: Arc<A>,
}

impl<A> ListAddressesUseCase<A>
where
    A: AddressRepository,
{
    pub fn new(address_repo: Arc<A>) -> Self {
        Self { address_repo }
    }

    pub async fn execute(&self, customer_id: CustomerId) -> CrmResult<Vec<Address>> {
        // An unknown customer simply has no addresses; not an error
        self.address_repo.list_addresses_by_customer(customer_id).await
    }
}

/// Delete address use case
///
/// Scoped to the owning customer so the route cannot delete another
/// customer's address.
pub struct DeleteAddressUseCase<A>
where
    A: AddressRepository,
{
    address_repo: Arc<A>,
}

impl<A> DeleteAddressUseCase<A>
where
    A: AddressRepository,
{
    pub fn new(address_repo: Arc<A>) -> Self {
        Self { address_repo }
    }

    pub async fn execute(&self, customer_id: CustomerId, address_id: AddressId) -> CrmResult<()> {
        let affected = self
            .address_repo
            .delete_address(customer_id, address_id)
            .await?;

        if affected == 0 {
            return Err(CrmError::AddressNotFound);
        }

        tracing::info!(customer_id = %customer_id, address_id = %address_id, "Address deleted");

        Ok(())
    }
}
