//! HTTP Handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};
use std::sync::Arc;

use crate::application::config::CrmConfig;
use crate::application::{
    CreateAddressUseCase, CreateCustomerUseCase, DeleteAddressUseCase, DeleteCustomerUseCase,
    GetCustomerUseCase, GetProfileUseCase, ListAddressesUseCase, ListCustomersUseCase, LoginInput,
    LoginUseCase, UpdateCustomerUseCase, UpdateProfileInput, UpdateProfileUseCase,
};
use crate::domain::entity::{AddressFields, CustomerFields};
use crate::domain::repository::{AddressRepository, CustomerRepository, UserRepository};
use crate::domain::value_object::{AddressId, CustomerId, Gender};
use crate::error::{CrmError, CrmResult};
use crate::presentation::dto::{
    AddressData, AddressPayload, CreatedResponse, CustomerData, CustomerPayload, DataResponse,
    LoginRequest, LoginResponse, MessageResponse, ProfileData, UpdateProfileRequest,
};
use crate::presentation::middleware::AuthUser;

/// Shared state for CRM handlers
#[derive(Clone)]
pub struct CrmAppState<R>
where
    R: UserRepository + CustomerRepository + AddressRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<CrmConfig>,
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/login
pub async fn login<R>(
    State(state): State<CrmAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> CrmResult<Json<LoginResponse>>
where
    R: UserRepository + CustomerRepository + AddressRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        role: output.role.code().to_string(),
    }))
}

// ============================================================================
// Customers
// ============================================================================

/// POST /api/customers (admin)
pub async fn create_customer<R>(
    State(state): State<CrmAppState<R>>,
    Json(req): Json<CustomerPayload>,
) -> CrmResult<Json<CreatedResponse>>
where
    R: UserRepository + CustomerRepository + AddressRepository + Clone + Send + Sync + 'static,
{
    let fields = customer_fields(req)?;

    let use_case = CreateCustomerUseCase::new(state.repo.clone());
    let id = use_case.execute(fields).await?;

    Ok(Json(CreatedResponse {
        message: "Customer created",
        id: id.as_i64(),
    }))
}

/// GET /api/customers
pub async fn list_customers<R>(
    State(state): State<CrmAppState<R>>,
) -> CrmResult<Json<DataResponse<Vec<CustomerData>>>>
where
    R: UserRepository + CustomerRepository + AddressRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListCustomersUseCase::new(state.repo.clone());
    let customers = use_case.execute().await?;

    Ok(Json(DataResponse::success(
        customers.into_iter().map(CustomerData::from).collect(),
    )))
}

/// GET /api/customers/{id}
pub async fn get_customer<R>(
    State(state): State<CrmAppState<R>>,
    Path(id): Path<i64>,
) -> CrmResult<Json<DataResponse<CustomerData>>>
where
    R: UserRepository + CustomerRepository + AddressRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetCustomerUseCase::new(state.repo.clone());
    let customer = use_case.execute(CustomerId::from_i64(id)).await?;

    Ok(Json(DataResponse::success(CustomerData::from(customer))))
}

/// PUT /api/customers/{id} (admin)
pub async fn update_customer<R>(
    State(state): State<CrmAppState<R>>,
    Path(id): Path<i64>,
    Json(req): Json<CustomerPayload>,
) -> CrmResult<Json<MessageResponse>>
where
    R: UserRepository + CustomerRepository + AddressRepository + Clone + Send + Sync + 'static,
{
    let fields = customer_fields(req)?;

    let use_case = UpdateCustomerUseCase::new(state.repo.clone());
    use_case.execute(CustomerId::from_i64(id), fields).await?;

    Ok(Json(MessageResponse {
        message: "Customer updated",
    }))
}

/// DELETE /api/customers/{id} (admin)
pub async fn delete_customer<R>(
    State(state): State<CrmAppState<R>>,
    Path(id): Path<i64>,
) -> CrmResult<Json<MessageResponse>>
where
    R: UserRepository + CustomerRepository + AddressRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeleteCustomerUseCase::new(state.repo.clone());
    use_case.execute(CustomerId::from_i64(id)).await?;

    Ok(Json(MessageResponse {
        message: "Customer deleted",
    }))
}

// ============================================================================
// Addresses
// ============================================================================

/// POST /api/customers/{id}/addresses (admin)
pub async fn add_address<R>(
    State(state): State<CrmAppState<R>>,
    Path(customer_id): Path<i64>,
    Json(req): Json<AddressPayload>,
) -> CrmResult<Json<CreatedResponse>>
where
    R: UserRepository + CustomerRepository + AddressRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreateAddressUseCase::new(state.repo.clone(), state.repo.clone());

    let fields = AddressFields {
        address_details: req.address_details,
        city: req.city,
        state: req.state,
        pin_code: req.pin_code,
    };

    let id = use_case
        .execute(CustomerId::from_i64(customer_id), fields)
        .await?;

    Ok(Json(CreatedResponse {
        message: "Address added",
        id: id.as_i64(),
    }))
}

/// GET /api/customers/{id}/addresses
pub async fn list_addresses<R>(
    State(state): State<CrmAppState<R>>,
    Path(customer_id): Path<i64>,
) -> CrmResult<Json<DataResponse<Vec<AddressData>>>>
where
    R: UserRepository + CustomerRepository + AddressRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListAddressesUseCase::new(state.repo.clone());
    let addresses = use_case.execute(CustomerId::from_i64(customer_id)).await?;

    Ok(Json(DataResponse::success(
        addresses.into_iter().map(AddressData::from).collect(),
    )))
}

/// DELETE /api/customers/{id}/addresses/{address_id} (admin)
pub async fn delete_address<R>(
    State(state): State<CrmAppState<R>>,
    Path((customer_id, address_id)): Path<(i64, i64)>,
) -> CrmResult<Json<MessageResponse>>
where
    R: UserRepository + CustomerRepository + AddressRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeleteAddressUseCase::new(state.repo.clone());
    use_case
        .execute(
            CustomerId::from_i64(customer_id),
            AddressId::from_i64(address_id),
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "Address deleted successfully",
    }))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/profile
pub async fn get_profile<R>(
    State(state): State<CrmAppState<R>>,
    Extension(auth_user): Extension<AuthUser>,
) -> CrmResult<Json<DataResponse<ProfileData>>>
where
    R: UserRepository + CustomerRepository + AddressRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetProfileUseCase::new(state.repo.clone());
    let view = use_case.execute(auth_user.id).await?;

    Ok(Json(DataResponse::success(ProfileData::from(view))))
}

/// PUT /api/profile
pub async fn update_profile<R>(
    State(state): State<CrmAppState<R>>,
    Extension(auth_user): Extension<AuthUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> CrmResult<Json<MessageResponse>>
where
    R: UserRepository + CustomerRepository + AddressRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateProfileUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(
            auth_user.id,
            UpdateProfileInput {
                username: req.username,
                current_password: req.current_password,
                new_password: req.new_password,
            },
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "Profile updated successfully",
    }))
}

// ============================================================================
// Helpers
// ============================================================================

fn customer_fields(req: CustomerPayload) -> CrmResult<CustomerFields> {
    let gender = req
        .gender
        .filter(|g| !g.is_empty())
        .map(|g| {
            Gender::parse(&g).ok_or_else(|| {
                CrmError::Validation("gender must be one of male, female, other".to_string())
            })
        })
        .transpose()?;

    Ok(CustomerFields {
        first_name: req.first_name,
        last_name: req.last_name,
        phone_number: req.phone_number,
        email: req.email.filter(|e| !e.is_empty()),
        gender,
    })
}
