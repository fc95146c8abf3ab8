//! Application Layer
//!
//! Use cases and application services.

pub mod addresses;
pub mod config;
pub mod customers;
pub mod login;
pub mod profile;
pub mod seed;

// Re-exports
pub use addresses::{CreateAddressUseCase, DeleteAddressUseCase, ListAddressesUseCase};
pub use config::CrmConfig;
pub use customers::{
    CreateCustomerUseCase, DeleteCustomerUseCase, GetCustomerUseCase, ListCustomersUseCase,
    UpdateCustomerUseCase,
};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use profile::{GetProfileUseCase, ProfileView, UpdateProfileInput, UpdateProfileUseCase};
pub use seed::SeedUsersUseCase;
