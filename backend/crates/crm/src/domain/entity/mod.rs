pub mod address;
pub mod customer;
pub mod user;

pub use address::{Address, AddressFields};
pub use customer::{Customer, CustomerFields};
pub use user::User;
