pub mod gender;
pub mod ids;
pub mod user_role;

pub use gender::Gender;
pub use ids::{AddressId, CustomerId, UserId};
pub use user_role::UserRole;
