//! Typed record IDs
//!
//! Store-assigned surrogate keys, one marker per relation so a customer id
//! can never be passed where an address id is expected.

use kernel::id::Id;

pub struct UserMarker;
pub type UserId = Id<UserMarker>;

pub struct CustomerMarker;
pub type CustomerId = Id<CustomerMarker>;

pub struct AddressMarker;
pub type AddressId = Id<AddressMarker>;
