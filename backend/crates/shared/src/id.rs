//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities. The underlying value is the
//! store-assigned auto-incrementing rowid, so IDs are never minted in
//! application code.

use std::fmt;
use std::marker::PhantomData;

/// Generic typed ID wrapper over an `i64` surrogate key.
///
/// Usage:
/// ```
/// use kernel::id::Id;
///
/// struct CustomerMarker;
/// type CustomerId = Id<CustomerMarker>;
///
/// let id = CustomerId::from_i64(1);
/// assert_eq!(id.as_i64(), 1);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Create from a store-assigned rowid.
    pub const fn from_i64(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying value.
    pub const fn as_i64(&self) -> i64 {
        self.value
    }
}

// Manual impls so the marker type does not need to derive anything.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestMarker;
    type TestId = Id<TestMarker>;

    #[test]
    fn test_roundtrip() {
        let id = TestId::from_i64(42);
        assert_eq!(id.as_i64(), 42);
        assert_eq!(i64::from(id), 42);
    }

    #[test]
    fn test_equality() {
        assert_eq!(TestId::from_i64(1), TestId::from_i64(1));
        assert_ne!(TestId::from_i64(1), TestId::from_i64(2));
    }

    #[test]
    fn test_display() {
        assert_eq!(TestId::from_i64(7).to_string(), "7");
        assert_eq!(format!("{:?}", TestId::from_i64(7)), "Id(7)");
    }
}
