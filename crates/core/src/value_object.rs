//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. Two lot keys with the same product, catalog number and lot
//! number name the same lot, no matter which row they were read from.

/// Marker trait for value objects.
///
/// The trait requires:
/// - **Clone**: value objects are copied freely between aggregation stages
/// - **PartialEq**: value objects are compared by their attribute values
/// - **Debug**: helpful for logging and tests
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct UsageKey {
///     product: String,
///     lot_number: String,
/// }
///
/// impl ValueObject for UsageKey {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
