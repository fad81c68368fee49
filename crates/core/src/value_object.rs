//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Prices and order-line attribute records are value objects: they have no
/// identity of their own and are compared field by field.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Price {
///     value: i64,
///     currency: String,
/// }
///
/// impl ValueObject for Price {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
