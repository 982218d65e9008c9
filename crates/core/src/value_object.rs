//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are immutable: `Centavos(285000)` is the
/// same amount wherever it appears, and a `ReferenceMonth` of `2025-03` is the
/// same month on every bill. Bill line items are value objects too, which is
/// what lets a bill keep its rows after the template they came from changes.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
