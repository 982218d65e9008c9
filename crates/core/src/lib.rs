//! `rentivo-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! errors, identifiers, integer-centavo money and reference months.

pub mod error;
pub mod id;
pub mod money;
pub mod month;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::BillingItemId;
pub use money::{Centavos, format_brl, parse_brl, to_brl_input};
pub use month::{DUE_DATE_FORMAT, ReferenceMonth, format_due_date, parse_due_date};
pub use value_object::ValueObject;
