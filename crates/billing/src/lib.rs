//! Billing domain module.
//!
//! Billing templates, monthly bills and the assembler that turns one into the
//! other, implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage).

pub mod assembler;
pub mod bill;
pub mod template;

pub use assembler::{ExtraCharge, VariableOverrides, assemble};
pub use bill::{Bill, BillLineItem, LineItemDraft, LineItemKind, PaymentStatus};
pub use template::{BillingItem, BillingItemKind, BillingTemplate};
