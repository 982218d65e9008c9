//! Invoice assembly.
//!
//! Pairs a [`rentivo_billing::Bill`] with its optional PIX payment section.
//! Document layout and storage happen downstream and are not part of this
//! crate.

pub mod config;
pub mod error;
pub mod record;

pub use config::PixSettings;
pub use error::InvoiceError;
pub use record::{InvoiceRecord, PixAttachment, effective_pix_key};
