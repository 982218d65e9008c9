//! PIX payment payloads.
//!
//! Builds static BR Code payloads (EMV TLV text closed by a CRC16 checksum)
//! and renders them as QR code PNGs.

pub mod crc;
pub mod error;
pub mod payload;
pub mod qr;
pub mod tlv;

pub use crc::{crc16_ccitt, crc16_hex};
pub use error::PixError;
pub use payload::{DEFAULT_TXID, PixRequest, encode, to_ascii, top_level_fields, verify};
pub use qr::{ErrorCorrection, MAX_IMAGE_SIDE, QrOptions, render_png};
pub use tlv::{PixField, PixValue};
