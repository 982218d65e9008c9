//! Static PIX "BR Code" payloads.
//!
//! Field order is fixed by the BCB/EMV specification and must not change:
//! third-party banking apps parse the text byte for byte.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use rentivo_core::Centavos;

use crate::crc::crc16_hex;
use crate::error::PixError;
use crate::tlv::{PixField, decode_fields, encode_fields};

pub const PIX_GUI: &str = "br.gov.bcb.pix";
/// Placeholder transaction id of a static payload.
pub const DEFAULT_TXID: &str = "***";
pub const MERCHANT_NAME_MAX: usize = 25;
pub const MERCHANT_CITY_MAX: usize = 15;

const CRC_PREFIX: &str = "6304";

/// Everything needed to build one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixRequest {
    pub pix_key: String,
    pub merchant_name: String,
    pub merchant_city: String,
    /// `None` or zero produces an open-amount payload.
    pub amount: Option<Centavos>,
    pub txid: String,
}

impl PixRequest {
    pub fn new(
        pix_key: impl Into<String>,
        merchant_name: impl Into<String>,
        merchant_city: impl Into<String>,
    ) -> Self {
        Self {
            pix_key: pix_key.into(),
            merchant_name: merchant_name.into(),
            merchant_city: merchant_city.into(),
            amount: None,
            txid: DEFAULT_TXID.to_string(),
        }
    }

    pub fn with_amount(mut self, amount: Centavos) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_txid(mut self, txid: impl Into<String>) -> Self {
        self.txid = txid.into();
        self
    }
}

/// Build the BR Code text, CRC included.
pub fn encode(request: &PixRequest) -> Result<String, PixError> {
    let mut fields = vec![
        PixField::text("00", "01"),
        PixField::nested(
            "26",
            vec![
                PixField::text("00", PIX_GUI),
                PixField::text("01", request.pix_key.as_str()),
            ],
        ),
        PixField::text("52", "0000"),
        PixField::text("53", "986"),
    ];

    if let Some(amount) = request.amount.filter(|amount| !amount.is_zero()) {
        fields.push(PixField::text("54", amount.to_decimal_string()));
    }

    fields.extend([
        PixField::text("58", "BR"),
        PixField::text(
            "59",
            truncate_chars(&to_ascii(&request.merchant_name), MERCHANT_NAME_MAX),
        ),
        PixField::text(
            "60",
            truncate_chars(&to_ascii(&request.merchant_city), MERCHANT_CITY_MAX),
        ),
        PixField::nested("62", vec![PixField::text("05", request.txid.as_str())]),
    ]);

    let mut payload = encode_fields(&fields)?;
    payload.push_str(CRC_PREFIX);
    let crc = crc16_hex(payload.as_bytes());
    payload.push_str(&crc);

    tracing::debug!(len = payload.len(), "pix payload encoded");
    Ok(payload)
}

/// Check the trailing `6304XXXX` checksum of a payload.
pub fn verify(payload: &str) -> bool {
    if !payload.is_ascii() || payload.len() < 8 {
        return false;
    }
    let (body, crc) = payload.split_at(payload.len() - 4);
    body.ends_with(CRC_PREFIX) && crc16_hex(body.as_bytes()) == crc
}

/// Top-level `(tag, value)` pairs of a payload, checksum field included.
pub fn top_level_fields(payload: &str) -> Result<Vec<(String, String)>, PixError> {
    decode_fields(payload)
}

/// Decompose to NFKD, drop combining marks and anything still outside ASCII:
/// `"São Paulo" -> "Sao Paulo"`.
pub fn to_ascii(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(char::is_ascii)
        .collect()
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
