use thiserror::Error;

/// Failure to produce a BR Code payload or its QR image.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PixError {
    /// TLV lengths are two decimal digits, so a value may hold at most 99 bytes.
    #[error("field {tag} is {len} bytes long (max 99)")]
    FieldTooLong { tag: String, len: usize },

    /// BR Code payloads are plain ASCII.
    #[error("field {tag} contains non-ASCII characters")]
    NonAscii { tag: String },

    /// A payload did not parse as a TLV sequence.
    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("invalid QR options: {0}")]
    InvalidQrOptions(String),

    #[error("QR encoding failed: {0}")]
    QrEncoding(String),

    #[error("PNG encoding failed: {0}")]
    ImageEncoding(String),
}
