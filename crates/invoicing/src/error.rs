use thiserror::Error;

use rentivo_pix::PixError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvoiceError {
    #[error("pix: {0}")]
    Pix(#[from] PixError),
}
