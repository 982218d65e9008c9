//! PNG rendering of a payload as a QR symbol.
//!
//! Symbol construction is left to the `qrcode` crate; this module only fixes
//! the defaults (medium error correction, 2-module border, 10px modules) and
//! rasterizes the module grid.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageOutputFormat, Luma};
use qrcode::types::Color;
use qrcode::{EcLevel, QrCode};

use crate::error::PixError;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Largest image side, in pixels, `render_png` will allocate.
pub const MAX_IMAGE_SIDE: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCorrection {
    Low,
    Medium,
    Quartile,
    High,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrOptions {
    /// Pixels per module side.
    pub box_size: u32,
    /// Quiet zone width, in modules.
    pub border: u32,
    pub error_correction: ErrorCorrection,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            box_size: 10,
            border: 2,
            error_correction: ErrorCorrection::Medium,
        }
    }
}

/// Render `payload` as a black-on-white PNG.
pub fn render_png(payload: &str, options: &QrOptions) -> Result<Vec<u8>, PixError> {
    if options.box_size == 0 {
        return Err(PixError::InvalidQrOptions("box_size must be at least 1".to_string()));
    }

    let code = QrCode::with_error_correction_level(payload.as_bytes(), options.error_correction.into())
        .map_err(|e| PixError::QrEncoding(e.to_string()))?;

    let modules = u32::try_from(code.width())
        .map_err(|_| PixError::QrEncoding("symbol too large".to_string()))?;
    let side = options
        .border
        .checked_mul(2)
        .and_then(|quiet| quiet.checked_add(modules))
        .and_then(|span| span.checked_mul(options.box_size))
        .filter(|side| *side <= MAX_IMAGE_SIDE)
        .ok_or_else(|| {
            PixError::InvalidQrOptions(format!(
                "image side exceeds {MAX_IMAGE_SIDE}px (box_size {}, border {})",
                options.box_size, options.border
            ))
        })?;
    let mut img = GrayImage::from_pixel(side, side, LIGHT);

    for (i, color) in code.to_colors().iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let i = i as u32;
        let px = (i % modules + options.border) * options.box_size;
        let py = (i / modules + options.border) * options.box_size;
        for dy in 0..options.box_size {
            for dx in 0..options.box_size {
                img.put_pixel(px + dx, py + dy, DARK);
            }
        }
    }

    let mut buffer = Vec::new();
    DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut buffer), ImageOutputFormat::Png)
        .map_err(|e| PixError::ImageEncoding(e.to_string()))?;

    tracing::debug!(bytes = buffer.len(), modules, "pix qr rendered");
    Ok(buffer)
}
