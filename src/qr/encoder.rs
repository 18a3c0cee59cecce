//! QR code encoder

use crate::error::{Error, Result};
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use qrcode::{EcLevel, QrCode, Version};

/// Pixels per QR module before resizing
pub const MODULE_PIXELS: u32 = 10;

/// Low error correction keeps short URLs in the smallest symbol
const ECC_LEVEL: EcLevel = EcLevel::L;

/// QR code encoder
///
/// Prefers the smallest symbol (version 1) and grows only when the payload
/// does not fit. Each module is drawn as a square tile, the quiet zone is
/// kept, and the result is resampled with Lanczos3 to the requested size.
#[derive(Debug, Clone)]
pub struct QrEncoder {
    module_pixels: u32,
}

impl QrEncoder {
    /// Create a new QR encoder with low error correction and 10px modules
    pub fn new() -> Self {
        Self {
            module_pixels: MODULE_PIXELS,
        }
    }

    /// Build the QR matrix for `data`.
    pub fn matrix(&self, data: &[u8]) -> Result<QrCode> {
        match QrCode::with_version(data, Version::Normal(1), ECC_LEVEL) {
            Ok(code) => Ok(code),
            Err(_) => {
                let code = QrCode::with_error_correction_level(data, ECC_LEVEL)
                    .map_err(|e| Error::QrEncode(format!("Failed to create QR code: {}", e)))?;
                tracing::debug!(
                    version = ?code.version(),
                    bytes = data.len(),
                    "Payload exceeds version 1, using larger symbol"
                );
                Ok(code)
            }
        }
    }

    /// Rasterize a matrix at the encoder's module size, quiet zone included.
    pub fn rasterize(&self, code: &QrCode) -> GrayImage {
        code.render::<Luma<u8>>()
            .quiet_zone(true)
            .module_dimensions(self.module_pixels, self.module_pixels)
            .build()
    }

    /// Encode a string and resize the rendered code to `size` x `size` pixels.
    pub fn encode_string(&self, data: &str, size: u32) -> Result<GrayImage> {
        let code = self.matrix(data.as_bytes())?;
        let tiles = self.rasterize(&code);
        Ok(imageops::resize(&tiles, size, size, FilterType::Lanczos3))
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_payload_uses_version_1() {
        let encoder = QrEncoder::new();
        let code = encoder.matrix(b"http://lib.local").unwrap();
        assert_eq!(code.version(), Version::Normal(1));
        assert_eq!(code.error_correction_level(), EcLevel::L);
    }

    #[test]
    fn test_long_payload_grows() {
        let encoder = QrEncoder::new();
        let code = encoder.matrix(b"http://localhost:8080/index.html").unwrap();
        assert_ne!(code.version(), Version::Normal(1));
    }

    #[test]
    fn test_rasterize_tiles_modules() {
        let encoder = QrEncoder::new();
        let code = encoder.matrix(b"http://lib.local").unwrap();
        let image = encoder.rasterize(&code);
        // 21 modules plus a 4-module quiet zone on each side
        assert_eq!(image.width(), (21 + 8) * MODULE_PIXELS);
        assert_eq!(image.height(), image.width());
        assert_eq!(image.get_pixel(0, 0), &Luma([255]));
        assert_eq!(
            image.get_pixel(4 * MODULE_PIXELS, 4 * MODULE_PIXELS),
            &Luma([0])
        );
    }

    #[test]
    fn test_encode_string_resizes() {
        let encoder = QrEncoder::new();
        let image = encoder.encode_string("http://localhost:6969/frontend", 300).unwrap();
        assert_eq!(image.dimensions(), (300, 300));
    }

    #[test]
    fn test_round_trip() {
        use crate::qr::QrDecoder;

        let encoder = QrEncoder::new();
        let decoder = QrDecoder::new();

        let original = "http://localhost:6969/frontend";
        let image = encoder.encode_string(original, 300).unwrap();
        let decoded = decoder.decode_gray(&image).unwrap();

        assert_eq!(decoded.as_str(), Some(original));
    }
}
