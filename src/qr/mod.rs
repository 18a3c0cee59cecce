//! QR label rendering
//!
//! Encodes a URL into a QR matrix, rasterizes it at a scan-friendly size and
//! composes it with two centered text lines onto a white canvas. The decoder
//! is used to check that the composed label still scans.

mod builtin_font;
mod compose;
mod decoder;
mod encoder;
mod font;

pub use compose::{Layout, QrArtifact, QrComposer};
pub use decoder::QrDecoder;
pub use encoder::QrEncoder;
pub use font::LabelFont;

use serde::{Deserialize, Serialize};

/// A decoded QR code payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayload {
    /// The raw decoded data
    pub data: Vec<u8>,
    /// String representation if valid UTF-8
    pub text: Option<String>,
}

impl QrPayload {
    /// Create a new QR payload from raw bytes
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let text = String::from_utf8(data.clone()).ok();
        Self { data, text }
    }

    /// Get the payload as a string, if valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_payload_from_bytes() {
        let payload = QrPayload::from_bytes(b"http://localhost:8080/index.html".to_vec());
        assert_eq!(payload.as_str(), Some("http://localhost:8080/index.html"));
    }

    #[test]
    fn test_qr_payload_invalid_utf8() {
        let payload = QrPayload::from_bytes(vec![0xFF, 0xFE]);
        assert!(payload.as_str().is_none());
        assert_eq!(payload.data, vec![0xFF, 0xFE]);
    }
}
