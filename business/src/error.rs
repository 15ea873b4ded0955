use thiserror::Error;

use crate::ErrorCorrection;

/// Why an encode (preview or export) did not produce output.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("nothing to encode, text is empty")]
    EmptyText,
    #[error("invalid hex color: {0:?}")]
    InvalidColor(String),
    #[error("text is too long for error correction level {level}")]
    DataTooLong { level: ErrorCorrection },
    #[error("QR encoding failed: {0}")]
    Qr(String),
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid data URL: {0}")]
    DataUrl(String),
}
