//! QR generator domain: the encode request, the encoder adapter over the
//! `qrcode` crate, export artifacts, start-up configuration and page metadata.

mod color;
mod config;
pub mod encoder;
mod error;
mod export;
mod preview;
mod request;
pub mod site;

pub use color::HexColor;
pub use config::{AppConfig, ConfigError, DEFAULT_SITE_URL, ENV_PREFIX};
pub use error::EncodeError;
pub use export::{ExportArtifact, ExportFormat, ExportPayload, export_artifact, export_file_name};
pub use preview::{PreviewCompute, RenderedPreview};
pub use request::{
    DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, DEFAULT_SIZE, EncodeRequest, ErrorCorrection,
    SIZE_MAX, SIZE_MIN, SIZE_STEP, is_selectable_size,
};
