//! Download artifacts for the export buttons.

use chrono::{DateTime, Utc};

use crate::encoder::{self, PNG_EXPORT_SCALE};
use crate::{EncodeError, EncodeRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    Svg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Png => "Download PNG",
            Self::Svg => "Download SVG",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportPayload {
    /// `data:image/png;base64,...`
    DataUrl(String),
    /// Raw SVG document.
    Markup(String),
}

/// A file ready to hand to the browser (or the native save dialog).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub file_name: String,
    pub payload: ExportPayload,
}

impl ExportArtifact {
    /// The file contents as written to disk.
    pub fn bytes(&self) -> Result<Vec<u8>, EncodeError> {
        match &self.payload {
            ExportPayload::DataUrl(url) => encoder::decode_data_url(url),
            ExportPayload::Markup(markup) => Ok(markup.as_bytes().to_vec()),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// `qrcode-<unix millis>.<ext>`
pub fn export_file_name(format: ExportFormat, now: DateTime<Utc>) -> String {
    format!("qrcode-{}.{}", now.timestamp_millis(), format.extension())
}

/// Re-encode `request` for download.
///
/// PNG is rendered at twice the preview size; SVG at the preview size.
pub fn export_artifact(
    request: &EncodeRequest,
    format: ExportFormat,
    now: DateTime<Utc>,
) -> Result<ExportArtifact, EncodeError> {
    if !request.has_text() {
        return Err(EncodeError::EmptyText);
    }

    let payload = match format {
        ExportFormat::Png => ExportPayload::DataUrl(encoder::render_png_data_url(
            request,
            request.size_px * PNG_EXPORT_SCALE,
        )?),
        ExportFormat::Svg => ExportPayload::Markup(encoder::render_svg(request, request.size_px)?),
    };

    let artifact = ExportArtifact {
        format,
        file_name: export_file_name(format, now),
        payload,
    };
    log::info!("Prepared {} export {}", format.extension(), artifact.file_name);
    Ok(artifact)
}
