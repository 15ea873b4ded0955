//! Download and copy buttons under the preview.

use chrono::Utc;
use egui::{RichText, Ui};
use qrgen_business::{EncodeRequest, ExportFormat, PreviewCompute, export_artifact};
use qrgen_states::StateCtx;

use crate::utils::clipboard::{ClipboardProvider, copy_preview};
use crate::utils::colors::COLOR_HINT;
use crate::utils::download::{ArtifactSink, DownloadError};

pub const EMPTY_TEXT_HINT: &str = "Enter text or URL to generate QR code";
pub const COPY_SUCCEEDED: &str = "QR code copied to clipboard!";
pub const COPY_FAILED: &str = "Failed to copy to clipboard";
pub const COPY_LABEL: &str = "Copy to Clipboard";

pub fn export_actions(
    state_ctx: &StateCtx,
    clipboard: &dyn ClipboardProvider,
    downloader: &dyn ArtifactSink,
    alert: &mut Option<String>,
    ui: &mut Ui,
) {
    let Some(request) = state_ctx.state_ref::<EncodeRequest>() else {
        return;
    };

    if !request.has_text() {
        ui.label(RichText::new(EMPTY_TEXT_HINT).color(COLOR_HINT));
        return;
    }

    ui.horizontal_wrapped(|ui| {
        for format in [ExportFormat::Png, ExportFormat::Svg] {
            if ui.button(format.label()).clicked() {
                download(request, format, downloader);
            }
        }

        if ui.button(COPY_LABEL).clicked() {
            let preview = state_ctx
                .cached::<PreviewCompute>()
                .and_then(PreviewCompute::preview);
            let message = match copy_preview(clipboard, preview) {
                Ok(()) => COPY_SUCCEEDED,
                Err(err) => {
                    log::error!("Failed to copy: {err}");
                    COPY_FAILED
                }
            };
            *alert = Some(message.to_owned());
        }
    });
}

fn download(request: &EncodeRequest, format: ExportFormat, downloader: &dyn ArtifactSink) {
    let result = export_artifact(request, format, Utc::now())
        .map_err(DownloadError::from)
        .and_then(|artifact| downloader.deliver(&artifact));

    match result {
        Ok(()) => {}
        Err(DownloadError::Cancelled) => log::info!("Download cancelled"),
        Err(err) => log::error!("Error downloading QR code: {err}"),
    }
}
