//! Handing export artifacts to the user.
//!
//! Native builds ask for a destination with an `rfd` save dialog. Web builds
//! click a temporary anchor carrying the data URL (PNG) or an object URL of a
//! blob (SVG). Either way, failures are only logged by the caller.

use qrgen_business::{EncodeError, ExportArtifact};

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("Save dialog was cancelled")]
    Cancelled,
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to prepare file: {0}")]
    Encode(#[from] EncodeError),
    #[error("Browser download failed: {0}")]
    Dom(String),
}

/// Destination for exported files, mockable in tests.
pub trait ArtifactSink {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<(), DownloadError>;
}

/// Write the decoded artifact bytes to `path`.
#[cfg(not(target_arch = "wasm32"))]
pub fn write_artifact(path: &std::path::Path, artifact: &ExportArtifact) -> Result<(), DownloadError> {
    let bytes = artifact.bytes()?;
    std::fs::write(path, &bytes)?;
    log::info!("Saved {} ({} bytes) to {:?}", artifact.file_name, bytes.len(), path);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDownloader;

#[cfg(not(target_arch = "wasm32"))]
impl ArtifactSink for SystemDownloader {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<(), DownloadError> {
        use rfd::FileDialog;

        let path = FileDialog::new()
            .set_title("Save QR code")
            .set_file_name(&artifact.file_name)
            .add_filter(artifact.format.extension(), &[artifact.format.extension()])
            .save_file()
            .ok_or(DownloadError::Cancelled)?;

        write_artifact(&path, artifact)
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDownloader;

#[cfg(target_arch = "wasm32")]
impl ArtifactSink for SystemDownloader {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<(), DownloadError> {
        use eframe::wasm_bindgen::{JsCast as _, JsValue};
        use qrgen_business::ExportPayload;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url, js_sys::Array};

        fn dom_err(value: JsValue) -> DownloadError {
            DownloadError::Dom(format!("{value:?}"))
        }

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| DownloadError::Dom("no document".to_owned()))?;

        let (href, object_url) = match &artifact.payload {
            ExportPayload::DataUrl(url) => (url.clone(), false),
            ExportPayload::Markup(markup) => {
                let parts = Array::of1(&JsValue::from_str(markup));
                let options = BlobPropertyBag::new();
                options.set_type(artifact.mime_type());
                let blob =
                    Blob::new_with_str_sequence_and_options(&parts, &options).map_err(dom_err)?;
                (Url::create_object_url_with_blob(&blob).map_err(dom_err)?, true)
            }
        };

        let anchor = document
            .create_element("a")
            .map_err(dom_err)?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|element| DownloadError::Dom(format!("{element:?} is not an anchor")))?;
        anchor.set_href(&href);
        anchor.set_download(&artifact.file_name);
        anchor.click();

        if object_url {
            Url::revoke_object_url(&href).map_err(dom_err)?;
        }
        log::info!("Started download of {}", artifact.file_name);
        Ok(())
    }
}
