//! Copying the preview image to the system clipboard.
//!
//! The app only ever writes an image, so the provider trait is write-only.
//! Tests inject a recording provider through [`crate::state::State::test`].
//!
//! # Platform Support
//!
//! - **Native (Windows, macOS, Linux)**: via the `arboard` crate.
//! - **Web (WASM)**: the image is PNG-encoded and written through
//!   `navigator.clipboard.write` with a single `image/png` clipboard item. The
//!   browser settles the write asynchronously; a rejection is logged.

use qrgen_business::RenderedPreview;
use qrgen_business::encoder::encode_png_rgba8;

/// RGBA pixels handed to the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardImage {
    pub width: usize,
    pub height: usize,
    pub bytes: Vec<u8>,
}

impl ClipboardImage {
    /// Copy out the pixels currently on the preview surface.
    pub fn from_preview(preview: &RenderedPreview) -> Self {
        Self {
            width: preview.width() as usize,
            height: preview.height() as usize,
            bytes: preview.image().as_raw().clone(),
        }
    }

    /// PNG bytes for clipboards that only accept encoded images.
    pub fn to_png(&self) -> Result<Vec<u8>, ClipboardError> {
        let (width, height) = (self.width as u32, self.height as u32);
        encode_png_rgba8(width, height, &self.bytes)
            .map_err(|e| ClipboardError::AccessError(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("There is no QR code to copy")]
    NoPreview,
    #[error("Clipboard images are not supported on this platform")]
    Unsupported,
    #[error("Clipboard access error: {0}")]
    AccessError(String),
}

pub trait ClipboardProvider {
    fn set_image(&self, image: ClipboardImage) -> Result<(), ClipboardError>;
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

#[cfg(not(target_arch = "wasm32"))]
impl ClipboardProvider for SystemClipboard {
    fn set_image(&self, image: ClipboardImage) -> Result<(), ClipboardError> {
        use arboard::{Clipboard, ImageData};
        use std::borrow::Cow;

        let mut clipboard =
            Clipboard::new().map_err(|e| ClipboardError::AccessError(e.to_string()))?;

        clipboard
            .set_image(ImageData {
                width: image.width,
                height: image.height,
                bytes: Cow::Owned(image.bytes),
            })
            .map_err(|e| ClipboardError::AccessError(e.to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

#[cfg(target_arch = "wasm32")]
impl ClipboardProvider for SystemClipboard {
    fn set_image(&self, image: ClipboardImage) -> Result<(), ClipboardError> {
        use eframe::wasm_bindgen::JsValue;
        use wasm_bindgen_futures::JsFuture;
        use web_sys::js_sys::{Array, Object, Reflect, Uint8Array};
        use web_sys::{Blob, BlobPropertyBag, ClipboardItem};

        fn js_err(value: JsValue) -> ClipboardError {
            ClipboardError::AccessError(format!("{value:?}"))
        }

        let window = web_sys::window().ok_or(ClipboardError::Unsupported)?;
        let png = image.to_png()?;

        let parts = Array::of1(&Uint8Array::from(png.as_slice()));
        let options = BlobPropertyBag::new();
        options.set_type("image/png");
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;

        let record = Object::new();
        Reflect::set(&record, &JsValue::from_str("image/png"), &blob).map_err(js_err)?;
        let item = ClipboardItem::new_with_record_from_str_to_blob_promise(&record).map_err(js_err)?;

        let write = window.navigator().clipboard().write(&Array::of1(&item));
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(write).await {
                log::error!("Clipboard write rejected: {err:?}");
            }
        });
        Ok(())
    }
}

/// Write the current preview to `clipboard`.
pub fn copy_preview(
    clipboard: &dyn ClipboardProvider,
    preview: Option<&RenderedPreview>,
) -> Result<(), ClipboardError> {
    let preview = preview.ok_or(ClipboardError::NoPreview)?;
    if preview.is_blank() {
        return Err(ClipboardError::NoPreview);
    }

    let image = ClipboardImage::from_preview(preview);
    log::info!("Copying {}x{} QR code to clipboard", image.width, image.height);
    clipboard.set_image(image)
}
