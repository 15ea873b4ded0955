//! Preview compute: re-encodes the request whenever it changes.

use std::any::{Any, TypeId};
use std::fmt::{Debug, Formatter};

use image::RgbaImage;
use qrgen_states::{Compute, ComputeDeps, Dep, Updater, assign_impl};

use crate::{EncodeRequest, encoder};

/// The pixels currently shown on the preview surface.
#[derive(Clone)]
pub struct RenderedPreview {
    image: RgbaImage,
    request: EncodeRequest,
}

impl Debug for RenderedPreview {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderedPreview")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("blank", &self.is_blank())
            .finish_non_exhaustive()
    }
}

impl RenderedPreview {
    /// Render `request`; on error nothing is produced and the caller keeps
    /// whatever it was showing.
    pub fn render(request: &EncodeRequest) -> Result<Self, crate::EncodeError> {
        Ok(Self {
            image: encoder::render_preview(request)?,
            request: request.clone(),
        })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// True when drawn for empty text (background fill only).
    pub fn is_blank(&self) -> bool {
        !self.request.has_text()
    }

    /// The request this surface represents.
    pub fn request(&self) -> &EncodeRequest {
        &self.request
    }
}

/// Holds the last successful preview.
///
/// `generation` increases with every successful redraw so the UI knows when
/// to re-upload its texture.
#[derive(Debug, Clone, Default)]
pub struct PreviewCompute {
    preview: Option<RenderedPreview>,
    generation: u64,
}

impl PreviewCompute {
    pub fn preview(&self) -> Option<&RenderedPreview> {
        self.preview.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Compute for PreviewCompute {
    fn deps(&self) -> ComputeDeps {
        (vec![TypeId::of::<EncodeRequest>()], vec![])
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        let request = match deps.get_state_ref::<EncodeRequest>() {
            Ok(request) => request,
            Err(err) => {
                log::error!("Preview has no encode request: {err}");
                return;
            }
        };

        match RenderedPreview::render(request) {
            Ok(preview) => {
                log::debug!(
                    "Preview redrawn: {}x{}, blank={}",
                    preview.width(),
                    preview.height(),
                    preview.is_blank()
                );
                updater.set(Self {
                    preview: Some(preview),
                    generation: self.generation + 1,
                });
            }
            // the surface keeps its last good pixels
            Err(err) => log::error!("Error generating QR code: {err}"),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}
