//! Preview surface showing the last successfully rendered QR code.

use egui::{Color32, ColorImage, Context, Frame, Margin, TextureHandle, TextureOptions, Ui};
use qrgen_business::PreviewCompute;
use qrgen_states::StateCtx;

/// GPU copy of the preview pixels.
///
/// Re-uploaded only when the compute's generation moves, so a failed encode
/// keeps showing the previous texture.
#[derive(Default)]
pub struct PreviewTexture {
    texture: Option<TextureHandle>,
    generation: u64,
}

impl std::fmt::Debug for PreviewTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewTexture")
            .field("generation", &self.generation)
            .field("size", &self.size())
            .finish_non_exhaustive()
    }
}

impl PreviewTexture {
    /// Generation of the preview currently uploaded, `0` before the first one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Texture size in pixels.
    pub fn size(&self) -> Option<[usize; 2]> {
        self.texture.as_ref().map(TextureHandle::size)
    }

    fn refresh(&mut self, ctx: &Context, compute: &PreviewCompute) {
        if compute.generation() == self.generation {
            return;
        }
        let Some(preview) = compute.preview() else {
            return;
        };

        let image = preview.image();
        let color_image = ColorImage::from_rgba_unmultiplied(
            [image.width() as usize, image.height() as usize],
            image.as_raw(),
        );

        match &mut self.texture {
            Some(texture) => texture.set(color_image, TextureOptions::NEAREST),
            None => {
                self.texture =
                    Some(ctx.load_texture("qr_preview", color_image, TextureOptions::NEAREST));
            }
        }
        self.generation = compute.generation();
    }
}

pub fn preview_surface(state_ctx: &StateCtx, texture: &mut PreviewTexture, ui: &mut Ui) {
    if let Some(compute) = state_ctx.cached::<PreviewCompute>() {
        texture.refresh(ui.ctx(), compute);
    }

    Frame::NONE
        .fill(ui.visuals().faint_bg_color)
        .inner_margin(Margin::same(16))
        .corner_radius(8.0)
        .stroke((1.0, Color32::from_gray(200)))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| match &texture.texture {
                Some(handle) => {
                    ui.image(handle);
                }
                None => {
                    ui.spinner();
                }
            });
        });
}
