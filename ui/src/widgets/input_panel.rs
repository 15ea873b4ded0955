//! The form: text, size, colors and error correction.
//!
//! Values are passed through exactly as entered. The panel edits a copy of
//! the [`EncodeRequest`] and writes it back only when something changed, so
//! the preview compute re-runs once per edit.

use egui::color_picker::{Alpha, color_edit_button_srgba};
use egui::{Color32, ComboBox, RichText, Slider, TextEdit, TextStyle, Ui};
use qrgen_business::{EncodeRequest, ErrorCorrection, SIZE_MAX, SIZE_MIN, SIZE_STEP};
use qrgen_states::StateCtx;

use crate::utils::colors::{COLOR_HINT, color32_to_hex, parse_color32};

const SECTION_SPACING: f32 = 12.0;

pub fn input_panel(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let Some(mut request) = state_ctx.state_ref::<EncodeRequest>().cloned() else {
        log::warn!("Input panel drawn without an encode request");
        return;
    };
    let before = request.clone();

    text_input(ui, &mut request);
    ui.add_space(SECTION_SPACING);
    size_slider(ui, &mut request);
    ui.add_space(SECTION_SPACING);
    color_input(ui, "Foreground Color", &mut request.foreground, Color32::BLACK);
    ui.add_space(SECTION_SPACING);
    color_input(ui, "Background Color", &mut request.background, Color32::WHITE);
    ui.add_space(SECTION_SPACING);
    error_correction_select(ui, &mut request.error_correction);

    if request != before {
        log::debug!("Encode request edited: {request:?}");
        state_ctx.update::<EncodeRequest>(|r| *r = request);
    }
}

fn text_input(ui: &mut Ui, request: &mut EncodeRequest) {
    ui.label("Text or URL");
    ui.add(
        TextEdit::multiline(&mut request.text)
            .hint_text("Enter text or URL to encode")
            .desired_rows(4)
            .desired_width(f32::INFINITY),
    );
    ui.label(
        RichText::new(format!("{} characters", request.char_count()))
            .small()
            .color(COLOR_HINT),
    );
}

fn size_slider(ui: &mut Ui, request: &mut EncodeRequest) {
    ui.label(format!("Size: {}px", request.size_px));
    ui.add(
        Slider::new(&mut request.size_px, SIZE_MIN..=SIZE_MAX)
            .step_by(f64::from(SIZE_STEP))
            .show_value(false),
    );
}

/// Swatch picker plus a free-text hex field bound to the same string.
fn color_input(ui: &mut Ui, label: &str, value: &mut String, fallback: Color32) {
    ui.label(label);
    ui.horizontal(|ui| {
        let mut swatch = parse_color32(value).unwrap_or(fallback);
        if color_edit_button_srgba(ui, &mut swatch, Alpha::Opaque).changed() {
            *value = color32_to_hex(swatch);
        }
        ui.add(
            TextEdit::singleline(value)
                .font(TextStyle::Monospace)
                .desired_width(96.0),
        );
    });
}

fn error_correction_select(ui: &mut Ui, level: &mut ErrorCorrection) {
    ui.label("Error Correction Level");
    ComboBox::from_id_salt("error_correction")
        .selected_text(level.label())
        .show_ui(ui, |ui| {
            for option in ErrorCorrection::ALL {
                ui.selectable_value(level, option, option.label());
            }
        });
}
