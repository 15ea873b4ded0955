//! Shared color constants and hex conversions for the UI.

use egui::Color32;
use qrgen_business::HexColor;

/// Muted gray for hints and counters.
pub const COLOR_HINT: Color32 = Color32::from_rgb(107, 114, 128);

/// Color of `hex`, or `None` while the text is not a valid color.
pub fn parse_color32(hex: &str) -> Option<Color32> {
    HexColor::parse(hex)
        .ok()
        .map(|c| Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a))
}

/// `#RRGGBB` for an opaque picker color.
pub fn color32_to_hex(color: Color32) -> String {
    let [r, g, b, _] = color.to_srgba_unmultiplied();
    HexColor::opaque(r, g, b).to_string()
}
