//! Adapter over the `qrcode` crate.
//!
//! The crate only gives us the module matrix. Everything else here is about
//! laying that matrix out on a fixed pixel width:
//!
//! - a quiet zone of [`MARGIN_MODULES`] on each side,
//! - a (possibly fractional) scale chosen so the output is exactly the
//!   requested width, falling back to [`FALLBACK_SCALE`] pixels per module when
//!   the width is too small to fit the symbol,
//! - raster output for the preview and PNG export, vector output for SVG.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use qrcode::QrCode;
use qrcode::types::QrError;

use crate::{EncodeError, EncodeRequest, ErrorCorrection, HexColor};

/// Quiet zone around the symbol, in modules.
pub const MARGIN_MODULES: usize = 2;

/// Pixels per module when the requested width cannot hold the symbol.
pub const FALLBACK_SCALE: f64 = 4.0;

/// Linear scale applied to PNG downloads relative to the on-screen size.
pub const PNG_EXPORT_SCALE: u32 = 2;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Square module matrix, row-major, `true` for dark modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    dark: Vec<bool>,
}

impl QrMatrix {
    /// Modules per side, without quiet zone.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.dark[y * self.width + x]
    }
}

/// Ask the external encoder for the module matrix of `text`.
pub fn encode_matrix(text: &str, level: ErrorCorrection) -> Result<QrMatrix, EncodeError> {
    if text.is_empty() {
        return Err(EncodeError::EmptyText);
    }

    let code =
        QrCode::with_error_correction_level(text.as_bytes(), level.into()).map_err(|err| match err {
            QrError::DataTooLong => EncodeError::DataTooLong { level },
            other => EncodeError::Qr(other.to_string()),
        })?;

    let width = code.width();
    let dark = code
        .to_colors()
        .into_iter()
        .map(|color| color == qrcode::Color::Dark)
        .collect();

    Ok(QrMatrix { width, dark })
}

/// Placement of a matrix on a square pixel grid.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    modules: usize,
    side_px: u32,
    scale: f64,
}

impl Layout {
    fn new(modules: usize, width: u32) -> Self {
        let span = (modules + 2 * MARGIN_MODULES) as f64;
        if f64::from(width) >= span {
            Self {
                modules,
                side_px: width,
                scale: f64::from(width) / span,
            }
        } else {
            Self {
                modules,
                side_px: (span * FALLBACK_SCALE).floor() as u32,
                scale: FALLBACK_SCALE,
            }
        }
    }

    fn margin_px(&self) -> f64 {
        MARGIN_MODULES as f64 * self.scale
    }

    /// Module under pixel `(x, y)`, or `None` inside the quiet zone.
    fn module_at(&self, x: u32, y: u32) -> Option<(usize, usize)> {
        let margin = self.margin_px();
        let (px, py) = (f64::from(x), f64::from(y));
        if px < margin || py < margin {
            return None;
        }
        let mx = ((px - margin) / self.scale).floor() as usize;
        let my = ((py - margin) / self.scale).floor() as usize;
        (mx < self.modules && my < self.modules).then_some((mx, my))
    }
}

fn request_colors(request: &EncodeRequest) -> Result<(HexColor, HexColor), EncodeError> {
    Ok((
        HexColor::parse(&request.foreground)?,
        HexColor::parse(&request.background)?,
    ))
}

/// Draw `matrix` at `width` pixels (see [`FALLBACK_SCALE`] for tiny widths).
pub fn rasterize_matrix(matrix: &QrMatrix, width: u32, dark: HexColor, light: HexColor) -> RgbaImage {
    let layout = Layout::new(matrix.width(), width);
    let (dark, light) = (dark.to_rgba(), light.to_rgba());

    RgbaImage::from_fn(layout.side_px, layout.side_px, |x, y| {
        match layout.module_at(x, y) {
            Some((mx, my)) if matrix.is_dark(mx, my) => dark,
            _ => light,
        }
    })
}

/// Encode `request` as a raster image `width` pixels wide.
pub fn rasterize(request: &EncodeRequest, width: u32) -> Result<RgbaImage, EncodeError> {
    let (dark, light) = request_colors(request)?;
    let matrix = encode_matrix(&request.text, request.error_correction)?;
    Ok(rasterize_matrix(&matrix, width, dark, light))
}

/// A `size_px` square filled with the background color and nothing else.
///
/// An unparsable background falls back to white; the blank state never fails.
pub fn blank_surface(request: &EncodeRequest) -> RgbaImage {
    let light = HexColor::parse(&request.background).unwrap_or_else(|err| {
        log::debug!("Blank surface falls back to white: {err}");
        HexColor::WHITE
    });
    RgbaImage::from_pixel(request.size_px, request.size_px, light.to_rgba())
}

/// What the preview surface should show for `request`.
///
/// Empty text is the blank state, not an error.
pub fn render_preview(request: &EncodeRequest) -> Result<RgbaImage, EncodeError> {
    if request.has_text() {
        rasterize(request, request.size_px)
    } else {
        Ok(blank_surface(request))
    }
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, EncodeError> {
    encode_png_rgba8(image.width(), image.height(), image.as_raw())
}

/// PNG-encode tightly packed RGBA8 pixels.
pub fn encode_png_rgba8(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(rgba, width, height, ExtendedColorType::Rgba8)?;
    Ok(bytes)
}

pub fn png_data_url(png: &[u8]) -> String {
    format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png))
}

/// Bytes carried by a base64 data URL.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, EncodeError> {
    let (header, data) = url
        .split_once(',')
        .ok_or_else(|| EncodeError::DataUrl("missing ',' separator".to_owned()))?;
    if !header.starts_with("data:") || !header.ends_with(";base64") {
        return Err(EncodeError::DataUrl(format!("unsupported header {header:?}")));
    }
    STANDARD
        .decode(data)
        .map_err(|err| EncodeError::DataUrl(err.to_string()))
}

/// Encode `request` as a self-contained PNG data URL `width` pixels wide.
pub fn render_png_data_url(request: &EncodeRequest, width: u32) -> Result<String, EncodeError> {
    let image = rasterize(request, width)?;
    Ok(png_data_url(&encode_png(&image)?))
}

fn fill_attrs(color: HexColor) -> String {
    if color.is_opaque() {
        format!(r#" fill="{}""#, color.to_hex_rgb())
    } else {
        format!(
            r#" fill="{}" fill-opacity="{:.2}""#,
            color.to_hex_rgb(),
            color.opacity()
        )
    }
}

/// One `M x y h w v1 h-w z` run per horizontal stretch of dark modules, in
/// module units including the quiet-zone offset.
fn svg_path(matrix: &QrMatrix) -> String {
    let n = matrix.width();
    let mut path = String::new();
    for y in 0..n {
        let mut x = 0;
        while x < n {
            if !matrix.is_dark(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < n && matrix.is_dark(x, y) {
                x += 1;
            }
            let run = x - start;
            path.push_str(&format!(
                "M{} {}h{run}v1h-{run}z",
                start + MARGIN_MODULES,
                y + MARGIN_MODULES
            ));
        }
    }
    path
}

/// Encode `request` as SVG markup `width` pixels wide.
///
/// The `viewBox` is in pixels; modules are placed with a scale transform.
pub fn render_svg(request: &EncodeRequest, width: u32) -> Result<String, EncodeError> {
    let (dark, light) = request_colors(request)?;
    let matrix = encode_matrix(&request.text, request.error_correction)?;
    let layout = Layout::new(matrix.width(), width);
    let side = layout.side_px;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{side}" height="{side}" viewBox="0 0 {side} {side}" shape-rendering="crispEdges">"#
    );
    svg.push_str(&format!(
        r#"<rect width="{side}" height="{side}"{}/>"#,
        fill_attrs(light)
    ));
    svg.push_str(&format!(
        r#"<path transform="scale({})"{} d="{}"/>"#,
        layout.scale,
        fill_attrs(dark),
        svg_path(&matrix)
    ));
    svg.push_str("</svg>\n");
    Ok(svg)
}
