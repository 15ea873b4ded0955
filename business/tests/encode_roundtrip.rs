//! End-to-end checks of the encoder: decode what we draw with an independent
//! QR reader, and parse what we export with an SVG parser.

use chrono::Utc;
use image::RgbaImage;
use qrgen_business::encoder::{self, render_preview};
use qrgen_business::{
    EncodeRequest, ErrorCorrection, ExportFormat, ExportPayload, PreviewCompute, export_artifact,
};
use qrgen_states::{StateCtx, StateSyncStatus};

fn decode(image: &RgbaImage) -> String {
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        image.width() as usize,
        image.height() as usize,
        |x, y| {
            let px = image.get_pixel(x as u32, y as u32).0;
            ((u16::from(px[0]) + u16::from(px[1]) + u16::from(px[2])) / 3) as u8
        },
    );
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "exactly one symbol should be found");
    let (_meta, content) = grids[0].decode().expect("symbol decodes");
    content
}

fn dark_mask(image: &RgbaImage, dark: [u8; 4]) -> Vec<bool> {
    image.pixels().map(|px| px.0 == dark).collect()
}

mod round_trip {
    use super::*;

    #[test]
    fn every_level_decodes_to_input() {
        for level in ErrorCorrection::ALL {
            let request = EncodeRequest::new("Hello, QR!").with_error_correction(level);
            let image = render_preview(&request).expect("preview renders");
            assert_eq!(decode(&image), "Hello, QR!", "level {level}");
        }
    }

    #[test]
    fn example_url_at_default_settings() {
        let request = EncodeRequest::new("https://example.com")
            .with_size(256)
            .with_colors("#000000", "#FFFFFF")
            .with_error_correction(ErrorCorrection::Medium);
        let image = render_preview(&request).expect("preview renders");
        assert_eq!((image.width(), image.height()), (256, 256));
        assert_eq!(decode(&image), "https://example.com");
    }

    #[test]
    fn exported_png_decodes() {
        let request = EncodeRequest::new("https://example.com/export");
        let artifact = export_artifact(&request, ExportFormat::Png, Utc::now()).expect("export");
        let bytes = artifact.bytes().expect("data url decodes");
        let image = image::load_from_memory(&bytes)
            .expect("png loads")
            .to_rgba8();
        assert_eq!(decode(&image), "https://example.com/export");
    }
}

mod surface {
    use super::*;

    #[test]
    fn text_renders_non_blank_square() {
        for size in [128, 256, 512] {
            let request = EncodeRequest::new("size check").with_size(size);
            let image = render_preview(&request).expect("preview renders");
            assert_eq!((image.width(), image.height()), (size, size));
            assert!(
                image.pixels().any(|px| px.0 == [0, 0, 0, 255]),
                "size {size} should contain dark modules"
            );
        }
    }

    #[test]
    fn empty_text_is_uniform_background() {
        let request = EncodeRequest::default().with_colors("#000000", "#336699");
        let image = render_preview(&request).expect("blank surface renders");
        assert_eq!((image.width(), image.height()), (256, 256));
        assert!(image.pixels().all(|px| px.0 == [0x33, 0x66, 0x99, 255]));
    }

    #[test]
    fn color_change_keeps_module_pattern() {
        let base = EncodeRequest::new("pattern");
        let recolored = base.clone().with_colors("#aa0000", "#00ffcc");

        let a = render_preview(&base).expect("base renders");
        let b = render_preview(&recolored).expect("recolored renders");

        assert_eq!(dark_mask(&a, [0, 0, 0, 255]), dark_mask(&b, [0xaa, 0, 0, 255]));
        assert!(b.pixels().all(|px| px.0 == [0xaa, 0, 0, 255] || px.0 == [0, 0xff, 0xcc, 255]));
    }

    #[test]
    fn invalid_color_is_an_error_not_a_panic() {
        let request = EncodeRequest::new("x").with_colors("black", "#fff");
        assert!(render_preview(&request).is_err());
    }
}

mod export {
    use super::*;

    #[test]
    fn png_is_twice_the_preview_size() {
        let request = EncodeRequest::new("double").with_size(256);
        let artifact = export_artifact(&request, ExportFormat::Png, Utc::now()).expect("export");
        let bytes = artifact.bytes().expect("data url decodes");
        let image = image::load_from_memory(&bytes).expect("png loads");
        assert_eq!((image.width(), image.height()), (512, 512));
        assert!(artifact.file_name.starts_with("qrcode-"));
        assert!(artifact.file_name.ends_with(".png"));
    }

    #[test]
    fn svg_is_well_formed_with_pixel_view_box() {
        let request = EncodeRequest::new("vector").with_size(256);
        let artifact = export_artifact(&request, ExportFormat::Svg, Utc::now()).expect("export");
        let ExportPayload::Markup(markup) = &artifact.payload else {
            panic!("svg export should carry markup");
        };
        assert!(markup.contains(r#"viewBox="0 0 256 256""#));

        let tree = usvg::Tree::from_str(markup, &usvg::Options::default())
            .expect("svg parses");
        assert_eq!(tree.size().width(), 256.0);
        assert_eq!(tree.size().height(), 256.0);
    }

    #[test]
    fn svg_respects_translucent_colors() {
        let request = EncodeRequest::new("alpha").with_colors("#00000080", "#ffffff");
        let markup = encoder::render_svg(&request, request.size_px).expect("svg renders");
        assert!(markup.contains(r#"fill-opacity="0.50""#));
    }
}

mod compute {
    use super::*;

    fn ctx_with(request: EncodeRequest) -> StateCtx {
        let mut ctx = StateCtx::new();
        ctx.add_state(request);
        ctx.record_compute(PreviewCompute::default());
        ctx
    }

    fn frame(ctx: &mut StateCtx) {
        ctx.sync_computes();
        ctx.run_computed();
        ctx.sync_computes();
    }

    #[test]
    fn preview_follows_request_edits() {
        let mut ctx = ctx_with(EncodeRequest::default());
        frame(&mut ctx);

        let preview = ctx.cached::<PreviewCompute>().expect("compute registered");
        assert_eq!(preview.generation(), 1);
        assert!(preview.preview().is_some_and(|p| p.is_blank()));

        ctx.update::<EncodeRequest>(|r| r.set_text("now with text"));
        frame(&mut ctx);

        let preview = ctx.cached::<PreviewCompute>().expect("compute registered");
        assert_eq!(preview.generation(), 2);
        let rendered = preview.preview().expect("preview present");
        assert!(!rendered.is_blank());
        assert_eq!(decode(rendered.image()), "now with text");
    }

    #[test]
    fn failed_encode_keeps_last_good_preview() {
        let mut ctx = ctx_with(EncodeRequest::new("good"));
        frame(&mut ctx);

        ctx.update::<EncodeRequest>(|r| r.set_foreground("#nothex"));
        frame(&mut ctx);

        let preview = ctx.cached::<PreviewCompute>().expect("compute registered");
        assert_eq!(preview.generation(), 1, "failed encode must not bump generation");
        let rendered = preview.preview().expect("last good preview kept");
        assert_eq!(rendered.request().foreground, "#000000");
        assert_eq!(
            ctx.compute_status::<PreviewCompute>(),
            Some(StateSyncStatus::Pending)
        );
    }

    #[test]
    fn clearing_text_blanks_surface_despite_invalid_background() {
        let mut ctx = ctx_with(EncodeRequest::new("secret"));
        frame(&mut ctx);

        ctx.update::<EncodeRequest>(|r| r.set_background("#12"));
        frame(&mut ctx);
        ctx.update::<EncodeRequest>(|r| r.set_text(""));
        frame(&mut ctx);

        let preview = ctx.cached::<PreviewCompute>().expect("compute registered");
        let rendered = preview.preview().expect("preview present");
        assert!(rendered.is_blank(), "empty text must clear the old symbol");
        assert_eq!(rendered.request().text, "");
        assert_eq!(preview.generation(), 2);
        assert!(
            rendered.image().pixels().all(|px| px.0 == [255, 255, 255, 255]),
            "unparsable background falls back to white"
        );
    }
}
