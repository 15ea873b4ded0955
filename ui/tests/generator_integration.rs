//! Integration tests driving the full app through egui_kittest.
//!
//! Platform clipboard and downloads are replaced by recording mocks, so the
//! tests observe exactly what would have been copied or saved.

mod common;

use crate::common::{RecordingClipboard, TestCtx};
use kittest::Queryable;
use qrgen_business::{AppConfig, ErrorCorrection, ExportFormat, ExportPayload};
use qrgen_ui::widgets::export_actions::{COPY_FAILED, COPY_LABEL, COPY_SUCCEEDED, EMPTY_TEXT_HINT};

fn preview_generation(ctx: &TestCtx<'_>) -> u64 {
    ctx.harness().state().state.preview_texture.generation()
}

fn preview_size(ctx: &TestCtx<'_>) -> Option<[usize; 2]> {
    ctx.harness().state().state.preview_texture.size()
}

mod empty_form {
    use super::*;

    #[test]
    fn test_empty_text_shows_hint_and_blank_surface() {
        let ctx = TestCtx::new_app();
        let harness = ctx.harness();

        assert!(
            harness.query_by_label(EMPTY_TEXT_HINT).is_some(),
            "Empty text should show the hint"
        );
        assert!(
            harness.query_by_label("Download PNG").is_none(),
            "Export buttons should be hidden for empty text"
        );
        assert!(harness.query_by_label("0 characters").is_some());

        assert_eq!(preview_generation(&ctx), 1, "Blank surface should be drawn once");
        assert_eq!(preview_size(&ctx), Some([256, 256]));
    }

    #[test]
    fn test_form_labels_are_rendered() {
        let ctx = TestCtx::new_app();
        let harness = ctx.harness();

        for label in ["Text or URL", "Size: 256px", "Foreground Color", "Background Color", "Error Correction Level"] {
            assert!(
                harness.query_by_label(label).is_some(),
                "Form should show {label:?}"
            );
        }
        assert!(harness.query_by_label("Free QR Code Generator").is_some());
    }

    #[test]
    fn test_config_seeds_initial_request() {
        let config = AppConfig {
            default_size: 512,
            default_error_correction: ErrorCorrection::High,
            ..AppConfig::default()
        };
        let ctx = TestCtx::with_config(config);

        let request = ctx.request();
        assert_eq!(request.size_px, 512);
        assert_eq!(request.error_correction, ErrorCorrection::High);
        assert_eq!(preview_size(&ctx), Some([512, 512]));
    }
}

mod editing {
    use super::*;

    #[test]
    fn test_text_reveals_export_actions() {
        let mut ctx = TestCtx::new_app();
        ctx.edit(|r| r.set_text("https://example.com"));

        let harness = ctx.harness();
        for label in ["Download PNG", "Download SVG", COPY_LABEL] {
            assert!(harness.query_by_label(label).is_some(), "{label} should be shown");
        }
        assert!(harness.query_by_label(EMPTY_TEXT_HINT).is_none());
        assert!(harness.query_by_label("19 characters").is_some());
        assert_eq!(preview_generation(&ctx), 2, "Text edit should redraw the preview");
    }

    #[test]
    fn test_size_change_resizes_preview() {
        let mut ctx = TestCtx::new_app();
        ctx.edit(|r| r.set_text("resize me"));
        ctx.edit(|r| r.set_size(384));

        assert_eq!(preview_size(&ctx), Some([384, 384]));
        assert!(ctx.harness().query_by_label("Size: 384px").is_some());
    }

    #[test]
    fn test_error_correction_change_redraws() {
        let mut ctx = TestCtx::new_app();
        ctx.edit(|r| r.set_text("levels"));
        let before = preview_generation(&ctx);

        ctx.edit(|r| r.set_error_correction(ErrorCorrection::Quartile));

        assert_eq!(preview_generation(&ctx), before + 1);
        assert_eq!(ctx.request().error_correction, ErrorCorrection::Quartile);
    }

    #[test]
    fn test_invalid_color_keeps_last_preview() {
        let mut ctx = TestCtx::new_app();
        ctx.edit(|r| r.set_text("stable"));
        let before = preview_generation(&ctx);

        ctx.edit(|r| r.set_foreground("#12345"));

        assert_eq!(
            preview_generation(&ctx),
            before,
            "Invalid color must not replace the preview"
        );
        assert_eq!(ctx.request().foreground, "#12345", "Input is kept as typed");
        assert!(
            ctx.harness().state().state.alert.is_none(),
            "Encode failures are not surfaced to the user"
        );
    }
}

mod exporting {
    use super::*;

    #[test]
    fn test_download_png_delivers_double_size_image() {
        let mut ctx = TestCtx::new_app();
        ctx.edit(|r| r.set_text("png please"));

        ctx.harness_mut().get_by_label("Download PNG").click();
        ctx.settle();

        let delivered = ctx.sink.delivered();
        assert_eq!(delivered.len(), 1, "Exactly one download expected");
        let artifact = &delivered[0];
        assert_eq!(artifact.format, ExportFormat::Png);
        assert!(artifact.file_name.starts_with("qrcode-"));
        assert!(artifact.file_name.ends_with(".png"));

        let bytes = artifact.bytes().expect("payload decodes");
        let image = image::load_from_memory(&bytes).expect("valid png");
        assert_eq!((image.width(), image.height()), (512, 512));
    }

    #[test]
    fn test_download_svg_delivers_markup() {
        let mut ctx = TestCtx::new_app();
        ctx.edit(|r| r.set_text("svg please"));

        ctx.harness_mut().get_by_label("Download SVG").click();
        ctx.settle();

        let delivered = ctx.sink.delivered();
        assert_eq!(delivered.len(), 1, "Exactly one download expected");
        match &delivered[0].payload {
            ExportPayload::Markup(svg) => {
                assert!(svg.contains(r#"viewBox="0 0 256 256""#));
            }
            other => panic!("Expected SVG markup, got {other:?}"),
        }
    }
}

mod clipboard {
    use super::*;

    #[test]
    fn test_copy_writes_preview_and_alerts() {
        let mut ctx = TestCtx::new_app();
        ctx.edit(|r| r.set_text("copy me"));

        ctx.harness_mut().get_by_label(COPY_LABEL).click();
        ctx.settle();

        let written = ctx.clipboard.written();
        assert_eq!(written.len(), 1, "One image should be copied");
        assert_eq!((written[0].width, written[0].height), (256, 256));
        assert_eq!(
            ctx.harness().state().state.alert.as_deref(),
            Some(COPY_SUCCEEDED)
        );
        assert!(ctx.harness().query_by_label(COPY_SUCCEEDED).is_some());

        ctx.harness_mut().get_by_label("OK").click();
        ctx.settle();
        assert!(ctx.harness().state().state.alert.is_none(), "OK dismisses the alert");
    }

    #[test]
    fn test_copy_failure_alerts() {
        let mut ctx = TestCtx::with_clipboard(RecordingClipboard::failing());
        ctx.edit(|r| r.set_text("no clipboard"));

        ctx.harness_mut().get_by_label(COPY_LABEL).click();
        ctx.settle();

        assert!(ctx.clipboard.written().is_empty());
        assert_eq!(ctx.harness().state().state.alert.as_deref(), Some(COPY_FAILED));
        assert!(ctx.harness().query_by_label(COPY_FAILED).is_some());
    }
}
