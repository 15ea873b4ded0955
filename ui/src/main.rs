#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use qrgen_business::AppConfig;
use qrgen_business::site::PageMetadata;
use qrgen_ui::state::State;

#[cfg(not(target_arch = "wasm32"))]
mod alloc {
    #[global_allocator]
    static MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context as _;

    // Log to stderr (if you run with `RUST_LOG=debug`).
    // Filter out egui_winit clipboard errors.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("egui_winit::clipboard", log::LevelFilter::Off)
        .init();

    let config = AppConfig::from_env().context("invalid QRGEN_* configuration")?;
    let metadata = PageMetadata::for_site(&config.site_url);

    let native_options = eframe::NativeOptions {
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        viewport: egui::ViewportBuilder::default()
            .with_title(&metadata.title)
            .with_inner_size([900.0, 720.0])
            .with_min_inner_size([480.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        qrgen_business::site::SITE_NAME,
        native_options,
        Box::new(move |_cc| {
            let app = qrgen_ui::QrGenApp::new(State::new(config));
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to start eframe: {err}"))
}

// When compiling to web using trunk:
#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async move {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            log::error!("No window document, cannot start the app");
            return;
        };

        // No process environment in the browser, so the defaults apply.
        let config = AppConfig::default();
        publish_metadata(&document, &PageMetadata::for_site(&config.site_url));

        let Some(canvas) = document
            .get_element_by_id("egui_canvas")
            .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            log::error!("Failed to find egui_canvas");
            return;
        };

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(move |_cc| Ok(Box::new(qrgen_ui::QrGenApp::new(State::new(config))))),
            )
            .await;

        // Remove the loading text and spinner:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(()) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p> The app has crashed. See the developer console for details. </p>",
                    );
                    log::error!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Set the document title and inject the JSON-LD description.
#[cfg(target_arch = "wasm32")]
fn publish_metadata(document: &web_sys::Document, metadata: &PageMetadata) {
    document.set_title(&metadata.title);

    let Some(head) = document.head() else {
        return;
    };
    let script = match document.create_element("script") {
        Ok(script) => script,
        Err(err) => {
            log::warn!("Failed to create structured data script: {err:?}");
            return;
        }
    };
    if let Err(err) = script.set_attribute("type", "application/ld+json") {
        log::warn!("Failed to tag structured data script: {err:?}");
        return;
    }
    script.set_text_content(Some(&metadata.structured_data().to_string()));
    if let Err(err) = head.append_child(&script) {
        log::warn!("Failed to attach structured data: {err:?}");
    }
}
