use std::sync::{Arc, Mutex};

use egui_kittest::Harness;
use qrgen_business::{AppConfig, EncodeRequest, ExportArtifact};
use qrgen_ui::QrGenApp;
use qrgen_ui::state::State;
use qrgen_ui::utils::clipboard::{ClipboardError, ClipboardImage, ClipboardProvider};
use qrgen_ui::utils::download::{ArtifactSink, DownloadError};

/// Frames needed for an edit to reach the preview texture.
const SETTLE_FRAMES: usize = 6;

/// Clipboard that records every image instead of touching the system one.
#[derive(Clone, Default)]
pub struct RecordingClipboard {
    pub images: Arc<Mutex<Vec<ClipboardImage>>>,
    pub fail: bool,
}

impl RecordingClipboard {
    #[allow(unused)]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn written(&self) -> Vec<ClipboardImage> {
        self.images.lock().expect("clipboard lock").clone()
    }
}

impl ClipboardProvider for RecordingClipboard {
    fn set_image(&self, image: ClipboardImage) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::AccessError("permission denied".to_owned()));
        }
        self.images.lock().expect("clipboard lock").push(image);
        Ok(())
    }
}

/// Download sink that keeps artifacts in memory.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub artifacts: Arc<Mutex<Vec<ExportArtifact>>>,
}

impl RecordingSink {
    pub fn delivered(&self) -> Vec<ExportArtifact> {
        self.artifacts.lock().expect("sink lock").clone()
    }
}

impl ArtifactSink for RecordingSink {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<(), DownloadError> {
        self.artifacts
            .lock()
            .expect("sink lock")
            .push(artifact.clone());
        Ok(())
    }
}

pub struct TestCtx<'a> {
    harness: Harness<'a, QrGenApp>,
    pub clipboard: RecordingClipboard,
    pub sink: RecordingSink,
}

impl<'a> TestCtx<'a> {
    pub fn new_app() -> Self {
        Self::build(AppConfig::default(), RecordingClipboard::default())
    }

    #[allow(unused)]
    pub fn with_config(config: AppConfig) -> Self {
        Self::build(config, RecordingClipboard::default())
    }

    #[allow(unused)]
    pub fn with_clipboard(clipboard: RecordingClipboard) -> Self {
        Self::build(AppConfig::default(), clipboard)
    }

    fn build(config: AppConfig, clipboard: RecordingClipboard) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let sink = RecordingSink::default();
        let state = State::test(config, clipboard.clone(), sink.clone());
        let app = QrGenApp::new(state);
        let mut harness = Harness::new_eframe(|_| app);
        for _ in 0..SETTLE_FRAMES {
            harness.step();
        }

        Self {
            harness,
            clipboard,
            sink,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, QrGenApp> {
        &mut self.harness
    }

    pub fn harness(&self) -> &Harness<'a, QrGenApp> {
        &self.harness
    }

    pub fn settle(&mut self) {
        for _ in 0..SETTLE_FRAMES {
            self.harness.step();
        }
    }

    /// Edit the request the way the input panel would, then let it render.
    pub fn edit(&mut self, f: impl FnOnce(&mut EncodeRequest)) {
        self.harness
            .state_mut()
            .state
            .ctx
            .update::<EncodeRequest>(f);
        self.settle();
    }

    pub fn request(&self) -> EncodeRequest {
        self.harness
            .state()
            .state
            .ctx
            .state_ref::<EncodeRequest>()
            .cloned()
            .expect("encode request registered")
    }
}
