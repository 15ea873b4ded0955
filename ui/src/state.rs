use qrgen_business::{AppConfig, EncodeRequest, PreviewCompute};
use qrgen_states::StateCtx;

use crate::utils::clipboard::{ClipboardProvider, SystemClipboard};
use crate::utils::download::{ArtifactSink, SystemDownloader};
use crate::widgets::PreviewTexture;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
    /// Message of the blocking alert, if one is open.
    pub alert: Option<String>,
    pub clipboard: Box<dyn ClipboardProvider>,
    pub downloader: Box<dyn ArtifactSink>,
    pub preview_texture: PreviewTexture,
}

impl Default for State {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl State {
    pub fn new(config: AppConfig) -> Self {
        Self::with_platform(config, Box::new(SystemClipboard), Box::new(SystemDownloader))
    }

    /// State wired to the given clipboard and download sink instead of the
    /// platform ones.
    pub fn test(
        config: AppConfig,
        clipboard: impl ClipboardProvider + 'static,
        downloader: impl ArtifactSink + 'static,
    ) -> Self {
        Self::with_platform(config, Box::new(clipboard), Box::new(downloader))
    }

    fn with_platform(
        config: AppConfig,
        clipboard: Box<dyn ClipboardProvider>,
        downloader: Box<dyn ArtifactSink>,
    ) -> Self {
        let mut ctx = StateCtx::new();

        ctx.add_state(EncodeRequest::from_config(&config));
        ctx.record_compute(PreviewCompute::default());

        Self {
            ctx,
            alert: None,
            clipboard,
            downloader,
            preview_texture: PreviewTexture::default(),
        }
    }
}
