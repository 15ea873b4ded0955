use egui::{RichText, ScrollArea};
use qrgen_business::site;

use crate::state::State;
use crate::utils::colors::COLOR_HINT;
use crate::widgets;

const CONTENT_MAX_WIDTH: f32 = 896.0;

pub struct QrGenApp {
    pub state: State,
}

impl QrGenApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl eframe::App for QrGenApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Sync Compute for render
        self.state.ctx.sync_computes();

        let State {
            ctx: state_ctx,
            alert,
            clipboard,
            downloader,
            preview_texture,
        } = &mut self.state;

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.set_max_width(CONTENT_MAX_WIDTH);
                header(ui);
                ui.add_space(24.0);

                ui.columns(2, |columns| {
                    widgets::input_panel(state_ctx, &mut columns[0]);

                    let ui = &mut columns[1];
                    widgets::preview_surface(state_ctx, preview_texture, ui);
                    ui.add_space(16.0);
                    widgets::export_actions(
                        state_ctx,
                        clipboard.as_ref(),
                        downloader.as_ref(),
                        alert,
                        ui,
                    );
                });
            });
        });

        widgets::alert_modal(ctx, alert);

        // Run background jobs
        state_ctx.run_computed();

        if state_ctx.has_pending_updates() {
            ctx.request_repaint();
        }
    }
}

fn header(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.heading(RichText::new(site::HEADING).size(32.0).strong());
        ui.add_space(8.0);
        ui.label(RichText::new(site::TAGLINE).color(COLOR_HINT));
    });
}
