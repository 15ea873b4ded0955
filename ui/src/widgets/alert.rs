use egui::{Context, Id, Modal};

/// Blocking message box; cleared by "OK", Escape or a click outside.
pub fn alert_modal(ctx: &Context, alert: &mut Option<String>) {
    let Some(message) = alert.as_deref() else {
        return;
    };

    let mut dismissed = false;
    let response = Modal::new(Id::new("alert_modal")).show(ctx, |ui| {
        ui.set_min_width(260.0);
        ui.label(message);
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    });

    if dismissed || response.should_close() {
        *alert = None;
    }
}
