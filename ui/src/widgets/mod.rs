mod alert;
pub mod export_actions;
mod input_panel;
mod preview;

pub use alert::alert_modal;
pub use export_actions::export_actions;
pub use input_panel::input_panel;
pub use preview::{PreviewTexture, preview_surface};
