mod intake;
mod log_panel;
mod preview;
mod settings;

pub use intake::show_intake;
pub use log_panel::show_log_panel;
pub use preview::show_preview;
pub use settings::{SettingsPanel, show_settings};
