use eframe::egui;
use log::Level;

use crate::logger::AppLogger;

pub fn show_log_panel(ui: &mut egui::Ui, logger: &AppLogger) {
    ui.horizontal(|ui| {
        ui.strong("Log");
        if ui.small_button("Clear").clicked() {
            logger.clear();
        }
    });

    egui::ScrollArea::vertical()
        .stick_to_bottom(true)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for entry in logger.entries() {
                let color = match entry.level {
                    Level::Error => ui.visuals().error_fg_color,
                    Level::Warn => ui.visuals().warn_fg_color,
                    _ => ui.visuals().text_color(),
                };
                ui.label(
                    egui::RichText::new(format!(
                        "{} {:<5} {}",
                        entry.time_label(),
                        entry.level,
                        entry.message
                    ))
                    .monospace()
                    .color(color),
                );
            }
        });
}
