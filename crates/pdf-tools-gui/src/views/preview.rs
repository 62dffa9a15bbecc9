use eframe::egui;
use pdf_images::EntryStore;

use crate::thumbnails::ThumbnailCache;
use crate::ui_components::EntryGridEditor;

pub fn show_preview(
    ui: &mut egui::Ui,
    store: &mut EntryStore,
    thumbnails: &mut ThumbnailCache,
    enabled: bool,
) {
    ui.horizontal(|ui| {
        ui.heading(format!("Pages ({})", store.len()));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let can_clear = enabled && !store.is_empty();
            if ui
                .add_enabled(can_clear, egui::Button::new("🗑 Clear All"))
                .clicked()
            {
                let removed = store.clear_all();
                thumbnails.clear();
                log::info!("Removed {} images", removed);
            }
        });
    });
    ui.separator();

    if store.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.heading("No Images");
                ui.label("Added images appear here in page order");
            });
        });
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if EntryGridEditor::new(store, thumbnails)
                .enabled(enabled)
                .show(ui)
            {
                thumbnails.retain(store);
            }
        });
}
