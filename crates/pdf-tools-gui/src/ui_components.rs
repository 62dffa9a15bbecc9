use eframe::egui;
use pdf_images::{EntryId, EntryStore};

use crate::thumbnails::ThumbnailCache;

const ROTATION_STEP_DEGREES: i32 = 90;
const CARD_WIDTH: f32 = 190.0;
const THUMBNAIL_MAX: f32 = 160.0;

/// Enum selector using ComboBox
pub fn enum_selector<T>(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    value: &mut T,
    options: &[(T, &str)],
) -> bool
where
    T: PartialEq + Clone,
{
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);

        let current_text = options
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, text)| *text)
            .unwrap_or("Unknown");

        egui::ComboBox::from_id_salt(id)
            .selected_text(current_text)
            .show_ui(ui, |ui| {
                for (option_value, option_text) in options {
                    if ui
                        .selectable_value(value, option_value.clone(), *option_text)
                        .changed()
                    {
                        changed = true;
                    }
                }
            });
    });
    changed
}

enum EntryAction {
    Rotate(EntryId, i32),
    MoveUp(usize),
    MoveDown(usize),
    Remove(EntryId),
}

/// Grid of entry cards with rotation, reordering and removal
pub struct EntryGridEditor<'a> {
    store: &'a mut EntryStore,
    thumbnails: &'a mut ThumbnailCache,
    enabled: bool,
}

impl<'a> EntryGridEditor<'a> {
    pub fn new(store: &'a mut EntryStore, thumbnails: &'a mut ThumbnailCache) -> Self {
        Self {
            store,
            thumbnails,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> bool {
        if self.store.is_empty() {
            ui.label("No images added");
            return false;
        }

        let ctx = ui.ctx().clone();
        let columns = ((ui.available_width() / CARD_WIDTH).floor() as usize).max(1);
        let enabled = self.enabled;
        let store: &EntryStore = &*self.store;
        let thumbnails = &mut *self.thumbnails;
        let count = store.len();
        let mut action = None;

        egui::Grid::new("entry_grid")
            .spacing([12.0, 12.0])
            .show(ui, |ui| {
                for (idx, entry) in store.entries().iter().enumerate() {
                    ui.add_enabled_ui(enabled, |ui| {
                        ui.group(|ui| {
                            ui.set_width(CARD_WIDTH - 20.0);
                            ui.vertical_centered(|ui| {
                                match thumbnails.get(&ctx, store, entry) {
                                    Some(texture) => {
                                        ui.add(
                                            egui::Image::new(&texture)
                                                .max_size(egui::vec2(THUMBNAIL_MAX, THUMBNAIL_MAX)),
                                        );
                                    }
                                    None => {
                                        ui.label("🖼 No preview");
                                    }
                                }

                                ui.add(
                                    egui::Label::new(format!("{}. {}", idx + 1, entry.name()))
                                        .truncate(),
                                );
                                ui.weak(format!("{}°", entry.rotation_degrees()));

                                ui.horizontal(|ui| {
                                    if idx > 0
                                        && ui.small_button("▲").on_hover_text("Move earlier").clicked()
                                    {
                                        action = Some(EntryAction::MoveUp(idx));
                                    }
                                    if idx + 1 < count
                                        && ui.small_button("▼").on_hover_text("Move later").clicked()
                                    {
                                        action = Some(EntryAction::MoveDown(idx));
                                    }
                                    if ui.small_button("⟲").on_hover_text("Rotate left").clicked() {
                                        action = Some(EntryAction::Rotate(
                                            entry.id(),
                                            -ROTATION_STEP_DEGREES,
                                        ));
                                    }
                                    if ui.small_button("⟳").on_hover_text("Rotate right").clicked() {
                                        action = Some(EntryAction::Rotate(
                                            entry.id(),
                                            ROTATION_STEP_DEGREES,
                                        ));
                                    }
                                    if ui.small_button("✖").on_hover_text("Remove").clicked() {
                                        action = Some(EntryAction::Remove(entry.id()));
                                    }
                                });
                            });
                        });
                    });

                    if (idx + 1) % columns == 0 {
                        ui.end_row();
                    }
                }
            });

        // Apply changes
        match action {
            Some(EntryAction::Rotate(id, delta)) => self.store.rotate_entry(id, delta).is_some(),
            Some(EntryAction::MoveUp(idx)) => self.store.move_up(idx),
            Some(EntryAction::MoveDown(idx)) => self.store.move_down(idx),
            Some(EntryAction::Remove(id)) => self.store.remove_entry(id),
            None => false,
        }
    }
}
