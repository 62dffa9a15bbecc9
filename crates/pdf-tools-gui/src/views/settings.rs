use eframe::egui;
use pdf_async_runtime::PdfCommand;
use pdf_images::{ExportSettings, Orientation, PageSize, QualityTier, parse_custom_dpi};
use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::ui_components::enum_selector;

/// Editing state of the settings panel that is not part of [`ExportSettings`]
pub struct SettingsPanel {
    /// Text of the custom DPI field; applied when the field loses focus
    pub dpi_text: String,
    pub output_dir: PathBuf,
}

impl SettingsPanel {
    pub fn new(settings: &ExportSettings, output_dir: PathBuf) -> Self {
        Self {
            dpi_text: settings.custom_dpi().to_string(),
            output_dir,
        }
    }

    /// Refresh the text fields after the settings were replaced
    pub fn sync(&mut self, settings: &ExportSettings) {
        self.dpi_text = settings.custom_dpi().to_string();
    }
}

pub fn show_settings(
    ui: &mut egui::Ui,
    panel: &mut SettingsPanel,
    settings: &mut ExportSettings,
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
    enabled: bool,
) {
    ui.add_enabled_ui(enabled, |ui| {
        egui::CollapsingHeader::new("🎚 Quality")
            .default_open(true)
            .show(ui, |ui| {
                show_quality_section(ui, panel, settings);
            });

        ui.add_space(10.0);

        egui::CollapsingHeader::new("📐 Page")
            .default_open(true)
            .show(ui, |ui| {
                show_page_section(ui, settings);
            });

        ui.add_space(10.0);

        egui::CollapsingHeader::new("💾 Output")
            .default_open(true)
            .show(ui, |ui| {
                show_output_section(ui, panel, settings);
            });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            show_config_buttons(ui, settings, command_tx);
        });
    });
}

fn show_quality_section(ui: &mut egui::Ui, panel: &mut SettingsPanel, settings: &mut ExportSettings) {
    let tiers = QualityTier::ALL.map(|tier| (tier, tier.label()));
    enum_selector(ui, "quality_tier", "Quality:", &mut settings.quality, &tiers);

    if settings.quality == QualityTier::Custom {
        ui.horizontal(|ui| {
            ui.label("DPI:");
            let response = ui.add(egui::TextEdit::singleline(&mut panel.dpi_text).desired_width(60.0));
            if response.lost_focus() {
                settings.set_custom_dpi(parse_custom_dpi(&panel.dpi_text).into());
                panel.dpi_text = settings.custom_dpi().to_string();
            }
        });
    }

    ui.weak(format!("Export DPI: {}", settings.dpi()));
}

fn show_page_section(ui: &mut egui::Ui, settings: &mut ExportSettings) {
    let sizes = PageSize::ALL.map(|size| (size, size.label()));
    enum_selector(ui, "page_size", "Page size:", &mut settings.page_size, &sizes);

    let (width, height) = settings.page_dimensions_mm();
    let orientation = match settings.orientation() {
        Orientation::Portrait => "portrait",
        Orientation::Landscape => "landscape",
    };
    ui.weak(format!("{} × {} mm, {}", width, height, orientation));
}

fn show_output_section(ui: &mut egui::Ui, panel: &mut SettingsPanel, settings: &mut ExportSettings) {
    ui.horizontal(|ui| {
        ui.label("File name:");
        ui.text_edit_singleline(&mut settings.output_name);
    });
    ui.weak(settings.output_file_name());

    ui.add_space(5.0);

    ui.horizontal(|ui| {
        ui.label("Folder:");
        if ui.button("📂 Choose...").clicked() {
            if let Some(dir) = rfd::FileDialog::new()
                .set_directory(&panel.output_dir)
                .pick_folder()
            {
                panel.output_dir = dir;
            }
        }
    });
    ui.add(egui::Label::new(panel.output_dir.display().to_string()).truncate());
}

fn show_config_buttons(
    ui: &mut egui::Ui,
    settings: &ExportSettings,
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
) {
    if ui.button("💾 Save Settings").clicked() {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("pdf_settings.json")
            .save_file()
        {
            let _ = command_tx.send(PdfCommand::SaveSettings {
                settings: settings.clone(),
                path,
            });
        }
    }

    if ui.button("📂 Load Settings").clicked() {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            let _ = command_tx.send(PdfCommand::LoadSettings { path });
        }
    }
}
