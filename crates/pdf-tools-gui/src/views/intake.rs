use eframe::egui;
use pdf_async_runtime::PdfCommand;
use pdf_images::constants::PICKER_EXTENSIONS;
use tokio::sync::mpsc;

pub fn show_intake(
    ui: &mut egui::Ui,
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
    enabled: bool,
    files_hovered: bool,
) {
    let frame = egui::Frame::group(ui.style()).inner_margin(egui::Margin::same(16));
    let frame = if files_hovered {
        frame.stroke(ui.visuals().selection.stroke)
    } else {
        frame
    };

    frame.show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.vertical_centered(|ui| {
            if files_hovered {
                ui.heading("Drop to add images");
            } else {
                ui.heading("Add Images");
            }
            ui.label("Drop image files onto the window or pick them from disk");
            ui.add_space(6.0);

            if ui
                .add_enabled(enabled, egui::Button::new("➕ Add Images..."))
                .clicked()
            {
                pick_images(command_tx);
            }
        });
    });
}

fn pick_images(command_tx: &mpsc::UnboundedSender<PdfCommand>) {
    if let Some(paths) = rfd::FileDialog::new()
        .add_filter("Images", PICKER_EXTENSIONS)
        .pick_files()
    {
        log::info!("Reading {} selected files", paths.len());
        let _ = command_tx.send(PdfCommand::AddFiles { paths });
    }
}
