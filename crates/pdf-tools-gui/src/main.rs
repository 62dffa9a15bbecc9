#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

mod app;
mod handlers;
mod logger;
mod thumbnails;
mod ui_components;
mod views;
mod worker;

const MAX_LOG_ENTRIES: usize = 500;

fn main() -> anyhow::Result<()> {
    let logger = logger::AppLogger::new(MAX_LOG_ENTRIES);
    logger.clone().init()?;

    // The worker and the blocking pool used by exports live on this runtime
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let tokio_handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_drag_and_drop(true)
            .with_title("Images to PDF"),
        ..Default::default()
    };

    eframe::run_native(
        "Images to PDF",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::ImagesToPdfApp::new(
                cc,
                tokio_handle,
                logger,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start the UI: {e}"))?;

    Ok(())
}
