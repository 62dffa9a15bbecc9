use pdf_async_runtime::{ExportSettings, PdfUpdate};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_load(path: PathBuf, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    match ExportSettings::load(&path).await {
        Ok(settings) => {
            log::info!("Settings loaded from {}", path.display());
            let _ = update_tx.send(PdfUpdate::SettingsLoaded { settings });
        }
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                message: format!("Failed to load settings: {e}"),
            });
        }
    }
}

pub async fn handle_save(
    settings: ExportSettings,
    path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    match settings.save(&path).await {
        Ok(()) => {
            log::info!("Settings saved to {}", path.display());
            let _ = update_tx.send(PdfUpdate::SettingsSaved { path });
        }
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                message: format!("Failed to save settings: {e}"),
            });
        }
    }
}
