use pdf_async_runtime::{ExportSettings, PageJob, PdfUpdate};
use pdf_images::export_to_path;
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_export(
    jobs: Vec<PageJob>,
    settings: ExportSettings,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    let progress_tx = update_tx.clone();
    let progress = move |current, total| {
        let _ = progress_tx.send(PdfUpdate::Progress {
            operation: "Rendering pages".to_string(),
            current,
            total,
        });
    };

    match export_to_path(&jobs, &settings, &output_path, progress).await {
        Ok(summary) => {
            let _ = update_tx.send(PdfUpdate::ExportComplete { summary });
        }
        Err(e) => {
            log::error!("Export failed: {}", e);
            let _ = update_tx.send(PdfUpdate::ExportFailed {
                message: format!("Failed to export PDF: {e}"),
            });
        }
    }
}
