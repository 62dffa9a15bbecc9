use pdf_async_runtime::PdfUpdate;
use pdf_images::load_files;
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_add_files(paths: Vec<PathBuf>, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    if paths.is_empty() {
        return;
    }

    let _ = update_tx.send(PdfUpdate::Progress {
        operation: "Reading images".to_string(),
        current: 0,
        total: paths.len(),
    });

    let files = load_files(&paths).await;
    if files.len() < paths.len() {
        log::warn!(
            "Read {} of {} selected files",
            files.len(),
            paths.len()
        );
    }

    let _ = update_tx.send(PdfUpdate::FilesLoaded { files });
}
