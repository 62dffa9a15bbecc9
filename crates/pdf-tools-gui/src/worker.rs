use pdf_async_runtime::{PdfCommand, PdfUpdate};
use tokio::sync::mpsc;

use crate::handlers;

/// Async worker task that processes commands one at a time and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<PdfCommand>,
    update_tx: mpsc::UnboundedSender<PdfUpdate>,
) {
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut command_rx, &update_tx).await;
    }
    log::debug!("Command channel closed, worker exiting");
}

async fn process_command(
    cmd: PdfCommand,
    command_rx: &mut mpsc::UnboundedReceiver<PdfCommand>,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    match cmd {
        PdfCommand::AddFiles { mut paths } => {
            // Merge intake requests that queued up behind this one, keeping their order
            while let Ok(next_cmd) = command_rx.try_recv() {
                if let PdfCommand::AddFiles { paths: more } = next_cmd {
                    paths.extend(more);
                } else {
                    handlers::intake::handle_add_files(std::mem::take(&mut paths), update_tx)
                        .await;
                    Box::pin(process_command(next_cmd, command_rx, update_tx)).await;
                }
            }
            handlers::intake::handle_add_files(paths, update_tx).await;
        }
        PdfCommand::Export {
            jobs,
            settings,
            output_path,
        } => {
            handlers::export::handle_export(jobs, settings, output_path, update_tx).await;
        }
        PdfCommand::LoadSettings { path } => {
            handlers::settings::handle_load(path, update_tx).await;
        }
        PdfCommand::SaveSettings { settings, path } => {
            handlers::settings::handle_save(settings, path, update_tx).await;
        }
    }
}
