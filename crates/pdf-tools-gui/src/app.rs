use eframe::egui;
use pdf_async_runtime::{ExportSummary, PdfCommand, PdfUpdate};
use pdf_images::{ConverterSession, EntryId, GeneratingGuard, IntakeFile, media_type_for};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::logger::AppLogger;
use crate::thumbnails::ThumbnailCache;
use crate::views::{SettingsPanel, show_intake, show_log_panel, show_preview, show_settings};

const WORKER_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// An export handed to the worker
struct ExportInFlight {
    // Dropping the guard returns the session to idle
    _guard: GeneratingGuard,
    /// Entries in the snapshot; only these are released when it completes
    ids: Vec<EntryId>,
}

#[derive(Clone)]
struct ProgressState {
    operation: String,
    current: usize,
    total: usize,
}

pub struct ImagesToPdfApp {
    session: ConverterSession,
    settings_panel: SettingsPanel,
    thumbnails: ThumbnailCache,
    status: String,
    logger: AppLogger,
    show_log: bool,

    exporting: Option<ExportInFlight>,

    // Async infrastructure
    command_tx: mpsc::UnboundedSender<PdfCommand>,
    update_rx: mpsc::UnboundedReceiver<PdfUpdate>,

    // Progress tracking
    progress: Option<ProgressState>,

    _tokio_handle: tokio::runtime::Handle,
}

impl ImagesToPdfApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        // Spawn worker task
        tokio_handle.spawn(crate::worker::worker_task(command_rx, update_tx));

        let session = ConverterSession::default();
        let output_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let settings_panel = SettingsPanel::new(&session.settings, output_dir);

        Self {
            session,
            settings_panel,
            thumbnails: ThumbnailCache::default(),
            status: String::new(),
            logger,
            show_log: false,
            exporting: None,
            command_tx,
            update_rx,
            progress: None,
            _tokio_handle: tokio_handle,
        }
    }

    fn is_generating(&self) -> bool {
        self.session.status().is_generating()
    }

    fn add_files(&mut self, files: Vec<IntakeFile>) {
        let offered = files.len();
        let added = self.session.store.add_entries(files).len();

        if added < offered {
            log::info!("Ignored {} files that are not images", offered - added);
        }
        if added > 0 {
            log::info!("Added {} images", added);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }

        if self.is_generating() {
            log::warn!("Export in progress, ignoring {} dropped files", dropped.len());
            return;
        }

        let mut paths = Vec::new();
        let mut in_memory = Vec::new();
        for file in dropped {
            if let Some(path) = file.path {
                paths.push(path);
            } else if let Some(bytes) = file.bytes {
                let media_type = if file.mime.is_empty() {
                    media_type_for(Path::new(&file.name), &bytes)
                } else {
                    file.mime
                };
                in_memory.push(IntakeFile::new(file.name, media_type, bytes));
            }
        }

        if !in_memory.is_empty() {
            self.add_files(in_memory);
        }
        if !paths.is_empty() {
            let _ = self.command_tx.send(PdfCommand::AddFiles { paths });
        }
    }

    fn start_export(&mut self) {
        if self.session.store.is_empty() {
            self.status = "Add at least one image before exporting".to_string();
            return;
        }
        if self.is_generating() {
            return;
        }

        let output_path = self.session.output_path(&self.settings_panel.output_dir);
        log::info!("Generating {}", output_path.display());

        match dispatch_export(&self.command_tx, &self.session, output_path) {
            Some(export) => {
                self.progress = Some(ProgressState {
                    operation: "Rendering pages".to_string(),
                    current: 0,
                    total: export.ids.len(),
                });
                self.exporting = Some(export);
            }
            None => {
                self.status = "Error: export worker is not running".to_string();
            }
        }
    }

    fn finish_export(&mut self, summary: ExportSummary) {
        if let Some(export) = self.exporting.take() {
            self.session.store.reset_after_export(&export.ids);
        }
        self.thumbnails.retain(&self.session.store);
        self.progress = None;

        self.status = format!(
            "Saved {} pages → {}",
            summary.page_count,
            summary.path.display()
        );
        if !summary.skipped.is_empty() {
            self.status
                .push_str(&format!(" ({} left blank)", summary.skipped.len()));
        }
    }

    fn process_updates(&mut self, ctx: &egui::Context) {
        while let Ok(update) = self.update_rx.try_recv() {
            match update {
                PdfUpdate::Progress {
                    operation,
                    current,
                    total,
                } => {
                    self.progress = Some(ProgressState {
                        operation,
                        current,
                        total,
                    });
                    ctx.request_repaint();
                }
                PdfUpdate::FilesLoaded { files } => {
                    if self.exporting.is_none() {
                        self.progress = None;
                    }
                    self.add_files(files);
                }
                PdfUpdate::ExportComplete { summary } => {
                    self.finish_export(summary);
                }
                PdfUpdate::ExportFailed { message } => {
                    // The store is kept so the user can retry
                    self.exporting = None;
                    self.progress = None;
                    self.status = format!("Error: {message}");
                }
                PdfUpdate::SettingsLoaded { settings } => {
                    self.session.settings = settings;
                    self.settings_panel.sync(&self.session.settings);
                    self.status = "Settings loaded".to_string();
                }
                PdfUpdate::SettingsSaved { path } => {
                    self.status = format!("Settings saved → {}", path.display());
                }
                PdfUpdate::Error { message } => {
                    if self.exporting.is_none() {
                        self.progress = None;
                    }
                    self.status = format!("Error: {message}");
                }
            }
        }
    }

    fn show_export_button(&mut self, ui: &mut egui::Ui) {
        let generating = self.is_generating();
        let can_export = !generating && !self.session.store.is_empty();
        let label = if generating {
            "⏳ Generating PDF..."
        } else {
            "📄 Export PDF"
        };

        if ui
            .add_enabled(
                can_export,
                egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 32.0)),
            )
            .clicked()
        {
            self.start_export();
        }

        ui.weak(format!(
            "Writes {}",
            self.session
                .output_path(&self.settings_panel.output_dir)
                .display()
        ));
    }

    fn show_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.toggle_value(&mut self.show_log, "📋 Log");
            ui.separator();

            if let Some(ref progress) = self.progress {
                ui.label(&progress.operation);
                ui.add(
                    egui::ProgressBar::new(progress.current as f32 / progress.total.max(1) as f32)
                        .show_percentage(),
                );
            } else if !self.status.is_empty() {
                ui.label(&self.status);
            } else if let Some(entry) = self.logger.latest() {
                ui.weak(entry.message);
            }
        });
    }
}

/// Move the session to Generating and hand a snapshot of the store to the worker.
///
/// Returns `None` if an export is already running or the worker is gone; the
/// session is left idle in the second case.
fn dispatch_export(
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
    session: &ConverterSession,
    output_path: PathBuf,
) -> Option<ExportInFlight> {
    let guard = session.status().try_begin()?;

    let jobs = session.store.snapshot();
    let ids = jobs.iter().map(|job| job.id).collect();
    let command = PdfCommand::Export {
        jobs,
        settings: session.settings.clone(),
        output_path,
    };

    if command_tx.send(command).is_err() {
        log::error!("Export worker is not running");
        return None;
    }

    Some(ExportInFlight { _guard: guard, ids })
}

impl eframe::App for ImagesToPdfApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        // Process all pending updates from worker
        self.process_updates(ctx);

        let generating = self.is_generating();
        let files_hovered = ctx.input(|i| !i.raw.hovered_files.is_empty());

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.show_status_bar(ui);
        });

        if self.show_log {
            egui::TopBottomPanel::bottom("log_panel")
                .resizable(true)
                .default_height(160.0)
                .show(ctx, |ui| {
                    show_log_panel(ui, &self.logger);
                });
        }

        egui::SidePanel::left("settings_panel")
            .min_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.heading("Images to PDF");
                    ui.separator();

                    show_settings(
                        ui,
                        &mut self.settings_panel,
                        &mut self.session.settings,
                        &self.command_tx,
                        !generating,
                    );

                    ui.add_space(10.0);
                    ui.separator();
                    ui.add_space(10.0);

                    self.show_export_button(ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            show_intake(ui, &self.command_tx, !generating, files_hovered);
            ui.add_space(10.0);
            show_preview(
                ui,
                &mut self.session.store,
                &mut self.thumbnails,
                !generating,
            );
        });

        if generating {
            ctx.request_repaint(); // Keep updating during operations
        } else {
            // Poll for worker updates while idle
            ctx.request_repaint_after(WORKER_POLL_INTERVAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(names: &[&str]) -> ConverterSession {
        let mut session = ConverterSession::default();
        session.store.add_entries(
            names
                .iter()
                .map(|name| IntakeFile::new(*name, "image/png", name.as_bytes().to_vec())),
        );
        session
    }

    #[test]
    fn test_dispatch_sends_snapshot_and_holds_status() {
        let session = session_with(&["a.png", "b.png"]);
        let (command_tx, mut command_rx) = mpsc::unbounded_channel();

        let export = dispatch_export(&command_tx, &session, PathBuf::from("out.pdf")).unwrap();

        assert_eq!(export.ids, session.store.ids());
        assert!(session.status().is_generating());
        match command_rx.try_recv().unwrap() {
            PdfCommand::Export {
                jobs, output_path, ..
            } => {
                assert_eq!(jobs.len(), 2);
                assert_eq!(output_path, PathBuf::from("out.pdf"));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        // A second export is refused while the first is in flight
        assert!(dispatch_export(&command_tx, &session, PathBuf::from("out.pdf")).is_none());
        assert!(command_rx.try_recv().is_err());

        drop(export);
        assert!(!session.status().is_generating());
    }

    #[test]
    fn test_dispatch_without_worker_stays_idle() {
        let session = session_with(&["a.png"]);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        drop(command_rx);

        let export = dispatch_export(&command_tx, &session, PathBuf::from("out.pdf"));

        assert!(export.is_none());
        assert!(!session.status().is_generating());
        assert_eq!(session.store.len(), 1);
    }

    #[test]
    fn test_completed_export_keeps_late_intake() {
        let mut session = session_with(&["a.png", "b.png"]);
        let (command_tx, _command_rx) = mpsc::unbounded_channel();
        let export = dispatch_export(&command_tx, &session, PathBuf::from("out.pdf")).unwrap();

        // FilesLoaded arriving after the snapshot was sent
        let late = session
            .store
            .add_entries(vec![IntakeFile::new("late.png", "image/png", b"late".to_vec())]);

        session.store.reset_after_export(&export.ids);
        drop(export);

        assert_eq!(session.store.ids(), late);
        assert_eq!(session.store.previews().live_count(), 1);
    }
}
