//! Session state shared by the UI: entry store, settings and export status
//!
//! Only one export runs at a time. [`ExportStatus::try_begin`] hands out a
//! guard that flips the status back to idle when dropped, on success and
//! failure alike.

use crate::export::export_to_path;
use crate::preview::PreviewRegistry;
use crate::settings::ExportSettings;
use crate::store::EntryStore;
use crate::types::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    Generating,
}

/// Shared view of whether an export is running
#[derive(Debug, Clone, Default)]
pub struct ExportStatus {
    generating: Arc<AtomicBool>,
}

impl ExportStatus {
    pub fn state(&self) -> ExportState {
        if self.is_generating() {
            ExportState::Generating
        } else {
            ExportState::Idle
        }
    }

    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::SeqCst)
    }

    /// Move to `Generating`, or return `None` if an export is already running
    pub fn try_begin(&self) -> Option<GeneratingGuard> {
        self.generating
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| GeneratingGuard {
                generating: Arc::clone(&self.generating),
            })
    }
}

/// Held for the duration of an export; returns the status to idle on drop
#[derive(Debug)]
#[must_use = "the export status returns to idle as soon as the guard is dropped"]
pub struct GeneratingGuard {
    generating: Arc<AtomicBool>,
}

impl Drop for GeneratingGuard {
    fn drop(&mut self) {
        self.generating.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Completed(ExportSummary),
    /// Another export was running; nothing was touched
    AlreadyGenerating,
}

#[derive(Debug, Default)]
pub struct ConverterSession {
    pub store: EntryStore,
    pub settings: ExportSettings,
    status: ExportStatus,
}

impl ConverterSession {
    pub fn new(previews: PreviewRegistry, settings: ExportSettings) -> Self {
        Self {
            store: EntryStore::new(previews),
            settings,
            status: ExportStatus::default(),
        }
    }

    pub fn status(&self) -> &ExportStatus {
        &self.status
    }

    /// Full path of the file an export into `output_dir` would write
    pub fn output_path(&self, output_dir: impl AsRef<Path>) -> PathBuf {
        output_dir.as_ref().join(self.settings.output_file_name())
    }

    pub async fn export(&mut self, output_dir: impl AsRef<Path>) -> Result<ExportOutcome> {
        self.export_with_progress(output_dir, |_, _| {}).await
    }

    /// Export every entry into `output_dir`, then empty the store.
    ///
    /// On failure the store is left exactly as it was and no file is written.
    pub async fn export_with_progress(
        &mut self,
        output_dir: impl AsRef<Path>,
        progress: impl FnMut(usize, usize),
    ) -> Result<ExportOutcome> {
        let Some(_guard) = self.status.try_begin() else {
            log::debug!("Export already in progress, ignoring request");
            return Ok(ExportOutcome::AlreadyGenerating);
        };

        let jobs = self.store.snapshot();
        let path = self.output_path(output_dir);

        match export_to_path(&jobs, &self.settings, &path, progress).await {
            Ok(summary) => {
                let exported: Vec<EntryId> = jobs.iter().map(|job| job.id).collect();
                self.store.reset_after_export(&exported);
                Ok(ExportOutcome::Completed(summary))
            }
            Err(e) => {
                log::error!("Export failed: {}", e);
                Err(e)
            }
        }
    }
}
