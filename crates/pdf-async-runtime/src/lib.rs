use std::path::PathBuf;

// Re-export types from library crates
pub use pdf_images::{EntryId, ExportSettings, ExportSummary, IntakeFile, PageJob};

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum PdfCommand {
    /// Read files from disk for intake
    AddFiles {
        paths: Vec<PathBuf>,
    },
    /// Build the PDF from a snapshot of the store and write it to `output_path`
    Export {
        jobs: Vec<PageJob>,
        settings: ExportSettings,
        output_path: PathBuf,
    },
    LoadSettings {
        path: PathBuf,
    },
    SaveSettings {
        settings: ExportSettings,
        path: PathBuf,
    },
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum PdfUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    FilesLoaded {
        files: Vec<IntakeFile>,
    },
    ExportComplete {
        summary: ExportSummary,
    },
    /// The export was aborted; nothing was written
    ExportFailed {
        message: String,
    },
    SettingsLoaded {
        settings: ExportSettings,
    },
    SettingsSaved {
        path: PathBuf,
    },
    Error {
        message: String,
    },
}

