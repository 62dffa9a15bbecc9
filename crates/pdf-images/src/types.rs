use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No images to export")]
    NoImages,
}

pub type Result<T> = std::result::Result<T, ConvertError>;

static NEXT_ENTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an image entry, unique for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

impl EntryId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ENTRY_ID.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Portrait: height >= width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

impl Orientation {
    pub fn from_dimensions(width: f32, height: f32) -> Self {
        if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Result of a finished export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    /// Where the PDF was written
    pub path: PathBuf,
    /// Pages in the output (always equal to the number of exported entries)
    pub page_count: usize,
    /// Pages that received an image
    pub embedded: usize,
    /// Entries whose page was left blank because the image could not be prepared
    pub skipped: Vec<EntryId>,
    /// Resolved DPI setting at the time of export
    pub dpi: u32,
}
