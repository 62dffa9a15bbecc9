//! Assemble an ordered set of images into a single multi-page PDF.
//!
//! The crate is split along the lifetime of an export:
//! 1. Intake files and keep them in an ordered [`EntryStore`]
//! 2. Resolve [`ExportSettings`] into page dimensions and DPI
//! 3. Prepare one rotated raster per entry and fit it to its page
//! 4. Write the pages to a PDF and reset the store

pub mod constants;
pub mod export;
mod intake;
mod layout;
mod preview;
mod raster;
mod session;
mod settings;
mod store;
mod types;

pub use export::{ExportedDocument, export_document, export_to_path, save_pdf};
pub use intake::{IntakeFile, load_files, media_type_for};
pub use layout::{Placement, effective_dimensions, fit_to_page, is_quarter_turn};
pub use preview::{PreviewHandle, PreviewRegistry};
pub use raster::{
    PreparedRaster, RasterOutcome, SkipReason, decode_image, prepare_raster, rotate_image,
};
pub use session::{ConverterSession, ExportOutcome, ExportState, ExportStatus, GeneratingGuard};
pub use settings::*;
pub use store::{EntryStore, ImageEntry, PageJob, normalize_rotation};
pub use types::*;
