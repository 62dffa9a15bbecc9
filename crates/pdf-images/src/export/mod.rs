//! Export routine: ordered page jobs in, one PDF out
//!
//! Entries are processed strictly one after another. The CPU-heavy part of
//! each entry (decode, rotate, JPEG encode) runs on the blocking pool and is
//! awaited before the next entry starts, so pages land in list order.

mod page;

use crate::layout::fit_to_page;
use crate::raster::{RasterOutcome, prepare_raster};
use crate::settings::ExportSettings;
use crate::store::PageJob;
use crate::types::*;
use page::PdfBuilder;
use std::path::Path;
use std::sync::Arc;

/// A serialized PDF plus what went into it
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub embedded: usize,
    /// Entries whose page was left blank
    pub skipped: Vec<EntryId>,
    pub dpi: u32,
}

/// Build a PDF with one page per job, in order.
///
/// `progress` is called with `(pages_done, total)` after every page.
/// Images that cannot be decoded leave their page blank; any other failure
/// aborts the export and nothing is returned.
pub async fn export_document(
    jobs: &[PageJob],
    settings: &ExportSettings,
    mut progress: impl FnMut(usize, usize),
) -> Result<ExportedDocument> {
    if jobs.is_empty() {
        return Err(ConvertError::NoImages);
    }

    let dpi = settings.dpi();
    let (page_width_mm, page_height_mm) = settings.page_dimensions_mm();
    log::info!(
        "Exporting {} images on {} {:?} pages at {} DPI",
        jobs.len(),
        settings.page_size.key(),
        settings.orientation(),
        dpi
    );

    let mut builder = PdfBuilder::new(page_width_mm, page_height_mm);
    let mut skipped = Vec::new();
    let total = jobs.len();

    for (index, job) in jobs.iter().enumerate() {
        let bytes = Arc::clone(&job.bytes);
        let rotation = job.rotation_degrees;
        let outcome =
            tokio::task::spawn_blocking(move || prepare_raster(&bytes, rotation)).await??;

        match outcome {
            RasterOutcome::Ready(raster) => {
                let placement =
                    fit_to_page(page_width_mm, page_height_mm, raster.width, raster.height);
                builder.add_image_page(raster, &placement);
            }
            RasterOutcome::Skipped(reason) => {
                log::warn!(
                    "Leaving page {} blank for {}: {}",
                    index + 1,
                    job.name,
                    reason
                );
                builder.add_blank_page();
                skipped.push(job.id);
            }
        }

        progress(index + 1, total);
    }

    let page_count = builder.page_count();
    let bytes = tokio::task::spawn_blocking(move || builder.finish()).await??;

    Ok(ExportedDocument {
        bytes,
        page_count,
        embedded: page_count - skipped.len(),
        skipped,
        dpi,
    })
}

/// Write an exported document to disk
pub async fn save_pdf(document: &ExportedDocument, path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::write(path, &document.bytes).await?;
    Ok(())
}

/// Build the PDF for `jobs`, write it to `path` and describe the result.
///
/// Nothing is written unless every page was built.
pub async fn export_to_path(
    jobs: &[PageJob],
    settings: &ExportSettings,
    path: impl AsRef<Path>,
    progress: impl FnMut(usize, usize),
) -> Result<ExportSummary> {
    let path = path.as_ref().to_path_buf();
    let document = export_document(jobs, settings, progress).await?;
    save_pdf(&document, &path).await?;

    log::info!(
        "Exported {} pages to {}",
        document.page_count,
        path.display()
    );

    Ok(ExportSummary {
        path,
        page_count: document.page_count,
        embedded: document.embedded,
        skipped: document.skipped,
        dpi: document.dpi,
    })
}
