//! Shared constants for image-to-PDF conversion
//!
//! This module centralizes the defaults and limits used by the settings,
//! intake and export code.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Quality
// =============================================================================

/// Lowest accepted custom DPI
pub const MIN_CUSTOM_DPI: u32 = 10;

/// Highest accepted custom DPI
pub const MAX_CUSTOM_DPI: u32 = 1200;

/// Custom DPI used until the user enters one
pub const DEFAULT_CUSTOM_DPI: u32 = 300;

/// JPEG quality for embedded rasters (0-100)
pub const JPEG_QUALITY: u8 = 95;

// =============================================================================
// Output
// =============================================================================

/// File stem used when the output name is left blank
pub const DEFAULT_OUTPUT_NAME: &str = "document";

/// Extension of the exported document
pub const OUTPUT_EXTENSION: &str = "pdf";

// =============================================================================
// Intake
// =============================================================================

/// Advertised per-file size ceiling. Larger files are accepted with a warning.
pub const MAX_FILE_SIZE_BYTES: u64 = 20 * 1024 * 1024;

/// Media type prefix accepted at intake
pub const IMAGE_MEDIA_PREFIX: &str = "image/";

/// Media type for files the image format table does not recognize
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Extensions offered by file pickers
pub const PICKER_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "webp", "gif", "bmp", "tif", "tiff", "ico",
];
