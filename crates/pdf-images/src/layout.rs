//! Page geometry for a single image
//!
//! All page measurements are in millimeters with the origin at the top-left
//! corner of the page; image sizes are in pixels.

/// Whether a rotation swaps the image's width and height
pub fn is_quarter_turn(rotation_degrees: u32) -> bool {
    rotation_degrees % 180 != 0
}

/// Width and height the image occupies after rotation
pub fn effective_dimensions(width: u32, height: u32, rotation_degrees: u32) -> (u32, u32) {
    if is_quarter_turn(rotation_degrees) {
        (height, width)
    } else {
        (width, height)
    }
}

/// Where an image is drawn on its page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Distance from the left page edge
    pub x_mm: f32,
    /// Distance from the top page edge
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

impl Placement {
    /// Distance from the bottom page edge, for bottom-left origin coordinates
    pub fn bottom_mm(&self, page_height_mm: f32) -> f32 {
        page_height_mm - self.y_mm - self.height_mm
    }
}

/// Scale an image to the page, preserving aspect ratio, and center it.
///
/// The image is fitted to the page width first; if that makes it taller
/// than the page it is fitted to the height instead.
pub fn fit_to_page(
    page_width_mm: f32,
    page_height_mm: f32,
    image_width: u32,
    image_height: u32,
) -> Placement {
    let image_width = image_width as f32;
    let image_height = image_height as f32;

    let mut width_mm = page_width_mm;
    let mut height_mm = width_mm * (image_height / image_width);

    if height_mm > page_height_mm {
        height_mm = page_height_mm;
        width_mm = height_mm * (image_width / image_height);
    }

    Placement {
        x_mm: (page_width_mm - width_mm) / 2.0,
        y_mm: (page_height_mm - height_mm) / 2.0,
        width_mm,
        height_mm,
    }
}
