use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use pdf_images::*;
use std::io::Cursor;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb([200, 40, 40]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn png_file(name: &str, width: u32, height: u32) -> IntakeFile {
    IntakeFile::new(name, "image/png", png_bytes(width, height))
}

fn broken_file(name: &str) -> IntakeFile {
    IntakeFile::new(name, "image/png", b"definitely not a png".to_vec())
}

fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

/// (width, height) of the image drawn on a page, `None` for blank pages
fn page_image_size(doc: &Document, page_id: ObjectId) -> Option<(i64, i64)> {
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").ok()?.as_dict().ok()?;
    let xobjects = resources.get(b"XObject").ok()?.as_dict().ok()?;
    let image_id = xobjects.get(b"Im0").ok()?.as_reference().ok()?;
    let stream = doc.get_object(image_id).unwrap().as_stream().unwrap();

    assert_eq!(
        stream.dict.get(b"Filter").unwrap().as_name().unwrap(),
        b"DCTDecode"
    );
    Some((
        stream.dict.get(b"Width").unwrap().as_i64().unwrap(),
        stream.dict.get(b"Height").unwrap().as_i64().unwrap(),
    ))
}

/// Operands of the `cm` operator on a page: (width, height, x, y) in points
fn page_transform(doc: &Document, page_id: ObjectId) -> (f32, f32, f32, f32) {
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    let cm = content
        .operations
        .iter()
        .find(|op| op.operator == "cm")
        .expect("page has no transform");
    let values: Vec<f32> = cm.operands.iter().map(|o| o.as_float().unwrap()).collect();
    (values[0], values[3], values[4], values[5])
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {expected}, got {actual}"
    );
}

fn mm(value: f32) -> f32 {
    value * 72.0 / 25.4
}

#[tokio::test]
async fn test_export_one_page_per_entry_in_order() {
    let mut store = EntryStore::default();
    store.add_entries(vec![
        png_file("wide.png", 40, 20),
        png_file("tall.png", 10, 30),
        png_file("square.png", 16, 16),
    ]);

    let document = export_document(&store.snapshot(), &ExportSettings::default(), |_, _| {})
        .await
        .unwrap();

    assert_eq!(document.page_count, 3);
    assert_eq!(document.embedded, 3);
    assert!(document.skipped.is_empty());

    let doc = Document::load_mem(&document.bytes).unwrap();
    let pages = page_ids(&doc);
    assert_eq!(pages.len(), 3);
    assert_eq!(page_image_size(&doc, pages[0]), Some((40, 20)));
    assert_eq!(page_image_size(&doc, pages[1]), Some((10, 30)));
    assert_eq!(page_image_size(&doc, pages[2]), Some((16, 16)));
}

#[tokio::test]
async fn test_export_follows_reordering() {
    let mut store = EntryStore::default();
    store.add_entries(vec![png_file("first.png", 30, 10), png_file("second.png", 10, 30)]);
    store.move_up(1);

    let document = export_document(&store.snapshot(), &ExportSettings::default(), |_, _| {})
        .await
        .unwrap();

    let doc = Document::load_mem(&document.bytes).unwrap();
    let pages = page_ids(&doc);
    assert_eq!(page_image_size(&doc, pages[0]), Some((10, 30)));
    assert_eq!(page_image_size(&doc, pages[1]), Some((30, 10)));
}

#[tokio::test]
async fn test_pages_use_selected_size() {
    let mut store = EntryStore::default();
    store.add_entries(vec![png_file("a.png", 8, 8)]);
    let settings = {
        let mut settings = ExportSettings::default();
        settings.page_size = PageSize::Letter;
        settings
    };

    let document = export_document(&store.snapshot(), &settings, |_, _| {})
        .await
        .unwrap();

    let doc = Document::load_mem(&document.bytes).unwrap();
    let page = doc.get_dictionary(page_ids(&doc)[0]).unwrap();
    let media_box: Vec<f32> = page
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o.as_float().unwrap())
        .collect();

    assert_close(media_box[2], mm(215.9));
    assert_close(media_box[3], mm(279.4));
}

#[tokio::test]
async fn test_rotated_entry_is_embedded_upright() {
    let mut store = EntryStore::default();
    let ids = store.add_entries(vec![png_file("photo.png", 800, 600)]);
    store.rotate_entry(ids[0], 90);

    let document = export_document(&store.snapshot(), &ExportSettings::default(), |_, _| {})
        .await
        .unwrap();

    let doc = Document::load_mem(&document.bytes).unwrap();
    let page = page_ids(&doc)[0];
    assert_eq!(page_image_size(&doc, page), Some((600, 800)));

    // Fitted to the width: 210 x 280 mm, centered vertically
    let (width, height, x, y) = page_transform(&doc, page);
    assert_close(width, mm(210.0));
    assert_close(height, mm(280.0));
    assert_close(x, 0.0);
    assert_close(y, mm(8.5));
}

#[tokio::test]
async fn test_landscape_image_is_centered_vertically() {
    let mut store = EntryStore::default();
    store.add_entries(vec![png_file("photo.png", 800, 600)]);

    let document = export_document(&store.snapshot(), &ExportSettings::default(), |_, _| {})
        .await
        .unwrap();

    let doc = Document::load_mem(&document.bytes).unwrap();
    let (width, height, x, y) = page_transform(&doc, page_ids(&doc)[0]);
    assert_close(width, mm(210.0));
    assert_close(height, mm(157.5));
    assert_close(x, 0.0);
    assert_close(y, mm(69.75));
}

#[tokio::test]
async fn test_undecodable_image_leaves_blank_page() {
    let mut store = EntryStore::default();
    let ids = store.add_entries(vec![
        png_file("good.png", 20, 10),
        broken_file("broken.png"),
        png_file("also-good.png", 10, 20),
    ]);

    let document = export_document(&store.snapshot(), &ExportSettings::default(), |_, _| {})
        .await
        .unwrap();

    assert_eq!(document.page_count, 3);
    assert_eq!(document.embedded, 2);
    assert_eq!(document.skipped, vec![ids[1]]);

    let doc = Document::load_mem(&document.bytes).unwrap();
    let pages = page_ids(&doc);
    assert_eq!(pages.len(), 3);
    assert_eq!(page_image_size(&doc, pages[0]), Some((20, 10)));
    assert_eq!(page_image_size(&doc, pages[1]), None);
    assert!(doc.get_page_content(pages[1]).unwrap().is_empty());
    assert_eq!(page_image_size(&doc, pages[2]), Some((10, 20)));
}

#[tokio::test]
async fn test_progress_is_reported_per_page() {
    let mut store = EntryStore::default();
    store.add_entries(vec![
        png_file("a.png", 4, 4),
        broken_file("b.png"),
        png_file("c.png", 4, 4),
    ]);

    let mut calls = Vec::new();
    export_document(&store.snapshot(), &ExportSettings::default(), |done, total| {
        calls.push((done, total))
    })
    .await
    .unwrap();

    assert_eq!(calls, vec![(1, 3), (2, 3), (3, 3)]);
}

#[tokio::test]
async fn test_export_without_entries() {
    let result = export_document(&[], &ExportSettings::default(), |_, _| {}).await;
    assert!(matches!(result, Err(ConvertError::NoImages)));
}

#[tokio::test]
async fn test_dpi_is_reported_but_does_not_resample() {
    let mut store = EntryStore::default();
    store.add_entries(vec![png_file("a.png", 33, 17)]);

    for quality in [QualityTier::Low, QualityTier::Ultra] {
        let settings = {
            let mut settings = ExportSettings::default();
            settings.quality = quality;
            settings
        };
        let document = export_document(&store.snapshot(), &settings, |_, _| {})
            .await
            .unwrap();

        assert_eq!(document.dpi, quality.fixed_dpi().unwrap());
        let doc = Document::load_mem(&document.bytes).unwrap();
        assert_eq!(page_image_size(&doc, page_ids(&doc)[0]), Some((33, 17)));
    }
}

#[tokio::test]
async fn test_save_pdf_writes_bytes() {
    let mut store = EntryStore::default();
    store.add_entries(vec![png_file("a.png", 4, 4), png_file("b.png", 4, 4)]);
    let document = export_document(&store.snapshot(), &ExportSettings::default(), |_, _| {})
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");
    save_pdf(&document, &path).await.unwrap();

    let loaded = Document::load(&path).unwrap();
    assert_eq!(loaded.get_pages().len(), 2);
    assert!(matches!(
        loaded.trailer.get(b"Root").unwrap(),
        Object::Reference(_)
    ));
}

#[tokio::test]
async fn test_export_to_path_writes_file_and_summary() {
    let mut store = EntryStore::default();
    let ids = store.add_entries(vec![
        png_file("a.png", 6, 4),
        broken_file("broken.png"),
        png_file("c.png", 4, 6),
    ]);
    let settings = {
        let mut settings = ExportSettings::default();
        settings.quality = QualityTier::High;
        settings
    };

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(settings.output_file_name());
    let mut calls = Vec::new();

    let summary = export_to_path(&store.snapshot(), &settings, &path, |done, total| {
        calls.push((done, total))
    })
    .await
    .unwrap();

    assert_eq!(summary.path, path);
    assert_eq!(summary.page_count, 3);
    assert_eq!(summary.embedded, 2);
    assert_eq!(summary.skipped, vec![ids[1]]);
    assert_eq!(summary.dpi, 300);
    assert_eq!(calls, vec![(1, 3), (2, 3), (3, 3)]);

    let doc = Document::load(&path).unwrap();
    assert_eq!(doc.get_pages().len(), 3);

    // Exporting never touches the store itself
    assert_eq!(store.ids(), ids);
}

#[tokio::test]
async fn test_export_to_path_missing_directory() {
    let mut store = EntryStore::default();
    store.add_entries(vec![png_file("a.png", 4, 4)]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.pdf");

    let result =
        export_to_path(&store.snapshot(), &ExportSettings::default(), &path, |_, _| {}).await;

    assert!(matches!(result, Err(ConvertError::Io(_))));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_export_to_path_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");

    let result = export_to_path(&[], &ExportSettings::default(), &path, |_, _| {}).await;

    assert!(matches!(result, Err(ConvertError::NoImages)));
    assert!(!path.exists());
}
