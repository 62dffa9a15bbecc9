use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use lopdf::Document;
use pdf_images::*;
use std::io::Cursor;

fn png_file(name: &str, width: u32, height: u32) -> IntakeFile {
    let image = RgbImage::from_pixel(width, height, Rgb([10, 120, 200]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    IntakeFile::new(name, "image/png", bytes)
}

fn session_with(count: usize) -> ConverterSession {
    let mut session = ConverterSession::default();
    session
        .store
        .add_entries((0..count).map(|i| png_file(&format!("{i}.png"), 12, 8)));
    session
}

#[tokio::test]
async fn test_export_writes_file_and_resets_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_with(3);
    session.settings.output_name = "album".to_string();

    let outcome = session.export(dir.path()).await.unwrap();

    let ExportOutcome::Completed(summary) = outcome else {
        panic!("export did not run");
    };
    assert_eq!(summary.path, dir.path().join("album.pdf"));
    assert_eq!(summary.page_count, 3);
    assert_eq!(summary.embedded, 3);
    assert_eq!(summary.dpi, 150);

    let doc = Document::load(&summary.path).unwrap();
    assert_eq!(doc.get_pages().len(), 3);

    assert!(session.store.is_empty());
    assert_eq!(session.store.previews().live_count(), 0);
    assert_eq!(session.status().state(), ExportState::Idle);
}

#[tokio::test]
async fn test_blank_output_name_uses_default() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_with(1);
    session.settings.output_name.clear();

    session.export(dir.path()).await.unwrap();

    assert!(dir.path().join("document.pdf").exists());
}

#[tokio::test]
async fn test_export_while_generating_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_with(2);
    let settings_before = session.settings.clone();
    let ids_before = session.store.ids();

    let guard = session.status().try_begin().unwrap();
    assert_eq!(session.status().state(), ExportState::Generating);

    let outcome = session.export(dir.path()).await.unwrap();

    assert_eq!(outcome, ExportOutcome::AlreadyGenerating);
    assert_eq!(session.store.ids(), ids_before);
    assert_eq!(session.store.previews().live_count(), 2);
    assert_eq!(session.settings, settings_before);
    assert!(!session.output_path(dir.path()).exists());
    assert_eq!(session.status().state(), ExportState::Generating);

    drop(guard);
    assert_eq!(session.status().state(), ExportState::Idle);
}

#[tokio::test]
async fn test_failed_export_preserves_store() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does").join("not").join("exist");
    let mut session = session_with(2);
    let ids_before = session.store.ids();

    let result = session.export(&missing).await;

    assert!(matches!(result, Err(ConvertError::Io(_))));
    assert_eq!(session.store.ids(), ids_before);
    assert_eq!(session.store.previews().live_count(), 2);
    assert_eq!(session.status().state(), ExportState::Idle);
}

#[tokio::test]
async fn test_export_empty_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = ConverterSession::default();

    let result = session.export(dir.path()).await;

    assert!(matches!(result, Err(ConvertError::NoImages)));
    assert!(!session.output_path(dir.path()).exists());
    assert_eq!(session.status().state(), ExportState::Idle);
}

#[tokio::test]
async fn test_export_again_after_readding() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_with(1);
    session.export(dir.path()).await.unwrap();

    // The store was consumed; a second export has nothing to do
    assert!(matches!(
        session.export(dir.path()).await,
        Err(ConvertError::NoImages)
    ));

    session.store.add_entries(vec![png_file("again.png", 5, 5)]);
    let outcome = session.export(dir.path()).await.unwrap();
    assert!(matches!(outcome, ExportOutcome::Completed(ref s) if s.page_count == 1));
}

#[test]
fn test_status_allows_one_generator() {
    let status = ExportStatus::default();
    assert_eq!(status.state(), ExportState::Idle);

    let guard = status.try_begin().unwrap();
    assert!(status.is_generating());
    assert!(status.try_begin().is_none());

    let shared = status.clone();
    assert!(shared.is_generating());

    drop(guard);
    assert!(!shared.is_generating());
    assert!(status.try_begin().is_some());
}
