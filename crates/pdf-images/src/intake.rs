//! File intake: turning paths into in-memory image files

use crate::constants::{FALLBACK_MEDIA_TYPE, IMAGE_MEDIA_PREFIX, MAX_FILE_SIZE_BYTES};
use crate::types::*;
use image::ImageFormat;
use std::path::Path;
use std::sync::Arc;

/// A file offered for intake: its display name, media type and raw bytes
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl IntakeFile {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Whether the media type marks this file as an image
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with(IMAGE_MEDIA_PREFIX)
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Read a file from disk and detect its media type
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let bytes = tokio::fs::read(&path).await?;

        if bytes.len() as u64 > MAX_FILE_SIZE_BYTES {
            log::warn!(
                "{} is {} bytes, above the advertised {} byte limit",
                path.display(),
                bytes.len(),
                MAX_FILE_SIZE_BYTES
            );
        }

        let media_type = media_type_for(&path, &bytes);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, media_type, bytes))
    }
}

/// Media type from the extension, then from the content, then the fallback
pub fn media_type_for(path: &Path, bytes: &[u8]) -> String {
    ImageFormat::from_path(path)
        .or_else(|_| image::guess_format(bytes))
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| FALLBACK_MEDIA_TYPE.to_string())
}

/// Load several files in order. Unreadable paths are logged and skipped.
pub async fn load_files(paths: &[impl AsRef<Path>]) -> Vec<IntakeFile> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        match IntakeFile::from_path(path).await {
            Ok(file) => files.push(file),
            Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
        }
    }
    files
}
