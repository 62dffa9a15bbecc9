//! The ordered collection of image entries
//!
//! Position in the store is page order in the exported document. Every
//! mutation is a plain method on [`EntryStore`]; out-of-range indices and
//! unknown ids are no-ops rather than errors.

use crate::intake::IntakeFile;
use crate::preview::{PreviewHandle, PreviewRegistry};
use crate::types::EntryId;
use std::sync::Arc;

/// One user-supplied image plus its rotation and identity
#[derive(Debug)]
pub struct ImageEntry {
    id: EntryId,
    source: IntakeFile,
    preview: PreviewHandle,
    rotation_degrees: u32,
}

impl ImageEntry {
    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.source.name
    }

    pub fn source(&self) -> &IntakeFile {
        &self.source
    }

    pub fn preview(&self) -> &PreviewHandle {
        &self.preview
    }

    /// Clockwise rotation in [0, 360)
    pub fn rotation_degrees(&self) -> u32 {
        self.rotation_degrees
    }
}

/// Immutable per-entry snapshot read by the export loop
#[derive(Debug, Clone)]
pub struct PageJob {
    pub id: EntryId,
    pub name: String,
    pub bytes: Arc<[u8]>,
    pub rotation_degrees: u32,
}

/// Normalize any angle into [0, 360)
pub fn normalize_rotation(degrees: i64) -> u32 {
    degrees.rem_euclid(360) as u32
}

#[derive(Debug, Default)]
pub struct EntryStore {
    entries: Vec<ImageEntry>,
    previews: PreviewRegistry,
}

impl EntryStore {
    pub fn new(previews: PreviewRegistry) -> Self {
        Self {
            entries: Vec::new(),
            previews,
        }
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    /// Append one entry per image file, keeping input order.
    /// Files that are not images are dropped. Returns the new ids.
    pub fn add_entries(&mut self, files: impl IntoIterator<Item = IntakeFile>) -> Vec<EntryId> {
        let mut added = Vec::new();

        for file in files {
            if !file.is_image() {
                log::debug!("Ignoring {} ({})", file.name, file.media_type);
                continue;
            }

            let id = EntryId::next();
            let preview = self.previews.create(Arc::clone(&file.bytes));
            log::debug!("Added {} as entry {} ({})", file.name, id, preview);

            self.entries.push(ImageEntry {
                id,
                source: file,
                preview,
                rotation_degrees: 0,
            });
            added.push(id);
        }

        added
    }

    /// Remove an entry and revoke its preview. Unknown ids are ignored.
    pub fn remove_entry(&mut self, id: EntryId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let entry = self.entries.remove(index);
        self.previews.revoke(entry.preview);
        true
    }

    /// Add `delta_degrees` to an entry's rotation. Returns the new rotation.
    pub fn rotate_entry(&mut self, id: EntryId, delta_degrees: i32) -> Option<u32> {
        let entry = self.entries.iter_mut().find(|e| e.id == id)?;
        entry.rotation_degrees =
            normalize_rotation(entry.rotation_degrees as i64 + delta_degrees as i64);
        Some(entry.rotation_degrees)
    }

    /// Swap the entry at `index` with its predecessor
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            return false;
        }
        self.entries.swap(index - 1, index);
        true
    }

    /// Swap the entry at `index` with its successor
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.entries.len() {
            return false;
        }
        self.entries.swap(index, index + 1);
        true
    }

    /// Revoke every preview and empty the store. Returns how many entries were removed.
    pub fn clear_all(&mut self) -> usize {
        let count = self.entries.len();
        for entry in self.entries.drain(..) {
            self.previews.revoke(entry.preview);
        }
        count
    }

    /// Release the entries of a successful export.
    ///
    /// Only ids in `exported` are removed; entries added after the snapshot
    /// was taken stay in the store. Returns how many entries were released.
    pub fn reset_after_export(&mut self, exported: &[EntryId]) -> usize {
        let (released, kept): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(|entry| exported.contains(&entry.id));
        self.entries = kept;

        let count = released.len();
        for entry in released {
            self.previews.revoke(entry.preview);
        }
        log::debug!(
            "Released {} entries after export, {} remain",
            count,
            self.entries.len()
        );
        count
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&ImageEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn ids(&self) -> Vec<EntryId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Resolve an entry's preview handle for display
    pub fn preview_bytes(&self, id: EntryId) -> Option<Arc<[u8]>> {
        self.get(id)
            .and_then(|entry| self.previews.resolve(&entry.preview))
    }

    /// Page jobs in page order
    pub fn snapshot(&self) -> Vec<PageJob> {
        self.entries
            .iter()
            .map(|entry| PageJob {
                id: entry.id,
                name: entry.source.name.clone(),
                bytes: Arc::clone(&entry.source.bytes),
                rotation_degrees: entry.rotation_degrees,
            })
            .collect()
    }
}
