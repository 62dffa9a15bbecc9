use eframe::egui;
use pdf_images::{EntryId, EntryStore, ImageEntry, decode_image, rotate_image};
use std::collections::HashMap;

const THUMBNAIL_SIZE: u32 = 192;

struct CachedThumbnail {
    rotation_degrees: u32,
    texture: Option<egui::TextureHandle>,
}

/// Preview textures per entry, rebuilt when the entry's rotation changes
#[derive(Default)]
pub struct ThumbnailCache {
    cached: HashMap<EntryId, CachedThumbnail>,
}

impl ThumbnailCache {
    /// Texture for `entry` at its current rotation, `None` if it cannot be decoded
    pub fn get(
        &mut self,
        ctx: &egui::Context,
        store: &EntryStore,
        entry: &ImageEntry,
    ) -> Option<egui::TextureHandle> {
        let rotation_degrees = entry.rotation_degrees();
        let stale = self
            .cached
            .get(&entry.id())
            .is_none_or(|cached| cached.rotation_degrees != rotation_degrees);

        if stale {
            let texture = store
                .preview_bytes(entry.id())
                .and_then(|bytes| load_thumbnail(ctx, entry, &bytes));
            self.cached.insert(
                entry.id(),
                CachedThumbnail {
                    rotation_degrees,
                    texture,
                },
            );
        }

        self.cached
            .get(&entry.id())
            .and_then(|cached| cached.texture.clone())
    }

    /// Forget textures of entries that are no longer in the store
    pub fn retain(&mut self, store: &EntryStore) {
        self.cached.retain(|id, _| store.get(*id).is_some());
    }

    pub fn clear(&mut self) {
        self.cached.clear();
    }
}

fn load_thumbnail(
    ctx: &egui::Context,
    entry: &ImageEntry,
    bytes: &[u8],
) -> Option<egui::TextureHandle> {
    let image = match decode_image(bytes) {
        Ok(image) => image,
        Err(e) => {
            log::warn!("No preview for {}: {}", entry.name(), e);
            return None;
        }
    };

    let thumbnail = image.thumbnail(THUMBNAIL_SIZE, THUMBNAIL_SIZE);
    let rotated = rotate_image(&thumbnail, entry.rotation_degrees())?;
    let color_image = egui::ColorImage::from_rgb(
        [rotated.width() as usize, rotated.height() as usize],
        rotated.as_raw(),
    );

    Some(ctx.load_texture(
        format!("thumbnail_{}", entry.id().0),
        color_image,
        egui::TextureOptions::default(),
    ))
}
