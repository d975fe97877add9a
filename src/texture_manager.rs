use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use image::RgbaImage;

use crate::sticker::Sticker;

/// What a cached texture shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKey {
    Placeholder,
    /// A picked background, by image id
    Background(usize),
    /// A sticker rasterized at a pixel size
    Sticker(Sticker, u32),
}

impl TextureKey {
    fn name(&self) -> String {
        match self {
            Self::Placeholder => "placeholder".to_owned(),
            Self::Background(id) => format!("background_{id}"),
            Self::Sticker(sticker, size) => format!("sticker_{}_{size}", sticker.name()),
        }
    }
}

/// Uploads images to egui once and hands back their texture ids, evicting the least recently used
pub struct TextureManager {
    texture_cache: HashMap<TextureKey, TextureHandle>,
    /// Frame each texture was last used in
    last_used: HashMap<TextureKey, u64>,
    current_frame: u64,
    max_cache_size: usize,
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size: max_cache_size.max(1),
        }
    }

    /// Should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Gets the texture for `key`, rendering it with `generator` on a miss
    pub fn get_or_create<F>(&mut self, key: TextureKey, generator: F, ctx: &Context) -> TextureId
    where
        F: FnOnce() -> RgbaImage,
    {
        if let Some(handle) = self.texture_cache.get(&key) {
            self.last_used.insert(key, self.current_frame);
            return handle.id();
        }

        let pixels = generator();
        let size = [pixels.width() as usize, pixels.height() as usize];
        let image = ColorImage::from_rgba_unmultiplied(size, pixels.as_raw());
        let handle = ctx.load_texture(key.name(), image, TextureOptions::LINEAR);
        let id = handle.id();

        self.texture_cache.insert(key, handle);
        self.last_used.insert(key, self.current_frame);
        self.prune_cache_if_needed();

        id
    }

    /// Drops every cached background except `keep`
    pub fn retain_background(&mut self, keep: Option<usize>) {
        let stale: Vec<TextureKey> = self
            .texture_cache
            .keys()
            .filter(|key| matches!(key, TextureKey::Background(id) if Some(*id) != keep))
            .copied()
            .collect();
        for key in stale {
            self.texture_cache.remove(&key);
            self.last_used.remove(&key);
        }
    }

    fn prune_cache_if_needed(&mut self) {
        if self.texture_cache.len() <= self.max_cache_size {
            return;
        }

        let mut entries: Vec<(TextureKey, u64)> =
            self.last_used.iter().map(|(k, v)| (*k, *v)).collect();
        // Oldest first
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = entries.len() - self.max_cache_size;
        for (key, _) in entries.into_iter().take(to_remove) {
            self.texture_cache.remove(&key);
            self.last_used.remove(&key);
        }
    }

    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    pub fn contains(&self, key: TextureKey) -> bool {
        self.texture_cache.contains_key(&key)
    }
}
