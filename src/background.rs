use image::{DynamicImage, Rgba, RgbaImage, imageops::FilterType};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// Static counter for generating unique IDs
static NEXT_IMAGE_ID: AtomicUsize = AtomicUsize::new(1);

/// A background the user picked: where it came from plus its decoded pixels
#[derive(Clone)]
pub struct SelectedImage {
    id: usize,             // Unique identifier, used as a texture cache key
    uri: String,           // Path or file name the image was picked from
    pixels: Arc<RgbaImage>,
}

// Custom Debug so logs don't dump pixel data
impl std::fmt::Debug for SelectedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedImage")
            .field("id", &self.id)
            .field("uri", &self.uri)
            .field("dimensions", &self.pixels.dimensions())
            .finish()
    }
}

impl PartialEq for SelectedImage {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl SelectedImage {
    pub fn new(uri: impl Into<String>, pixels: RgbaImage) -> Self {
        let id = NEXT_IMAGE_ID.fetch_add(1, Ordering::SeqCst);
        Self {
            id,
            uri: uri.into(),
            pixels: Arc::new(pixels),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

/// The bottom layer of the composition
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Placeholder,
    Selected(SelectedImage),
}

impl Background {
    pub fn from_selection(selected: Option<&SelectedImage>) -> Self {
        match selected {
            Some(image) => Self::Selected(image.clone()),
            None => Self::Placeholder,
        }
    }

    /// Renders the layer into exactly `width` x `height` pixels, scaling to cover and cropping the overflow.
    pub fn render(&self, width: u32, height: u32) -> RgbaImage {
        match self {
            Self::Placeholder => placeholder(width, height),
            Self::Selected(image) => cover(image.pixels(), width, height),
        }
    }
}

/// Scales `source` to fill the target box, then center-crops.
pub fn cover(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if source.dimensions() == (width, height) {
        return source.clone();
    }
    DynamicImage::ImageRgba8(source.clone())
        .resize_to_fill(width.max(1), height.max(1), FilterType::Triangle)
        .to_rgba8()
}

/// Center-crops `source` to the given width/height ratio.
pub fn crop_to_aspect(source: &RgbaImage, aspect: f32) -> RgbaImage {
    let (w, h) = source.dimensions();
    if w == 0 || h == 0 || aspect <= 0.0 {
        return source.clone();
    }
    let (crop_w, crop_h) = if (w as f32 / h as f32) > aspect {
        (((h as f32 * aspect).round() as u32).clamp(1, w), h)
    } else {
        (w, ((w as f32 / aspect).round() as u32).clamp(1, h))
    };
    image::imageops::crop_imm(source, (w - crop_w) / 2, (h - crop_h) / 2, crop_w, crop_h).to_image()
}

/// Downscales by `quality` in 0..=1; 1 keeps the original pixels.
pub fn apply_quality(source: RgbaImage, quality: f32) -> RgbaImage {
    let quality = quality.clamp(0.0, 1.0);
    if quality >= 1.0 {
        return source;
    }
    let (w, h) = source.dimensions();
    let scaled_w = ((w as f32 * quality).round() as u32).max(1);
    let scaled_h = ((h as f32 * quality).round() as u32).max(1);
    image::imageops::resize(&source, scaled_w, scaled_h, FilterType::Triangle)
}

/// The default background shown before a photo is chosen.
/// A soft vertical gradient with a diagonal sheen.
pub fn placeholder(width: u32, height: u32) -> RgbaImage {
    let top = [94.0f32, 129.0, 172.0];
    let bottom = [38.0f32, 52.0, 79.0];
    RgbaImage::from_fn(width.max(1), height.max(1), |x, y| {
        let t = y as f32 / height.max(1) as f32;
        let sheen = if (x + y) % 48 < 24 { 6.0 } else { 0.0 };
        let channel =
            |i: usize| (top[i] + (bottom[i] - top[i]) * t + sheen).clamp(0.0, 255.0) as u8;
        Rgba([channel(0), channel(1), channel(2), 255])
    })
}
