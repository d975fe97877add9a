//! Where finished captures go: the device media store on native targets, a browser download on the web.

mod download;
mod media_store;

use std::io::Cursor;

use image::{DynamicImage, ImageEncoder, ImageFormat};

pub use download::DownloadSink;
pub use media_store::MediaStoreSink;

use crate::capture::CapturedImage;
use crate::config::ScreenConfig;
use crate::error::ExportError;

/// Whether the sink may write where it wants to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Undetermined,
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    MediaStore,
    Download,
}

/// The runtime platform, which decides the export path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Native,
    Web,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Native
        }
    }
}

/// Proof of a finished export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    /// File path for media store writes, file name for downloads
    pub location: String,
    pub bytes_written: usize,
}

pub trait ExportSink: Send + Sync {
    fn kind(&self) -> SinkKind;

    fn permission(&self) -> Permission;

    /// Asks for write access; called at most once per screen activation.
    fn request_permission(&self) -> Permission;

    fn export(&self, capture: &CapturedImage) -> Result<ExportReceipt, ExportError>;
}

/// Picks the export variant for `platform`.
pub fn select_sink(platform: Platform, config: &ScreenConfig) -> Box<dyn ExportSink> {
    match platform {
        Platform::Native => Box::new(MediaStoreSink::from_config(config)),
        Platform::Web => Box::new(DownloadSink::new()),
    }
}

pub(crate) fn encode_png(capture: &CapturedImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    capture.pixels.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// JPEG has no alpha; the composition is opaque so the channel is simply dropped.
pub(crate) fn encode_jpeg(capture: &CapturedImage) -> Result<Vec<u8>, ExportError> {
    let rgb = DynamicImage::ImageRgba8(capture.pixels.clone()).to_rgb8();
    let quality = (capture.quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8;
    let mut bytes = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, quality).write_image(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(bytes)
}
