//! Rasterization of the composed region (background + sticker) into a pixel buffer.

use image::RgbaImage;

use crate::background::Background;
use crate::config::ScreenConfig;
use crate::error::CaptureError;
use crate::sticker::Sticker;

/// A sticker pinned at its design-time position, in frame points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickerPlacement {
    pub sticker: Sticker,
    pub size: u32,
    pub offset: [i64; 2],
}

/// Everything visible inside the capture region
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionScene {
    pub frame_size: [u32; 2],
    pub background: Background,
    pub sticker: Option<StickerPlacement>,
}

impl CompositionScene {
    pub fn new(config: &ScreenConfig, background: Background, sticker: Option<Sticker>) -> Self {
        Self {
            frame_size: config.frame_size,
            background,
            sticker: sticker.map(|sticker| StickerPlacement {
                sticker,
                size: config.sticker_size,
                offset: config.sticker_offset,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    /// Output height in pixels; width follows the frame aspect
    pub height: u32,
    /// 0..=1, carried to whichever encoder the sink uses
    pub quality: f32,
}

/// A rasterized capture ready to hand to an export sink
#[derive(Clone)]
pub struct CapturedImage {
    pub pixels: RgbaImage,
    pub quality: f32,
}

impl std::fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedImage")
            .field("dimensions", &self.pixels.dimensions())
            .field("quality", &self.quality)
            .finish()
    }
}

impl CapturedImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

pub trait RenderCapture {
    fn capture(
        &self,
        scene: &CompositionScene,
        options: CaptureOptions,
    ) -> Result<CapturedImage, CaptureError>;
}

/// CPU compositor: draws the same layers the screen shows, at export resolution.
#[derive(Debug, Default, Clone, Copy)]
pub struct Compositor;

impl RenderCapture for Compositor {
    fn capture(
        &self,
        scene: &CompositionScene,
        options: CaptureOptions,
    ) -> Result<CapturedImage, CaptureError> {
        if !(0.0..=1.0).contains(&options.quality) {
            return Err(CaptureError::InvalidOptions(format!(
                "quality {} is outside 0..=1",
                options.quality
            )));
        }

        let [frame_w, frame_h] = scene.frame_size;
        if frame_w == 0 || frame_h == 0 || options.height == 0 {
            return Err(CaptureError::EmptyRegion {
                width: frame_w,
                height: options.height.min(frame_h),
            });
        }

        let scale = options.height as f32 / frame_h as f32;
        let width = ((frame_w as f32 * scale).round() as u32).max(1);
        let height = options.height;

        let mut pixels = scene.background.render(width, height);

        if let Some(placement) = scene.sticker {
            let size = ((placement.size as f32 * scale).round() as u32).max(1);
            let x = (placement.offset[0] as f32 * scale).round() as i64;
            let y = (placement.offset[1] as f32 * scale).round() as i64;
            let sticker = placement.sticker.rasterize(size);
            image::imageops::overlay(&mut pixels, &sticker, x, y);
        }

        log::debug!(
            "Captured {}x{} (scale {:.2}, sticker: {:?})",
            width,
            height,
            scale,
            scene.sticker.map(|p| p.sticker)
        );

        Ok(CapturedImage {
            pixels,
            quality: options.quality,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::SelectedImage;
    use image::Rgba;

    fn scene(sticker: Option<Sticker>) -> CompositionScene {
        let background = Background::Selected(SelectedImage::new(
            "file://green.png",
            RgbaImage::from_pixel(64, 88, Rgba([0, 200, 0, 255])),
        ));
        CompositionScene::new(&ScreenConfig::default(), background, sticker)
    }

    #[test]
    fn test_capture_matches_export_frame() {
        let options = CaptureOptions {
            height: 440,
            quality: 1.0,
        };
        let captured = Compositor.capture(&scene(None), options).unwrap();
        assert_eq!((captured.width(), captured.height()), (320, 440));
        assert_eq!(captured.quality, 1.0);
    }

    #[test]
    fn test_width_follows_frame_aspect() {
        let options = CaptureOptions {
            height: 880,
            quality: 1.0,
        };
        let captured = Compositor.capture(&scene(None), options).unwrap();
        assert_eq!((captured.width(), captured.height()), (640, 880));
    }

    #[test]
    fn test_sticker_lands_at_offset() {
        let options = CaptureOptions {
            height: 440,
            quality: 1.0,
        };
        let plain = Compositor.capture(&scene(None), options).unwrap();
        let with_sticker = Compositor.capture(&scene(Some(Sticker::Smile)), options).unwrap();

        // Center of a 40pt sticker at (140, 90).
        let center = with_sticker.pixels.get_pixel(160, 110);
        assert_ne!(center, plain.pixels.get_pixel(160, 110));
        let expected = [255u8, 204, 51, 255];
        for (got, want) in center.0.iter().zip(expected) {
            assert!(got.abs_diff(want) <= 1, "{:?}", center);
        }

        // Far from the sticker nothing changes.
        assert_eq!(with_sticker.pixels.get_pixel(10, 400), plain.pixels.get_pixel(10, 400));
    }

    #[test]
    fn test_zero_height_is_empty_region() {
        let options = CaptureOptions {
            height: 0,
            quality: 1.0,
        };
        let err = Compositor.capture(&scene(None), options).unwrap_err();
        let expected = CaptureError::EmptyRegion {
            width: 320,
            height: 0,
        };
        assert_eq!(err, expected);
    }

    #[test]
    fn test_quality_out_of_range_is_rejected() {
        let options = CaptureOptions {
            height: 440,
            quality: 1.5,
        };
        assert!(matches!(
            Compositor.capture(&scene(None), options),
            Err(CaptureError::InvalidOptions(_))
        ));
    }
}
