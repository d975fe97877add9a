use image::{Rgba, RgbaImage};

/// Sub-samples per axis when estimating edge coverage
const SUPERSAMPLE: u32 = 4;

/// The fixed sticker catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sticker {
    Smile,
    Heart,
    Star,
    Sun,
    Flower,
    Moon,
}

impl Sticker {
    pub const ALL: [Sticker; 6] = [
        Sticker::Smile,
        Sticker::Heart,
        Sticker::Star,
        Sticker::Sun,
        Sticker::Flower,
        Sticker::Moon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Sticker::Smile => "smile",
            Sticker::Heart => "heart",
            Sticker::Star => "star",
            Sticker::Sun => "sun",
            Sticker::Flower => "flower",
            Sticker::Moon => "moon",
        }
    }

    /// Rasterizes the sticker into a `size` x `size` RGBA image with a transparent surround.
    pub fn rasterize(self, size: u32) -> RgbaImage {
        let size = size.max(1);
        let samples = (SUPERSAMPLE * SUPERSAMPLE) as f32;
        let span = (size * SUPERSAMPLE) as f32;
        RgbaImage::from_fn(size, size, |px, py| {
            let mut rgb = [0.0f32; 3];
            let mut covered = 0.0f32;
            for sy in 0..SUPERSAMPLE {
                for sx in 0..SUPERSAMPLE {
                    // Map the sub-sample to [-1, 1] with y pointing down.
                    let x = ((px * SUPERSAMPLE + sx) as f32 + 0.5) / span * 2.0 - 1.0;
                    let y = ((py * SUPERSAMPLE + sy) as f32 + 0.5) / span * 2.0 - 1.0;
                    if let Some(color) = self.shade(x, y) {
                        for (acc, channel) in rgb.iter_mut().zip(color) {
                            *acc += channel as f32;
                        }
                        covered += 1.0;
                    }
                }
            }
            if covered == 0.0 {
                return Rgba([0, 0, 0, 0]);
            }
            Rgba([
                (rgb[0] / covered).round() as u8,
                (rgb[1] / covered).round() as u8,
                (rgb[2] / covered).round() as u8,
                (covered / samples * 255.0).round() as u8,
            ])
        })
    }

    /// Color of the sticker at a normalized point, `None` outside the shape.
    fn shade(self, x: f32, y: f32) -> Option<[u8; 3]> {
        let r = (x * x + y * y).sqrt();
        let theta = y.atan2(x);
        match self {
            Sticker::Smile => {
                if r > 0.92 {
                    return None;
                }
                let eye = |cx: f32| ((x - cx).powi(2) + (y + 0.25).powi(2)).sqrt() < 0.12;
                let mouth = y > 0.1 && (0.45..0.58).contains(&r);
                if eye(-0.3) || eye(0.3) || mouth {
                    Some([60, 40, 20])
                } else {
                    Some([255, 204, 51])
                }
            }
            Sticker::Heart => {
                // Classic implicit heart, flipped so the point faces down.
                let hx = x * 1.25;
                let hy = -(y * 1.25) + 0.25;
                let a = hx * hx + hy * hy - 1.0;
                (a * a * a - hx * hx * hy * hy * hy <= 0.0).then_some([230, 57, 70])
            }
            Sticker::Star => {
                let outer = 0.95;
                let inner = 0.4;
                let sector = std::f32::consts::TAU / 5.0;
                // Rotate so one point faces up, then fold into a single half-sector.
                let a = (theta + std::f32::consts::FRAC_PI_2).rem_euclid(sector);
                let t = (a - sector / 2.0).abs() / (sector / 2.0);
                let edge = inner + (outer - inner) * t;
                (r <= edge).then_some([255, 215, 0])
            }
            Sticker::Sun => {
                if r < 0.5 {
                    Some([255, 165, 0])
                } else if (0.6..0.95).contains(&r) && (theta * 8.0).cos() > 0.6 {
                    Some([255, 200, 40])
                } else {
                    None
                }
            }
            Sticker::Flower => {
                if r < 0.25 {
                    Some([255, 221, 87])
                } else if r < 0.55 + 0.38 * (theta * 5.0).cos() {
                    Some([255, 120, 180])
                } else {
                    None
                }
            }
            Sticker::Moon => {
                let bite = ((x - 0.35).powi(2) + (y + 0.15).powi(2)).sqrt();
                (r < 0.85 && bite > 0.7).then_some([240, 234, 200])
            }
        }
    }
}
