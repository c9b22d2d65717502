//! Opaque RGB pixel buffer implementing [`Surface`].
//!
//! Shapes are composited source-over onto the background with simple
//! distance-based anti-aliasing. Shadows are accepted and ignored; the blur
//! only exists in the browser canvas.

use glam::DVec2;
use plexus_core::color::Rgba;
use plexus_core::error::FieldError;
use plexus_core::surface::{Paint, Surface};

/// Pixel grid of `width * height` linear-blended RGB values in [0, 1].
#[derive(Debug, Clone)]
pub struct Pixmap {
    width: usize,
    height: usize,
    background: Rgba,
    data: Vec<[f64; 3]>,
}

impl Pixmap {
    /// Creates a pixmap filled with `background` (its alpha is ignored).
    ///
    /// Returns `FieldError::InvalidDimensions` if either dimension is zero
    /// or `width * height` overflows.
    pub fn new(width: usize, height: usize, background: Rgba) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(FieldError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            background,
            data: vec![[background.r, background.g, background.b]; len],
        })
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the color `clear()` fills with.
    pub fn background(&self) -> Rgba {
        self.background
    }

    /// Changes the clear color; existing pixels are kept until the next clear.
    pub fn set_background(&mut self, background: Rgba) {
        self.background = background;
    }

    /// Color of the pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b] = self.data[y * self.width + x];
        Some(Rgba::rgb(r, g, b))
    }

    /// RGBA8 bytes with RGB scaled by `brightness` (clamped to [0, 1]).
    pub fn to_rgba8(&self, brightness: f64) -> Vec<u8> {
        let k = if brightness.is_nan() {
            1.0
        } else {
            brightness.clamp(0.0, 1.0)
        };
        self.data
            .iter()
            .flat_map(|&[r, g, b]| {
                let [r, g, b, _] = Rgba::rgb(r * k, g * k, b * k).to_rgba8();
                [r, g, b, 255u8]
            })
            .collect()
    }

    /// Pixel index range covering `[min, max]` on one axis.
    fn span(min: f64, max: f64, limit: usize) -> Option<(usize, usize)> {
        let lo = min.floor().max(0.0);
        let hi = max.ceil().min(limit as f64);
        if !(lo < hi) {
            return None;
        }
        Some((lo as usize, hi as usize))
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgba, coverage: f64) {
        let a = (color.a * coverage).clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let px = &mut self.data[y * self.width + x];
        px[0] = color.r * a + px[0] * (1.0 - a);
        px[1] = color.g * a + px[1] * (1.0 - a);
        px[2] = color.b * a + px[2] * (1.0 - a);
    }
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl Surface for Pixmap {
    fn size(&self) -> DVec2 {
        DVec2::new(self.width as f64, self.height as f64)
    }

    fn clear(&mut self) {
        let bg = self.background;
        self.data.fill([bg.r, bg.g, bg.b]);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint) {
        if !center.is_finite() || !(radius > 0.0) {
            return;
        }
        let reach = radius + 1.0;
        let Some((x0, x1)) = Self::span(center.x - reach, center.x + reach, self.width) else {
            return;
        };
        let Some((y0, y1)) = Self::span(center.y - reach, center.y + reach, self.height) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let d = p.distance(center);
                let coverage = (radius - d + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, paint.color_at(d), coverage);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        if !from.is_finite() || !to.is_finite() || !(width > 0.0) {
            return;
        }
        let half = (width / 2.0).max(0.5);
        let reach = half + 1.0;
        let min = from.min(to) - DVec2::splat(reach);
        let max = from.max(to) + DVec2::splat(reach);
        let Some((x0, x1)) = Self::span(min.x, max.x, self.width) else {
            return;
        };
        let Some((y0, y1)) = Self::span(min.y, max.y, self.height) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let coverage = (half - segment_distance(p, from, to) + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }
}
