//! PNG output of a rendered [`Pixmap`].
//!
//! Feature-gated behind `png` (default on) so the raster crate can be used
//! without pulling in `image`.

use std::path::Path;

use plexus_core::error::FieldError;

use crate::pixmap::Pixmap;

/// Writes the pixmap as a PNG with RGB scaled by `brightness`.
///
/// Returns `FieldError::InvalidDimensions` if the size overflows `u32`, or
/// `FieldError::Io` on write failure.
pub fn write_png(pixmap: &Pixmap, brightness: f64, path: &Path) -> Result<(), FieldError> {
    let w = u32::try_from(pixmap.width()).map_err(|_| FieldError::InvalidDimensions)?;
    let h = u32::try_from(pixmap.height()).map_err(|_| FieldError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, pixmap.to_rgba8(brightness))
        .ok_or_else(|| FieldError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FieldError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_core::color::Rgba;

    #[test]
    fn write_png_round_trip() {
        let pixmap = Pixmap::new(16, 8, Rgba::from_rgba8(255, 0, 0, 1.0)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        write_png(&pixmap, 0.5, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 8);
        assert_eq!(img.get_pixel(3, 3).0, [128, 0, 0, 255]);
    }

    #[test]
    fn write_png_reports_io_errors() {
        let pixmap = Pixmap::new(2, 2, Rgba::BLACK).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("frame.png");
        assert!(matches!(
            write_png(&pixmap, 1.0, &path),
            Err(FieldError::Io(_))
        ));
    }
}
