#![deny(unsafe_code)]
//! CPU rasterization of plexus scenes.
//!
//! [`Pixmap`] is a [`Surface`](plexus_core::Surface) backed by an RGB buffer,
//! so a [`FrameDriver`](plexus_core::FrameDriver) can draw into it exactly as
//! it draws into a browser canvas. [`render_scene`] runs a [`Scene`] headless
//! and hands back the final frame; PNG output sits behind the `png` feature.

pub mod pixmap;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixmap::Pixmap;

use log::debug;
use plexus_core::driver::FrameStats;
use plexus_core::error::FieldError;
use plexus_core::scene::Scene;

/// Runs `scene.frames` ticks (at least one) and returns the final frame with
/// the per-frame stats.
pub fn render_scene(scene: &Scene) -> Result<(Pixmap, Vec<FrameStats>), FieldError> {
    let mut driver = scene.driver()?;
    let mut pixmap = Pixmap::new(scene.width, scene.height, driver.style().background)?;
    let frames = scene.frames.max(1);
    let mut stats = Vec::with_capacity(frames);
    for _ in 0..frames {
        match driver.tick(&mut pixmap) {
            Some(s) => stats.push(s),
            None => break,
        }
    }
    driver.stop();
    debug!(
        "rendered {} frames of {} at {}x{}",
        stats.len(),
        scene.preset,
        scene.width,
        scene.height
    );
    Ok((pixmap, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_core::color::Rgba;
    use plexus_core::theme::Theme;
    use serde_json::json;

    #[test]
    fn zero_frames_still_draws_one() {
        let scene = Scene::new("drift", 64, 48, 1);
        let (pixmap, stats) = render_scene(&scene).unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].frame, 1);
        assert_eq!((pixmap.width(), pixmap.height()), (64, 48));
    }

    #[test]
    fn runs_requested_frames() {
        let mut scene = Scene::new("ember", 120, 80, 3);
        scene.frames = 12;
        let (_, stats) = render_scene(&scene).unwrap();
        assert_eq!(stats.len(), 12);
        assert_eq!(stats.last().unwrap().frame, 12);
        assert!(stats.iter().all(|s| s.particles == 120));
    }

    #[test]
    fn same_scene_same_pixels() {
        let mut scene = Scene::new("drift", 96, 64, 42);
        scene.frames = 5;
        let (a, _) = render_scene(&scene).unwrap();
        let (b, _) = render_scene(&scene).unwrap();
        assert_eq!(a.to_rgba8(1.0), b.to_rgba8(1.0));
    }

    #[test]
    fn particles_brighten_the_background() {
        let scene = Scene::new("drift", 200, 150, 9);
        let (pixmap, _) = render_scene(&scene).unwrap();
        let lit = pixmap
            .to_rgba8(1.0)
            .chunks(4)
            .filter(|px| px[..3] != [0, 0, 0])
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn theme_sets_background() {
        let mut scene = Scene::new("ember", 32, 32, 1);
        scene.theme = Some("gray-white".into());
        scene.params = json!({"count": 0});
        let (pixmap, _) = render_scene(&scene).unwrap();
        let bg = Theme::GrayWhite.background();
        assert_eq!(pixmap.background(), bg);
        assert_eq!(pixmap.pixel(10, 10), Some(Rgba::rgb(bg.r, bg.g, bg.b)));
    }

    #[test]
    fn invalid_scene_is_an_error() {
        assert!(matches!(
            render_scene(&Scene::new("drift", 0, 10, 1)),
            Err(FieldError::InvalidDimensions)
        ));
        assert!(matches!(
            render_scene(&Scene::new("nebula", 10, 10, 1)),
            Err(FieldError::UnknownPreset(_))
        ));
    }
}
