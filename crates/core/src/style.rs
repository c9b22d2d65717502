//! Visual parameters for particle bodies and links.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::surface::{Paint, Shadow, Surface};

/// How a particle body is drawn: a radial glow disc, then an optional solid
/// core of the particle's own radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleStyle {
    pub glow_inner: Rgba,
    pub glow_outer: Rgba,
    /// Gradient extent as a multiple of the particle radius.
    pub glow_extent: f64,
    /// Radius of the glow disc as a multiple of the particle radius.
    pub glow_radius: f64,
    pub core: Option<Rgba>,
    pub shadow: Option<Shadow>,
}

impl Default for ParticleStyle {
    fn default() -> Self {
        Self {
            glow_inner: Rgba::WHITE.with_alpha(0.18),
            glow_outer: Rgba::WHITE.with_alpha(0.0),
            glow_extent: 3.0,
            glow_radius: 3.0,
            core: Some(Rgba::WHITE.with_alpha(0.35)),
            shadow: None,
        }
    }
}

impl ParticleStyle {
    /// Draws one body centred at `center`. The caller sets the shadow.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, center: DVec2, radius: f64) {
        let glow = Paint::Radial {
            inner: self.glow_inner,
            outer: self.glow_outer,
            extent: radius * self.glow_extent,
        };
        surface.fill_circle(center, radius * self.glow_radius, &glow);
        if let Some(core) = self.core {
            surface.fill_circle(center, radius, &Paint::solid(core));
        }
    }

    fn tinted(self, accent: Rgba) -> Self {
        Self {
            glow_inner: self.glow_inner.tinted(accent),
            glow_outer: self.glow_outer.tinted(accent),
            core: self.core.map(|c| c.tinted(accent)),
            shadow: self.shadow.map(|s| Shadow {
                color: s.color.tinted(accent),
                ..s
            }),
            ..self
        }
    }
}

/// How links are stroked. The alpha of `color` is replaced per link by the
/// distance-scaled opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkStyle {
    pub color: Rgba,
    /// Opacity of a link between coincident particles.
    pub base_opacity: f64,
    pub width: f64,
    pub shadow: Option<Shadow>,
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            color: Rgba::WHITE,
            base_opacity: 0.13,
            width: 1.0,
            shadow: None,
        }
    }
}

/// Complete look of a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Fill used by surfaces that own their background (the browser canvas
    /// stays transparent instead).
    pub background: Rgba,
    pub particle: ParticleStyle,
    pub link: LinkStyle,
}

impl Default for Style {
    fn default() -> Self {
        Self::drift()
    }
}

impl Style {
    /// Soft white glow with a faint core and very light links.
    pub fn drift() -> Self {
        Self {
            background: Rgba::BLACK,
            particle: ParticleStyle::default(),
            link: LinkStyle::default(),
        }
    }

    /// Red glowing bodies with blurred red links at full base opacity.
    pub fn ember() -> Self {
        let red = Rgba::from_rgba8(255, 0, 0, 1.0);
        Self {
            background: Rgba::BLACK,
            particle: ParticleStyle {
                glow_inner: red.with_alpha(0.85),
                glow_outer: red.with_alpha(0.0),
                glow_extent: 4.0,
                glow_radius: 1.0,
                core: None,
                shadow: Some(Shadow {
                    color: red.with_alpha(0.9),
                    blur: 15.0,
                }),
            },
            link: LinkStyle {
                color: red,
                base_opacity: 1.0,
                width: 1.0,
                shadow: Some(Shadow {
                    color: red.with_alpha(0.6),
                    blur: 10.0,
                }),
            },
        }
    }

    /// Recolors every element with `accent`, keeping each alpha, and sets
    /// the background.
    pub fn recolored(&self, accent: Rgba, background: Rgba) -> Self {
        Self {
            background,
            particle: self.particle.tinted(accent),
            link: LinkStyle {
                color: self.link.color.tinted(accent),
                shadow: self.link.shadow.map(|s| Shadow {
                    color: s.color.tinted(accent),
                    ..s
                }),
                ..self.link
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    #[test]
    fn drift_body_is_glow_plus_core() {
        let mut s = RecordingSurface::new(100.0, 100.0);
        Style::drift().particle.draw(&mut s, DVec2::new(10.0, 10.0), 2.0);
        let circles: Vec<_> = s.circles().collect();
        assert_eq!(circles.len(), 2);
        match circles[0] {
            DrawCommand::Circle { radius, paint, .. } => {
                assert_eq!(*radius, 6.0);
                assert!(matches!(paint, Paint::Radial { extent, .. } if *extent == 6.0));
            }
            other => panic!("unexpected {other:?}"),
        }
        match circles[1] {
            DrawCommand::Circle { radius, paint, .. } => {
                assert_eq!(*radius, 2.0);
                assert!(matches!(paint, Paint::Solid { color } if (color.a - 0.35).abs() < 1e-12));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn ember_body_is_a_single_clipped_gradient() {
        let mut s = RecordingSurface::new(100.0, 100.0);
        Style::ember().particle.draw(&mut s, DVec2::new(10.0, 10.0), 2.5);
        let circles: Vec<_> = s.circles().collect();
        assert_eq!(circles.len(), 1);
        match circles[0] {
            DrawCommand::Circle { radius, paint, .. } => {
                assert_eq!(*radius, 2.5);
                assert!(matches!(paint, Paint::Radial { extent, .. } if *extent == 10.0));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn recolored_keeps_alphas() {
        let gold = Rgba::from_rgba8(255, 215, 0, 1.0);
        let style = Style::ember().recolored(gold, Rgba::WHITE);
        assert_eq!(style.background, Rgba::WHITE);
        assert_eq!(style.link.color, gold);
        assert!((style.particle.glow_inner.a - 0.85).abs() < 1e-12);
        assert_eq!(style.particle.glow_inner.g, gold.g);
        let shadow = style.link.shadow.unwrap();
        assert!((shadow.color.a - 0.6).abs() < 1e-12);
        assert_eq!(shadow.blur, 10.0);
        assert_eq!(style.link.base_opacity, 1.0);
    }

    #[test]
    fn style_serde_round_trip() {
        let style = Style::ember();
        let text = serde_json::to_string(&style).unwrap();
        let back: Style = serde_json::from_str(&text).unwrap();
        // hex serialization quantizes to 8 bits
        assert_eq!(back.link.color.to_hex(), style.link.color.to_hex());
        assert_eq!(back.particle.glow_extent, style.particle.glow_extent);
        assert_eq!(back.link.shadow.map(|s| s.blur), Some(10.0));
    }
}
