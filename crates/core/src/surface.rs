//! Drawing surface abstraction.
//!
//! A frame only needs four primitives: clear, filled circle (solid or radial
//! gradient), stroked line segment and an optional shadow/glow setting. The
//! browser host maps them onto a canvas 2D context, the raster crate onto a
//! pixel buffer, and [`RecordingSurface`] keeps them as a command list.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// Blurred shadow drawn behind subsequent shapes, as a canvas `shadowBlur`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub color: Rgba,
    pub blur: f64,
}

/// Fill used for circles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Paint {
    Solid { color: Rgba },
    /// Interpolates from `inner` at the centre to `outer` at `extent`, and
    /// stays `outer` beyond it.
    Radial { inner: Rgba, outer: Rgba, extent: f64 },
}

impl Paint {
    pub fn solid(color: Rgba) -> Self {
        Paint::Solid { color }
    }

    /// Color at `distance` from the circle centre.
    pub fn color_at(&self, distance: f64) -> Rgba {
        match *self {
            Paint::Solid { color } => color,
            Paint::Radial {
                inner,
                outer,
                extent,
            } => {
                if extent <= 0.0 {
                    return outer;
                }
                inner.lerp(outer, distance / extent)
            }
        }
    }
}

/// A 2D drawable target sized to the viewport.
///
/// Object-safe so hosts can hand the driver a `&mut dyn Surface`.
pub trait Surface {
    /// Drawable size in CSS pixels / user units.
    fn size(&self) -> DVec2;

    /// Clears the whole surface.
    fn clear(&mut self);

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint);

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba);

    /// Sets (or removes) the shadow applied to subsequent shapes. Surfaces
    /// without shadow support ignore it.
    fn set_shadow(&mut self, _shadow: Option<Shadow>) {}
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear,
    Shadow {
        shadow: Option<Shadow>,
    },
    Circle {
        center: DVec2,
        radius: f64,
        paint: Paint,
    },
    Line {
        from: DVec2,
        to: DVec2,
        width: f64,
        color: Rgba,
    },
}

/// Surface that records commands instead of drawing.
///
/// `clear()` discards everything recorded so far, so after a tick the list
/// holds exactly one frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Recorded line segments in draw order.
    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    /// Recorded circles in draw order.
    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.commands.push(DrawCommand::Shadow { shadow });
    }
}
