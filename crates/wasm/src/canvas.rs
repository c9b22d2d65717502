//! [`Surface`] over a canvas 2D context.
//!
//! The context is pre-scaled by `devicePixelRatio`, so every coordinate here
//! is in CSS pixels. Canvas calls that can throw (arc, gradients) only fail
//! on non-finite input; such shapes are skipped.

use std::f64::consts::TAU;

use glam::DVec2;
use log::debug;
use plexus_core::color::Rgba;
use plexus_core::surface::{Paint, Shadow, Surface};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Canvas2dSurface {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn try_fill_circle(&self, center: DVec2, radius: f64, paint: &Paint) -> Result<(), JsValue> {
        match *paint {
            Paint::Solid { color } => self.ctx.set_fill_style_str(&color.to_css()),
            Paint::Radial {
                inner,
                outer,
                extent,
            } => {
                let gradient = self
                    .ctx
                    .create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, extent)?;
                gradient.add_color_stop(0.0, &inner.to_css())?;
                gradient.add_color_stop(1.0, &outer.to_css())?;
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        self.ctx.begin_path();
        self.ctx.arc(center.x, center.y, radius, 0.0, TAU)?;
        self.ctx.fill();
        Ok(())
    }
}

impl Surface for Canvas2dSurface {
    fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint) {
        if !(radius > 0.0) {
            return;
        }
        if let Err(e) = self.try_fill_circle(center, radius, paint) {
            debug!("circle at {center} skipped: {e:?}");
        }
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        match shadow {
            Some(s) => {
                self.ctx.set_shadow_color(&s.color.to_css());
                self.ctx.set_shadow_blur(s.blur);
            }
            None => {
                self.ctx.set_shadow_color(&Rgba::TRANSPARENT.to_css());
                self.ctx.set_shadow_blur(0.0);
            }
        }
    }
}
