//! Pointer-driven parallax.
//!
//! The pointer is kept normalized to the viewport. Its displacement from the
//! centre, times an amplitude and a particle's depth, shifts where that
//! particle is drawn. Motion integration never sees the shift.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Pointer position normalized to `[0, 1]` on both axes.
///
/// Writers may update it any number of times between frames; the next frame
/// reads only the latest value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Default for Pointer {
    /// The viewport centre, which produces no offset.
    fn default() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

impl Pointer {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Normalizes client coordinates by the viewport size. An axis with a
    /// non-positive extent stays centred.
    pub fn from_client(client_x: f64, client_y: f64, width: f64, height: f64) -> Self {
        let norm = |v: f64, extent: f64| if extent > 0.0 { v / extent } else { 0.5 };
        Self {
            x: norm(client_x, width),
            y: norm(client_y, height),
        }
    }

    /// `(pointer - 0.5) * amplitude` on each axis, before depth scaling.
    pub fn shift(&self, amplitude: f64) -> DVec2 {
        DVec2::new((self.x - 0.5) * amplitude, (self.y - 0.5) * amplitude)
    }
}

/// Offset of a particle with the given depth.
pub fn parallax_offset(pointer: Pointer, amplitude: f64, depth: f64) -> DVec2 {
    pointer.shift(amplitude) * depth
}
