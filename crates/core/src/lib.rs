#![deny(unsafe_code)]
//! Core of the plexus particle background.
//!
//! A [`ParticleField`] of drifting points is advanced every frame under a
//! [`BoundaryPolicy`]; nearby pairs are joined by links whose opacity fades
//! with distance. A [`FrameDriver`] owns all animation state and draws onto
//! any [`Surface`]. Hosts (browser canvas, CPU raster, render thread) only
//! schedule ticks and forward input.

pub mod animator;
pub mod boundary;
pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod field;
pub mod links;
pub mod parallax;
pub mod params;
pub mod particle;
pub mod preset;
pub mod prng;
pub mod scene;
pub mod style;
pub mod surface;
pub mod theme;

pub use animator::{Animator, AnimatorHandle, Input};
pub use boundary::BoundaryPolicy;
pub use color::Rgba;
pub use config::{FieldConfig, ParticleCount};
pub use driver::{DriverState, FrameDriver, FrameStats};
pub use error::FieldError;
pub use field::ParticleField;
pub use links::{find_links, link_opacity, render_links, Link};
pub use parallax::{parallax_offset, Pointer};
pub use particle::Particle;
pub use preset::Preset;
pub use prng::Xorshift64;
pub use scene::Scene;
pub use style::{LinkStyle, ParticleStyle, Style};
pub use surface::{DrawCommand, Paint, RecordingSurface, Shadow, Surface};
pub use theme::Theme;
