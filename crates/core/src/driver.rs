//! The frame driver: owns every piece of animation state and draws one frame
//! per [`FrameDriver::tick`].
//!
//! Lifecycle is `Idle -> Running -> Stopped`. Hosts call `tick` from their
//! scheduler (an animation-frame callback, a render thread, a headless loop);
//! a driver that is not running draws nothing, which is how a host ends the
//! loop.

use glam::DVec2;
use log::{debug, info, trace};
use serde::Serialize;

use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::links::render_links;
use crate::parallax::Pointer;
use crate::prng::Xorshift64;
use crate::style::Style;
use crate::surface::Surface;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverState {
    Idle,
    Running,
    Stopped,
}

/// What one tick drew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    /// 1-based index of the frame just drawn.
    pub frame: u64,
    pub particles: usize,
    pub links: usize,
}

pub struct FrameDriver {
    state: DriverState,
    config: FieldConfig,
    style: Style,
    rng: Xorshift64,
    field: ParticleField,
    pointer: Pointer,
    frame: u64,
}

impl FrameDriver {
    /// Creates an idle driver and generates the first field for the viewport.
    pub fn new(width: f64, height: f64, config: FieldConfig, style: Style, seed: u64) -> Self {
        let mut rng = Xorshift64::new(seed);
        let field = ParticleField::generate(width, height, &config, &mut rng);
        Self {
            state: DriverState::Idle,
            config,
            style,
            rng,
            field,
            pointer: Pointer::default(),
            frame: 0,
        }
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Returns `true` while ticks draw frames.
    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// `Idle -> Running`. Has no effect on a running or stopped driver.
    pub fn start(&mut self) {
        if self.state == DriverState::Idle {
            self.state = DriverState::Running;
            info!(
                "frame driver started with {} particles ({})",
                self.field.len(),
                self.config.boundary.name()
            );
        }
    }

    /// Ends the animation. A stopped driver never runs again.
    pub fn stop(&mut self) {
        if self.state != DriverState::Stopped {
            self.state = DriverState::Stopped;
            info!("frame driver stopped after {} frames", self.frame);
        }
    }

    /// Draws one frame: clear, advance, bodies, links.
    ///
    /// Returns `None` without touching the surface unless running.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Option<FrameStats> {
        if !self.is_running() {
            return None;
        }
        surface.clear();
        self.field.advance(self.config.boundary);

        let positions = self.drawn_positions();
        let body = self.style.particle;
        surface.set_shadow(body.shadow);
        for (particle, &center) in self.field.particles().iter().zip(&positions) {
            body.draw(surface, center, particle.radius);
        }
        let links = render_links(
            surface,
            &positions,
            self.config.max_distance,
            &self.style.link,
        );
        surface.set_shadow(None);

        self.frame += 1;
        let stats = FrameStats {
            frame: self.frame,
            particles: positions.len(),
            links,
        };
        trace!("frame {}: {} particles, {} links", stats.frame, stats.particles, stats.links);
        Some(stats)
    }

    /// Replaces the field with a fresh generation for the new viewport.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.field = ParticleField::generate(width, height, &self.config, &mut self.rng);
        debug!("resized to {width}x{height}: {} particles", self.field.len());
    }

    /// Swaps the configuration and regenerates the field at the current size.
    pub fn set_config(&mut self, config: FieldConfig) {
        self.config = config;
        self.resize(self.field.width(), self.field.height());
    }

    /// Latest pointer position; replaces any earlier value.
    pub fn set_pointer(&mut self, pointer: Pointer) {
        self.pointer = pointer;
    }

    /// Sets the pointer from client coordinates in the current viewport.
    pub fn set_pointer_client(&mut self, client_x: f64, client_y: f64) {
        self.pointer =
            Pointer::from_client(client_x, client_y, self.field.width(), self.field.height());
    }

    /// Replaces the whole style; takes effect on the next tick.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Recolors the current style with `theme`, keeping every alpha.
    pub fn apply_theme(&mut self, theme: Theme) {
        self.style = theme.apply(&self.style);
        info!("theme set to {}", theme.name());
    }

    /// Parallax shift before depth scaling; zero when parallax is disabled.
    pub fn parallax_shift(&self) -> DVec2 {
        self.config
            .parallax
            .map_or(DVec2::ZERO, |amplitude| self.pointer.shift(amplitude))
    }

    /// Where each particle is drawn this frame.
    pub fn drawn_positions(&self) -> Vec<DVec2> {
        self.field.drawn_positions(self.parallax_shift())
    }

    /// Returns the current generation.
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Returns the active style, theme applied.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Returns the latest pointer position.
    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    /// Number of frames drawn so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
