//! A single drifting point: position, constant velocity, radius and depth.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::boundary::BoundaryPolicy;
use crate::config::FieldConfig;
use crate::prng::Xorshift64;

/// A simulated point rendered as a glowing dot.
///
/// Velocity never changes magnitude; only the bounce policy flips the sign
/// of a component. `depth` scales the parallax offset and has no effect on
/// motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    pub depth: f64,
}

impl Particle {
    /// Creates a particle with unit depth.
    pub fn new(position: DVec2, velocity: DVec2, radius: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
            depth: 1.0,
        }
    }

    /// Returns the particle with a different depth factor.
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = depth;
        self
    }

    /// Draws a particle uniformly inside `[0, width) x [0, height)` using the
    /// speed, radius and depth ranges of `config`.
    pub fn random(rng: &mut Xorshift64, width: f64, height: f64, config: &FieldConfig) -> Self {
        let x = rng.next_range(0.0, width);
        let y = rng.next_range(0.0, height);
        let vx = rng.next_symmetric(config.speed);
        let vy = rng.next_symmetric(config.speed);
        let radius = rng.next_range(config.radius.0, config.radius.1);
        let depth = rng.next_range(config.depth.0, config.depth.1);
        Self {
            position: DVec2::new(x, y),
            velocity: DVec2::new(vx, vy),
            radius,
            depth,
        }
    }

    /// One explicit Euler step with a unit time step, followed by `policy`.
    pub fn advance(&mut self, policy: BoundaryPolicy, bounds: DVec2) {
        self.position += self.velocity;
        policy.apply(self, bounds);
    }

    /// Position shifted by `shift * depth`; the stored position is untouched.
    pub fn drawn_position(&self, shift: DVec2) -> DVec2 {
        self.position + shift * self.depth
    }
}
