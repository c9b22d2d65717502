//! A generation of particles bound to one viewport size.
//!
//! A [`ParticleField`] is created for a viewport and replaced wholesale when
//! the viewport changes. Between resizes the particle count is fixed and only
//! positions (and, under bounce, velocity signs) change.

use glam::DVec2;
use log::debug;

use crate::boundary::BoundaryPolicy;
use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::prng::Xorshift64;

/// Ordered particle collection plus the viewport it lives in.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Scatters `count` particles over `[0, width) x [0, height)`.
    ///
    /// A non-positive (or non-finite) dimension yields an empty field.
    pub fn initialize(
        width: f64,
        height: f64,
        count: usize,
        config: &FieldConfig,
        rng: &mut Xorshift64,
    ) -> Self {
        let usable = width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite();
        let particles = if usable {
            (0..count)
                .map(|_| Particle::random(rng, width, height, config))
                .collect()
        } else {
            Vec::new()
        };
        debug!(
            "generated {} particles for {width}x{height} viewport",
            particles.len()
        );
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            particles,
        }
    }

    /// Like [`ParticleField::initialize`] with the count resolved from
    /// `config.count`.
    pub fn generate(width: f64, height: f64, config: &FieldConfig, rng: &mut Xorshift64) -> Self {
        let count = config.count.resolve(width, height);
        Self::initialize(width, height, count, config, rng)
    }

    /// Builds a field from explicit particles.
    pub fn from_particles(width: f64, height: f64, particles: Vec<Particle>) -> Self {
        Self {
            width,
            height,
            particles,
        }
    }

    /// Discards every particle and scatters `count` new ones.
    pub fn resize(
        &mut self,
        width: f64,
        height: f64,
        count: usize,
        config: &FieldConfig,
        rng: &mut Xorshift64,
    ) {
        *self = Self::initialize(width, height, count, config, rng);
    }

    /// Moves every particle one step and applies `policy`.
    pub fn advance(&mut self, policy: BoundaryPolicy) {
        let bounds = self.bounds();
        for p in &mut self.particles {
            p.advance(policy, bounds);
        }
    }

    /// Viewport width this generation was scattered over.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Viewport height this generation was scattered over.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// `(width, height)` as a vector, the bounds passed to boundary policies.
    pub fn bounds(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Particles in generation order. Link indices refer to this order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Returns the number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns `true` for an empty generation (zero count or degenerate viewport).
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Positions after a parallax shift scaled by each particle's depth.
    pub fn drawn_positions(&self, shift: DVec2) -> Vec<DVec2> {
        self.particles
            .iter()
            .map(|p| p.drawn_position(shift))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParticleCount;

    fn config() -> FieldConfig {
        FieldConfig::default()
    }

    #[test]
    fn initialize_creates_requested_count_in_bounds() {
        let mut rng = Xorshift64::new(42);
        let field = ParticleField::initialize(640.0, 480.0, 80, &config(), &mut rng);
        assert_eq!(field.len(), 80);
        assert!(field.particles().iter().all(|p| {
            (0.0..640.0).contains(&p.position.x) && (0.0..480.0).contains(&p.position.y)
        }));
    }

    #[test]
    fn zero_viewport_is_empty() {
        let mut rng = Xorshift64::new(42);
        assert!(ParticleField::initialize(0.0, 480.0, 80, &config(), &mut rng).is_empty());
        assert!(ParticleField::initialize(640.0, -1.0, 80, &config(), &mut rng).is_empty());
        assert!(ParticleField::initialize(f64::NAN, 10.0, 80, &config(), &mut rng).is_empty());
    }

    #[test]
    fn generate_uses_density_formula() {
        let cfg = FieldConfig {
            count: ParticleCount::density(10_000.0),
            ..config()
        };
        let mut rng = Xorshift64::new(3);
        let field = ParticleField::generate(1000.0, 400.0, &cfg, &mut rng);
        assert_eq!(field.len(), 40);
        let empty = ParticleField::generate(0.0, 0.0, &cfg, &mut rng);
        assert!(empty.is_empty());
    }

    #[test]
    fn same_seed_same_generation() {
        let a = ParticleField::generate(800.0, 600.0, &config(), &mut Xorshift64::new(9));
        let b = ParticleField::generate(800.0, 600.0, &config(), &mut Xorshift64::new(9));
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn resize_replaces_every_particle() {
        let mut rng = Xorshift64::new(5);
        let mut field = ParticleField::initialize(800.0, 600.0, 30, &config(), &mut rng);
        let before = field.particles().to_vec();
        field.resize(300.0, 200.0, 12, &config(), &mut rng);
        assert_eq!(field.len(), 12);
        assert_eq!(field.bounds(), DVec2::new(300.0, 200.0));
        assert!(field
            .particles()
            .iter()
            .all(|p| p.position.x < 300.0 && p.position.y < 200.0));
        assert!(field.particles().iter().all(|p| !before.contains(p)));
    }

    #[test]
    fn advance_moves_every_particle_by_its_velocity() {
        let particles = vec![
            Particle::new(DVec2::new(10.0, 10.0), DVec2::new(0.25, 0.5), 2.0),
            Particle::new(DVec2::new(50.0, 20.0), DVec2::new(-0.5, 0.0), 2.0),
        ];
        let mut field = ParticleField::from_particles(100.0, 100.0, particles);
        field.advance(BoundaryPolicy::Bounce);
        assert_eq!(field.particles()[0].position, DVec2::new(10.25, 10.5));
        assert_eq!(field.particles()[1].position, DVec2::new(49.5, 20.0));
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn drawn_positions_leave_storage_untouched() {
        let particles =
            vec![Particle::new(DVec2::new(10.0, 10.0), DVec2::ZERO, 2.0).with_depth(0.5)];
        let field = ParticleField::from_particles(100.0, 100.0, particles);
        let drawn = field.drawn_positions(DVec2::new(4.0, 4.0));
        assert_eq!(drawn, vec![DVec2::new(12.0, 12.0)]);
        assert_eq!(field.particles()[0].position, DVec2::new(10.0, 10.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn resize_yields_exact_count_in_bounds(
                seed: u64,
                w1 in 1.0_f64..2000.0,
                h1 in 1.0_f64..2000.0,
                w2 in 1.0_f64..2000.0,
                h2 in 1.0_f64..2000.0,
                count2 in 0_usize..150,
            ) {
                let mut rng = Xorshift64::new(seed);
                let mut field = ParticleField::generate(w1, h1, &config(), &mut rng);
                field.resize(w2, h2, count2, &config(), &mut rng);
                prop_assert_eq!(field.len(), count2);
                for p in field.particles() {
                    prop_assert!(p.position.x >= 0.0 && p.position.x < w2);
                    prop_assert!(p.position.y >= 0.0 && p.position.y < h2);
                }
            }

            #[test]
            fn wrap_field_stays_in_bounds(
                seed: u64,
                w in 10.0_f64..500.0,
                h in 10.0_f64..500.0,
                steps in 1_usize..300,
            ) {
                let cfg = FieldConfig { speed: 0.6, ..config() };
                let mut field = ParticleField::initialize(w, h, 40, &cfg, &mut Xorshift64::new(seed));
                for _ in 0..steps {
                    field.advance(BoundaryPolicy::Wrap);
                }
                for p in field.particles() {
                    prop_assert!(p.position.x >= 0.0 && p.position.x < w);
                    prop_assert!(p.position.y >= 0.0 && p.position.y < h);
                }
            }
        }
    }
}
