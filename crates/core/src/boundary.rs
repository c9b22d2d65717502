//! Boundary policies applied after each motion step.
//!
//! * [`BoundaryPolicy::Wrap`]: toroidal viewport, a coordinate leaving one
//!   edge re-enters from the opposite edge.
//! * [`BoundaryPolicy::Bounce`]: elastic reflection, the velocity component
//!   normal to the exited edge is negated and the position is left as is.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::particle::Particle;

const POLICY_NAMES: &[&str] = &["wrap", "bounce"];

/// How particles behave at the viewport edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    Wrap,
    #[default]
    Bounce,
}

impl BoundaryPolicy {
    /// Looks a policy up by its lowercase name.
    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        match name {
            "wrap" => Ok(BoundaryPolicy::Wrap),
            "bounce" => Ok(BoundaryPolicy::Bounce),
            _ => Err(FieldError::UnknownBoundary(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BoundaryPolicy::Wrap => "wrap",
            BoundaryPolicy::Bounce => "bounce",
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        POLICY_NAMES
    }

    /// Applies the policy to a particle that has just moved, inside a
    /// viewport of size `bounds`.
    pub fn apply(self, particle: &mut Particle, bounds: DVec2) {
        match self {
            BoundaryPolicy::Wrap => {
                particle.position.x = wrap_coord(particle.position.x, bounds.x);
                particle.position.y = wrap_coord(particle.position.y, bounds.y);
            }
            BoundaryPolicy::Bounce => {
                bounce_axis(particle.position.x, &mut particle.velocity.x, bounds.x);
                bounce_axis(particle.position.y, &mut particle.velocity.y, bounds.y);
            }
        }
    }
}

/// Reduces `value` into `[0, bound)`. A non-positive bound collapses to 0.
fn wrap_coord(value: f64, bound: f64) -> f64 {
    if !(bound > 0.0) || !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(bound);
    // rem_euclid can round a tiny negative up to exactly `bound`
    if wrapped >= bound {
        0.0
    } else {
        wrapped
    }
}

/// Negates `velocity` only while it still points out of `[0, bound]`, so one
/// crossing flips the sign exactly once even if the overshoot lasts.
fn bounce_axis(position: f64, velocity: &mut f64, bound: f64) {
    let outward = (position < 0.0 && *velocity < 0.0) || (position > bound && *velocity > 0.0);
    if outward {
        *velocity = -*velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 800.0;
    const H: f64 = 600.0;

    fn bounds() -> DVec2 {
        DVec2::new(W, H)
    }

    fn moving(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle::new(DVec2::new(x, y), DVec2::new(vx, vy), 2.0)
    }

    #[test]
    fn names_round_trip() {
        for name in BoundaryPolicy::list_names() {
            assert_eq!(BoundaryPolicy::from_name(name).unwrap().name(), *name);
        }
        assert!(matches!(
            BoundaryPolicy::from_name("sticky"),
            Err(FieldError::UnknownBoundary(_))
        ));
    }

    #[test]
    fn serde_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&BoundaryPolicy::Wrap).unwrap(),
            "\"wrap\""
        );
        let b: BoundaryPolicy = serde_json::from_str("\"bounce\"").unwrap();
        assert_eq!(b, BoundaryPolicy::Bounce);
    }

    #[test]
    fn wrap_right_edge_reenters_on_the_left() {
        let mut p = moving(W - 0.05, 300.0, 0.1, 0.0);
        p.advance(BoundaryPolicy::Wrap, bounds());
        assert!((p.position.x - 0.05).abs() < 1e-9, "x = {}", p.position.x);
        assert_eq!(p.velocity, DVec2::new(0.1, 0.0));
    }

    #[test]
    fn wrap_left_and_top_edges() {
        let mut p = moving(0.1, 0.1, -0.3, -0.3);
        p.advance(BoundaryPolicy::Wrap, bounds());
        assert!((p.position.x - (W - 0.2)).abs() < 1e-9);
        assert!((p.position.y - (H - 0.2)).abs() < 1e-9);
    }

    #[test]
    fn wrap_exact_bound_maps_to_zero() {
        let mut p = moving(W - 0.5, 10.0, 0.5, 0.0);
        p.advance(BoundaryPolicy::Wrap, bounds());
        assert_eq!(p.position.x, 0.0);
    }

    #[test]
    fn wrap_tiny_negative_stays_below_bound() {
        assert!(wrap_coord(-1e-18, W) < W);
        assert_eq!(wrap_coord(5.0, 0.0), 0.0);
        assert_eq!(wrap_coord(f64::NAN, W), 0.0);
    }

    #[test]
    fn bounce_right_edge_flips_velocity_without_clamping() {
        let mut p = moving(W - 0.05, 300.0, 0.3, 0.0);
        p.advance(BoundaryPolicy::Bounce, bounds());
        assert!((p.position.x - (W + 0.25)).abs() < 1e-9);
        assert_eq!(p.velocity, DVec2::new(-0.3, 0.0));

        // next frame brings it back inside
        p.advance(BoundaryPolicy::Bounce, bounds());
        assert!((p.position.x - (W - 0.05)).abs() < 1e-9);
        assert_eq!(p.velocity, DVec2::new(-0.3, 0.0));
    }

    #[test]
    fn bounce_does_not_flip_twice_for_one_crossing() {
        // deep overshoot: still outside after the reflected step
        let mut p = moving(-5.0, 100.0, -0.3, 0.0);
        p.advance(BoundaryPolicy::Bounce, bounds());
        assert_eq!(p.velocity.x, 0.3);
        p.advance(BoundaryPolicy::Bounce, bounds());
        assert_eq!(p.velocity.x, 0.3, "flipped again while returning");
    }

    #[test]
    fn bounce_on_exact_edge_is_inside() {
        let mut p = moving(W - 0.5, H - 0.5, 0.5, 0.5);
        p.advance(BoundaryPolicy::Bounce, bounds());
        assert_eq!(p.position, DVec2::new(W, H));
        assert_eq!(p.velocity, DVec2::new(0.5, 0.5));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn wrap_keeps_particles_in_half_open_bounds(
                x in 0.0_f64..W,
                y in 0.0_f64..H,
                vx in -0.6_f64..0.6,
                vy in -0.6_f64..0.6,
                steps in 1_usize..200,
            ) {
                let mut p = moving(x, y, vx, vy);
                for _ in 0..steps {
                    p.advance(BoundaryPolicy::Wrap, bounds());
                    prop_assert!(p.position.x >= 0.0 && p.position.x < W, "x = {}", p.position.x);
                    prop_assert!(p.position.y >= 0.0 && p.position.y < H, "y = {}", p.position.y);
                }
            }

            #[test]
            fn bounce_flips_once_per_crossing(
                x in 0.0_f64..W,
                vx in prop_oneof![-0.6_f64..-0.05, 0.05_f64..0.6],
                steps in 1_usize..5_000,
            ) {
                let mut p = moving(x, 100.0, vx, 0.0);
                let mut flips = 0_usize;
                let mut crossings = 0_usize;
                let mut outside = false;
                for _ in 0..steps {
                    let before = p.velocity.x;
                    p.advance(BoundaryPolicy::Bounce, bounds());
                    let now_outside = p.position.x < 0.0 || p.position.x > W;
                    if now_outside && !outside {
                        crossings += 1;
                    }
                    outside = now_outside;
                    if p.velocity.x != before {
                        flips += 1;
                    }
                    prop_assert_eq!(p.velocity.x.abs(), vx.abs());
                }
                prop_assert_eq!(flips, crossings);
            }
        }
    }
}
