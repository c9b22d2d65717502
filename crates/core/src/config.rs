//! Simulation configuration for a particle field.
//!
//! A [`FieldConfig`] fixes how many particles a generation has, how they are
//! scattered, how they move at the edges, how far links reach and whether
//! the pointer parallax is active. Presets supply the defaults; JSON
//! overrides are applied on top with [`FieldConfig::from_json`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::boundary::BoundaryPolicy;
use crate::error::FieldError;
use crate::params::{param_f64, param_range, param_string, param_usize};

const DEFAULT_COUNT: usize = 80;
const DEFAULT_SPEED: f64 = 0.3;
const DEFAULT_RADIUS: (f64, f64) = (1.8, 3.5);
const DEFAULT_DEPTH: (f64, f64) = (0.6, 1.0);
const DEFAULT_MAX_DISTANCE: f64 = 140.0;
const DEFAULT_PARALLAX: f64 = 20.0;
/// Upper bound for area-derived counts; links are O(n^2) per frame.
pub const DEFAULT_MAX_DENSITY_COUNT: usize = 400;

/// How the number of particles in a generation is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ParticleCount {
    /// Always exactly `count` particles.
    Fixed { count: usize },
    /// One particle per `area_per_particle` square units, at most `max`.
    Density { area_per_particle: f64, max: usize },
}

impl ParticleCount {
    pub fn fixed(count: usize) -> Self {
        ParticleCount::Fixed { count }
    }

    pub fn density(area_per_particle: f64) -> Self {
        ParticleCount::Density {
            area_per_particle,
            max: DEFAULT_MAX_DENSITY_COUNT,
        }
    }

    /// Resolves the count for a viewport.
    ///
    /// The density form never divides by a non-positive constant and yields
    /// 0 for empty or non-finite areas.
    pub fn resolve(&self, width: f64, height: f64) -> usize {
        match *self {
            ParticleCount::Fixed { count } => count,
            ParticleCount::Density {
                area_per_particle,
                max,
            } => {
                if !(area_per_particle > 0.0) {
                    return 0;
                }
                let area = width.max(0.0) * height.max(0.0);
                if !area.is_finite() {
                    return 0;
                }
                ((area / area_per_particle).floor() as usize).min(max)
            }
        }
    }
}

/// Simulation and link parameters for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub count: ParticleCount,
    /// Velocity components are drawn from `[-speed, speed)`.
    pub speed: f64,
    /// Radius range `[min, max)`.
    pub radius: (f64, f64),
    /// Parallax depth range `[min, max)`.
    pub depth: (f64, f64),
    pub boundary: BoundaryPolicy,
    /// Pairs closer than this are linked.
    pub max_distance: f64,
    /// Parallax amplitude; `None` disables the pointer-reactive offset.
    pub parallax: Option<f64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: ParticleCount::fixed(DEFAULT_COUNT),
            speed: DEFAULT_SPEED,
            radius: DEFAULT_RADIUS,
            depth: DEFAULT_DEPTH,
            boundary: BoundaryPolicy::Bounce,
            max_distance: DEFAULT_MAX_DISTANCE,
            parallax: Some(DEFAULT_PARALLAX),
        }
    }
}

impl FieldConfig {
    /// Applies JSON overrides on top of `base` and validates the result.
    ///
    /// Recognized keys: `count`, `density`, `max_count`, `speed`, `radius`,
    /// `depth`, `boundary`, `max_distance`, `parallax`. `density` takes
    /// precedence over `count`. `parallax` accepts a number, or `false` /
    /// `null` to disable it.
    pub fn from_json(params: &Value, base: &FieldConfig) -> Result<Self, FieldError> {
        let count = if params.get("density").is_some() {
            let base_max = match base.count {
                ParticleCount::Density { max, .. } => max,
                ParticleCount::Fixed { .. } => DEFAULT_MAX_DENSITY_COUNT,
            };
            ParticleCount::Density {
                area_per_particle: param_f64(params, "density", 0.0),
                max: param_usize(params, "max_count", base_max),
            }
        } else if params.get("count").is_some() {
            let base_count = base.count.resolve(0.0, 0.0);
            ParticleCount::fixed(param_usize(params, "count", base_count))
        } else {
            base.count
        };

        let boundary = match params.get("boundary") {
            Some(_) => BoundaryPolicy::from_name(&param_string(
                params,
                "boundary",
                base.boundary.name(),
            ))?,
            None => base.boundary,
        };

        let parallax = match params.get("parallax") {
            None => base.parallax,
            Some(Value::Null) | Some(Value::Bool(false)) => None,
            Some(Value::Bool(true)) => Some(base.parallax.unwrap_or(DEFAULT_PARALLAX)),
            Some(v) => Some(v.as_f64().ok_or_else(|| FieldError::ParamTypeMismatch {
                name: "parallax".into(),
                expected: "number or false".into(),
                got: v.to_string(),
            })?),
        };

        let config = Self {
            count,
            speed: param_f64(params, "speed", base.speed),
            radius: param_range(params, "radius", base.radius)?,
            depth: param_range(params, "depth", base.depth)?,
            boundary,
            max_distance: param_f64(params, "max_distance", base.max_distance),
            parallax,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every range and threshold.
    pub fn validate(&self) -> Result<(), FieldError> {
        let invalid = |msg: String| Err(FieldError::InvalidConfig(msg));
        if !self.speed.is_finite() || self.speed < 0.0 {
            return invalid(format!("speed must be finite and >= 0, got {}", self.speed));
        }
        check_range("radius", self.radius)?;
        if self.radius.0 < 0.0 {
            return invalid(format!("radius must be >= 0, got {:?}", self.radius));
        }
        check_range("depth", self.depth)?;
        if !self.max_distance.is_finite() || self.max_distance <= 0.0 {
            return invalid(format!(
                "max_distance must be finite and > 0, got {}",
                self.max_distance
            ));
        }
        if let Some(amplitude) = self.parallax {
            if !amplitude.is_finite() {
                return invalid(format!("parallax must be finite, got {amplitude}"));
            }
        }
        if let ParticleCount::Density {
            area_per_particle, ..
        } = self.count
        {
            if !area_per_particle.is_finite() || area_per_particle <= 0.0 {
                return invalid(format!(
                    "density must be finite and > 0, got {area_per_particle}"
                ));
            }
        }
        Ok(())
    }

    /// Current values as a flat JSON object, using the same keys as
    /// [`FieldConfig::from_json`].
    pub fn params(&self) -> Value {
        let mut out = json!({
            "speed": self.speed,
            "radius": [self.radius.0, self.radius.1],
            "depth": [self.depth.0, self.depth.1],
            "boundary": self.boundary.name(),
            "max_distance": self.max_distance,
            "parallax": self.parallax.map_or(Value::Bool(false), |a| json!(a)),
        });
        match self.count {
            ParticleCount::Fixed { count } => out["count"] = json!(count),
            ParticleCount::Density {
                area_per_particle,
                max,
            } => {
                out["density"] = json!(area_per_particle);
                out["max_count"] = json!(max);
            }
        }
        out
    }

    /// Schema of every accepted parameter with its type, default and range.
    pub fn param_schema(&self) -> Value {
        let defaults = self.params();
        json!({
            "count": {
                "type": "integer",
                "default": defaults.get("count").cloned().unwrap_or(json!(DEFAULT_COUNT)),
                "min": 0,
                "description": "Fixed number of particles per generation"
            },
            "density": {
                "type": "number",
                "default": defaults.get("density").cloned().unwrap_or(Value::Null),
                "min": 1.0,
                "description": "Square units per particle; overrides count when set"
            },
            "max_count": {
                "type": "integer",
                "default": defaults.get("max_count").cloned().unwrap_or(json!(DEFAULT_MAX_DENSITY_COUNT)),
                "min": 0,
                "description": "Upper bound for density-derived counts"
            },
            "speed": {
                "type": "number",
                "default": self.speed,
                "min": 0.0,
                "max": 5.0,
                "description": "Velocity components are drawn from [-speed, speed) units per frame"
            },
            "radius": {
                "type": "range",
                "default": [self.radius.0, self.radius.1],
                "min": 0.0,
                "description": "Particle radius range [min, max)"
            },
            "depth": {
                "type": "range",
                "default": [self.depth.0, self.depth.1],
                "description": "Parallax depth factor range [min, max)"
            },
            "boundary": {
                "type": "string",
                "default": self.boundary.name(),
                "values": BoundaryPolicy::list_names(),
                "description": "Edge behavior: wrap (toroidal) or bounce (reflect velocity)"
            },
            "max_distance": {
                "type": "number",
                "default": self.max_distance,
                "min": 1.0,
                "description": "Pairs closer than this are linked"
            },
            "parallax": {
                "type": "number|false",
                "default": defaults["parallax"],
                "description": "Pointer parallax amplitude, or false to disable"
            }
        })
    }
}

fn check_range(name: &str, (min, max): (f64, f64)) -> Result<(), FieldError> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(FieldError::InvalidConfig(format!(
            "{name} must be a finite [min, max] with min <= max, got [{min}, {max}]"
        )));
    }
    Ok(())
}
