//! Named field variants pairing a [`FieldConfig`] with a [`Style`].

use serde::{Deserialize, Serialize};

use crate::boundary::BoundaryPolicy;
use crate::config::{FieldConfig, ParticleCount};
use crate::error::FieldError;
use crate::style::Style;

const PRESET_NAMES: &[&str] = &["drift", "ember"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// 80 white particles that bounce off the edges and follow the pointer
    /// with a parallax shift.
    #[default]
    Drift,
    /// 120 red particles on a toroidal viewport with blurred glow.
    Ember,
}

impl Preset {
    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        match name {
            "drift" => Ok(Preset::Drift),
            "ember" => Ok(Preset::Ember),
            _ => Err(FieldError::UnknownPreset(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Drift => "drift",
            Preset::Ember => "ember",
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        PRESET_NAMES
    }

    pub fn field_config(self) -> FieldConfig {
        match self {
            Preset::Drift => FieldConfig::default(),
            Preset::Ember => FieldConfig {
                count: ParticleCount::fixed(120),
                speed: 0.3,
                radius: (1.5, 3.5),
                boundary: BoundaryPolicy::Wrap,
                max_distance: 140.0,
                parallax: None,
                ..FieldConfig::default()
            },
        }
    }

    pub fn style(self) -> Style {
        match self {
            Preset::Drift => Style::drift(),
            Preset::Ember => Style::ember(),
        }
    }
}
