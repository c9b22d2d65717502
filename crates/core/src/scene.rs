//! Reproducible recipe for a headless render.
//!
//! A [`Scene`] names a preset, an optional theme, the viewport, parameter
//! overrides, the PRNG seed, how many frames to run, where the pointer sits
//! and the output brightness. The same scene always produces the same frame.

use serde::{Deserialize, Serialize};

use crate::config::FieldConfig;
use crate::driver::FrameDriver;
use crate::error::FieldError;
use crate::parallax::Pointer;
use crate::preset::Preset;
use crate::style::Style;
use crate::theme::Theme;

fn default_brightness() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub preset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    pub width: usize,
    pub height: usize,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    pub seed: u64,
    #[serde(default)]
    pub frames: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<Pointer>,
    #[serde(default = "default_brightness")]
    pub brightness: f64,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Scene {
    /// Creates a scene with no overrides, no theme, no frames and full
    /// brightness.
    pub fn new(preset: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            preset: preset.to_string(),
            theme: None,
            width,
            height,
            params: empty_params(),
            seed,
            frames: 0,
            pointer: None,
            brightness: default_brightness(),
        }
    }

    /// Rejects zero dimensions and areas that overflow `usize`.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.width == 0 || self.height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(FieldError::InvalidDimensions)?;
        Ok(())
    }

    /// Preset defaults with this scene's overrides applied.
    pub fn field_config(&self) -> Result<FieldConfig, FieldError> {
        let preset = Preset::from_name(&self.preset)?;
        FieldConfig::from_json(&self.params, &preset.field_config())
    }

    /// Preset style, recolored by the theme when one is set.
    pub fn style(&self) -> Result<Style, FieldError> {
        let style = Preset::from_name(&self.preset)?.style();
        match &self.theme {
            Some(name) => Ok(Theme::from_name(name)?.apply(&style)),
            None => Ok(style),
        }
    }

    /// A started driver for this scene, pointer applied.
    pub fn driver(&self) -> Result<FrameDriver, FieldError> {
        self.validate()?;
        let mut driver = FrameDriver::new(
            self.width as f64,
            self.height as f64,
            self.field_config()?,
            self.style()?,
            self.seed,
        );
        if let Some(pointer) = self.pointer {
            driver.set_pointer(pointer);
        }
        driver.start();
        Ok(driver)
    }
}
