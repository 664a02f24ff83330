/*
 * Field Parameters Module
 *
 * This module defines the FieldConfig struct holding every tunable constant
 * of the particle field. The defaults reproduce the decorative background
 * exactly: 80 particles, links under 100 pixel-units, 0.15 peak link opacity.
 * A config can be loaded from a JSON file; any field left out keeps its
 * default value.
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::palette::Palette;

// Closed interval that particle attributes are sampled from
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn as_range(&self) -> RangeInclusive<f32> {
        self.min..=self.max
    }

    fn is_ordered(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub particle_count: usize,
    // Per-axis velocity, sampled once per particle
    pub speed: ValueRange,
    pub radius: ValueRange,
    pub alpha: ValueRange,
    pub link_distance: f32,
    // Opacity of a link between two coincident particles
    pub link_opacity: f32,
    pub line_width: f32,
    pub palette: Palette,
    pub use_spatial_grid: bool,
    // Throw the population away and re-attach whenever the display mode flips
    pub reseed_on_mode_change: bool,
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 80,
            speed: ValueRange::new(-0.15, 0.15),
            radius: ValueRange::new(0.3, 1.8),
            alpha: ValueRange::new(0.1, 0.6),
            link_distance: 100.0,
            link_opacity: 0.15,
            line_width: 0.5,
            palette: Palette::default(),
            use_spatial_grid: false,
            reseed_on_mode_change: false,
            seed: None,
        }
    }
}

impl FieldConfig {
    // Read a JSON config from disk and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: FieldConfig = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.particle_count == 0 {
            return Err(ConfigError::Invalid("particle_count must be at least 1".into()));
        }
        for (name, range) in [("speed", &self.speed), ("radius", &self.radius), ("alpha", &self.alpha)] {
            if !range.is_ordered() {
                return Err(ConfigError::Invalid(format!(
                    "{} range is empty or not finite: {}..={}",
                    name, range.min, range.max
                )));
            }
        }
        if self.radius.min < 0.0 {
            return Err(ConfigError::Invalid("radius must not be negative".into()));
        }
        if self.alpha.min < 0.0 || self.alpha.max > 1.0 {
            return Err(ConfigError::Invalid("alpha must lie within 0..=1".into()));
        }
        if !(self.link_distance > 0.0 && self.link_distance.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "link_distance must be positive, got {}",
                self.link_distance
            )));
        }
        if !(0.0..=1.0).contains(&self.link_opacity) {
            return Err(ConfigError::Invalid(format!(
                "link_opacity must lie within 0..=1, got {}",
                self.link_opacity
            )));
        }
        if !(self.line_width >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "line_width must not be negative, got {}",
                self.line_width
            )));
        }
        Ok(())
    }

    // Get parameter ranges for UI sliders
    pub fn get_particle_count_range() -> RangeInclusive<usize> {
        1..=5000
    }

    pub fn get_link_distance_range() -> RangeInclusive<f32> {
        10.0..=300.0
    }
}
