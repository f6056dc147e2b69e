//! Engine constants and the runtime [`EngineConfig`] resource.
//!
//! Constants describe the fixed treatment pipeline and the baseline timings of
//! every animation driver. `EngineConfig` carries the few values a deployment
//! may override (initial speed, seed, reduced motion, starting parameters).
//! It is assembled by the app crate from a JSON file and environment variables
//! on desktop, or from URL query parameters in the browser.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of treatment stages in the pipeline.
pub const STAGE_COUNT: usize = 6;

/// Index of the sedimentation (clarification) stage.
pub const SEDIMENTATION_STAGE: usize = 2;

/// Time between automatic stage advances at 1x speed.
pub const AUTO_ADVANCE_INTERVAL_MS: f64 = 4000.0;

/// Droplet travel time between stage anchors at 1x speed.
pub const DROPLET_MOVE_MS: f64 = 700.0;
/// Period of the idle droplet bob at 1x speed.
pub const DROPLET_BOB_PERIOD_MS: f64 = 3000.0;
/// Vertical bob amplitude in pixels.
pub const DROPLET_BOB_AMPLITUDE: f32 = 4.0;

/// Pipe fill time at 1x speed.
pub const PIPE_FILL_MS: f64 = 900.0;
/// Width of a completely filled pipe segment in pixels.
pub const PIPE_FULL_WIDTH: f32 = 96.0;

/// Shimmer mask offset wraps within `[0, SHIMMER_RANGE_PX)`.
pub const SHIMMER_RANGE_PX: f32 = 240.0;
/// Shimmer mask travel in pixels per second at 1x speed.
pub const SHIMMER_RATE_PX_PER_SEC: f32 = 60.0;

/// Speed multipliers offered by the speed selector.
pub const SPEED_CHOICES: [f32; 4] = [0.5, 1.0, 1.5, 2.0];

/// Smallest speed multiplier the engine accepts.
pub const MIN_SPEED: f32 = 0.1;
/// Largest speed multiplier the engine accepts.
pub const MAX_SPEED: f32 = 8.0;

/// Coagulant dose slider range (mg/L).
pub const DOSE_RANGE: (f64, f64) = (0.0, 90.0);
/// Rapid-mix time slider range (seconds).
pub const MIX_TIME_RANGE: (f64, f64) = (0.0, 120.0);
/// Settling time slider range (minutes).
pub const SETTLE_TIME_RANGE: (f64, f64) = (0.0, 40.0);

/// Default seed for [`crate::sim_rng::SimRng`].
pub const DEFAULT_SEED: u64 = 42;

/// Runtime configuration applied once at startup by [`crate::init_engine`].
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial speed multiplier.
    pub speed: f32,
    /// Whether auto-advance wraps from the final stage back to intake.
    pub auto_advance: bool,
    /// Seed for particle spawning and quiz selection.
    pub seed: u64,
    /// Forces the reduced-motion preference on or off. `None` keeps whatever
    /// the environment reported.
    pub reduced_motion: Option<bool>,
    /// Initial coagulant dose.
    pub dose: f64,
    /// Initial rapid-mix time.
    pub mix_time: f64,
    /// Initial settling time.
    pub settle_time: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            auto_advance: false,
            seed: DEFAULT_SEED,
            reduced_motion: None,
            dose: 30.0,
            mix_time: 40.0,
            settle_time: 10.0,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document. Missing keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()
    }

    /// Apply `key=value` overrides on top of `self`.
    ///
    /// Keys are matched case-insensitively; unknown keys are skipped with a
    /// debug log so unrelated query parameters do not break startup.
    pub fn with_overrides<I, K, V>(mut self, pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in pairs {
            let key = key.as_ref().trim().to_ascii_lowercase();
            let value = value.as_ref().trim();
            match key.as_str() {
                "speed" => self.speed = parse_number(&key, value)? as f32,
                "auto_advance" | "auto" => self.auto_advance = parse_bool(&key, value)?,
                "seed" => {
                    self.seed = value.parse().map_err(|_| ConfigError::InvalidNumber {
                        key: key.clone(),
                        value: value.to_string(),
                    })?
                }
                "reduced_motion" => self.reduced_motion = Some(parse_bool(&key, value)?),
                "dose" => self.dose = parse_number(&key, value)?,
                "mix_time" | "mix" => self.mix_time = parse_number(&key, value)?,
                "settle_time" | "settle" => self.settle_time = parse_number(&key, value)?,
                _ => debug!("EngineConfig: ignoring unknown key '{}'", key),
            }
        }
        self.validate()
    }

    /// Check every value against its accepted range.
    pub fn validate(self) -> Result<Self, ConfigError> {
        check_range("speed", self.speed as f64, MIN_SPEED as f64, MAX_SPEED as f64)?;
        check_range("dose", self.dose, DOSE_RANGE.0, DOSE_RANGE.1)?;
        check_range("mix_time", self.mix_time, MIX_TIME_RANGE.0, MIX_TIME_RANGE.1)?;
        check_range(
            "settle_time",
            self.settle_time,
            SETTLE_TIME_RANGE.0,
            SETTLE_TIME_RANGE.1,
        )?;
        Ok(self)
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64, ConfigError> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ConfigError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn check_range(key: &str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            key: key.to_string(),
            value,
            min,
            max,
        })
    }
}
