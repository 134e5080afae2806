//! Encounter tuning, loaded from YAML.

use std::path::{Path, PathBuf};

use ai_motion::RigConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::charge::ChargeParams;
use crate::projectile::{Payload, PrefabId};
use crate::shot::ShotParams;

/// Shortest cooldown a behavior may be configured with, in seconds.
pub const MIN_COOLDOWN: f32 = 0.1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tuning for the whole boss: one section per behavior plus the rig timings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    pub spit: SpitConfig,
    pub wave: WaveConfig,
    pub charge: ChargeConfig,
    pub rig: RigConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpitConfig {
    pub range: f32,
    pub cooldown: f32,
    pub projectile_speed: f32,
    pub prefab: String,
    /// Give up after this many seconds without a launch.
    pub max_duration: Option<f32>,
}

impl Default for SpitConfig {
    fn default() -> Self {
        Self {
            range: 10.0,
            cooldown: 7.0,
            projectile_speed: 12.0,
            prefab: "poison_projectile".to_string(),
            max_duration: None,
        }
    }
}

impl SpitConfig {
    pub fn params(&self) -> ShotParams {
        ShotParams {
            payload: Payload {
                prefab: PrefabId::from(self.prefab.clone()),
                speed: self.projectile_speed,
            },
            max_range: self.range,
            max_duration: self.max_duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub range: f32,
    pub cooldown: f32,
    pub speed: f32,
    /// Launch along the ground plane instead of straight at the target.
    pub flatten_y: bool,
    pub prefab: String,
    pub max_duration: Option<f32>,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            range: 12.0,
            cooldown: 10.0,
            speed: 8.0,
            flatten_y: true,
            prefab: "wave_projectile".to_string(),
            max_duration: None,
        }
    }
}

impl WaveConfig {
    pub fn params(&self) -> ShotParams {
        ShotParams {
            payload: Payload {
                prefab: PrefabId::from(self.prefab.clone()),
                speed: self.speed,
            },
            max_range: self.range,
            max_duration: self.max_duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeConfig {
    pub speed: f32,
    pub stop_distance: f32,
    pub max_duration: f32,
    pub cooldown: f32,
}

impl Default for ChargeConfig {
    fn default() -> Self {
        let params = ChargeParams::default();
        Self {
            speed: params.speed,
            stop_distance: params.stop_distance,
            max_duration: params.max_duration,
            cooldown: 4.0,
        }
    }
}

impl ChargeConfig {
    pub fn params(&self) -> ChargeParams {
        ChargeParams {
            speed: self.speed,
            stop_distance: self.stop_distance,
            max_duration: self.max_duration,
        }
    }
}

impl EncounterConfig {
    /// Load and validate a YAML file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        cooldown("spit.cooldown", self.spit.cooldown)?;
        positive("spit.range", self.spit.range)?;
        positive("spit.projectile_speed", self.spit.projectile_speed)?;
        optional_positive("spit.max_duration", self.spit.max_duration)?;
        prefab("spit.prefab", &self.spit.prefab)?;

        cooldown("wave.cooldown", self.wave.cooldown)?;
        positive("wave.range", self.wave.range)?;
        positive("wave.speed", self.wave.speed)?;
        optional_positive("wave.max_duration", self.wave.max_duration)?;
        prefab("wave.prefab", &self.wave.prefab)?;

        cooldown("charge.cooldown", self.charge.cooldown)?;
        positive("charge.speed", self.charge.speed)?;
        positive("charge.stop_distance", self.charge.stop_distance)?;
        positive("charge.max_duration", self.charge.max_duration)?;

        positive("rig.wind_up_time", self.rig.wind_up_time)?;
        positive("rig.forward_time", self.rig.forward_time)?;
        if !(0.0..=1.0).contains(&self.rig.fire_at) {
            return Err(ConfigError::Invalid {
                field: "rig.fire_at",
                reason: format!("must be within [0, 1] (got {})", self.rig.fire_at),
            });
        }
        if self.rig.blend_duration < 0.0 || self.rig.blend_duration.is_nan() {
            return Err(ConfigError::Invalid {
                field: "rig.blend_duration",
                reason: format!("must be >= 0 (got {})", self.rig.blend_duration),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // Written so NaN is rejected too.
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be > 0 (got {value})"),
        })
    }
}

fn optional_positive(field: &'static str, value: Option<f32>) -> Result<(), ConfigError> {
    value.map_or(Ok(()), |v| positive(field, v))
}

fn cooldown(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= MIN_COOLDOWN {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be at least {MIN_COOLDOWN}s (got {value})"),
        })
    }
}

fn prefab(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::Invalid {
            field,
            reason: "must not be empty".to_string(),
        })
    } else {
        Ok(())
    }
}
