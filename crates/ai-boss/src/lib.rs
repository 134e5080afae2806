//! Boss encounter behaviors built on `ai-bt`.
//!
//! Three time-extended leaves share one pattern: wind up a motion, commit at a point the motion
//! provider chooses, and report success only when that commit has happened. The brain arranges
//! them in a fixed priority order, each behind its own cooldown gate.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod brain;
pub mod charge;
pub mod config;
pub mod projectile;
pub mod shot;
pub mod spit;
pub mod wave;

pub use brain::{build_brain, build_root, Collaborators};
pub use charge::{ChargeAction, ChargeParams};
pub use config::{ChargeConfig, ConfigError, EncounterConfig, SpitConfig, WaveConfig};
pub use projectile::{
    Payload, PrefabId, ProjectileLaunch, ProjectileSpawner, RecordingSpawner, SharedSpawner,
};
pub use shot::{Aim, ShotAction, ShotParams};
pub use spit::{SpitAction, SpitAim};
pub use wave::{WaveAction, WaveAim};
