//! Motion providers for time-extended behaviors.
//!
//! A behavior asks a rig to play a cue and hands it a one-shot callback. The rig calls it back
//! at a moment of its own choosing inside the motion (possibly several steps later) and then
//! finishes the motion on its own.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod cue;
pub mod manual;
pub mod rig;
pub mod thrust;

pub use cue::{CueHandle, CueState, FireCallback, SpawnPoint};
pub use manual::ManualRig;
pub use rig::{MotionRig, SharedRig};
pub use thrust::{PoseWeights, RigConfig, ThrustRig};
