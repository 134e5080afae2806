use ai_core::Vec3;
use ai_motion::SpawnPoint;

use crate::shot::{Aim, ShotAction, ShotParams};

/// Aims along the ground plane when `flatten_y` is set, so the wave hugs the floor.
#[derive(Debug, Clone, Copy)]
pub struct WaveAim {
    pub flatten_y: bool,
}

impl Default for WaveAim {
    fn default() -> Self {
        Self { flatten_y: true }
    }
}

impl Aim for WaveAim {
    fn name(&self) -> &'static str {
        "Wave"
    }

    fn direction(&self, spawn: &SpawnPoint, target: Vec3) -> Vec3 {
        let mut dir = target - spawn.position;
        if self.flatten_y {
            dir = dir.with_y(0.0);
        }
        // Target directly above or below the spawn point.
        if dir.length_squared() < 1e-4 {
            return spawn.forward;
        }
        dir.normalize_or(spawn.forward)
    }
}

/// Ground wave launched at the mouth's fire point.
pub type WaveAction = ShotAction<WaveAim>;

impl ShotAction<WaveAim> {
    pub fn new(params: ShotParams, flatten_y: bool) -> Self {
        Self::with_aim(WaveAim { flatten_y }, params)
    }
}
