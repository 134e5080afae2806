use ai_core::Vec3;
use ai_motion::SpawnPoint;

use crate::shot::{Aim, ShotAction, ShotParams};

/// Aims straight at the target from the spawn point, including height difference.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpitAim;

impl Aim for SpitAim {
    fn name(&self) -> &'static str {
        "Spit"
    }

    fn direction(&self, spawn: &SpawnPoint, target: Vec3) -> Vec3 {
        (target - spawn.position).normalize_or(spawn.forward)
    }
}

/// Single poison projectile launched at the mouth's fire point.
pub type SpitAction = ShotAction<SpitAim>;

impl ShotAction<SpitAim> {
    pub fn new(params: ShotParams) -> Self {
        Self::with_aim(SpitAim, params)
    }
}
