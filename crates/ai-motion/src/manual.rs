use ai_core::Vec3;

use crate::{CueHandle, CueState, FireCallback, MotionRig, SpawnPoint};

struct ManualCue {
    handle: CueHandle,
    on_fire: FireCallback,
}

/// Rig whose cues only fire when the host says so.
///
/// Useful for scripted encounters and tests: the host decides on which step a cue commits, and
/// may call [`ManualRig::fire`] more than once to exercise a caller's duplicate-fire guard.
pub struct ManualRig {
    position: Vec3,
    spawn: SpawnPoint,
    cues: Vec<ManualCue>,
    requested: usize,
}

impl ManualRig {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            spawn: SpawnPoint {
                position,
                forward: Vec3::FORWARD,
            },
            cues: Vec::new(),
            requested: 0,
        }
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_spawn(&mut self, spawn: SpawnPoint) {
        self.spawn = spawn;
    }

    /// Total cues ever requested.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Cues requested and not yet finished.
    pub fn pending(&self) -> usize {
        self.cues.len()
    }

    /// Invoke the fire callback of the oldest unfinished cue. Returns `false` when none is playing.
    pub fn fire(&mut self) -> bool {
        let spawn = self.spawn;
        let Some(cue) = self.cues.first_mut() else {
            return false;
        };
        cue.handle.mark(CueState::Fired);
        (cue.on_fire)(&spawn);
        true
    }

    /// Complete the oldest cue without firing again.
    pub fn finish(&mut self) -> Option<CueHandle> {
        if self.cues.is_empty() {
            return None;
        }
        let cue = self.cues.remove(0);
        cue.handle.mark(CueState::Finished);
        Some(cue.handle)
    }
}

impl MotionRig for ManualRig {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn play_cue(&mut self, on_fire: FireCallback) -> CueHandle {
        let handle = CueHandle::new(self.requested as u64);
        self.requested += 1;
        self.cues.push(ManualCue {
            handle: handle.clone(),
            on_fire,
        });
        handle
    }
}
