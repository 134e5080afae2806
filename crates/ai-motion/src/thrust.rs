use ai_core::Vec3;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CueHandle, CueState, FireCallback, MotionRig, SpawnPoint};

/// Timing and geometry for [`ThrustRig`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RigConfig {
    /// Seconds to blend pose layers to a new target.
    pub blend_duration: f32,
    /// How far the mouth pulls back during wind-up.
    pub wind_up_distance: f32,
    pub wind_up_time: f32,
    /// Seconds to thrust from the pulled-back pose to rest.
    pub forward_time: f32,
    /// Normalized point in the forward thrust where the cue fires, in `[0, 1]`.
    pub fire_at: f32,
    /// Spawn point offset from the rig root, along the facing direction.
    pub spawn_forward: f32,
    pub spawn_height: f32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            blend_duration: 0.35,
            wind_up_distance: 0.35,
            wind_up_time: 0.18,
            forward_time: 0.10,
            fire_at: 0.25,
            spawn_forward: 0.8,
            spawn_height: 1.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseWeights {
    pub lift: f32,
    pub aim: f32,
}

#[derive(Debug, Clone, Copy)]
struct Blend {
    from: PoseWeights,
    to: PoseWeights,
    elapsed: f32,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    WindUp { elapsed: f32 },
    Forward { elapsed: f32 },
}

struct ActiveCue {
    handle: CueHandle,
    on_fire: Option<FireCallback>,
    phase: Phase,
    fired: bool,
}

/// Reference motion provider: a spit-style thrust with two blended pose layers.
///
/// Each cue raises the lift/aim layers, pulls the mouth back over `wind_up_time`, then thrusts
/// forward over `forward_time`, calling its fire callback once when the thrust reaches
/// `fire_at`. Cues play independently, so a second cue started before the first ends runs
/// alongside it. The host calls [`ThrustRig::advance`] once per step.
pub struct ThrustRig {
    config: RigConfig,
    position: Vec3,
    facing: Vec3,
    weights: PoseWeights,
    blend: Option<Blend>,
    cues: Vec<ActiveCue>,
    next_id: u64,
}

impl ThrustRig {
    pub fn new(config: RigConfig, position: Vec3) -> Self {
        Self {
            config,
            position,
            facing: Vec3::FORWARD,
            weights: PoseWeights {
                lift: 0.0,
                aim: 0.0,
            },
            blend: None,
            cues: Vec::new(),
            next_id: 0,
        }
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn facing(&self) -> Vec3 {
        self.facing
    }

    /// Turn toward `point` on the horizontal plane. Keeps the current facing when `point`
    /// is directly above or below the rig.
    pub fn face_towards(&mut self, point: Vec3) {
        self.facing = (point - self.position).with_y(0.0).normalize_or(self.facing);
    }

    pub fn weights(&self) -> PoseWeights {
        self.weights
    }

    pub fn active_cues(&self) -> usize {
        self.cues.len()
    }

    /// Current mouth pull-back, the deepest among playing cues.
    pub fn mouth_pull(&self) -> f32 {
        self.cues
            .iter()
            .map(|cue| self.pull_for(cue.phase))
            .fold(0.0, f32::max)
    }

    pub fn spawn_point(&self) -> SpawnPoint {
        let reach = self.config.spawn_forward - self.mouth_pull();
        SpawnPoint {
            position: self.position + Vec3::UP * self.config.spawn_height + self.facing * reach,
            forward: self.facing,
        }
    }

    pub fn advance(&mut self, dt_seconds: f32) {
        let dt = dt_seconds.max(0.0);
        self.advance_blend(dt);

        let mut index = 0;
        while index < self.cues.len() {
            let phase = self.step_phase(self.cues[index].phase, dt);
            self.cues[index].phase = phase;

            let Phase::Forward { elapsed } = phase else {
                index += 1;
                continue;
            };

            if !self.cues[index].fired && self.forward_norm(elapsed) >= self.config.fire_at {
                let spawn = self.spawn_point();
                let cue = &mut self.cues[index];
                cue.fired = true;
                cue.handle.mark(CueState::Fired);
                trace!(cue = cue.handle.id(), "cue fire");
                if let Some(mut on_fire) = cue.on_fire.take() {
                    on_fire(&spawn);
                }
            }

            if elapsed >= self.config.forward_time {
                let cue = self.cues.remove(index);
                cue.handle.mark(CueState::Finished);
                debug!(cue = cue.handle.id(), "cue finished");
                self.end_lift_pose();
                continue;
            }
            index += 1;
        }
    }

    fn step_phase(&self, phase: Phase, dt: f32) -> Phase {
        match phase {
            Phase::WindUp { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed < self.config.wind_up_time {
                    Phase::WindUp { elapsed }
                } else {
                    // Leftover time carries into the thrust.
                    Phase::Forward {
                        elapsed: elapsed - self.config.wind_up_time,
                    }
                }
            }
            Phase::Forward { elapsed } => Phase::Forward {
                elapsed: elapsed + dt,
            },
        }
    }

    fn forward_norm(&self, elapsed: f32) -> f32 {
        if self.config.forward_time <= 0.0 {
            1.0
        } else {
            (elapsed / self.config.forward_time).clamp(0.0, 1.0)
        }
    }

    fn pull_for(&self, phase: Phase) -> f32 {
        let depth = self.config.wind_up_distance;
        match phase {
            Phase::WindUp { elapsed } if self.config.wind_up_time > 0.0 => {
                depth * (elapsed / self.config.wind_up_time).clamp(0.0, 1.0)
            }
            Phase::WindUp { .. } => depth,
            Phase::Forward { elapsed } => depth * (1.0 - self.forward_norm(elapsed)),
        }
    }

    fn start_blend(&mut self, lift: f32, aim: f32) {
        self.blend = Some(Blend {
            from: self.weights,
            to: PoseWeights { lift, aim },
            elapsed: 0.0,
        });
    }

    fn advance_blend(&mut self, dt: f32) {
        let Some(blend) = self.blend.as_mut() else {
            return;
        };

        blend.elapsed += dt;
        let t = if self.config.blend_duration <= 0.0 {
            1.0
        } else {
            (blend.elapsed / self.config.blend_duration).min(1.0)
        };
        self.weights = PoseWeights {
            lift: blend.from.lift + (blend.to.lift - blend.from.lift) * t,
            aim: blend.from.aim + (blend.to.aim - blend.from.aim) * t,
        };
        if t >= 1.0 {
            self.weights = blend.to;
            self.blend = None;
        }
    }
}

impl MotionRig for ThrustRig {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn play_cue(&mut self, on_fire: FireCallback) -> CueHandle {
        let handle = CueHandle::new(self.next_id);
        self.next_id += 1;
        self.start_lift_pose();
        debug!(cue = handle.id(), "cue start");
        self.cues.push(ActiveCue {
            handle: handle.clone(),
            on_fire: Some(on_fire),
            phase: Phase::WindUp { elapsed: 0.0 },
            fired: false,
        });
        handle
    }

    fn set_charge_pose(&mut self) {
        self.start_blend(0.0, 0.0);
    }

    fn start_lift_pose(&mut self) {
        self.start_blend(1.0, 1.0);
    }

    fn end_lift_pose(&mut self) {
        self.start_blend(0.0, 0.0);
    }
}
