use std::cell::RefCell;
use std::rc::Rc;

use ai_bt::{BtNode, BtStatus, NodeDetail, NodeSnapshot};
use ai_core::{TargetRef, TickContext, Vec3};
use ai_motion::{CueHandle, FireCallback, SharedRig, SpawnPoint};
use tracing::{debug, trace, warn};

use crate::projectile::{Payload, ProjectileLaunch, SharedSpawner};

/// Launch direction policy for a [`ShotAction`].
pub trait Aim: Clone + 'static {
    fn name(&self) -> &'static str;

    /// Unit direction from `spawn` toward `target`.
    fn direction(&self, spawn: &SpawnPoint, target: Vec3) -> Vec3;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShotParams {
    pub payload: Payload,
    /// The behavior fails while the target is farther than this from the rig.
    pub max_range: f32,
    /// Optional episode time limit; the behavior fails once it is reached without a launch.
    pub max_duration: Option<f32>,
}

/// State shared between the leaf and the fire callback it hands to the rig.
#[derive(Debug)]
struct Session {
    episode: u64,
    active: bool,
    fired: bool,
    status: BtStatus,
}

#[derive(Clone)]
struct Collaborators {
    rig: SharedRig,
    target: TargetRef,
    spawner: SharedSpawner,
}

/// Ranged leaf: play a cue on the rig and launch a projectile when the cue commits.
///
/// The leaf never reports `Success` on its own; only the fire callback does. Range (and the
/// optional duration limit) is re-checked every tick, so the behavior can fail out mid-motion.
/// A callback that arrives twice, or after its episode ended, has no effect.
///
/// Missing collaborators leave the behavior permanently failing.
pub struct ShotAction<A> {
    aim: A,
    params: ShotParams,
    rig: Option<SharedRig>,
    target: Option<TargetRef>,
    spawner: Option<SharedSpawner>,
    session: Rc<RefCell<Session>>,
    cue: Option<CueHandle>,
    elapsed: f32,
    warned: bool,
}

impl<A: Aim> ShotAction<A> {
    pub fn with_aim(aim: A, params: ShotParams) -> Self {
        Self {
            aim,
            params,
            rig: None,
            target: None,
            spawner: None,
            session: Rc::new(RefCell::new(Session {
                episode: 0,
                active: false,
                fired: false,
                status: BtStatus::Running,
            })),
            cue: None,
            elapsed: 0.0,
            warned: false,
        }
    }

    pub fn with_rig(mut self, rig: SharedRig) -> Self {
        self.rig = Some(rig);
        self
    }

    pub fn with_target(mut self, target: TargetRef) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_spawner(mut self, spawner: SharedSpawner) -> Self {
        self.spawner = Some(spawner);
        self
    }

    pub fn params(&self) -> &ShotParams {
        &self.params
    }

    /// Whether the current episode's launch has happened.
    pub fn has_fired(&self) -> bool {
        self.session.borrow().fired
    }

    pub fn cue(&self) -> Option<&CueHandle> {
        self.cue.as_ref()
    }

    fn collaborators(&mut self) -> Option<Collaborators> {
        let found = match (&self.rig, &self.target, &self.spawner) {
            (Some(rig), Some(target), Some(spawner)) => Some(Collaborators {
                rig: rig.clone(),
                target: target.clone(),
                spawner: spawner.clone(),
            }),
            _ => None,
        };
        if found.is_none() && !self.warned {
            self.warned = true;
            warn!(
                behavior = self.aim.name(),
                rig = self.rig.is_some(),
                target = self.target.is_some(),
                spawner = self.spawner.is_some(),
                "missing collaborator; behavior disabled"
            );
        }
        found
    }

    fn in_range(&self, collab: &Collaborators) -> bool {
        let Some(goal) = collab.target.position() else {
            return false;
        };
        let origin = collab.rig.borrow().position();
        origin.distance(goal) <= self.params.max_range
    }

    fn fire_callback(&self, collab: &Collaborators) -> FireCallback {
        let session = Rc::clone(&self.session);
        let episode = session.borrow().episode;
        let aim = self.aim.clone();
        let payload = self.params.payload.clone();
        let target = collab.target.clone();
        let spawner = collab.spawner.clone();

        Box::new(move |spawn: &SpawnPoint| {
            let mut s = session.borrow_mut();
            if s.fired || !s.active || s.episode != episode {
                trace!(behavior = aim.name(), episode, "stale or repeated fire ignored");
                return;
            }
            let Some(goal) = target.position() else {
                return;
            };
            s.fired = true;
            s.status = BtStatus::Success;
            drop(s);

            let direction = aim.direction(spawn, goal);
            debug!(behavior = aim.name(), prefab = %payload.prefab, episode, "launch");
            spawner.borrow_mut().spawn(ProjectileLaunch {
                prefab: payload.prefab.clone(),
                origin: spawn.position,
                direction,
                velocity: direction * payload.speed,
            });
        })
    }
}

impl<A: Aim> BtNode for ShotAction<A> {
    fn name(&self) -> &'static str {
        self.aim.name()
    }

    fn on_start(&mut self, _ctx: &TickContext) {
        {
            let mut s = self.session.borrow_mut();
            s.episode = s.episode.wrapping_add(1);
            s.active = true;
            s.fired = false;
            s.status = BtStatus::Running;
        }
        self.elapsed = 0.0;

        let Some(collab) = self.collaborators() else {
            return;
        };
        // An out-of-range start fails on this tick; don't commit the rig to a motion.
        if !self.in_range(&collab) {
            return;
        }

        let on_fire = self.fire_callback(&collab);
        let cue = collab.rig.borrow_mut().play_cue(on_fire);
        debug!(behavior = self.aim.name(), cue = cue.id(), "cue requested");
        self.cue = Some(cue);
    }

    fn tick(&mut self, ctx: &TickContext) -> BtStatus {
        self.elapsed += ctx.dt_seconds;

        let Some(collab) = self.collaborators() else {
            return BtStatus::Failure;
        };
        if !self.in_range(&collab) {
            trace!(behavior = self.aim.name(), "target out of range");
            return BtStatus::Failure;
        }
        // A launch settles the episode even when it lands on the last allowed step.
        if self.session.borrow().fired {
            return BtStatus::Success;
        }
        if self
            .params
            .max_duration
            .is_some_and(|limit| self.elapsed >= limit)
        {
            trace!(behavior = self.aim.name(), elapsed = self.elapsed, "timed out");
            return BtStatus::Failure;
        }

        self.session.borrow().status
    }

    fn on_end(&mut self, _ctx: &TickContext) {
        // The rig finishes its motion on its own; only stop tracking it.
        self.cue = None;
        self.session.borrow_mut().active = false;
    }

    fn describe(&self) -> NodeSnapshot {
        let s = self.session.borrow();
        NodeSnapshot::leaf(self.aim.name()).with_detail(NodeDetail::Deferred {
            status: s.status,
            fired: s.fired,
            cue_outstanding: self.cue.is_some(),
        })
    }
}
