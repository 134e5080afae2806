//! Ranged leaves against a hand-fired rig.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ai_boss::{
    Payload, PrefabId, RecordingSpawner, ShotParams, SpitAction, WaveAction,
};
use ai_bt::{BtStatus, BtTree, Cooldown, NodeDetail};
use ai_core::Vec3;
use ai_motion::{CueHandle, FireCallback, ManualRig, MotionRig, SpawnPoint};

struct Rig {
    rig: Rc<RefCell<ManualRig>>,
    target: Rc<Cell<Vec3>>,
    spawner: Rc<RefCell<RecordingSpawner>>,
}

impl Rig {
    fn new(target: Vec3) -> Self {
        Self {
            rig: Rc::new(RefCell::new(ManualRig::new(Vec3::ZERO))),
            target: Rc::new(Cell::new(target)),
            spawner: Rc::new(RefCell::new(RecordingSpawner::default())),
        }
    }

    fn spit(&self, params: ShotParams) -> SpitAction {
        SpitAction::new(params)
            .with_rig(self.rig.clone())
            .with_target(self.target.clone())
            .with_spawner(self.spawner.clone())
    }

    fn wave(&self, params: ShotParams, flatten_y: bool) -> WaveAction {
        WaveAction::new(params, flatten_y)
            .with_rig(self.rig.clone())
            .with_target(self.target.clone())
            .with_spawner(self.spawner.clone())
    }

    fn fire(&self) -> bool {
        self.rig.borrow_mut().fire()
    }

    fn launches(&self) -> usize {
        self.spawner.borrow().launches.len()
    }
}

fn params(range: f32) -> ShotParams {
    ShotParams {
        payload: Payload {
            prefab: PrefabId::from_static("poison_projectile"),
            speed: 12.0,
        },
        max_range: range,
        max_duration: None,
    }
}

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

#[test]
fn out_of_range_fails_first_tick_without_playing_a_cue() {
    let env = Rig::new(Vec3::new(0.0, 0.0, 12.0));
    let mut tree = BtTree::new(env.spit(params(10.0)));

    tree.update(0.016);

    assert_eq!(tree.last_status(), BtStatus::Failure);
    assert_eq!(env.rig.borrow().requested(), 0);
    assert_eq!(env.launches(), 0);
}

#[test]
fn success_arrives_on_the_tick_the_rig_fires() {
    let env = Rig::new(Vec3::new(0.0, 0.0, 5.0));
    let mut tree = BtTree::new(env.spit(params(10.0)));

    tree.update(0.016);
    assert_eq!(tree.last_status(), BtStatus::Running);
    tree.update(0.016);
    assert_eq!(tree.last_status(), BtStatus::Running);

    assert!(env.fire());
    tree.update(0.016);
    assert_eq!(tree.last_status(), BtStatus::Success);

    assert_eq!(env.rig.borrow().requested(), 1);
    assert_eq!(env.launches(), 1);
}

#[test]
fn running_ticks_do_not_request_more_cues() {
    let env = Rig::new(Vec3::new(0.0, 0.0, 5.0));
    let mut tree = BtTree::new(env.spit(params(10.0)));

    for _ in 0..10 {
        tree.update(0.016);
    }

    assert_eq!(tree.last_status(), BtStatus::Running);
    assert_eq!(env.rig.borrow().requested(), 1);
}

#[test]
fn duplicate_fire_launches_once_and_stays_successful() {
    let env = Rig::new(Vec3::new(0.0, 0.0, 5.0));
    let mut tree = BtTree::new(env.spit(params(10.0)));

    tree.update(0.016);
    env.fire();
    env.fire();
    assert_eq!(env.launches(), 1);

    tree.update(0.016);
    assert_eq!(tree.last_status(), BtStatus::Success);

    // Episode over; a straggling call still does nothing.
    env.fire();
    assert_eq!(env.launches(), 1);
}

#[test]
fn spit_launches_toward_the_current_target_position() {
    let env = Rig::new(Vec3::new(0.0, 0.0, 5.0));
    env.rig.borrow_mut().set_spawn(SpawnPoint {
        position: Vec3::new(0.0, 1.0, 0.0),
        forward: Vec3::FORWARD,
    });
    let mut tree = BtTree::new(env.spit(params(10.0)));

    tree.update(0.016);
    // Target moves while the cue winds up.
    env.target.set(Vec3::new(4.0, 1.0, 0.0));
    env.fire();

    let spawner = env.spawner.borrow();
    let launch = &spawner.launches[0];
    assert_eq!(launch.prefab.as_str(), "poison_projectile");
    assert_eq!(launch.origin, Vec3::new(0.0, 1.0, 0.0));
    assert!(approx(launch.direction, Vec3::new(1.0, 0.0, 0.0)));
    assert!(approx(launch.velocity, Vec3::new(12.0, 0.0, 0.0)));
}

#[test]
fn leaving_range_mid_motion_fails_and_late_fire_is_ignored() {
    let env = Rig::new(Vec3::new(0.0, 0.0, 5.0));
    let mut tree = BtTree::new(env.spit(params(10.0)));

    tree.update(0.016);
    assert_eq!(tree.last_status(), BtStatus::Running);

    env.target.set(Vec3::new(0.0, 0.0, 15.0));
    tree.update(0.016);
    assert_eq!(tree.last_status(), BtStatus::Failure);

    // The rig finishes the abandoned motion on its own schedule.
    assert!(env.fire());
    assert_eq!(env.launches(), 0);
}

#[test]
fn stale_cue_from_an_earlier_episode_cannot_complete_a_new_one() {
    let env = Rig::new(Vec3::new(0.0, 0.0, 5.0));
    let mut tree = BtTree::new(env.spit(params(10.0)));

    tree.update(0.016);
    env.target.set(Vec3::new(0.0, 0.0, 15.0));
    tree.update(0.016);
    assert_eq!(tree.last_status(), BtStatus::Failure);

    env.target.set(Vec3::new(0.0, 0.0, 5.0));
    tree.update(0.016);
    assert_eq!(env.rig.borrow().requested(), 2);

    // Oldest cue belongs to the failed episode.
    env.fire();
    tree.update(0.016);
    assert_eq!(tree.last_status(), BtStatus::Running);
    assert_eq!(env.launches(), 0);

    env.rig.borrow_mut().finish();
    env.fire();
    tree.update(0.016);
    assert_eq!(tree.last_status(), BtStatus::Success);
    assert_eq!(env.launches(), 1);
}

#[test]
fn max_duration_fails_a_shot_that_never_fires() {
    let env = Rig::new(Vec3::new(0.0, 0.0, 5.0));
    let mut p = params(10.0);
    p.max_duration = Some(0.5);
    let mut tree = BtTree::new(env.spit(p));

    tree.update(0.25);
    assert_eq!(tree.last_status(), BtStatus::Running);
    tree.update(0.25);
    assert_eq!(tree.last_status(), BtStatus::Failure);
}

#[test]
fn launch_on_the_last_allowed_step_still_succeeds_and_arms_the_cooldown() {
    let env = Rig::new(Vec3::new(0.0, 0.0, 5.0));
    let mut p = params(10.0);
    p.max_duration = Some(0.5);
    let mut tree = BtTree::new(Cooldown::new(env.spit(p), 7.0));

    tree.update(0.25);
    assert_eq!(tree.last_status(), BtStatus::Running);

    env.fire();
    tree.update(0.25);
    assert_eq!(tree.last_status(), BtStatus::Success);
    assert_eq!(env.launches(), 1);

    tree.update(0.1);
    tree.update(0.1);
    assert_eq!(tree.last_status(), BtStatus::Failure);
    assert_eq!(env.rig.borrow().requested(), 1);
    assert_eq!(env.launches(), 1);
}

/// Rig that commits the moment a cue is requested.
struct EagerRig {
    spawn: SpawnPoint,
    played: u64,
}

impl MotionRig for EagerRig {
    fn position(&self) -> Vec3 {
        Vec3::ZERO
    }

    fn play_cue(&mut self, mut on_fire: FireCallback) -> CueHandle {
        on_fire(&self.spawn);
        self.played += 1;
        CueHandle::new(self.played)
    }
}

#[test]
fn fire_during_cue_request_succeeds_on_the_first_update() {
    let rig = Rc::new(RefCell::new(EagerRig {
        spawn: SpawnPoint {
            position: Vec3::new(0.0, 1.0, 0.0),
            forward: Vec3::FORWARD,
        },
        played: 0,
    }));
    let target = Rc::new(Cell::new(Vec3::new(0.0, 1.0, 5.0)));
    let spawner = Rc::new(RefCell::new(RecordingSpawner::default()));
    let spit = SpitAction::new(params(10.0))
        .with_rig(rig.clone())
        .with_target(target)
        .with_spawner(spawner.clone());
    let mut tree = BtTree::new(spit);

    tree.update(0.016);

    assert_eq!(tree.last_status(), BtStatus::Success);
    assert_eq!(spawner.borrow().launches.len(), 1);
    assert_eq!(rig.borrow().played, 1);
}

#[test]
fn missing_spawner_fails_closed() {
    let rig = Rc::new(RefCell::new(ManualRig::new(Vec3::ZERO)));
    let target = Rc::new(Cell::new(Vec3::new(0.0, 0.0, 5.0)));
    let spit = SpitAction::new(params(10.0))
        .with_rig(rig.clone())
        .with_target(target);
    let mut tree = BtTree::new(spit);

    for _ in 0..3 {
        tree.update(0.016);
        assert_eq!(tree.last_status(), BtStatus::Failure);
    }
    assert_eq!(rig.borrow().requested(), 0);
}

#[test]
fn vanished_target_fails() {
    let rig = Rc::new(RefCell::new(ManualRig::new(Vec3::ZERO)));
    let target = Rc::new(Cell::new(Some(Vec3::new(0.0, 0.0, 5.0))));
    let spawner = Rc::new(RefCell::new(RecordingSpawner::default()));
    let spit = SpitAction::new(params(10.0))
        .with_rig(rig)
        .with_target(target.clone())
        .with_spawner(spawner);
    let mut tree = BtTree::new(spit);

    tree.update(0.016);
    assert_eq!(tree.last_status(), BtStatus::Running);

    target.set(None);
    tree.update(0.016);
    assert_eq!(tree.last_status(), BtStatus::Failure);
}

#[test]
fn wave_flattens_its_launch_direction() {
    let env = Rig::new(Vec3::new(3.0, 0.0, 4.0));
    env.rig.borrow_mut().set_spawn(SpawnPoint {
        position: Vec3::new(0.0, 2.0, 0.0),
        forward: Vec3::FORWARD,
    });
    let mut p = params(12.0);
    p.payload.speed = 8.0;
    let mut tree = BtTree::new(env.wave(p, true));

    tree.update(0.016);
    env.fire();

    let spawner = env.spawner.borrow();
    let launch = &spawner.launches[0];
    assert!(approx(launch.direction, Vec3::new(0.6, 0.0, 0.8)));
    assert!(approx(launch.velocity, Vec3::new(4.8, 0.0, 6.4)));
}

#[test]
fn wave_straight_overhead_falls_back_to_spawn_forward() {
    let env = Rig::new(Vec3::new(0.0, 5.0, 0.0));
    env.rig.borrow_mut().set_spawn(SpawnPoint {
        position: Vec3::new(0.0, 2.0, 0.0),
        forward: Vec3::new(1.0, 0.0, 0.0),
    });
    let mut tree = BtTree::new(env.wave(params(12.0), true));

    tree.update(0.016);
    env.fire();

    assert_eq!(
        env.spawner.borrow().launches[0].direction,
        Vec3::new(1.0, 0.0, 0.0)
    );
}

#[test]
fn snapshot_reports_the_deferred_session() {
    let env = Rig::new(Vec3::new(0.0, 0.0, 5.0));
    let mut tree = BtTree::new(env.spit(params(10.0)));

    tree.update(0.016);
    let snap = tree.snapshot();
    assert!(snap.started);
    assert_eq!(
        snap.detail,
        NodeDetail::Deferred {
            status: BtStatus::Running,
            fired: false,
            cue_outstanding: true,
        }
    );

    env.fire();
    let snap = tree.snapshot();
    assert_eq!(
        snap.detail,
        NodeDetail::Deferred {
            status: BtStatus::Success,
            fired: true,
            cue_outstanding: true,
        }
    );
}
