use ai_bt::{BtTree, Cooldown, Selector};
use ai_core::TargetRef;
use ai_motion::SharedRig;
use ai_nav::SharedNav;
use tracing::debug;

use crate::charge::ChargeAction;
use crate::config::EncounterConfig;
use crate::projectile::SharedSpawner;
use crate::shot::{Aim, ShotAction};
use crate::spit::SpitAction;
use crate::wave::WaveAction;

/// Host-side handles the boss behaviors act through.
///
/// Any of them may be left out; behaviors that need a missing one fail closed and the brain
/// falls through to the next option.
#[derive(Clone, Default)]
pub struct Collaborators {
    pub rig: Option<SharedRig>,
    pub nav: Option<SharedNav>,
    pub target: Option<TargetRef>,
    pub spawner: Option<SharedSpawner>,
}

fn wire_shot<A: Aim>(mut action: ShotAction<A>, collab: &Collaborators) -> ShotAction<A> {
    if let Some(rig) = &collab.rig {
        action = action.with_rig(rig.clone());
    }
    if let Some(target) = &collab.target {
        action = action.with_target(target.clone());
    }
    if let Some(spawner) = &collab.spawner {
        action = action.with_spawner(spawner.clone());
    }
    action
}

fn wire_charge(mut action: ChargeAction, collab: &Collaborators) -> ChargeAction {
    if let Some(nav) = &collab.nav {
        action = action.with_nav(nav.clone());
    }
    if let Some(target) = &collab.target {
        action = action.with_target(target.clone());
    }
    if let Some(rig) = &collab.rig {
        action = action.with_rig(rig.clone());
    }
    action
}

/// Fixed-priority root: spit, then wave, then charge, each behind its own cooldown.
pub fn build_root(config: &EncounterConfig, collab: &Collaborators) -> Selector {
    let spit = wire_shot(SpitAction::new(config.spit.params()), collab);
    let wave = wire_shot(
        WaveAction::new(config.wave.params(), config.wave.flatten_y),
        collab,
    );
    let charge = wire_charge(ChargeAction::new(config.charge.params()), collab);

    Selector::new(Vec::new())
        .with(Cooldown::new(spit, config.spit.cooldown))
        .with(Cooldown::new(wave, config.wave.cooldown))
        .with(Cooldown::new(charge, config.charge.cooldown))
}

pub fn build_brain(config: &EncounterConfig, collab: &Collaborators) -> BtTree {
    debug!(
        spit_range = config.spit.range,
        wave_range = config.wave.range,
        "building boss brain"
    );
    BtTree::new(build_root(config, collab))
}
