use std::cell::RefCell;
use std::rc::Rc;

use ai_core::Vec3;

use crate::{CueHandle, FireCallback};

/// Motion controller consumed by behaviors.
pub trait MotionRig {
    /// World position of the rig root, used for range checks.
    fn position(&self) -> Vec3;

    /// Start a wind-up/commit cue. `on_fire` is called once at the commit point.
    fn play_cue(&mut self, on_fire: FireCallback) -> CueHandle;

    /// Lower head and body so only the base locomotion layer shows.
    fn set_charge_pose(&mut self) {}

    /// Raise head and body and aim at the target.
    fn start_lift_pose(&mut self) {}

    fn end_lift_pose(&mut self) {}
}

/// Shared handle: the host advances the rig, behaviors request cues from it.
pub type SharedRig = Rc<RefCell<dyn MotionRig>>;
