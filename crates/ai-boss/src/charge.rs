use ai_bt::{BtNode, BtStatus, NodeDetail, NodeSnapshot};
use ai_core::{TargetRef, TickContext};
use ai_motion::SharedRig;
use ai_nav::SharedNav;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeParams {
    pub speed: f32,
    /// Arrival radius handed to the navigation agent.
    pub stop_distance: f32,
    /// The charge ends (successfully) after this many seconds even without arriving.
    pub max_duration: f32,
}

impl Default for ChargeParams {
    fn default() -> Self {
        Self {
            speed: 6.0,
            stop_distance: 1.5,
            max_duration: 3.0,
        }
    }
}

/// Melee rush toward the target's current position.
///
/// Arrival is polled from the navigation agent every tick; the destination follows the target
/// whenever the agent is not still planning. Reaching the target or running out of time both
/// count as a completed charge. A rig, when given, is switched to its charge pose.
pub struct ChargeAction {
    params: ChargeParams,
    nav: Option<SharedNav>,
    target: Option<TargetRef>,
    rig: Option<SharedRig>,
    elapsed: f32,
    warned: bool,
}

impl ChargeAction {
    pub fn new(params: ChargeParams) -> Self {
        Self {
            params,
            nav: None,
            target: None,
            rig: None,
            elapsed: 0.0,
            warned: false,
        }
    }

    pub fn with_nav(mut self, nav: SharedNav) -> Self {
        self.nav = Some(nav);
        self
    }

    pub fn with_target(mut self, target: TargetRef) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_rig(mut self, rig: SharedRig) -> Self {
        self.rig = Some(rig);
        self
    }

    pub fn params(&self) -> &ChargeParams {
        &self.params
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn collaborators(&mut self) -> Option<(SharedNav, TargetRef)> {
        match (&self.nav, &self.target) {
            (Some(nav), Some(target)) => Some((nav.clone(), target.clone())),
            _ => {
                if !self.warned {
                    self.warned = true;
                    warn!(
                        nav = self.nav.is_some(),
                        target = self.target.is_some(),
                        "charge missing collaborator; behavior disabled"
                    );
                }
                None
            }
        }
    }
}

impl BtNode for ChargeAction {
    fn name(&self) -> &'static str {
        "Charge"
    }

    fn on_start(&mut self, _ctx: &TickContext) {
        self.elapsed = 0.0;

        let Some((nav, target)) = self.collaborators() else {
            return;
        };
        let Some(goal) = target.position() else {
            return;
        };

        {
            let mut nav = nav.borrow_mut();
            nav.resume();
            nav.set_speed(self.params.speed);
            nav.set_stopping_distance(self.params.stop_distance);
            nav.set_destination(goal);
        }
        if let Some(rig) = &self.rig {
            rig.borrow_mut().set_charge_pose();
        }
        debug!(speed = self.params.speed, ?goal, "charge start");
    }

    fn tick(&mut self, ctx: &TickContext) -> BtStatus {
        self.elapsed += ctx.dt_seconds;

        let Some((nav, target)) = self.collaborators() else {
            return BtStatus::Failure;
        };
        let Some(goal) = target.position() else {
            return BtStatus::Failure;
        };

        let mut nav = nav.borrow_mut();
        // Arrival is judged against the last planned path, before the destination moves.
        if !nav.is_path_pending() && nav.remaining_distance() <= self.params.stop_distance {
            debug!(elapsed = self.elapsed, "charge arrived");
            return BtStatus::Success;
        }
        if self.elapsed >= self.params.max_duration {
            debug!(elapsed = self.elapsed, "charge timed out");
            return BtStatus::Success;
        }

        if !nav.is_path_pending() {
            nav.set_destination(goal);
        }
        trace!(remaining = nav.remaining_distance(), "charging");
        BtStatus::Running
    }

    fn on_end(&mut self, _ctx: &TickContext) {
        if let Some(nav) = &self.nav {
            nav.borrow_mut().stop();
        }
    }

    fn describe(&self) -> NodeSnapshot {
        NodeSnapshot::leaf(self.name()).with_detail(NodeDetail::Elapsed {
            seconds: self.elapsed,
        })
    }
}
