use ai_core::TickContext;
use tracing::debug;

use crate::bt::{BtNode, BtStatus, Node};
use crate::snapshot::{NodeDetail, NodeSnapshot};

/// Time gate around a single child.
///
/// After the child succeeds, the gate reports `Failure` without ticking the child until
/// `duration` seconds of step time have passed. From the parent's point of view a cooling
/// behavior looks exactly like an inapplicable one. The child's own state is left untouched
/// while the gate is closed.
pub struct Cooldown {
    child: Node,
    duration: f32,
    remaining: f32,
}

impl Cooldown {
    pub fn new(child: impl Into<Node>, duration: f32) -> Self {
        Self {
            child: child.into(),
            duration,
            remaining: 0.0,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Seconds until the gate opens; zero or negative means open.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

impl BtNode for Cooldown {
    fn name(&self) -> &'static str {
        "Cooldown"
    }

    fn tick(&mut self, ctx: &TickContext) -> BtStatus {
        // Only the sign matters, so no clamp at zero.
        self.remaining -= ctx.dt_seconds;
        if self.remaining > 0.0 {
            return BtStatus::Failure;
        }

        let status = self.child.update(ctx);
        if status == BtStatus::Success {
            self.remaining = self.duration;
            debug!(
                child = self.child.name(),
                tick = ctx.tick,
                seconds = self.duration,
                "cooldown armed"
            );
        }
        status
    }

    fn describe(&self) -> NodeSnapshot {
        NodeSnapshot::leaf(self.name())
            .with_detail(NodeDetail::Cooldown {
                remaining: self.remaining,
                duration: self.duration,
            })
            .with_children(vec![self.child.snapshot()])
    }
}

/// Swaps `Success` and `Failure`; `Running` passes through.
pub struct Inverter {
    child: Node,
}

impl Inverter {
    pub fn new(child: impl Into<Node>) -> Self {
        Self {
            child: child.into(),
        }
    }
}

impl BtNode for Inverter {
    fn name(&self) -> &'static str {
        "Inverter"
    }

    fn tick(&mut self, ctx: &TickContext) -> BtStatus {
        match self.child.update(ctx) {
            BtStatus::Running => BtStatus::Running,
            BtStatus::Success => BtStatus::Failure,
            BtStatus::Failure => BtStatus::Success,
        }
    }

    fn describe(&self) -> NodeSnapshot {
        NodeSnapshot::leaf(self.name()).with_children(vec![self.child.snapshot()])
    }
}
