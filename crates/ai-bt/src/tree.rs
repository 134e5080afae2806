use ai_core::TickContext;

use crate::bt::{BtStatus, Node};
use crate::snapshot::NodeSnapshot;

/// Owns the root node and ticks it once per simulation step.
///
/// The root status is recorded for inspection only; the driver always ticks again on the
/// next step regardless of what the root returned.
pub struct BtTree {
    root: Node,
    tick: u64,
    last: BtStatus,
}

impl BtTree {
    pub fn new(root: impl Into<Node>) -> Self {
        Self {
            root: root.into(),
            tick: 0,
            last: BtStatus::Running,
        }
    }

    /// Advance the tree by one step of `dt_seconds`.
    pub fn update(&mut self, dt_seconds: f32) {
        let ctx = TickContext::new(self.tick, dt_seconds);
        self.tick_with(&ctx);
    }

    /// Advance the tree with an externally-owned clock.
    pub fn tick_with(&mut self, ctx: &TickContext) {
        self.last = self.root.update(ctx);
        self.tick = ctx.tick.wrapping_add(1);
    }

    pub fn last_status(&self) -> BtStatus {
        self.last
    }

    /// Number of the next step this tree will run when driven by [`BtTree::update`].
    pub fn next_tick(&self) -> u64 {
        self.tick
    }

    pub fn snapshot(&self) -> NodeSnapshot {
        self.root.snapshot()
    }
}
