use ai_core::TickContext;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::NodeSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BtStatus {
    Running,
    Success,
    Failure,
}

impl BtStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, BtStatus::Running)
    }

    pub fn from_bool(ok: bool) -> Self {
        if ok {
            BtStatus::Success
        } else {
            BtStatus::Failure
        }
    }
}

/// Behavior of a single tree node.
///
/// `on_start` and `on_end` bracket an *episode*: the ticks from the first `tick` after a
/// terminal status through the next terminal status. The [`Node`] wrapper guarantees each
/// runs exactly once per episode and that `on_end` never runs while the node is `Running`.
pub trait BtNode: 'static {
    fn name(&self) -> &'static str;

    fn on_start(&mut self, _ctx: &TickContext) {}

    fn tick(&mut self, ctx: &TickContext) -> BtStatus;

    fn on_end(&mut self, _ctx: &TickContext) {}

    fn describe(&self) -> NodeSnapshot {
        NodeSnapshot::leaf(self.name())
    }
}

/// Owned tree slot: a node behavior plus its episode flag.
pub struct Node {
    behavior: Box<dyn BtNode>,
    started: bool,
}

impl Node {
    pub fn new(behavior: impl BtNode) -> Self {
        Self::boxed(Box::new(behavior))
    }

    pub fn boxed(behavior: Box<dyn BtNode>) -> Self {
        Self {
            behavior,
            started: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.behavior.name()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Run one step of this node's lifecycle.
    ///
    /// Not re-entrant: call once per simulation step from the single thread that owns the tree.
    pub fn update(&mut self, ctx: &TickContext) -> BtStatus {
        if !self.started {
            trace!(node = self.behavior.name(), tick = ctx.tick, "start");
            self.behavior.on_start(ctx);
            self.started = true;
        }

        let status = self.behavior.tick(ctx);

        if status.is_terminal() {
            trace!(node = self.behavior.name(), tick = ctx.tick, ?status, "end");
            self.behavior.on_end(ctx);
            self.started = false;
        }

        status
    }

    pub fn snapshot(&self) -> NodeSnapshot {
        let mut snapshot = self.behavior.describe();
        snapshot.started = self.started;
        snapshot
    }
}

impl<N: BtNode> From<N> for Node {
    fn from(behavior: N) -> Self {
        Node::new(behavior)
    }
}
