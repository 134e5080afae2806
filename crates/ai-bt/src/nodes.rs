use ai_core::TickContext;

use crate::bt::{BtNode, BtStatus, Node};
use crate::snapshot::{NodeDetail, NodeSnapshot};

/// AND composite: ticks children left to right until one fails or is still running.
///
/// The cursor is kept while a child is `Running`, so the next step resumes at that child
/// instead of re-checking earlier siblings. Children that succeed immediately cascade into
/// the next sibling within the same step.
pub struct Sequence {
    children: Vec<Node>,
    index: usize,
}

impl Sequence {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children, index: 0 }
    }

    pub fn with(mut self, child: impl Into<Node>) -> Self {
        self.push(child);
        self
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.index
    }
}

impl BtNode for Sequence {
    fn name(&self) -> &'static str {
        "Sequence"
    }

    fn tick(&mut self, ctx: &TickContext) -> BtStatus {
        while self.index < self.children.len() {
            match self.children[self.index].update(ctx) {
                BtStatus::Running => return BtStatus::Running,
                BtStatus::Failure => {
                    self.index = 0;
                    return BtStatus::Failure;
                }
                BtStatus::Success => self.index += 1,
            }
        }

        self.index = 0;
        BtStatus::Success
    }

    fn on_end(&mut self, _ctx: &TickContext) {
        self.index = 0;
    }

    fn describe(&self) -> NodeSnapshot {
        NodeSnapshot::leaf(self.name())
            .with_detail(NodeDetail::Cursor { index: self.index })
            .with_children(self.children.iter().map(Node::snapshot).collect())
    }
}

/// OR composite and fixed-priority arbiter.
///
/// Every new episode starts again at the first child, so a higher-priority child that has
/// become eligible wins over whatever ran last time.
pub struct Selector {
    children: Vec<Node>,
    index: usize,
}

impl Selector {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children, index: 0 }
    }

    pub fn with(mut self, child: impl Into<Node>) -> Self {
        self.push(child);
        self
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.index
    }
}

impl BtNode for Selector {
    fn name(&self) -> &'static str {
        "Selector"
    }

    fn tick(&mut self, ctx: &TickContext) -> BtStatus {
        while self.index < self.children.len() {
            match self.children[self.index].update(ctx) {
                BtStatus::Running => return BtStatus::Running,
                BtStatus::Success => {
                    self.index = 0;
                    return BtStatus::Success;
                }
                BtStatus::Failure => self.index += 1,
            }
        }

        self.index = 0;
        BtStatus::Failure
    }

    fn on_end(&mut self, _ctx: &TickContext) {
        self.index = 0;
    }

    fn describe(&self) -> NodeSnapshot {
        NodeSnapshot::leaf(self.name())
            .with_detail(NodeDetail::Cursor { index: self.index })
            .with_children(self.children.iter().map(Node::snapshot).collect())
    }
}

pub struct Condition<F> {
    name: &'static str,
    cond: F,
}

impl<F> Condition<F> {
    pub fn new(cond: F) -> Self {
        Self {
            name: "Condition",
            cond,
        }
    }

    pub fn named(name: &'static str, cond: F) -> Self {
        Self { name, cond }
    }
}

impl<F> BtNode for Condition<F>
where
    F: FnMut(&TickContext) -> bool + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn tick(&mut self, ctx: &TickContext) -> BtStatus {
        BtStatus::from_bool((self.cond)(ctx))
    }
}

/// Leaf that stays `Running` until `duration` seconds of step time have elapsed.
#[derive(Debug, Clone)]
pub struct Wait {
    duration: f32,
    elapsed: f32,
}

impl Wait {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
        }
    }
}

impl BtNode for Wait {
    fn name(&self) -> &'static str {
        "Wait"
    }

    fn on_start(&mut self, _ctx: &TickContext) {
        self.elapsed = 0.0;
    }

    fn tick(&mut self, ctx: &TickContext) -> BtStatus {
        self.elapsed += ctx.dt_seconds.max(0.0);
        if self.elapsed >= self.duration {
            BtStatus::Success
        } else {
            BtStatus::Running
        }
    }

    fn describe(&self) -> NodeSnapshot {
        NodeSnapshot::leaf(self.name()).with_detail(NodeDetail::Elapsed {
            seconds: self.elapsed,
        })
    }
}
