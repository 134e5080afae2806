use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::BtStatus;

/// Node-specific state worth showing in a debugger or replay log.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeDetail {
    None,
    /// Composite resume position.
    Cursor { index: usize },
    /// Remaining gate time; the gate is closed while `remaining > 0`.
    Cooldown { remaining: f32, duration: f32 },
    /// Time accumulated by a timed leaf in the current episode.
    Elapsed { seconds: f32 },
    /// Deferred-effect leaf session.
    Deferred {
        status: BtStatus,
        fired: bool,
        cue_outstanding: bool,
    },
}

/// Point-in-time view of a node and its subtree.
///
/// This is plain data: it can be recorded every step and rendered later by tooling.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeSnapshot {
    pub name: Cow<'static, str>,
    pub started: bool,
    pub detail: NodeDetail,
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    pub fn leaf(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            started: false,
            detail: NodeDetail::None,
            children: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: NodeDetail) -> Self {
        self.detail = detail;
        self
    }

    pub fn with_children(mut self, children: Vec<NodeSnapshot>) -> Self {
        self.children = children;
        self
    }

    /// Depth-first search by node name.
    pub fn find(&self, name: &str) -> Option<&NodeSnapshot> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Names of the started nodes along the active path, root first.
    pub fn active_path(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut node = self;
        while node.started {
            out.push(node.name.as_ref());
            match node.children.iter().find(|c| c.started) {
                Some(next) => node = next,
                None => break,
            }
        }
        out
    }
}
