//! Tick-driven behavior tree runtime built on `ai-core`.
//!
//! Composites keep a resumable cursor: a `Running` child is resumed on the next step rather
//! than re-evaluating earlier siblings. Priority re-evaluation happens once per episode, when
//! the composite starts over from its first child.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod bt;
pub mod decorators;
pub mod nodes;
pub mod snapshot;
pub mod tree;

pub use bt::{BtNode, BtStatus, Node};
pub use decorators::{Cooldown, Inverter};
pub use nodes::{Condition, Selector, Sequence, Wait};
pub use snapshot::{NodeDetail, NodeSnapshot};
pub use tree::BtTree;
