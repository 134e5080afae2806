//! Navigation providers (grid backend, path queries, and a reference path-following agent).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod grid;
pub mod navigator;

pub use agent::{GridNavAgent, NavAgent, SharedNav};
pub use grid::{GridError, NavGrid};
pub use navigator::{NavPath, Navigator};
