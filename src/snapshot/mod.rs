//! Snapshot capture surface
//!
//! This module provides the public entry points for taking snapshots:
//! - Snapshotter: facade owning the collaborator set, composing the
//!   structural clone and the resource-embedding walk
//! - SnapshotOptions: caller-facing configuration (subtree filter, scroll
//!   compensation)

pub mod config;
pub mod session;

pub use config::{NodeFilter, SnapshotOptions};
pub use session::Snapshotter;
