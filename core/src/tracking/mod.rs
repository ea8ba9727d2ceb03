//! Target tracking — snapshots, registry, diffing, and overlay rendering.
//!
//! The `snapshot` module measures one target. The `registry` module holds
//! every target seen so far together with its overlay binding. The `diff`
//! module re-measures the whole registry and produces minimal change
//! records. The `render` module turns those records into overlay actions.
//! The `readiness` module schedules the loading-indicator check.

pub mod diff;
pub mod readiness;
pub mod registry;
pub mod render;
pub mod snapshot;
