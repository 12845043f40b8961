//! Mesh publication pipeline.
//!
//! ```text
//! ┌────────────┐   time, config   ┌───────────────┐  CycleInput  ┌───────────┐
//! │   caller   ├─────────────────►│  MeshUpdater  ├─────────────►│ run_cycle │
//! └────────────┘                  └───────┬───────┘              └─────┬─────┘
//!       ▲                                 │                            │
//!       │          MeshSnapshot           │ ImmediateUpdater: 1 set    │
//!       └─────────────────────────────────┘ OverlappedUpdater: 2 sets  │
//!                                                                      ▼
//!                                                  topology ∥ vertices → publish
//! ```
//!
//! # Strategies
//!
//! - **Immediate**: one buffer set; `advance` blocks until the cycle is
//!   published and returns it.
//! - **Overlapped**: two buffer sets by frame parity; `advance` returns the
//!   previous frame while the current one computes on the worker pool.

mod cycle;
mod immediate;
mod overlapped;
mod types;
mod updater;

pub use cycle::{run_cycle, CycleInput};
pub use immediate::ImmediateUpdater;
pub use overlapped::OverlappedUpdater;
pub use types::{CycleStats, MeshSnapshot};
pub use updater::{create_updater, MeshUpdater};
