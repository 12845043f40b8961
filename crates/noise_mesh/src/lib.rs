//! noise_mesh - Engine independent procedural mesh animation
//!
//! This crate regenerates a dense triangle mesh every frame by displacing a
//! parametric surface along its normal with an animated noise field. Two
//! shapes are provided: a flat lattice and a closed tunnel (cylinder) whose
//! seam is hidden by periodic noise.
//!
//! # Features
//!
//! - **Vertex job**: data-parallel position and normal evaluation with
//!   analytic, finite-difference or faceted normals
//! - **Topology caching**: indices are rebuilt only when the grid layout
//!   changes, and shared between buffer sets when it matches
//! - **Update strategies**: compute on the calling thread, or overlap the
//!   next frame's work with rendering of the previous one
//! - **Packing**: full precision or snorm8 normals, 16 or 32-bit indices
//!
//! # Example
//!
//! ```ignore
//! use noise_mesh::{create_updater, GridConfig, UpdateStrategy};
//!
//! let config = GridConfig::tunnel().with_strategy(UpdateStrategy::Overlapped);
//! let mut updater = create_updater(&config)?;
//!
//! for frame in 0..600 {
//!     let snapshot = updater.advance(frame as f32 / 60.0, &config)?;
//!     upload(snapshot.vertices(), snapshot.topology().indices());
//! }
//! updater.release();
//! ```

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use constants::{coord_to_index, index_to_coord};
pub use error::{MeshError, Result};
pub use types::{Aabb, CompactVertex, NormalMode, SubMesh, Vertex, VertexFormat};

// Per-object configuration
pub mod config;
pub use config::{BoundsPolicy, GridConfig, ShapeKind, UpdateStrategy};

// Animated noise fields
pub mod noise;
pub use noise::{FlowNoise, NoiseField, NoiseKind, NoiseSample, NoiseSampler, PerlinNoise};

// Grid layout and index generation
pub mod grid;
pub mod topology;
pub use grid::GridLayout;
pub use topology::{IndexBuffer, Topology};

// Vertex job
pub mod field;
pub use field::VertexField;

pub mod bounds;

// Buffer sets
pub mod buffers;
pub use buffers::{BufferArena, BufferState, MeshBuffers};

// Cross-platform threading abstraction
pub mod threading;
pub use threading::{TaskExecutor, TaskHandle};

// Per-frame update cycle and strategies
pub mod pipeline;
pub use pipeline::{create_updater, CycleStats, ImmediateUpdater, MeshSnapshot, MeshUpdater, OverlappedUpdater};

// Renderer seam
pub mod presentation;
pub use presentation::{MeshConsumer, MeshData, NullConsumer, PackingConsumer};

// Engine-agnostic metrics
pub mod metrics;
pub use metrics::PipelineMetrics;

#[cfg(test)]
pub(crate) mod test_utils;
