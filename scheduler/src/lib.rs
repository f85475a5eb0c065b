//! Sampler Scheduler Core - Rust Engine
//!
//! Fixed-capacity indexed event queue for continuous-time samplers. The
//! queue always knows which event fires next, and any variable's pending
//! event can be cancelled or rescheduled by identifier in O(log n), which is
//! what a sampler needs every time a dependency changes state.
//!
//! # Architecture
//!
//! - **models**: Domain types (Event)
//! - **queue**: Indexed min-heap event queue
//! - **checkpoint**: Snapshot capture/restore with digest validation
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Heap order and reverse-index coherence hold after every operation
//! 2. Each variable holds at most one pending event
//! 3. All randomness in workload generation is deterministic (seeded RNG)

// Module declarations
pub mod checkpoint;
pub mod models;
pub mod queue;
pub mod rng;

// Re-exports for convenience
pub use checkpoint::{compute_snapshot_digest, QueueSnapshot, SnapshotError};
pub use models::event::Event;
pub use queue::{EventQueue, QueueError};
pub use rng::RngManager;
