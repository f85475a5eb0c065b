//! Domain models for the sampler scheduler

pub mod event;

// Re-exports
pub use event::Event;
