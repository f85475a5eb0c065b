//! Queue Module
//!
//! The indexed event queue at the heart of the sampler:
//! - Min-heap by firing time, so the next event is always at slot 0
//! - Reverse index from variable identifier to heap slot, so any pending
//!   event can be cancelled or rescheduled in O(log n)
//! - Fixed capacity with at most one pending event per variable
//!
//! # Example
//!
//! ```rust
//! use sampler_scheduler_core_rs::{Event, EventQueue};
//!
//! let mut queue = EventQueue::new(3);
//! queue.add(Event::new(0, "burst", 4.0)).unwrap();
//! queue.add(Event::new(1, "decay", 1.5)).unwrap();
//!
//! // Drain in firing order
//! let first = queue.pop_head().unwrap();
//! assert_eq!(first.variable(), 1);
//! let second = queue.pop_head().unwrap();
//! assert_eq!(second.variable(), 0);
//! assert!(queue.is_empty());
//! ```

pub mod indexed;

// Re-export public API
pub use indexed::{EventQueue, QueueError};
