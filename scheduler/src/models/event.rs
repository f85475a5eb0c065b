//! Event model
//!
//! Represents one pending transition owned by a single variable.
//! Each event has:
//! - The owning variable's dense integer identifier
//! - An opaque outcome payload (never interpreted by the queue)
//! - The absolute time at which the event fires
//!
//! CRITICAL: All times are f64 and must be finite once queued

use serde::{Deserialize, Serialize};

/// A pending timed event owned by one variable
///
/// The queue orders events by `time` and never inspects `value`; the payload
/// type is chosen by the embedding engine (a sampled state index, a boxed
/// transition record, ...).
///
/// Two events are equal only when variable, value, and time all match.
///
/// # Example
/// ```
/// use sampler_scheduler_core_rs::Event;
///
/// let event = Event::new(3, 1_i64, 0.25);
/// assert_eq!(event.variable(), 3);
/// assert_eq!(event.value(), &1);
/// assert_eq!(event.time(), 0.25);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event<V> {
    /// Dense identifier of the owning variable
    variable: usize,

    /// Opaque outcome payload carried to the consumer unchanged
    value: V,

    /// Absolute firing time
    time: f64,
}

impl<V> Event<V> {
    /// Create a new event
    ///
    /// # Arguments
    /// * `variable` - Dense identifier of the owning variable
    /// * `value` - Outcome payload delivered when the event fires
    /// * `time` - Absolute firing time
    ///
    /// Time finiteness is checked when the event enters a queue, not here,
    /// so partially built events can hold placeholder times.
    pub fn new(variable: usize, value: V, time: f64) -> Self {
        Self {
            variable,
            value,
            time,
        }
    }

    /// Get the identifier of the variable that owns this event
    pub fn variable(&self) -> usize {
        self.variable
    }

    /// Get the outcome payload
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consume the event and return its payload
    pub fn into_value(self) -> V {
        self.value
    }

    /// Get the absolute firing time
    pub fn time(&self) -> f64 {
        self.time
    }
}
