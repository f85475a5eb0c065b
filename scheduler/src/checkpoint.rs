//! Checkpoint - Save/Load Queue State
//!
//! Enables serialization and deserialization of the event queue for
//! pause/resume of long sampling runs.
//!
//! # Critical Invariants
//!
//! - **Determinism**: The same queue contents always produce the same digest
//! - **Integrity**: A snapshot whose digest does not match its contents is
//!   rejected at restore
//! - **Rebuild Through `add`**: Restore re-inserts every event through the
//!   normal scheduling path, so a restored queue satisfies the same
//!   invariants as a live one

use crate::models::event::Event;
use crate::queue::{EventQueue, QueueError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors that can occur while capturing or restoring a snapshot
#[derive(Debug, Error, PartialEq)]
pub enum SnapshotError {
    #[error("Snapshot serialization failed: {0}")]
    Serialization(String),

    #[error("Snapshot holds {events} events but declares capacity {capacity}")]
    TooManyEvents { events: usize, capacity: usize },

    #[error("Snapshot digest mismatch: stored {stored}, computed {computed}")]
    DigestMismatch { stored: String, computed: String },

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),
}

// ============================================================================
// Snapshot Structure
// ============================================================================

/// Portable snapshot of an event queue
///
/// Captures the capacity and every pending event, plus a digest over both so
/// a snapshot edited or corrupted in transit is rejected on restore. The
/// reverse index is not stored; restore rebuilds it by re-adding the events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueSnapshot<V> {
    /// Fixed capacity of the captured queue
    pub capacity: usize,

    /// Pending events in heap-array order at capture time
    pub events: Vec<Event<V>>,

    /// SHA256 digest of the canonical JSON of capacity and events
    pub digest: String,
}

/// Digest input: the snapshot fields that must be tamper-evident
#[derive(Serialize)]
struct DigestPayload<'a, V> {
    capacity: usize,
    events: &'a [Event<V>],
}

impl<V> QueueSnapshot<V> {
    /// Capture a snapshot of a queue
    ///
    /// # Example
    /// ```
    /// use sampler_scheduler_core_rs::{Event, EventQueue, QueueSnapshot};
    ///
    /// let mut queue = EventQueue::new(4);
    /// queue.add(Event::new(0, 7_i64, 1.5)).unwrap();
    ///
    /// let snapshot = QueueSnapshot::capture(&queue).unwrap();
    /// let restored = snapshot.restore().unwrap();
    /// assert_eq!(restored.head().unwrap().time(), 1.5);
    /// ```
    pub fn capture(queue: &EventQueue<V>) -> Result<Self, SnapshotError>
    where
        V: Clone + Serialize,
    {
        let events = queue.events().to_vec();
        let digest = compute_snapshot_digest(queue.capacity(), &events)?;
        Ok(Self {
            capacity: queue.capacity(),
            events,
            digest,
        })
    }

    /// Verify that the stored digest matches the snapshot contents
    pub fn verify(&self) -> Result<(), SnapshotError>
    where
        V: Serialize,
    {
        let computed = compute_snapshot_digest(self.capacity, &self.events)?;
        if computed != self.digest {
            return Err(SnapshotError::DigestMismatch {
                stored: self.digest.clone(),
                computed,
            });
        }
        Ok(())
    }

    /// Rebuild a queue from this snapshot
    ///
    /// Validation order:
    /// 1. Digest must match the contents
    /// 2. Event count must fit the declared capacity
    /// 3. Every event must re-enter through `add`, which rejects duplicate
    ///    variables, out-of-range variables, and non-finite times
    ///
    /// # Returns
    /// - `Ok(queue)` with heap order and reverse index freshly established
    /// - `Err(SnapshotError)` if the snapshot is inconsistent
    pub fn restore(self) -> Result<EventQueue<V>, SnapshotError>
    where
        V: Serialize,
    {
        self.verify()?;

        if self.events.len() > self.capacity {
            return Err(SnapshotError::TooManyEvents {
                events: self.events.len(),
                capacity: self.capacity,
            });
        }

        let mut queue = EventQueue::new(self.capacity);
        for event in self.events {
            queue.add(event)?;
        }
        Ok(queue)
    }
}

// ============================================================================
// Digest Computation
// ============================================================================

/// Compute the deterministic SHA256 digest of a queue's contents
///
/// Uses canonical JSON serialization with sorted keys so the digest does not
/// depend on map iteration order in the payload type.
pub fn compute_snapshot_digest<V: Serialize>(
    capacity: usize,
    events: &[Event<V>],
) -> Result<String, SnapshotError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let payload = DigestPayload { capacity, events };
    let value = serde_json::to_value(&payload)
        .map_err(|e| SnapshotError::Serialization(format!("Digest serialization failed: {}", e)))?;

    // Recursively sort all object keys for canonical representation
    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let canonical_value = canonicalize(value);

    let json = serde_json::to_string(&canonical_value)
        .map_err(|e| SnapshotError::Serialization(format!("Digest serialization failed: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    let result = hasher.finalize();

    Ok(format!("{:x}", result))
}
