//! Checkpoint Tests - Save/Load Queue State
//!
//! Test suite for snapshot capture and restore.
//!
//! Critical invariants tested:
//! - Round trip: a restored queue behaves exactly like the captured one
//! - Integrity: tampered snapshots are rejected via digest mismatch
//! - Consistency: snapshots that violate queue invariants cannot restore

use sampler_scheduler_core_rs::{
    compute_snapshot_digest, Event, EventQueue, QueueError, QueueSnapshot, SnapshotError,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Build a queue with a handful of events on a coarse time grid
fn sample_queue() -> EventQueue<i64> {
    let mut queue = EventQueue::new(8);
    for (variable, time) in [(0, 5.0), (1, 2.5), (2, 8.25), (4, 1.75), (6, 4.5)] {
        queue
            .add(Event::new(variable, variable as i64 * 10, time))
            .unwrap();
    }
    queue
}

/// Sorted (variable, time) pairs for content comparison
fn contents(queue: &EventQueue<i64>) -> Vec<(usize, f64)> {
    let mut pairs: Vec<(usize, f64)> = queue
        .events()
        .iter()
        .map(|e| (e.variable(), e.time()))
        .collect();
    pairs.sort_by_key(|&(variable, _)| variable);
    pairs
}

// ============================================================================
// Round Trip
// ============================================================================

#[test]
fn test_capture_restore_round_trip() {
    let queue = sample_queue();
    let snapshot = QueueSnapshot::capture(&queue).unwrap();

    assert_eq!(snapshot.capacity, 8);
    assert_eq!(snapshot.events.len(), 5);

    let restored = snapshot.restore().unwrap();
    assert_eq!(restored.capacity(), queue.capacity());
    assert_eq!(restored.len(), queue.len());
    assert_eq!(contents(&restored), contents(&queue));
    assert_eq!(restored.head().unwrap().time(), 1.75);
}

#[test]
fn test_restored_queue_drains_identically() {
    let original = sample_queue();
    let mut restored = QueueSnapshot::capture(&original)
        .unwrap()
        .restore()
        .unwrap();
    let mut reference = original.clone();

    loop {
        match (reference.pop_head(), restored.pop_head()) {
            (None, None) => break,
            (a, b) => {
                let a = a.expect("reference drained early");
                let b = b.expect("restored drained early");
                assert_eq!(a.time(), b.time());
            }
        }
    }
}

#[test]
fn test_restored_queue_supports_keyed_removal() {
    let queue = sample_queue();
    let mut restored = QueueSnapshot::capture(&queue).unwrap().restore().unwrap();

    // The reverse index is rebuilt, not copied; keyed removal must work
    let removed = restored.remove(4).unwrap();
    assert_eq!(removed.time(), 1.75);
    assert_eq!(restored.position(4), None);
    assert_eq!(restored.len(), 4);
}

#[test]
fn test_empty_queue_round_trip() {
    let queue: EventQueue<i64> = EventQueue::new(3);
    let restored = QueueSnapshot::capture(&queue).unwrap().restore().unwrap();

    assert_eq!(restored.capacity(), 3);
    assert!(restored.is_empty());
}

#[test]
fn test_snapshot_survives_json_round_trip() {
    let queue = sample_queue();
    let snapshot = QueueSnapshot::capture(&queue).unwrap();

    let json = serde_json::to_string(&snapshot).unwrap();
    let parsed: QueueSnapshot<i64> = serde_json::from_str(&json).unwrap();

    let restored = parsed.restore().unwrap();
    assert_eq!(contents(&restored), contents(&queue));
}

// ============================================================================
// Integrity
// ============================================================================

#[test]
fn test_verify_accepts_untouched_snapshot() {
    let snapshot = QueueSnapshot::capture(&sample_queue()).unwrap();
    assert!(snapshot.verify().is_ok());
}

#[test]
fn test_tampered_event_rejected() {
    let mut snapshot = QueueSnapshot::capture(&sample_queue()).unwrap();

    // Move one event earlier without recomputing the digest
    let target = snapshot.events[0].variable();
    snapshot.events[0] = Event::new(target, 0, 0.001);

    let result = snapshot.restore();
    assert!(matches!(result, Err(SnapshotError::DigestMismatch { .. })));
}

#[test]
fn test_tampered_capacity_rejected() {
    let mut snapshot = QueueSnapshot::capture(&sample_queue()).unwrap();
    snapshot.capacity = 64;

    let result = snapshot.restore();
    assert!(matches!(result, Err(SnapshotError::DigestMismatch { .. })));
}

#[test]
fn test_forged_digest_detected() {
    let mut snapshot = QueueSnapshot::capture(&sample_queue()).unwrap();
    snapshot.digest = "0".repeat(64);

    let result = snapshot.verify();
    assert!(matches!(result, Err(SnapshotError::DigestMismatch { .. })));
}

// ============================================================================
// Consistency
// ============================================================================

#[test]
fn test_overfull_snapshot_rejected() {
    let events = vec![
        Event::new(0, 1_i64, 1.0),
        Event::new(1, 2, 2.0),
        Event::new(2, 3, 3.0),
    ];
    let digest = compute_snapshot_digest(2, &events).unwrap();
    let snapshot = QueueSnapshot {
        capacity: 2,
        events,
        digest,
    };

    let result = snapshot.restore();
    assert_eq!(
        result.err(),
        Some(SnapshotError::TooManyEvents {
            events: 3,
            capacity: 2
        })
    );
}

#[test]
fn test_duplicate_variable_snapshot_rejected() {
    let events = vec![Event::new(1, 10_i64, 1.0), Event::new(1, 20, 2.0)];
    let digest = compute_snapshot_digest(4, &events).unwrap();
    let snapshot = QueueSnapshot {
        capacity: 4,
        events,
        digest,
    };

    let result = snapshot.restore();
    assert_eq!(
        result.err(),
        Some(SnapshotError::Queue(QueueError::AlreadyScheduled {
            variable: 1
        }))
    );
}

#[test]
fn test_out_of_range_variable_snapshot_rejected() {
    let events = vec![Event::new(5, 1_i64, 1.0)];
    let digest = compute_snapshot_digest(2, &events).unwrap();
    let snapshot = QueueSnapshot {
        capacity: 2,
        events,
        digest,
    };

    let result = snapshot.restore();
    assert_eq!(
        result.err(),
        Some(SnapshotError::Queue(QueueError::VariableOutOfRange {
            variable: 5,
            capacity: 2
        }))
    );
}
