//! Indexed Event Queue
//!
//! This module implements the scheduling core: a fixed-capacity binary
//! min-heap of events keyed by firing time, paired with a reverse index from
//! variable identifier to heap slot so that any variable's pending event can
//! be found, removed, or rescheduled in O(log n) without a scan.
//!
//! # Storage Layout
//!
//! ```text
//! slots (min-heap by time):
//!   [ (var 4, t=0.2) | (var 0, t=0.9) | (var 2, t=0.5) | ... ]
//!         slot 0            slot 1           slot 2
//!
//! positions (reverse index):
//!   var 0 -> Some(1)   var 1 -> None   var 2 -> Some(2)   var 4 -> Some(0)
//! ```
//!
//! The two arrays are private and every mutation goes through the swap and
//! sift helpers, so they cannot drift apart from the outside.
//!
//! # Critical Invariants
//!
//! 1. **Heap order**: every slot's time is <= its children's times
//! 2. **Index coherence**: `positions[slots[i].variable()] == Some(i)` for
//!    every occupied slot, and `None` for every variable with no pending event
//! 3. **One pending event per variable**: enforced at `add`
//! 4. **Capacity bound**: the queue never holds more events than the
//!    capacity fixed at construction

use crate::models::event::Event;
use thiserror::Error;

/// Errors that can occur during queue operations
#[derive(Debug, Error, PartialEq)]
pub enum QueueError {
    #[error("Cannot add event: queue is full (capacity: {capacity}, length: {length})")]
    CapacityExceeded { capacity: usize, length: usize },

    #[error("Index {index} out of range: queue length is {length}")]
    OutOfRange { index: usize, length: usize },

    #[error("Variable {variable} out of range: capacity is {capacity}")]
    VariableOutOfRange { variable: usize, capacity: usize },

    #[error("Variable {variable} already has a pending event")]
    AlreadyScheduled { variable: usize },

    #[error("Variable {variable} has no pending event")]
    NotScheduled { variable: usize },

    #[error("Cannot add event: time {time} for variable {variable} is not finite")]
    NonFiniteTime { variable: usize, time: f64 },
}

/// Sort key carried by an entry while it sinks toward the leaves
///
/// `Unbounded` sorts after every real timestamp. Sinking an entry with an
/// unbounded key therefore drives it all the way to a leaf, which is how
/// interior removal vacates a slot without breaking heap order above it.
#[derive(Debug, Clone, Copy)]
enum SiftKey {
    /// The entry competes with its real firing time
    Time(f64),

    /// The entry loses every comparison against a real firing time
    Unbounded,
}

impl SiftKey {
    /// True when an entry carrying this key must sink below a child firing
    /// at `time`
    fn is_after(self, time: f64) -> bool {
        match self {
            SiftKey::Time(own) => time < own,
            SiftKey::Unbounded => true,
        }
    }
}

/// Fixed-capacity priority queue of events, ordered by firing time
///
/// Supports the three operations a continuous-time sampler needs:
/// - `head` / `pop_head`: the next event to fire, in O(1) / O(log n)
/// - `add`: schedule a variable's next event, in O(log n)
/// - `remove`: cancel any variable's pending event by identifier, in
///   O(log n), so the variable can be rescheduled after its parents change
///
/// Variable identifiers are dense integers in `[0, capacity)` and each
/// variable holds at most one pending event at a time.
///
/// # Example
/// ```
/// use sampler_scheduler_core_rs::{Event, EventQueue};
///
/// let mut queue = EventQueue::new(4);
/// queue.add(Event::new(0, 'a', 5.0)).unwrap();
/// queue.add(Event::new(1, 'b', 2.0)).unwrap();
///
/// // Variable 1 fires first
/// assert_eq!(queue.head().unwrap().variable(), 1);
///
/// // Cancel variable 1; variable 0 becomes the head
/// let cancelled = queue.remove(1).unwrap();
/// assert_eq!(cancelled.time(), 2.0);
/// assert_eq!(queue.head().unwrap().variable(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct EventQueue<V> {
    /// Maximum number of simultaneously pending events (and the exclusive
    /// upper bound on variable identifiers)
    capacity: usize,

    /// Heap storage; the vector's whole length is the occupied region
    slots: Vec<Event<V>>,

    /// Reverse index: variable identifier -> current heap slot
    positions: Vec<Option<usize>>,
}

impl<V> EventQueue<V> {
    /// Create an empty queue for `capacity` variables
    ///
    /// A capacity of zero is legal and yields a queue that rejects every
    /// `add`.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Vec::with_capacity(capacity),
            positions: vec![None; capacity],
        }
    }

    /// Get the fixed capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the number of pending events
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check whether no events are pending
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Get the earliest-firing event without removing it
    ///
    /// Returns `None` when the queue is empty.
    pub fn head(&self) -> Option<&Event<V>> {
        self.slots.first()
    }

    /// Get the event stored in heap slot `index`
    ///
    /// Slot 0 is the head; other slots follow heap-array order, which is
    /// **not** firing order. Useful for iteration and diagnostics.
    ///
    /// # Returns
    /// - `Ok(&event)` if `index < len()`
    /// - `Err(QueueError::OutOfRange)` otherwise
    pub fn at(&self, index: usize) -> Result<&Event<V>, QueueError> {
        self.slots.get(index).ok_or(QueueError::OutOfRange {
            index,
            length: self.slots.len(),
        })
    }

    /// View all pending events in heap-array order
    pub fn events(&self) -> &[Event<V>] {
        &self.slots
    }

    /// Check whether `variable` has a pending event
    pub fn contains(&self, variable: usize) -> bool {
        self.position(variable).is_some()
    }

    /// Get the heap slot currently holding `variable`'s pending event
    ///
    /// Returns `None` when the variable has no pending event or lies outside
    /// `[0, capacity)`.
    pub fn position(&self, variable: usize) -> Option<usize> {
        self.positions.get(variable).copied().flatten()
    }

    /// Schedule an event
    ///
    /// Rejections, checked in order:
    /// 1. `CapacityExceeded` when the queue is full
    /// 2. `VariableOutOfRange` when `event.variable() >= capacity`
    /// 3. `AlreadyScheduled` when the variable already has a pending event
    /// 4. `NonFiniteTime` when the firing time is NaN or infinite
    ///
    /// On any rejection the queue is left unchanged.
    ///
    /// # Example
    /// ```
    /// use sampler_scheduler_core_rs::{Event, EventQueue, QueueError};
    ///
    /// let mut queue = EventQueue::new(2);
    /// queue.add(Event::new(0, (), 1.0)).unwrap();
    ///
    /// let result = queue.add(Event::new(0, (), 3.0));
    /// assert_eq!(result, Err(QueueError::AlreadyScheduled { variable: 0 }));
    /// ```
    pub fn add(&mut self, event: Event<V>) -> Result<(), QueueError> {
        if self.slots.len() >= self.capacity {
            return Err(QueueError::CapacityExceeded {
                capacity: self.capacity,
                length: self.slots.len(),
            });
        }

        let variable = event.variable();
        if variable >= self.capacity {
            return Err(QueueError::VariableOutOfRange {
                variable,
                capacity: self.capacity,
            });
        }

        if self.positions[variable].is_some() {
            return Err(QueueError::AlreadyScheduled { variable });
        }

        if !event.time().is_finite() {
            return Err(QueueError::NonFiniteTime {
                variable,
                time: event.time(),
            });
        }

        // Append at the tail, then float up to restore heap order
        let index = self.slots.len();
        self.slots.push(event);
        self.positions[variable] = Some(index);
        self.sift_up(index);

        Ok(())
    }

    /// Remove and return `variable`'s pending event
    ///
    /// The slot it occupied is repaired in O(log n): the head case is the
    /// classic pop (move the tail to the root, sink it), while an interior
    /// entry first sinks to a leaf under an unbounded key so the tail can
    /// take its place and float up.
    ///
    /// # Returns
    /// - `Ok(event)` with the removed event
    /// - `Err(QueueError::NotScheduled)` when the variable has no pending
    ///   event (including variables outside `[0, capacity)`)
    ///
    /// # Example
    /// ```
    /// use sampler_scheduler_core_rs::{Event, EventQueue};
    ///
    /// let mut queue = EventQueue::new(4);
    /// queue.add(Event::new(2, 10_i64, 7.5)).unwrap();
    ///
    /// // Reschedule variable 2 after a dependency changed
    /// let stale = queue.remove(2).unwrap();
    /// assert_eq!(stale.time(), 7.5);
    /// queue.add(Event::new(2, 11, 4.0)).unwrap();
    /// ```
    pub fn remove(&mut self, variable: usize) -> Result<Event<V>, QueueError> {
        let index = self
            .positions
            .get(variable)
            .copied()
            .flatten()
            .ok_or(QueueError::NotScheduled { variable })?;

        if index == 0 {
            let removed = self.slots.swap_remove(0);
            self.positions[variable] = None;
            if !self.slots.is_empty() {
                let key = SiftKey::Time(self.slots[0].time());
                self.sift_down(0, key);
            }
            return Ok(removed);
        }

        // Sink the doomed entry to a leaf, take it out, then let the tail
        // entry that replaced it float up to its proper slot
        let settled = self.sift_down(index, SiftKey::Unbounded);
        let removed = self.slots.swap_remove(settled);
        self.positions[variable] = None;
        if settled < self.slots.len() {
            self.positions[self.slots[settled].variable()] = Some(settled);
            self.sift_up(settled);
        }

        Ok(removed)
    }

    /// Remove and return the earliest-firing event
    ///
    /// Returns `None` when the queue is empty.
    pub fn pop_head(&mut self) -> Option<Event<V>> {
        let variable = self.slots.first()?.variable();
        self.remove(variable).ok()
    }

    /// Drop every pending event and reset the reverse index
    pub fn clear(&mut self) {
        self.slots.clear();
        self.positions.fill(None);
    }

    /// Swap the entries in slots `a` and `b` and refresh both reverse-index
    /// entries
    fn swap_slots(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        self.positions[self.slots[a].variable()] = Some(a);
        self.positions[self.slots[b].variable()] = Some(b);
    }

    /// Float the entry at `index` toward the root while it fires earlier
    /// than its parent
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.slots[index].time() < self.slots[parent].time() {
                self.swap_slots(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Sink the entry at `index` toward the leaves while `key` sorts after
    /// the smaller of its children, then record the entry's final slot in
    /// the reverse index and return that slot
    ///
    /// `key` stands in for the sinking entry's own time at every level; an
    /// `Unbounded` key loses to any child, so the entry settles on a leaf.
    fn sift_down(&mut self, mut index: usize, key: SiftKey) -> usize {
        loop {
            let left = 2 * index + 1;
            let right = left + 1;

            let mut smallest = index;
            let mut smallest_key = key;
            if left < self.slots.len() && smallest_key.is_after(self.slots[left].time()) {
                smallest = left;
                smallest_key = SiftKey::Time(self.slots[left].time());
            }
            if right < self.slots.len() && smallest_key.is_after(self.slots[right].time()) {
                smallest = right;
            }

            if smallest == index {
                self.positions[self.slots[index].variable()] = Some(index);
                return index;
            }

            self.swap_slots(index, smallest);
            index = smallest;
        }
    }
}
