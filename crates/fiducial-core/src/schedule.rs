//! Timer-driven task queue
//!
//! Replaces engine coroutines with explicit deadlines polled from the
//! host's update loop. The queue never threads or sleeps; callers hand
//! it the current time and run whatever it reports due.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Opaque handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug, Clone, Copy)]
struct TaskState {
    /// Re-arm period for repeating tasks, `None` for one-shots
    interval: Option<f64>,
}

/// Heap entry ordered so the earliest deadline pops first, FIFO on ties
#[derive(Debug, Clone, Copy)]
struct QueueSlot {
    deadline: f64,
    seq: u64,
    id: TaskId,
}

impl Ord for QueueSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .total_cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueSlot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueSlot {}

/// Deadline queue for the periodic selection and guard work
///
/// Cancellation is immediate from the queue's point of view, but a
/// caller that already drained [`TickQueue::due`] this poll will still
/// run the batch it was handed. That bounds cancellation latency to one
/// poll, there is no mid-tick interruption.
#[derive(Debug, Default)]
pub struct TickQueue {
    heap: BinaryHeap<QueueSlot>,
    tasks: HashMap<TaskId, TaskState>,
    next_id: u64,
    next_seq: u64,
}

impl TickQueue {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a task to fire every `interval` seconds
    ///
    /// The first fire is one full period after `now`. A repeating task
    /// fires at most once per [`TickQueue::due`] call; periods missed
    /// during a long stall are dropped rather than replayed, matching
    /// the coroutine loops this queue replaces.
    pub fn run_every(&mut self, interval: f64, now: f64) -> TaskId {
        debug_assert!(interval > 0.0, "repeating interval must be positive");
        self.schedule(now + interval, Some(interval))
    }

    /// Schedules a task to fire once, `delay` seconds after `now`
    pub fn run_once(&mut self, delay: f64, now: f64) -> TaskId {
        debug_assert!(delay >= 0.0, "delay must not be negative");
        self.schedule(now + delay, None)
    }

    fn schedule(&mut self, deadline: f64, interval: Option<f64>) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.insert(id, TaskState { interval });
        self.push_slot(deadline, id);
        id
    }

    fn push_slot(&mut self, deadline: f64, id: TaskId) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(QueueSlot { deadline, seq, id });
    }

    /// Unschedules `id`, returning `false` if it was not pending
    pub fn cancel(&mut self, id: TaskId) -> bool {
        if self.tasks.remove(&id).is_none() {
            return false;
        }
        self.heap.retain(|slot| slot.id != id);
        true
    }

    /// Whether `id` is still pending
    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// The earliest pending deadline
    pub fn next_deadline(&self) -> Option<f64> {
        self.heap.peek().map(|slot| slot.deadline)
    }

    /// Number of pending tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether nothing is scheduled
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drains every task due at `now`, in deadline order
    ///
    /// Repeating tasks are re-armed at `now + interval`; one-shots are
    /// dropped once reported.
    pub fn due(&mut self, now: f64) -> Vec<TaskId> {
        let mut fired = Vec::new();
        while let Some(slot) = self.heap.peek() {
            if slot.deadline > now {
                break;
            }
            let slot = match self.heap.pop() {
                Some(slot) => slot,
                None => break,
            };
            let Some(state) = self.tasks.get(&slot.id) else {
                continue;
            };
            match state.interval {
                Some(interval) => self.push_slot(now + interval, slot.id),
                None => {
                    self.tasks.remove(&slot.id);
                }
            }
            fired.push(slot.id);
        }
        fired
    }

    /// Unschedules everything
    pub fn clear(&mut self) {
        self.heap.clear();
        self.tasks.clear();
    }
}
