//! Delayed actions as plain data.
//!
//! Nothing is called back: the tick pops whatever is due and applies it,
//! so a timer can never run inside another timer or inside an update rule.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::entities::EntityHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerAction {
    /// Put the sword back and accept fire requests again.
    SwingReturn,
    /// Remove a projectile that outlived its lifetime.
    ProjectileExpire,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimerEntry {
    pub fire_at: f64,
    pub action: TimerAction,
    pub target: EntityHandle,
    seq: u64,
}

impl Eq for TimerEntry {}

impl Ord for TimerEntry {
    // Reversed so the max-heap yields the earliest entry; ties by insertion.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .fire_at
            .total_cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<TimerEntry>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, fire_at: f64, action: TimerAction, target: EntityHandle) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(TimerEntry {
            fire_at,
            action,
            target,
            seq,
        });
    }

    /// Removes and returns every entry with `fire_at <= now`, earliest first.
    pub fn pop_due(&mut self, now: f64) -> Vec<TimerEntry> {
        let mut due = Vec::new();
        while let Some(top) = self.heap.peek() {
            if top.fire_at > now {
                break;
            }
            if let Some(entry) = self.heap.pop() {
                due.push(entry);
            }
        }
        due
    }

    pub fn next_fire_at(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.fire_at)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
