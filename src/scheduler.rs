use std::time::{Duration, Instant};

use crate::window::WindowId;

#[derive(Debug)]
struct Scheduled<T> {
    seq: u64,
    due: Instant,
    owner: Option<WindowId>,
    task: T,
}

/// Single-shot deferred tasks, drained by the event loop on each tick.
///
/// Tasks only fire from `drain_due`, so they always run after the event that
/// scheduled them has finished. A task tied to a window is dropped when that
/// window goes away.
#[derive(Debug)]
pub struct Scheduler<T> {
    pending: Vec<Scheduled<T>>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 1,
        }
    }

    pub fn schedule(
        &mut self,
        now: Instant,
        delay: Duration,
        owner: Option<WindowId>,
        task: T,
    ) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.saturating_add(1);
        self.pending.push(Scheduled {
            seq,
            due: now + delay,
            owner,
            task,
        });
        tracing::trace!(task = seq, delay_ms = delay.as_millis() as u64, "task scheduled");
    }

    /// Drops every task owned by `id`. Returns how many were cancelled.
    pub fn cancel_for_window(&mut self, id: WindowId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| t.owner != Some(id));
        let cancelled = before - self.pending.len();
        if cancelled > 0 {
            tracing::debug!(window_id = %id, cancelled, "cancelled pending tasks");
        }
        cancelled
    }

    /// Removes and returns tasks whose delay has strictly elapsed, in due
    /// order (ties in scheduling order).
    pub fn drain_due(&mut self, now: Instant) -> Vec<T> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|t| t.due < now);
        self.pending = rest;
        due.sort_by_key(|t| (t.due, t.seq));
        due.into_iter().map(|t| t.task).collect()
    }

    /// Earliest pending deadline, for sizing the next poll timeout.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|t| t.due).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
