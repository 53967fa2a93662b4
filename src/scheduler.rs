//! One-shot deferred tasks on a virtual clock
//!
//! The desktop never sleeps; the host advances time explicitly and collects
//! whatever became due. Every scheduled task gets a [`TaskHandle`] that can
//! cancel it, so work queued for a window can be dropped when the window
//! goes away early.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    /// Due time and handle → task; the handle breaks ties in scheduling order
    queue: BTreeMap<(Duration, u64), T>,
    deadlines: HashMap<u64, Duration>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 1,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once, `delay` from now.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;

        let due = self.now + delay;
        self.queue.insert((due, id), task);
        self.deadlines.insert(id, due);
        TaskHandle(id)
    }

    /// Cancel a pending task. Returns the task if it had not run yet.
    pub fn cancel(&mut self, handle: TaskHandle) -> Option<T> {
        let due = self.deadlines.remove(&handle.0)?;
        self.queue.remove(&(due, handle.0))
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.deadlines.contains_key(&handle.0)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Move the clock forward by `elapsed` and return every task that fell
    /// due, earliest first.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<(TaskHandle, T)> {
        self.now += elapsed;

        let mut due = Vec::new();
        while let Some(entry) = self.queue.first_entry() {
            let (at, id) = *entry.key();
            if at > self.now {
                break;
            }
            let task = entry.remove();
            self.deadlines.remove(&id);
            due.push((TaskHandle(id), task));
        }
        due
    }
}
