//! Simulated-clock scheduler for periodic and one-shot callbacks.
//!
//! Callbacks are plain values of `T` (the world uses a closed task enum), so
//! the scheduler never holds borrows into the state it drives. Time only moves
//! when the owner asks for due tasks with [`Scheduler::pop_due`].

use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

#[derive(Clone, Debug)]
struct Timer<T> {
    task: T,
    /// Start of the timer; repeating deadlines are `origin + k * interval`.
    origin: f64,
    interval: f64,
    repeating: bool,
    fired: u64,
}

impl<T> Timer<T> {
    fn deadline(&self) -> f64 {
        self.origin + (self.fired + 1) as f64 * self.interval
    }
}

#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    now: f64,
    next_handle: u64,
    timers: BTreeMap<TimerHandle, Timer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_handle: 0,
            timers: BTreeMap::new(),
        }
    }

    /// Seconds of simulated time elapsed.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn schedule_repeating(&mut self, interval: f64, task: T) -> TimerHandle {
        debug_assert!(interval > 0.0, "repeating interval must be positive");
        self.insert(interval, true, task)
    }

    pub fn schedule_once(&mut self, delay: f64, task: T) -> TimerHandle {
        self.insert(delay.max(0.0), false, task)
    }

    /// Cancelling an unknown or already-fired handle is a no-op.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.timers.remove(&handle).is_some()
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Moves the clock to `until` without running anything. Never goes back.
    pub fn settle(&mut self, until: f64) {
        if until > self.now {
            self.now = until;
        }
    }

    fn insert(&mut self, interval: f64, repeating: bool, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.insert(
            handle,
            Timer {
                task,
                origin: self.now,
                interval,
                repeating,
                fired: 0,
            },
        );
        handle
    }

    fn next_due(&self, until: f64) -> Option<TimerHandle> {
        let mut best: Option<(f64, TimerHandle)> = None;
        for (handle, timer) in &self.timers {
            let deadline = timer.deadline();
            if deadline > until {
                continue;
            }
            // Only a strictly earlier deadline replaces; older handles win ties.
            match best {
                Some((d, _)) if d <= deadline => {}
                _ => best = Some((deadline, *handle)),
            }
        }
        best.map(|(_, handle)| handle)
    }
}

impl<T: Clone> Scheduler<T> {
    /// Pops the earliest callback due at or before `until`, advancing the
    /// clock to its deadline. Equal deadlines fire in handle creation order.
    ///
    /// Call repeatedly until `None`, then [`Scheduler::settle`] to `until`.
    /// Tasks scheduled by a callback are eligible in the same drain.
    pub fn pop_due(&mut self, until: f64) -> Option<(TimerHandle, T)> {
        let handle = self.next_due(until)?;
        let timer = self.timers.get_mut(&handle)?;
        let deadline = timer.deadline();
        let task = timer.task.clone();
        if timer.repeating {
            timer.fired += 1;
        } else {
            self.timers.remove(&handle);
        }
        if deadline > self.now {
            self.now = deadline;
        }
        Some((handle, task))
    }
}
