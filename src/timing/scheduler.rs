//! Virtual-clock timer queue.
//!
//! Every delay in the runtime (focus ticks, teardown windows, notification TTLs,
//! debounce windows) is an entry in a [`Scheduler`]. Entries carry a payload that
//! says what to do when they fire, so there are no stored closures and every
//! pending delay can be cancelled through its [`TimerToken`].

use std::collections::{BTreeMap, HashMap};

/// Milliseconds on the scheduler's clock.
pub type Millis = u64;

/// Handle to a scheduled entry. Tokens are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

/// A timer that has come due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub at: Millis,
    pub token: TimerToken,
    pub payload: T,
}

/// Ordered queue of delayed payloads.
///
/// Entries fire in deadline order; entries sharing a deadline fire in the order
/// they were scheduled.
///
/// # Examples
///
/// ```
/// use mailskin::timing::Scheduler;
///
/// let mut scheduler = Scheduler::new();
/// let slow = scheduler.schedule(300, "teardown");
/// scheduler.schedule(100, "focus");
/// assert!(scheduler.cancel(slow));
///
/// let fired: Vec<_> = std::iter::from_fn(|| scheduler.pop_due(1_000))
///     .map(|f| f.payload)
///     .collect();
/// assert_eq!(fired, vec!["focus"]);
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Millis,
    next_seq: u64,
    queue: BTreeMap<(Millis, u64), T>,
    deadlines: HashMap<u64, Millis>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current clock reading.
    #[must_use]
    pub const fn now(&self) -> Millis {
        self.now
    }

    /// Schedules `payload` to fire `delay` milliseconds from now.
    pub fn schedule(&mut self, delay: Millis, payload: T) -> TimerToken {
        let seq = self.next_seq;
        self.next_seq += 1;
        let at = self.now.saturating_add(delay);
        self.queue.insert((at, seq), payload);
        self.deadlines.insert(seq, at);
        TimerToken(seq)
    }

    /// Cancels a pending entry. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        match self.deadlines.remove(&token.0) {
            Some(at) => self.queue.remove(&(at, token.0)).is_some(),
            None => false,
        }
    }

    /// Whether the entry behind `token` is still waiting.
    #[must_use]
    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.deadlines.contains_key(&token.0)
    }

    /// Deadline of the entry behind `token`, if still pending.
    #[must_use]
    pub fn deadline(&self, token: TimerToken) -> Option<Millis> {
        self.deadlines.get(&token.0).copied()
    }

    /// Number of pending entries.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Deadline of the earliest pending entry.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.queue.keys().next().map(|&(at, _)| at)
    }

    /// Removes and returns the earliest entry due at or before `until`.
    ///
    /// The clock moves forward to the entry's deadline, so anything scheduled
    /// while handling it is measured from the moment it fired.
    pub fn pop_due(&mut self, until: Millis) -> Option<Fired<T>> {
        let (&(at, seq), _) = self.queue.iter().next()?;
        if at > until {
            return None;
        }
        let payload = self.queue.remove(&(at, seq))?;
        self.deadlines.remove(&seq);
        self.now = self.now.max(at);
        Some(Fired {
            at,
            token: TimerToken(seq),
            payload,
        })
    }

    /// Moves the clock to `until` once every due entry has been popped.
    pub fn settle(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_deadline_then_schedule_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(50, 'c');
        scheduler.schedule(10, 'a');
        scheduler.schedule(10, 'b');

        let order: Vec<char> = std::iter::from_fn(|| scheduler.pop_due(100))
            .map(|f| f.payload)
            .collect();
        assert_eq!(order, vec!['a', 'b', 'c']);
    }

    #[test]
    fn pop_due_respects_horizon_and_advances_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(100, ());
        scheduler.schedule(200, ());

        assert!(scheduler.pop_due(150).is_some());
        assert_eq!(scheduler.now(), 100);
        assert!(scheduler.pop_due(150).is_none());
        scheduler.settle(150);
        assert_eq!(scheduler.now(), 150);

        let token = scheduler.schedule(10, ());
        assert_eq!(scheduler.deadline(token), Some(160));
    }

    #[test]
    fn cancel_is_one_shot() {
        let mut scheduler = Scheduler::new();
        let token = scheduler.schedule(10, ());
        assert!(scheduler.is_pending(token));
        assert!(scheduler.cancel(token));
        assert!(!scheduler.cancel(token));
        assert!(!scheduler.is_pending(token));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn fired_token_cannot_be_cancelled() {
        let mut scheduler = Scheduler::new();
        let token = scheduler.schedule(0, ());
        let fired = scheduler.pop_due(0).unwrap();
        assert_eq!(fired.token, token);
        assert!(!scheduler.cancel(token));
    }
}
