//! Rate limiting on the virtual clock.
//!
//! [`Debounce`] and [`Throttle`] are plain state machines that take the current
//! time as an argument. [`debounce`] and [`throttle`] wrap a callback together with
//! its own state, so two wrapped instances never share anything.

use super::Millis;

/// Trailing-edge debounce state.
///
/// Each [`call`](Self::call) replaces the pending arguments and pushes the deadline
/// to `now + wait`. [`poll`](Self::poll) hands the arguments back once the quiet
/// period has elapsed.
#[derive(Debug, Clone)]
pub struct Debounce<A> {
    wait: Millis,
    pending: Option<(Millis, A)>,
}

impl<A> Debounce<A> {
    #[must_use]
    pub const fn new(wait: Millis) -> Self {
        Self { wait, pending: None }
    }

    #[must_use]
    pub const fn wait(&self) -> Millis {
        self.wait
    }

    /// Records a call at `now`. Returns the new deadline.
    pub fn call(&mut self, now: Millis, args: A) -> Millis {
        let deadline = now.saturating_add(self.wait);
        self.pending = Some((deadline, args));
        deadline
    }

    /// Deadline of the pending call, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Millis> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending arguments if the deadline has passed.
    pub fn poll(&mut self, now: Millis) -> Option<A> {
        match self.pending {
            Some((deadline, _)) if deadline <= now => self.pending.take().map(|(_, args)| args),
            _ => None,
        }
    }

    /// Drops the pending call without firing it.
    pub fn cancel(&mut self) -> Option<A> {
        self.pending.take().map(|(_, args)| args)
    }
}

/// Leading-edge, fixed-window throttle state.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit: Millis,
    window_start: Option<Millis>,
}

impl Throttle {
    #[must_use]
    pub const fn new(limit: Millis) -> Self {
        Self {
            limit,
            window_start: None,
        }
    }

    /// Returns `true` if a call at `now` may run, opening a new window when it does.
    pub fn try_acquire(&mut self, now: Millis) -> bool {
        match self.window_start {
            Some(start) if now < start.saturating_add(self.limit) => false,
            _ => {
                self.window_start = Some(now);
                true
            }
        }
    }
}

/// A callback behind a trailing-edge debounce.
pub struct Debounced<F, A> {
    callback: F,
    state: Debounce<A>,
}

impl<F, A> Debounced<F, A>
where
    F: FnMut(A),
{
    /// Records a call. Nothing runs until [`poll`](Self::poll) passes the deadline.
    pub fn call(&mut self, now: Millis, args: A) -> Millis {
        self.state.call(now, args)
    }

    /// Runs the callback with the last call's arguments if the quiet period is over.
    pub fn poll(&mut self, now: Millis) -> bool {
        match self.state.poll(now) {
            Some(args) => {
                (self.callback)(args);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Millis> {
        self.state.deadline()
    }
}

/// A callback behind a leading-edge throttle.
pub struct Throttled<F> {
    callback: F,
    state: Throttle,
}

impl<F> Throttled<F> {
    /// Runs the callback now unless the current window is still open.
    pub fn call<A>(&mut self, now: Millis, args: A) -> bool
    where
        F: FnMut(A),
    {
        if self.state.try_acquire(now) {
            (self.callback)(args);
            true
        } else {
            false
        }
    }
}

/// Wraps `callback` so a burst of calls runs it once, `wait` after the last call.
///
/// # Examples
///
/// ```
/// use mailskin::timing::debounce;
///
/// let mut seen = Vec::new();
/// let mut search = debounce(|q: String| seen.push(q), 250);
/// search.call(0, "ma".to_string());
/// search.call(100, "mail".to_string());
/// assert!(!search.poll(300));
/// assert!(search.poll(350));
/// drop(search);
/// assert_eq!(seen, vec!["mail"]);
/// ```
pub fn debounce<F, A>(callback: F, wait: Millis) -> Debounced<F, A>
where
    F: FnMut(A),
{
    Debounced {
        callback,
        state: Debounce::new(wait),
    }
}

/// Wraps `callback` so it runs at most once per `limit` window, on the leading edge.
pub fn throttle<F>(callback: F, limit: Millis) -> Throttled<F> {
    Throttled {
        callback,
        state: Throttle::new(limit),
    }
}
