/// A trailing-edge throttle driven by adapter-supplied timestamps.
///
/// The first [`call`](Self::call) in a quiet period schedules a deadline `interval_ms` later;
/// later calls before the deadline only replace the pending arguments. [`poll`](Self::poll)
/// releases the latest arguments once the deadline is reached, so the last call of a burst
/// always runs exactly once.
#[derive(Clone, Debug)]
pub struct Throttle<T> {
    interval_ms: u64,
    deadline_ms: Option<u64>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            deadline_ms: None,
            pending: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Changes the interval. An already scheduled deadline is kept.
    pub fn set_interval_ms(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }

    pub fn call(&mut self, args: T, now_ms: u64) {
        self.pending = Some(args);
        if self.deadline_ms.is_none() {
            self.deadline_ms = Some(now_ms.saturating_add(self.interval_ms));
        }
    }

    /// Returns the latest arguments if the deadline has been reached.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        let deadline = self.deadline_ms?;
        if now_ms < deadline {
            return None;
        }
        self.deadline_ms = None;
        self.pending.take()
    }

    /// Drops the pending call, if any.
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }
}
