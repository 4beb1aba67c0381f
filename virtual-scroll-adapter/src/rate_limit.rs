use virtual_scroll::ThrottleMode;

/// A tick-driven rate limiter for bursty UI signals (scroll, resize).
///
/// The limiter owns no timers. The host calls [`Self::schedule`] when an event arrives and
/// [`Self::poll`] on every timer/frame tick; `poll` hands back the payload once it is due.
///
/// - [`ThrottleMode::Delay`]: every new event restarts the countdown, so a burst collapses into
///   a single invocation `delay_ms` after the last event.
/// - [`ThrottleMode::Frame`]: a pending event fires on the next tick, whatever its timestamp.
///
/// Scheduling while a payload is pending replaces it; only the newest payload is ever delivered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimiter<P> {
    mode: ThrottleMode,
    pending: Option<Pending<P>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Pending<P> {
    payload: P,
    due_ms: u64,
}

impl<P> RateLimiter<P> {
    pub fn new(mode: ThrottleMode) -> Self {
        Self {
            mode,
            pending: None,
        }
    }

    pub fn mode(&self) -> ThrottleMode {
        self.mode
    }

    /// Switches the policy. A pending payload keeps its current deadline.
    pub fn set_mode(&mut self, mode: ThrottleMode) {
        self.mode = mode;
    }

    /// Queues `payload`, superseding anything still pending.
    pub fn schedule(&mut self, payload: P, now_ms: u64) {
        let due_ms = match self.mode {
            ThrottleMode::Delay { delay_ms } => now_ms.saturating_add(delay_ms),
            ThrottleMode::Frame => now_ms,
        };
        self.pending = Some(Pending { payload, due_ms });
    }

    /// Returns the pending payload if it is due at `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> Option<P> {
        let due = match (&self.pending, self.mode) {
            (None, _) => false,
            (Some(_), ThrottleMode::Frame) => true,
            (Some(p), ThrottleMode::Delay { .. }) => now_ms >= p.due_ms,
        };
        if !due {
            return None;
        }
        self.pending.take().map(|p| p.payload)
    }

    /// Drops the pending payload, if any, and returns it.
    pub fn cancel(&mut self) -> Option<P> {
        self.pending.take().map(|p| p.payload)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending payload becomes due (`None` when idle).
    ///
    /// In frame mode this is the scheduling time: any later tick delivers it.
    pub fn deadline_ms(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.due_ms)
    }
}
