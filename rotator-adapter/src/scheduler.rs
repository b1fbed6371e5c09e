/// A fixed-interval tick source with injected time.
///
/// The host's loop calls [`Scheduler::poll`] with its clock; the scheduler
/// fires at most one tick per call once the deadline has passed. Re-arming is
/// anchored to the fired deadline (not the poll time), so tick spacing does
/// not drift with polling jitter. If the host stalls past a whole interval,
/// the next deadline re-anchors at `now` instead of replaying missed ticks as
/// a burst.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scheduler {
    interval_ms: u64,
    next_deadline_ms: Option<u64>,
}

impl Scheduler {
    /// Creates an unarmed scheduler. A zero interval is clamped to 1ms.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            next_deadline_ms: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_armed(&self) -> bool {
        self.next_deadline_ms.is_some()
    }

    /// Arms the first deadline one interval from `now_ms`.
    pub fn arm(&mut self, now_ms: u64) {
        self.next_deadline_ms = Some(now_ms.saturating_add(self.interval_ms));
    }

    /// Disarms the scheduler; `poll` never fires until re-armed.
    pub fn disarm(&mut self) {
        self.next_deadline_ms = None;
    }

    /// Returns `true` when a tick is due, advancing the deadline.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let Some(deadline) = self.next_deadline_ms else {
            return false;
        };
        if now_ms < deadline {
            return false;
        }
        let mut next = deadline.saturating_add(self.interval_ms);
        if next <= now_ms {
            next = now_ms.saturating_add(self.interval_ms);
        }
        self.next_deadline_ms = Some(next);
        true
    }
}
