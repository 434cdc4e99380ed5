//! Millisecond deadlines driven by a host-supplied clock.

/// Milliseconds on the host's monotonic clock.
pub type Millis = u64;

/// One-shot timer. Nothing happens on its own; callers poll with the current time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Millis>,
    duration: Millis,
}

impl Deadline {
    pub const fn idle() -> Self {
        Self {
            at: None,
            duration: 0,
        }
    }

    pub fn arm(&mut self, now: Millis, duration: Millis) {
        self.duration = duration;
        self.at = Some(now.saturating_add(duration));
    }

    /// Re-arm with the duration of the last `arm`.
    pub fn restart(&mut self, now: Millis) {
        self.arm(now, self.duration);
    }

    pub fn cancel(&mut self) {
        self.at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.at.is_some()
    }

    pub fn expired(&self, now: Millis) -> bool {
        matches!(self.at, Some(at) if now >= at)
    }

    pub fn remaining(&self, now: Millis) -> Option<Millis> {
        self.at.map(|at| at.saturating_sub(now))
    }

    pub fn duration(&self) -> Millis {
        self.duration
    }

    /// True exactly once per arming: disarms on expiry.
    pub fn fire(&mut self, now: Millis) -> bool {
        if self.expired(now) {
            self.at = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_never_expires() {
        let mut d = Deadline::idle();
        assert!(!d.is_armed());
        assert!(!d.expired(u64::MAX));
        assert!(!d.fire(u64::MAX));
    }

    #[test]
    fn fires_once_at_deadline() {
        let mut d = Deadline::idle();
        d.arm(1_000, 500);
        assert!(!d.fire(1_499));
        assert_eq!(d.remaining(1_200), Some(300));
        assert!(d.fire(1_500));
        assert!(!d.fire(1_600));
        assert!(!d.is_armed());
    }

    #[test]
    fn restart_and_cancel() {
        let mut d = Deadline::idle();
        d.arm(0, 100);
        d.restart(90);
        assert!(!d.expired(150));
        assert!(d.expired(190));
        d.cancel();
        assert!(!d.expired(10_000));
        assert_eq!(d.duration(), 100);
    }
}
