//! Button-mash lockout: too many firing triggers in a trailing window.

use std::collections::VecDeque;

use crate::timer::{Deadline, Millis};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MashVerdict {
    Allowed,
    /// This trigger crossed the threshold; the lockout starts now.
    Tripped,
    /// Lockout already active; the trigger is rejected.
    Locked,
}

#[derive(Debug, Clone)]
pub struct MashGuard {
    window: Millis,
    max: usize,
    cooldown: Millis,
    hits: VecDeque<Millis>,
    lockout: Deadline,
}

impl MashGuard {
    pub fn new(window: Millis, max: u8, cooldown: Millis) -> Self {
        Self {
            window,
            max: usize::from(max),
            cooldown,
            hits: VecDeque::new(),
            lockout: Deadline::idle(),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.lockout.is_armed()
    }

    /// Count one firing trigger.
    pub fn register(&mut self, now: Millis) -> MashVerdict {
        if self.is_locked() {
            return MashVerdict::Locked;
        }
        while let Some(&first) = self.hits.front() {
            if now.saturating_sub(first) >= self.window {
                self.hits.pop_front();
            } else {
                break;
            }
        }
        self.hits.push_back(now);
        if self.hits.len() > self.max {
            self.lock(now);
            return MashVerdict::Tripped;
        }
        MashVerdict::Allowed
    }

    /// Enter lockout regardless of the count (peer-reported mashing).
    pub fn lock(&mut self, now: Millis) {
        self.hits.clear();
        self.lockout.arm(now, self.cooldown);
    }

    /// True once when the cooldown lapses; the counter is reset.
    pub fn poll(&mut self, now: Millis) -> bool {
        if self.lockout.fire(now) {
            self.hits.clear();
            return true;
        }
        false
    }

    pub fn count(&self) -> usize {
        self.hits.len()
    }

    pub fn reset(&mut self) {
        self.hits.clear();
        self.lockout.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eighth_trigger_in_window_trips() {
        let mut g = MashGuard::new(2_000, 7, 3_000);
        for i in 0..7 {
            assert_eq!(g.register(i * 100), MashVerdict::Allowed);
        }
        assert_eq!(g.register(700), MashVerdict::Tripped);
        assert_eq!(g.register(800), MashVerdict::Locked);
        assert!(g.is_locked());
    }

    #[test]
    fn old_triggers_leave_the_window() {
        let mut g = MashGuard::new(2_000, 2, 3_000);
        assert_eq!(g.register(0), MashVerdict::Allowed);
        assert_eq!(g.register(1_000), MashVerdict::Allowed);
        assert_eq!(g.register(2_500), MashVerdict::Allowed);
        assert_eq!(g.count(), 2);
    }

    #[test]
    fn cooldown_releases_and_resets() {
        let mut g = MashGuard::new(2_000, 1, 3_000);
        g.register(0);
        assert_eq!(g.register(10), MashVerdict::Tripped);
        assert!(!g.poll(3_009));
        assert!(g.poll(3_010));
        assert!(!g.is_locked());
        assert_eq!(g.count(), 0);
        assert_eq!(g.register(3_020), MashVerdict::Allowed);
    }

    #[test]
    fn external_lock() {
        let mut g = MashGuard::new(2_000, 7, 3_000);
        g.lock(100);
        assert_eq!(g.register(200), MashVerdict::Locked);
        assert!(g.poll(3_100));
    }
}
