//! Music playback bookkeeping. Track numbers start at [`FIRST_TRACK`].

/// Lowest music track number; effect numbers live below it.
pub const FIRST_TRACK: u16 = 500;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Music {
    count: u16,
    current: u16,
    playing: bool,
    paused: bool,
    looping: bool,
}

impl Music {
    pub fn new(count: u16) -> Self {
        Self {
            count,
            current: FIRST_TRACK,
            ..Self::default()
        }
    }

    pub fn count(&self) -> u16 {
        self.count
    }

    pub fn set_count(&mut self, count: u16) {
        self.count = count;
        if !self.contains(self.current) {
            self.current = FIRST_TRACK;
        }
    }

    pub fn current(&self) -> u16 {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    fn last(&self) -> u16 {
        FIRST_TRACK.saturating_add(self.count.saturating_sub(1))
    }

    pub fn contains(&self, track: u16) -> bool {
        self.count > 0 && (FIRST_TRACK..=self.last()).contains(&track)
    }

    /// Start the current track. False when there is nothing to play.
    pub fn play(&mut self) -> bool {
        if !self.contains(self.current) {
            return false;
        }
        self.playing = true;
        self.paused = false;
        true
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.paused = false;
    }

    /// Pause only while playing; returns whether anything changed.
    pub fn pause(&mut self) -> bool {
        if self.playing && !self.paused {
            self.paused = true;
            return true;
        }
        false
    }

    pub fn resume(&mut self) -> bool {
        if self.playing && self.paused {
            self.paused = false;
            return true;
        }
        false
    }

    /// Advance with wrap-around; returns the new track.
    pub fn next(&mut self) -> Option<u16> {
        if self.count == 0 {
            return None;
        }
        self.current = if self.current >= self.last() {
            FIRST_TRACK
        } else {
            self.current + 1
        };
        Some(self.current)
    }

    pub fn prev(&mut self) -> Option<u16> {
        if self.count == 0 {
            return None;
        }
        self.current = if self.current <= FIRST_TRACK {
            self.last()
        } else {
            self.current - 1
        };
        Some(self.current)
    }

    /// Select a specific track; rejected if outside the library.
    pub fn select(&mut self, track: u16) -> bool {
        if !self.contains(track) {
            return false;
        }
        self.current = track;
        true
    }

    /// Returns the new loop state.
    pub fn toggle_loop(&mut self) -> bool {
        self.looping = !self.looping;
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_library_never_plays() {
        let mut m = Music::new(0);
        assert!(!m.play());
        assert_eq!(m.next(), None);
        assert!(!m.select(500));
    }

    #[test]
    fn next_and_prev_wrap() {
        let mut m = Music::new(3);
        assert_eq!(m.prev(), Some(502));
        assert_eq!(m.next(), Some(500));
        assert_eq!(m.next(), Some(501));
        assert!(m.select(502));
        assert_eq!(m.next(), Some(500));
    }

    #[test]
    fn pause_requires_playback() {
        let mut m = Music::new(2);
        assert!(!m.pause());
        assert!(m.play());
        assert!(m.pause());
        assert!(!m.pause());
        assert!(m.resume());
        m.stop();
        assert!(!m.resume());
    }

    #[test]
    fn shrinking_library_resets_current() {
        let mut m = Music::new(10);
        m.select(509);
        m.set_count(4);
        assert_eq!(m.current(), FIRST_TRACK);
        assert!(!m.select(499));
    }
}
