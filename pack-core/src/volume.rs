//! Three percentage channels mapped onto the audio device's dB range, plus mute.

use crate::config::Config;

/// Outcome of a stepped adjustment; selects the confirmation cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Adjusted,
    AtLimit,
}

/// Master, effects and music levels in percent. Always within `0..=100`.
/// Mute is kept apart from the percentage: the muted gain sits below the 0 % gain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    master: u8,
    effects: u8,
    music: u8,
    /// Master level to restore on unmute; `Some` while muted.
    revert: Option<u8>,
    /// Power-on master level (persisted setting).
    default_master: u8,
    step: u8,
    min_gain: i16,
    abs_min_gain: i16,
}

impl Volume {
    pub fn new(cfg: &Config) -> Self {
        let master = cfg.master_volume.min(100);
        Self {
            master,
            effects: cfg.effects_volume.min(100),
            music: cfg.music_volume.min(100),
            revert: None,
            default_master: master,
            step: cfg.volume_step.clamp(1, 100),
            min_gain: cfg.min_gain,
            abs_min_gain: cfg.abs_min_gain.min(cfg.min_gain),
        }
    }

    pub fn master(&self) -> u8 {
        self.master
    }

    pub fn effects(&self) -> u8 {
        self.effects
    }

    pub fn music(&self) -> u8 {
        self.music
    }

    pub fn default_master(&self) -> u8 {
        self.default_master
    }

    pub fn is_muted(&self) -> bool {
        self.revert.is_some()
    }

    /// `[master, effects, music]` as sent in volume-sync messages.
    pub fn snapshot(&self) -> [u8; 3] {
        [self.master, self.effects, self.music]
    }

    /// Linear between `min_gain` at 0 % and 0 dB at 100 %.
    fn gain(&self, percent: u8) -> i16 {
        let min = i32::from(self.min_gain);
        let gain = min - min * i32::from(percent.min(100)) / 100;
        i16::try_from(gain).unwrap_or(self.min_gain)
    }

    pub fn master_gain(&self) -> i16 {
        if self.is_muted() {
            self.abs_min_gain
        } else {
            self.gain(self.master)
        }
    }

    pub fn effects_gain(&self) -> i16 {
        self.gain(self.effects)
    }

    pub fn music_gain(&self) -> i16 {
        self.gain(self.music)
    }

    /// Adjusting the master level while muted unmutes first.
    pub fn increase_master(&mut self) -> Step {
        self.revert = None;
        raise(&mut self.master, self.step)
    }

    pub fn decrease_master(&mut self) -> Step {
        self.revert = None;
        lower(&mut self.master, self.step)
    }

    pub fn increase_effects(&mut self) -> Step {
        raise(&mut self.effects, self.step)
    }

    pub fn decrease_effects(&mut self) -> Step {
        lower(&mut self.effects, self.step)
    }

    pub fn increase_music(&mut self) -> Step {
        raise(&mut self.music, self.step)
    }

    pub fn decrease_music(&mut self) -> Step {
        lower(&mut self.music, self.step)
    }

    pub fn increase_default(&mut self) -> Step {
        raise(&mut self.default_master, self.step)
    }

    pub fn decrease_default(&mut self) -> Step {
        lower(&mut self.default_master, self.step)
    }

    /// Stash the master level and drop to the muted gain. No-op if already muted.
    pub fn mute(&mut self) {
        if self.revert.is_none() {
            self.revert = Some(self.master);
        }
    }

    /// Restore the stashed master level. No-op if not muted.
    pub fn unmute(&mut self) {
        if let Some(level) = self.revert.take() {
            self.master = level;
        }
    }

    /// Toggle mute; returns the new muted state.
    pub fn toggle_mute(&mut self) -> bool {
        if self.is_muted() {
            self.unmute();
        } else {
            self.mute();
        }
        self.is_muted()
    }

    /// Apply levels received from a peer or a preference blob (clamped).
    pub fn set_levels(&mut self, master: u8, effects: u8, music: u8) {
        self.master = master.min(100);
        self.effects = effects.min(100);
        self.music = music.min(100);
    }

    pub fn set_default_master(&mut self, percent: u8) {
        self.default_master = percent.min(100);
    }
}

fn raise(level: &mut u8, step: u8) -> Step {
    if *level >= 100 {
        *level = 100;
        return Step::AtLimit;
    }
    *level = level.saturating_add(step).min(100);
    Step::Adjusted
}

fn lower(level: &mut u8, step: u8) -> Step {
    if *level == 0 {
        return Step::AtLimit;
    }
    *level = level.saturating_sub(step);
    Step::Adjusted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume(master: u8) -> Volume {
        Volume::new(&Config {
            master_volume: master,
            ..Config::default()
        })
    }

    #[test]
    fn limit_reported_at_bounds() {
        let mut v = volume(95);
        assert_eq!(v.increase_master(), Step::Adjusted);
        assert_eq!(v.master(), 100);
        assert_eq!(v.increase_master(), Step::AtLimit);
        assert_eq!(v.master(), 100);

        let mut v = volume(3);
        assert_eq!(v.decrease_master(), Step::Adjusted);
        assert_eq!(v.master(), 0);
        assert_eq!(v.decrease_master(), Step::AtLimit);
    }

    #[test]
    fn gain_maps_percent_range() {
        let mut v = volume(100);
        assert_eq!(v.master_gain(), 0);
        v.set_levels(0, 50, 100);
        assert_eq!(v.master_gain(), -60);
        assert_eq!(v.effects_gain(), -30);
        assert_eq!(v.music_gain(), 0);
    }

    #[test]
    fn deep_gain_floor_does_not_overflow() {
        let mut v = Volume::new(&Config {
            min_gain: i16::MIN,
            abs_min_gain: i16::MIN,
            ..Config::default()
        });
        assert_eq!(v.master_gain(), 0);
        v.set_levels(0, 50, 99);
        assert_eq!(v.master_gain(), i16::MIN);
        assert_eq!(v.effects_gain(), -16_384);
        assert_eq!(v.music_gain(), -328);
    }

    #[test]
    fn mute_stashes_and_restores() {
        let mut v = volume(40);
        assert!(v.toggle_mute());
        assert_eq!(v.master_gain(), -70);
        assert_eq!(v.master(), 40);
        assert!(!v.toggle_mute());
        assert_eq!(v.master(), 40);
        assert_eq!(v.master_gain(), -36);
    }

    #[test]
    fn adjusting_master_unmutes() {
        let mut v = volume(40);
        v.mute();
        v.increase_master();
        assert!(!v.is_muted());
        assert_eq!(v.master(), 45);
    }

    #[test]
    fn levels_are_clamped() {
        let mut v = volume(50);
        v.set_levels(250, 101, 7);
        assert_eq!(v.snapshot(), [100, 100, 7]);
        v.set_default_master(200);
        assert_eq!(v.default_master(), 100);
    }
}
