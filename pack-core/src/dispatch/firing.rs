//! Firing, crossing the streams, mash lockout, overheat and venting.

use crate::action::{Cue, Lights, Smoke, Sound};
use crate::core::PackCore;
use crate::protocol::{PackCommand, SerialCommand, WandCommand};
use crate::state::{CtsStatus, Era, PowerLevel, StreamMode};

/// Every looping firing sound the pack may be running.
const FIRING_LOOPS: [Sound; 8] = [
    Sound::Gb1FireLoopPack,
    Sound::Gb1FireLoopGun,
    Sound::Gb2FireLoop,
    Sound::AfterlifeFireLoop,
    Sound::FrozenEmpireFireLoop,
    Sound::FiringLoopGb1,
    Sound::Gb1FireHighPowerLoop,
    Sound::Gb1984FireHighPowerLoop,
];

const SMASH_FADE_MS: u16 = 2500;
const OVERHEAT_DELAY_RANGE_S: (u8, u8) = (2, 60);
const SLIME_OVERHEAT_LEAD_MS: u64 = 1000;

impl PackCore {
    pub(super) fn wand_firing_command(&mut self, cmd: WandCommand) -> bool {
        use WandCommand::*;
        match cmd {
            Firing => self.fire_start(),
            FiringStopped => {
                if self.state.wand_firing {
                    self.fire_stop();
                }
                self.lights(Lights::CyclotronSpeedRevert);
            }
            ButtonMashing => {
                tracing::info!("wand reported button mashing");
                // The loop keeps running until the wand's FiringStopped.
                self.stop_firing_tails();
                self.mash.lock(self.now);
            }
            SmashErrorLoop => {
                self.play_cue(Cue::new(Sound::SmashErrorLoop).looped().fade_in(SMASH_FADE_MS));
            }
            SmashErrorLoopStop => self.stop(Sound::SmashErrorLoop),
            SmashErrorRestart => {
                self.stop(Sound::SmashErrorLoop);
                self.restart(Sound::SmashErrorRestart);
            }

            Overheating => self.start_overheat(),
            Venting => self.vent_now(),
            OverheatingFinished => self.finish_overheat(),
            CyclotronNormalSpeed => {
                self.lights(Lights::CyclotronSpeedRevert);
                self.to_serial1(SerialCommand::CyclotronNormalSpeed);
            }
            CyclotronIncreaseSpeed => {
                self.lights(Lights::CyclotronSpeedIncrease);
                self.to_serial1(SerialCommand::CyclotronIncreaseSpeed);
            }
            BeepStart => {
                let sound = if self.state.era.is_modern() {
                    Sound::PackBeepsOverheat
                } else {
                    Sound::Beep8
                };
                self.play_cue(Cue::new(sound).looped());
            }

            OverheatIncreaseLevel1 => self.adjust_overheat_delay(0, true),
            OverheatIncreaseLevel2 => self.adjust_overheat_delay(1, true),
            OverheatIncreaseLevel3 => self.adjust_overheat_delay(2, true),
            OverheatIncreaseLevel4 => self.adjust_overheat_delay(3, true),
            OverheatIncreaseLevel5 => self.adjust_overheat_delay(4, true),
            OverheatDecreaseLevel1 => self.adjust_overheat_delay(0, false),
            OverheatDecreaseLevel2 => self.adjust_overheat_delay(1, false),
            OverheatDecreaseLevel3 => self.adjust_overheat_delay(2, false),
            OverheatDecreaseLevel4 => self.adjust_overheat_delay(3, false),
            OverheatDecreaseLevel5 => self.adjust_overheat_delay(4, false),

            FiringIntensify => self.intensify(false),
            FiringIntensifyMix => self.intensify(true),
            FiringIntensifyStopped => self.intensify_stopped(false),
            FiringIntensifyStoppedMix => self.intensify_stopped(true),
            FiringAlt => self.alt(false),
            FiringAltMix => self.alt(true),
            FiringAltStopped => self.state.firing_alt = false,
            FiringAltStoppedMix => self.alt_stopped_mix(),

            FiringCrossingTheStreams1984 => self.cts_start(CtsStatus::Firing1984, false),
            FiringCrossingTheStreamsMix1984 => self.cts_start(CtsStatus::Firing1984, true),
            FiringCrossingTheStreams2021 => self.cts_start(CtsStatus::Firing2021, false),
            FiringCrossingTheStreamsMix2021 => self.cts_start(CtsStatus::Firing2021, true),
            FiringCrossingTheStreamsStopped1984 | FiringCrossingTheStreamsStoppedMix1984 => {
                self.cts_stop(CtsStatus::Firing1984)
            }
            FiringCrossingTheStreamsStopped2021 | FiringCrossingTheStreamsStoppedMix2021 => {
                self.cts_stop(CtsStatus::Firing2021)
            }
            _ => return false,
        }
        true
    }

    fn firing_loop(&self) -> Option<Sound> {
        match self.state.stream_mode {
            StreamMode::Proton => Some(match self.state.era {
                Era::Y1984 => Sound::Gb1FireLoopPack,
                Era::Y1989 => Sound::Gb2FireLoop,
                Era::Afterlife => Sound::AfterlifeFireLoop,
                Era::FrozenEmpire => Sound::FrozenEmpireFireLoop,
            }),
            _ => None,
        }
    }

    fn firing_tail(&self) -> Option<Sound> {
        match self.state.stream_mode {
            StreamMode::Proton => Some(match self.state.era {
                Era::Y1984 if self.state.power_level == PowerLevel::MAX => Sound::Gb1984FireEndHighPower,
                Era::Y1984 => Sound::Gb1984FireEndShort,
                Era::Y1989 => Sound::FiringEndGun,
                Era::Afterlife => Sound::AfterlifeFireEndMid,
                Era::FrozenEmpire => Sound::FrozenEmpireFireEnd,
            }),
            StreamMode::Slime => Some(Sound::SlimeEnd),
            StreamMode::Stasis => Some(Sound::StasisEnd),
            _ => None,
        }
    }

    fn high_power_loop(&self) -> Sound {
        if self.state.era == Era::Y1984 {
            Sound::Gb1984FireHighPowerLoop
        } else {
            Sound::Gb1FireHighPowerLoop
        }
    }

    fn fire_start(&mut self) {
        self.state.wand_firing = true;
        self.lights(Lights::FiringStart);
        match self.firing_loop() {
            Some(sound) => self.play_cue(Cue::new(sound).looped()),
            None => self.play(Sound::FireStartSpark),
        }
        let ms = self.cfg.smoke_timer_ms[self.state.power_level.index()];
        self.smoke_timer.arm(self.now, ms);
        self.to_serial1(SerialCommand::Firing);
    }

    fn fire_stop(&mut self) {
        self.clear_firing();
        self.stop_firing_loops();
        if let Some(tail) = self.firing_tail() {
            self.play(tail);
        }
        self.lights(Lights::FiringStop);
        self.to_serial1(SerialCommand::FiringStopped);
    }

    fn clear_firing(&mut self) {
        let s = &mut self.state;
        s.wand_firing = false;
        s.firing_intensify = false;
        s.firing_alt = false;
        s.intensify_sound = false;
        s.alt_sound = false;
        self.smoke_timer.cancel();
    }

    pub(crate) fn stop_firing_loops(&mut self) {
        for sound in FIRING_LOOPS {
            self.stop(sound);
        }
    }

    /// Cut the end-of-firing tails for the current stream and era.
    pub(crate) fn stop_firing_tails(&mut self) {
        let tails: &[Sound] = match self.state.stream_mode {
            StreamMode::Proton => match self.state.era {
                Era::Y1984 if self.state.power_level != PowerLevel::MAX => {
                    &[Sound::FiringEnd, Sound::FiringEndMid, Sound::Gb1984FireEndShort]
                }
                Era::Y1984 => &[Sound::Gb1984FireEndHighPower],
                Era::Y1989 => &[Sound::FiringEndGun, Sound::FiringEndMid, Sound::FiringEnd],
                Era::Afterlife => &[
                    Sound::AfterlifeFireEndShort,
                    Sound::AfterlifeFireEndMid,
                    Sound::AfterlifeFireEndLong,
                ],
                Era::FrozenEmpire => &[Sound::FrozenEmpireFireEnd],
            },
            StreamMode::Slime => &[Sound::SlimeEnd],
            StreamMode::Stasis => &[Sound::StasisEnd],
            _ => &[],
        };
        for &sound in tails {
            self.stop(sound);
        }
    }

    /// Mash threshold crossed: stop firing and hold the wand off until the cooldown lapses.
    pub(crate) fn trip_lockout(&mut self) {
        tracing::warn!("button mashing detected, firing locked out");
        if self.state.wand_firing {
            self.fire_stop();
        } else {
            self.clear_firing();
        }
        self.play_cue(Cue::new(Sound::SmashErrorLoop).looped().fade_in(SMASH_FADE_MS));
        self.to_wand(PackCommand::FiringLockout);
    }

    fn intensify(&mut self, mix: bool) {
        self.state.firing_intensify = true;
        if !self.state.wand_firing {
            self.fire_start();
        }
        if mix && !self.state.intensify_sound {
            self.state.intensify_sound = true;
            let sound = self.high_power_loop();
            self.play_cue(Cue::new(sound).looped().overlapping());
        }
    }

    fn intensify_stopped(&mut self, mix: bool) {
        self.state.firing_intensify = false;
        if mix && self.state.intensify_sound {
            self.state.intensify_sound = false;
            let sound = self.high_power_loop();
            self.stop(sound);
        }
    }

    fn alt(&mut self, mix: bool) {
        self.state.firing_alt = true;
        if !self.state.wand_firing {
            self.fire_start();
        }
        if mix && !self.state.alt_sound {
            self.state.alt_sound = true;
            if self.state.era == Era::Y1989 {
                self.stop(Sound::Gb2FireLoop);
            } else {
                self.stop(Sound::Gb1FireLoopGun);
            }
            if self.state.power_level != PowerLevel::MAX {
                let sound = self.high_power_loop();
                self.play_cue(Cue::new(sound).looped().overlapping());
            }
            self.play_cue(Cue::new(Sound::FiringLoopGb1).looped());
        }
    }

    fn alt_stopped_mix(&mut self) {
        self.state.firing_alt = false;
        if !self.state.alt_sound {
            return;
        }
        self.state.alt_sound = false;
        self.stop(Sound::FiringLoopGb1);
        if self.state.power_level < PowerLevel::MAX {
            let high = self.high_power_loop();
            self.stop(high);
            let base = if self.state.era == Era::Y1989 {
                Sound::Gb2FireLoop
            } else {
                Sound::Gb1FireLoopPack
            };
            self.play_cue(Cue::new(base).looped());
        }
    }

    fn cts_sounds(status: CtsStatus) -> (Sound, Sound) {
        match status {
            CtsStatus::Firing1984 => (Sound::CrossStreamsStart, Sound::CrossStreamsEnd),
            _ => (
                Sound::AfterlifeCrossTheStreamsStart,
                Sound::AfterlifeCrossTheStreamsEnd,
            ),
        }
    }

    fn cts_start(&mut self, status: CtsStatus, mix: bool) {
        self.state.cts = status;
        let (start, end) = Self::cts_sounds(status);
        if mix {
            self.stop(end);
        }
        self.play(start);
    }

    fn cts_stop(&mut self, status: CtsStatus) {
        self.state.cts = CtsStatus::NotFiring;
        let (start, end) = Self::cts_sounds(status);
        self.stop(start);
        self.stop(end);
        self.play(end);
    }

    fn start_overheat(&mut self) {
        let slime = self.state.stream_mode == StreamMode::Slime;
        if slime {
            self.play(Sound::SlimeEmpty);
        } else {
            self.play(Sound::PackPreVent);
            if self.state.era.is_modern() {
                self.play_cue(Cue::new(Sound::PackOverheatHot).looped());
            }
            self.play(Sound::VentOpen);
        }
        self.state.overheating = true;
        let delay = if slime {
            self.cfg.overheat_delay_ms.saturating_sub(SLIME_OVERHEAT_LEAD_MS)
        } else {
            self.cfg.overheat_delay_ms
        };
        self.overheat.arm(self.now, delay);
        self.lights(Lights::OverheatStart);
        self.to_serial1(SerialCommand::Overheating);
    }

    /// Quick vent: skip the rest of the overheat lead-in.
    fn vent_now(&mut self) {
        self.stop(Sound::SlimeEmpty);
        self.stop(Sound::PackSlimeTankLoop);
        self.stop(Sound::QuickVentClose);
        self.play(Sound::QuickVentOpen);
        if self.state.stream_mode == StreamMode::Slime {
            self.play(Sound::SlimeEmpty);
        }
        self.state.venting = true;
        self.overheat.arm(self.now, 0);
        self.lights(Lights::CyclotronSpeedRevert);
        self.to_serial1(SerialCommand::Venting);
    }

    /// Overheat lead-in elapsed: open the vent.
    pub(crate) fn start_venting(&mut self) {
        self.state.venting = true;
        self.lights(Lights::VentStart);
        if self.state.smoke_enabled {
            self.play(Sound::VentSmoke);
            let ms = self.state.overheat_length_ms[self.state.power_level.index()];
            self.smoke(Smoke::Start { ms });
        } else {
            self.play(Sound::VentDry);
        }
    }

    pub(crate) fn finish_overheat(&mut self) {
        self.state.overheating = false;
        self.state.venting = false;
        self.overheat.cancel();
        self.stop(Sound::PackOverheatHot);
        self.stop(Sound::PackBeepsOverheat);
        self.stop(Sound::Beep8);
        self.lights(Lights::OverheatFinished);
        self.smoke(Smoke::Stop);
        self.to_serial1(SerialCommand::OverheatingFinished);
    }

    /// Smoke timer lapsed while firing: puff if this level runs continuous smoke.
    pub(crate) fn continuous_smoke_due(&mut self) {
        if !self.state.wand_firing {
            return;
        }
        let idx = self.state.power_level.index();
        if self.state.smoke_enabled && self.state.continuous_smoke[idx] {
            let ms = self.state.overheat_length_ms[idx];
            self.smoke(Smoke::Start { ms });
        }
        self.smoke_timer.arm(self.now, self.cfg.smoke_timer_ms[idx]);
    }

    fn adjust_overheat_delay(&mut self, idx: usize, up: bool) {
        let (lo, hi) = OVERHEAT_DELAY_RANGE_S;
        let current = self.state.overheat_delay_s[idx].clamp(lo, hi);
        let next = if up {
            current.saturating_add(1).min(hi)
        } else {
            current.saturating_sub(1).max(lo)
        };
        if next == self.state.overheat_delay_s[idx] {
            self.restart(Sound::BeepsAlt);
        } else {
            self.state.overheat_delay_s[idx] = next;
            self.restart(Sound::Beeps);
        }
    }

}

#[cfg(test)]
mod tests {
    use crate::action::{Action, Audio, Cue, Lights, Smoke, Sound};
    use crate::config::Config;
    use crate::core::PackCore;
    use crate::packet::Packet;
    use crate::protocol::{PackCommand, Peer, WandCommand};

    fn connected() -> PackCore {
        let mut core = PackCore::new(Config {
            mash_max: 2,
            ..Config::default()
        });
        core.on_packet(Peer::Wand, Packet::command(WandCommand::Handshake), 0);
        core
    }

    fn wand(core: &mut PackCore, cmd: WandCommand, now: u64) -> Vec<Action> {
        core.on_packet(Peer::Wand, Packet::command(cmd), now)
    }

    #[test]
    fn firing_starts_and_stops_the_era_loop() {
        let mut core = connected();
        let out = wand(&mut core, WandCommand::Firing, 10);
        assert!(core.state().wand_firing);
        assert!(out.contains(&Action::Audio(Audio::Play(Cue::new(Sound::AfterlifeFireLoop).looped()))));
        let out = wand(&mut core, WandCommand::FiringStopped, 20);
        assert!(!core.state().wand_firing);
        assert!(out.contains(&Action::Audio(Audio::Stop(Sound::AfterlifeFireLoop))));
        assert!(out.contains(&Action::Audio(Audio::Play(Cue::new(Sound::AfterlifeFireEndMid)))));
    }

    #[test]
    fn wand_reported_mashing_leaves_firing_stop_to_the_wand() {
        let mut core = connected();
        wand(&mut core, WandCommand::Firing, 10);
        let out = wand(&mut core, WandCommand::ButtonMashing, 20);
        assert!(core.is_locked_out());
        assert!(core.state().wand_firing);
        assert!(!out.contains(&Action::Audio(Audio::Stop(Sound::AfterlifeFireLoop))));

        let out = wand(&mut core, WandCommand::FiringStopped, 30);
        assert!(!core.state().wand_firing);
        assert!(out.contains(&Action::Audio(Audio::Stop(Sound::AfterlifeFireLoop))));
    }

    #[test]
    fn mash_lockout_rejects_then_releases() {
        let mut core = connected();
        wand(&mut core, WandCommand::Firing, 10);
        wand(&mut core, WandCommand::Firing, 20);
        let out = wand(&mut core, WandCommand::Firing, 30);
        assert!(core.is_locked_out());
        assert!(!core.state().wand_firing);
        assert!(out.contains(&Action::Send(Peer::Wand, Packet::command(PackCommand::FiringLockout))));

        let out = wand(&mut core, WandCommand::Firing, 40);
        assert!(out.is_empty());
        assert!(!core.state().wand_firing);

        let out = core.tick(3_030);
        assert!(!core.is_locked_out());
        assert!(out.contains(&Action::Audio(Audio::Play(Cue::new(Sound::SmashErrorRestart)))));
        wand(&mut core, WandCommand::Firing, 3_040);
        assert!(core.state().wand_firing);
    }

    #[test]
    fn non_firing_commands_pass_during_lockout() {
        let mut core = connected();
        wand(&mut core, WandCommand::ButtonMashing, 10);
        assert!(core.is_locked_out());
        wand(&mut core, WandCommand::PowerLevel3, 20);
        assert_eq!(core.state().power_level.get(), 3);
    }

    #[test]
    fn overheat_opens_the_vent_after_the_delay() {
        let mut core = connected();
        let out = wand(&mut core, WandCommand::Overheating, 100);
        assert!(core.state().overheating);
        assert!(out.contains(&Action::Lights(Lights::OverheatStart)));
        assert!(core.tick(4_099).is_empty());
        let out = core.tick(4_100);
        assert!(core.state().venting);
        assert!(out.contains(&Action::Lights(Lights::VentStart)));
        assert!(out.contains(&Action::Smoke(Smoke::Start { ms: 6_000 })));

        let out = wand(&mut core, WandCommand::OverheatingFinished, 5_000);
        assert!(!core.state().overheating);
        assert!(out.contains(&Action::Lights(Lights::OverheatFinished)));
    }

    #[test]
    fn power_level_change_rearms_smoke_timer_while_firing() {
        let mut core = connected();
        wand(&mut core, WandCommand::Firing, 0);
        wand(&mut core, WandCommand::PowerLevel5, 1_000);
        assert!(core.state().wand_firing);
        // Level 5 runs 5000 ms from the change, not 30000 from the start.
        core.tick(5_999);
        assert!(core.smoke_timer.is_armed());
        core.tick(6_000);
        assert_eq!(core.smoke_timer.remaining(6_000), Some(5_000));
    }

    #[test]
    fn overheat_delay_is_bounded() {
        let mut core = connected();
        core.state.overheat_delay_s[0] = 60;
        let out = wand(&mut core, WandCommand::OverheatIncreaseLevel1, 5);
        assert_eq!(core.state().overheat_delay_s[0], 60);
        assert!(out.contains(&Action::Audio(Audio::Play(Cue::new(Sound::BeepsAlt)))));
        wand(&mut core, WandCommand::OverheatDecreaseLevel1, 6);
        assert_eq!(core.state().overheat_delay_s[0], 59);
    }

    #[test]
    fn crossing_the_streams_plays_start_then_end() {
        let mut core = connected();
        let out = wand(&mut core, WandCommand::FiringCrossingTheStreams1984, 5);
        assert!(out.contains(&Action::Audio(Audio::Play(Cue::new(Sound::CrossStreamsStart)))));
        let out = wand(&mut core, WandCommand::FiringCrossingTheStreamsStopped1984, 6);
        assert!(out.contains(&Action::Audio(Audio::Play(Cue::new(Sound::CrossStreamsEnd)))));
        assert!(!core.state().any_firing());
    }
}
