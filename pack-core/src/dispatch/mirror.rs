//! Wand sounds played through the pack's speaker.

use crate::action::{Cue, Sound};
use crate::core::PackCore;
use crate::music::FIRST_TRACK;
use crate::protocol::WandCommand;

const RAMP_FADE_MS: u16 = 1000;

const EXTRA_WAND_SOUNDS: [Sound; 15] = [
    Sound::WandHeatdown,
    Sound::WandHeatupAlt,
    Sound::WandBootup,
    Sound::WandBootupShort,
    Sound::Gb2WandStart,
    Sound::WandShutdown,
    Sound::AfterlifeWandIdle1,
    Sound::AfterlifeWandIdle2,
    Sound::AfterlifeWandRamp1,
    Sound::AfterlifeWandRamp2,
    Sound::AfterlifeWandRamp2FadeIn,
    Sound::AfterlifeWandRampDown1,
    Sound::AfterlifeWandRampDown2,
    Sound::AfterlifeWandRampDown2FadeOut,
    Sound::AfterlifeWandBarrelExtend,
];

impl PackCore {
    pub(super) fn wand_mirror_command(&mut self, cmd: WandCommand, value: u16) -> bool {
        use WandCommand::*;
        let beep = self.effects_gain_minus(self.cfg.wand_beep_level);
        let idle = self.effects_gain_minus(self.cfg.wand_idle_level);
        match cmd {
            WandBeep => self.play_cue(Cue::new(Sound::AfterlifeBeepWand).gain(beep)),
            WandBeepStart => self.play_cue(Cue::new(Sound::AfterlifeBeepWand).looped().gain(beep)),
            WandBeepStop | WandBeepStopLoop => self.stop(Sound::AfterlifeBeepWand),
            BeepsAlt => self.restart(Sound::BeepsAlt),
            WandBeepBargraph => self.restart(Sound::BeepsBargraph),
            WandBeepSounds => self.restart(Sound::Beeps),

            ModeOriginalHeatup => {
                self.stop(Sound::WandHeatdown);
                self.play(Sound::WandHeatupAlt);
            }
            ModeOriginalHeatupStop => self.stop(Sound::WandHeatupAlt),
            ModeOriginalHeatdown => {
                self.stop(Sound::WandHeatupAlt);
                self.play(Sound::WandHeatdown);
            }
            ModeOriginalHeatdownStop => self.stop(Sound::WandHeatdown),

            WandShutdownSound => {
                self.stop_extra_wand_sounds();
                self.play(Sound::WandShutdown);
            }
            WandMashErrorSound => self.play(Sound::WandMashError),
            WandBootupSound => self.play(Sound::WandBootup),
            WandBootupShortSound => self.play(Sound::WandBootupShort),
            WandBootup1989 => self.play(Sound::Gb2WandStart),
            AfterlifeWandBarrelExtend => self.play(Sound::AfterlifeWandBarrelExtend),

            AfterlifeGunRamp1 => {
                self.stop_wand_idle();
                self.play_cue(Cue::new(Sound::AfterlifeWandRamp1).gain(idle));
            }
            AfterlifeGunRamp2 => {
                self.stop_wand_idle();
                self.play_cue(Cue::new(Sound::AfterlifeWandRamp2).gain(idle));
            }
            AfterlifeGunRamp2FadeIn => {
                self.stop_wand_idle();
                self.play_cue(
                    Cue::new(Sound::AfterlifeWandRamp2FadeIn)
                        .gain(idle)
                        .fade_in(RAMP_FADE_MS),
                );
            }
            AfterlifeGunLoop1 => self.play_cue(Cue::new(Sound::AfterlifeWandIdle1).looped().gain(idle)),
            AfterlifeGunLoop2 => self.play_cue(Cue::new(Sound::AfterlifeWandIdle2).looped().gain(idle)),
            AfterlifeRampLoopStop => self.stop(Sound::AfterlifeWandIdle1),
            AfterlifeRampLoop2Stop => self.stop(Sound::AfterlifeWandIdle2),
            AfterlifeGunRampDown1 => {
                self.stop_wand_idle();
                self.play_cue(Cue::new(Sound::AfterlifeWandRampDown1).gain(idle));
            }
            AfterlifeGunRampDown2 => {
                self.stop_wand_idle();
                self.play_cue(Cue::new(Sound::AfterlifeWandRampDown2).gain(idle));
            }
            AfterlifeGunRampDown2FadeOut => {
                self.stop_wand_idle();
                self.play_cue(Cue::new(Sound::AfterlifeWandRampDown2FadeOut).gain(idle));
            }
            ExtraWandSoundsStop => self.stop_extra_wand_sounds(),

            BosonDartSound => self.play_cue(Cue::new(Sound::BosonDartFire).overlapping()),
            ShockBlastSound => self.play_cue(Cue::new(Sound::ShockBlastFire).overlapping()),
            SlimeTetherSound => self.play_cue(Cue::new(Sound::SlimeTetherFire).overlapping()),
            MesonColliderSound => self.play_cue(Cue::new(Sound::MesonColliderFire).overlapping()),
            MesonFirePulse => self.play_cue(Cue::new(Sound::MesonFirePulse).overlapping()),

            ComSoundNumber => self.play_effect_number(value),
            _ => return false,
        }
        true
    }

    fn stop_wand_idle(&mut self) {
        self.stop(Sound::AfterlifeWandIdle1);
        self.stop(Sound::AfterlifeWandIdle2);
    }

    pub(crate) fn stop_extra_wand_sounds(&mut self) {
        for sound in EXTRA_WAND_SOUNDS {
            self.stop(sound);
        }
    }

    /// Raw effect number from the wand. Music tracks are out of reach.
    fn play_effect_number(&mut self, id: u16) {
        if id == 0 || id >= FIRST_TRACK {
            tracing::debug!(id, "sound number out of range");
            return;
        }
        self.stop(Sound::Effect(id + 1));
        if id > 1 {
            self.stop(Sound::Effect(id - 1));
        }
        self.stop(Sound::Effect(id));
        self.play(Sound::Effect(id));
    }
}

#[cfg(test)]
mod tests {
    use crate::action::{Action, Audio, Cue, Sound};
    use crate::core::PackCore;
    use crate::packet::Packet;
    use crate::protocol::{Peer, WandCommand};

    fn connected() -> PackCore {
        let mut core = PackCore::default();
        core.on_packet(Peer::Wand, Packet::command(WandCommand::Handshake), 0);
        core
    }

    #[test]
    fn sound_number_plays_effect() {
        let mut core = connected();
        let out = core.on_packet(Peer::Wand, Packet::command_with(WandCommand::ComSoundNumber, 42), 5);
        assert_eq!(
            out,
            vec![
                Action::Audio(Audio::Stop(Sound::Effect(43))),
                Action::Audio(Audio::Stop(Sound::Effect(41))),
                Action::Audio(Audio::Stop(Sound::Effect(42))),
                Action::Audio(Audio::Play(Cue::new(Sound::Effect(42)))),
            ]
        );
    }

    #[test]
    fn sound_numbers_outside_effect_range_are_ignored() {
        let mut core = connected();
        for id in [0, 500, 9_999] {
            let out = core.on_packet(Peer::Wand, Packet::command_with(WandCommand::ComSoundNumber, id), 5);
            assert!(out.is_empty());
        }
    }

    #[test]
    fn wand_beep_plays_under_effects_gain() {
        let mut core = connected();
        let out = core.on_packet(Peer::Wand, Packet::command(WandCommand::WandBeepStart), 5);
        assert_eq!(
            out,
            vec![Action::Audio(Audio::Play(
                Cue::new(Sound::AfterlifeBeepWand).looped().gain(-10)
            ))]
        );
    }
}
