//! Stream (firing) mode selection.

use crate::action::{Audio, Cue, Lights, Sound, Voice};
use crate::core::PackCore;
use crate::packet::Packet;
use crate::protocol::{PackCommand, SerialCommand, WandCommand};
use crate::state::StreamMode;

const AMBIENT_FADE_MS: u16 = 900;
const GAIN_FADE_MS: u16 = 100;

impl PackCore {
    pub(super) fn wand_stream_command(&mut self, cmd: WandCommand) -> bool {
        match cmd {
            WandCommand::ProtonMode => self.set_stream_mode(StreamMode::Proton),
            WandCommand::SlimeMode => self.set_stream_mode(StreamMode::Slime),
            WandCommand::StasisMode => self.set_stream_mode(StreamMode::Stasis),
            WandCommand::MesonMode => self.set_stream_mode(StreamMode::Meson),
            WandCommand::SpectralMode => self.set_stream_mode(StreamMode::Spectral),
            WandCommand::HolidayMode => self.set_stream_mode(StreamMode::Holiday),
            WandCommand::SpectralCustomMode => self.set_stream_mode(StreamMode::SpectralCustom),
            WandCommand::SettingsMode => {
                self.play(Sound::Click);
                self.to_serial1(SerialCommand::SettingsMode);
            }
            WandCommand::ToggleInnerCyclotronPanel => {
                let on = !self.state.inner_panel;
                self.state.inner_panel = on;
                self.announce(
                    on,
                    (Voice::InnerCyclotronPanelEnabled, PackCommand::ToggleInnerCyclotronPanelEnabled),
                    (Voice::InnerCyclotronPanelDisabled, PackCommand::ToggleInnerCyclotronPanelDisabled),
                );
                self.lights(Lights::InnerCyclotronReset);
                self.lights(Lights::LedCountsChanged);
            }
            _ => return false,
        }
        true
    }

    /// Switch stream mode. Ambient loops of the old mode stop before the new one starts.
    pub(crate) fn set_stream_mode(&mut self, mode: StreamMode) {
        let previous = self.state.stream_mode;
        if self.state.pack_on && previous != mode {
            self.stop(Sound::PackSlimeTankLoop);
            self.stop(Sound::StasisIdleLoop);
            self.stop(Sound::MesonIdleLoop);

            let effects = self.state.volume.effects_gain();
            let modern = self.state.era.is_modern();
            match mode {
                StreamMode::Slime => {
                    self.play(Sound::PackSlimeOpen);
                    self.play_cue(
                        Cue::new(Sound::PackSlimeTankLoop)
                            .looped()
                            .gain(effects)
                            .fade_in(AMBIENT_FADE_MS),
                    );
                    if modern {
                        self.adjust_gain(Sound::AfterlifePackStartup, effects - 30);
                        self.adjust_gain(Sound::AfterlifePackIdleLoop, effects - 40);
                    }
                }
                StreamMode::Stasis => {
                    self.play(Sound::StasisOpen);
                    self.play_cue(Cue::new(Sound::StasisIdleLoop).looped().fade_in(AMBIENT_FADE_MS));
                }
                StreamMode::Meson => {
                    self.play(Sound::MesonOpen);
                    self.play_cue(Cue::new(Sound::MesonIdleLoop).looped().fade_in(AMBIENT_FADE_MS));
                }
                _ => self.play(Sound::FireStartSpark),
            }

            if previous == StreamMode::Slime {
                self.lights(Lights::CyclotronReset);
                if modern {
                    self.adjust_gain(Sound::AfterlifePackStartup, effects);
                    self.adjust_gain(Sound::AfterlifePackIdleLoop, effects);
                }
            }
        }

        self.state.stream_mode = mode;
        self.play(Sound::Click);
        if self.state.cyclotron_colour_toggle {
            self.lights(Lights::CyclotronColourReset);
        }
        if self.state.powercell_colour_toggle && self.state.pack_on {
            self.lights(Lights::PowercellRedraw);
        }
        self.lights(Lights::SwitchPanelUpdate);

        if mode == StreamMode::SpectralCustom {
            let c = self.state.spectral_cyclotron;
            self.to_serial1_packet(Packet::message(SerialCommand::SpectralCustomMode, [c.hue, c.sat, 0]));
        } else {
            self.to_serial1(mode.serial_command());
        }
    }

    fn adjust_gain(&mut self, sound: Sound, gain: i16) {
        self.audio(Audio::AdjustGain {
            sound,
            gain,
            fade_ms: GAIN_FADE_MS,
        });
    }

    /// Stop both prompts, play the one for the new state and tell the wand.
    pub(crate) fn announce(&mut self, on: bool, enabled: (Voice, PackCommand), disabled: (Voice, PackCommand)) {
        self.stop(enabled.0);
        self.stop(disabled.0);
        let (voice, cmd) = if on { enabled } else { disabled };
        self.play(voice);
        self.to_wand(cmd);
    }
}
