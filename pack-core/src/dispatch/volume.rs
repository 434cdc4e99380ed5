//! Master, effects and music volume.

use crate::action::{Audio, Channel, Sound};
use crate::core::PackCore;
use crate::protocol::{PackCommand, SerialCommand, WandCommand};
use crate::volume::Step;

impl PackCore {
    pub(super) fn wand_volume_command(&mut self, cmd: WandCommand) -> bool {
        let v = &mut self.state.volume;
        match cmd {
            WandCommand::VolumeIncrease => {
                let step = v.increase_master();
                self.volume_changed(Channel::Master, step);
            }
            WandCommand::VolumeDecrease => {
                let step = v.decrease_master();
                self.volume_changed(Channel::Master, step);
            }
            WandCommand::VolumeSoundEffectsIncrease => {
                let step = v.increase_effects();
                self.volume_changed(Channel::Effects, step);
            }
            WandCommand::VolumeSoundEffectsDecrease => {
                let step = v.decrease_effects();
                self.volume_changed(Channel::Effects, step);
            }
            WandCommand::VolumeMusicIncrease => {
                if self.state.music.is_playing() {
                    let step = self.state.volume.increase_music();
                    self.volume_changed(Channel::Music, step);
                }
            }
            WandCommand::VolumeMusicDecrease => {
                if self.state.music.is_playing() {
                    let step = self.state.volume.decrease_music();
                    self.volume_changed(Channel::Music, step);
                }
            }
            WandCommand::SilentMode => {
                v.mute();
                self.channel_gain(Channel::Master);
                self.volume_sync();
            }
            WandCommand::VolumeRevert => {
                v.unmute();
                self.channel_gain(Channel::Master);
                self.volume_sync();
            }
            WandCommand::VolumeIncreaseEeprom => {
                let step = v.increase_default();
                self.step_cue(step);
                self.to_wand(PackCommand::VolumeIncrease);
            }
            WandCommand::VolumeDecreaseEeprom => {
                let step = v.decrease_default();
                self.step_cue(step);
                self.to_wand(PackCommand::VolumeDecrease);
            }
            _ => return false,
        }
        true
    }

    /// Volume requests from the serial1 device; mirrored to the wand so its display follows.
    pub(super) fn serial1_volume_command(&mut self, cmd: SerialCommand) -> bool {
        let v = &mut self.state.volume;
        match cmd {
            SerialCommand::ToggleMute => {
                if v.toggle_mute() {
                    self.to_wand(PackCommand::MasterAudioSilentMode);
                } else {
                    self.to_wand(PackCommand::MasterAudioNormal);
                }
                self.channel_gain(Channel::Master);
                self.volume_sync();
            }
            SerialCommand::VolumeIncrease => {
                let step = v.increase_master();
                self.volume_changed(Channel::Master, step);
                self.to_wand(PackCommand::VolumeIncrease);
            }
            SerialCommand::VolumeDecrease => {
                let step = v.decrease_master();
                self.volume_changed(Channel::Master, step);
                self.to_wand(PackCommand::VolumeDecrease);
            }
            SerialCommand::VolumeSoundEffectsIncrease => {
                let step = v.increase_effects();
                self.volume_changed(Channel::Effects, step);
                self.to_wand(PackCommand::VolumeSoundEffectsIncrease);
            }
            SerialCommand::VolumeSoundEffectsDecrease => {
                let step = v.decrease_effects();
                self.volume_changed(Channel::Effects, step);
                self.to_wand(PackCommand::VolumeSoundEffectsDecrease);
            }
            SerialCommand::VolumeMusicIncrease => {
                let step = v.increase_music();
                self.volume_changed(Channel::Music, step);
                self.to_wand(PackCommand::VolumeMusicIncrease);
            }
            SerialCommand::VolumeMusicDecrease => {
                let step = v.decrease_music();
                self.volume_changed(Channel::Music, step);
                self.to_wand(PackCommand::VolumeMusicDecrease);
            }
            _ => return false,
        }
        true
    }

    fn step_cue(&mut self, step: Step) {
        match step {
            Step::Adjusted => self.restart(Sound::Beeps),
            Step::AtLimit => self.restart(Sound::BeepsAlt),
        }
    }

    fn channel_gain(&mut self, channel: Channel) {
        let v = &self.state.volume;
        let gain = match channel {
            Channel::Master => v.master_gain(),
            Channel::Effects => v.effects_gain(),
            Channel::Music => v.music_gain(),
        };
        self.audio(Audio::ChannelGain { channel, gain });
    }

    fn volume_changed(&mut self, channel: Channel, step: Step) {
        self.step_cue(step);
        self.channel_gain(channel);
        self.volume_sync();
    }
}

#[cfg(test)]
mod tests {
    use crate::action::{Action, Audio, Channel, Cue, Sound};
    use crate::core::PackCore;
    use crate::packet::Packet;
    use crate::protocol::{PackCommand, Peer, SerialCommand, WandCommand};

    fn connected() -> PackCore {
        let mut core = PackCore::default();
        core.on_packet(Peer::Wand, Packet::command(WandCommand::Handshake), 0);
        core.on_packet(Peer::Serial1, Packet::command(SerialCommand::Handshake), 0);
        core
    }

    fn limit_cue() -> Action {
        Action::Audio(Audio::Play(Cue::new(Sound::BeepsAlt)))
    }

    #[test]
    fn increase_at_full_volume_plays_limit_cue() {
        let mut core = connected();
        assert_eq!(core.state().volume.master(), 100);
        let out = core.on_packet(Peer::Wand, Packet::command(WandCommand::VolumeIncrease), 5);
        assert!(out.contains(&limit_cue()));
        assert!(!out.contains(&Action::Audio(Audio::Play(Cue::new(Sound::Beeps)))));
        assert!(out.contains(&Action::Send(
            Peer::Serial1,
            Packet::message(SerialCommand::VolumeSync, [100, 100, 100])
        )));
    }

    #[test]
    fn decrease_steps_and_reports_gain() {
        let mut core = connected();
        let out = core.on_packet(Peer::Wand, Packet::command(WandCommand::VolumeDecrease), 5);
        assert_eq!(core.state().volume.master(), 95);
        assert!(out.contains(&Action::Audio(Audio::ChannelGain {
            channel: Channel::Master,
            gain: -3
        })));
    }

    #[test]
    fn wand_music_volume_needs_playback() {
        let mut core = connected();
        let out = core.on_packet(Peer::Wand, Packet::command(WandCommand::VolumeMusicDecrease), 5);
        assert!(out.is_empty());
        assert_eq!(core.state().volume.music(), 100);
    }

    #[test]
    fn serial1_mute_toggle_tells_the_wand() {
        let mut core = connected();
        let out = core.on_packet(Peer::Serial1, Packet::command(SerialCommand::ToggleMute), 5);
        assert!(core.state().volume.is_muted());
        assert!(out.contains(&Action::Send(Peer::Wand, Packet::command(PackCommand::MasterAudioSilentMode))));
        core.on_packet(Peer::Serial1, Packet::command(SerialCommand::ToggleMute), 6);
        assert!(!core.state().volume.is_muted());
    }
}
