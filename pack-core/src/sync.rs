//! Synchronization: full state transfer to a newly attached peer.
//!
//! Both sequences are emitted in one call, so a peer sees them back to back and
//! in a fixed order. The link stays Syncing until the sequence (serial1) or the
//! wand's confirmation (wand) completes it.

use crate::action::{Lights, Sound};
use crate::core::PackCore;
use crate::packet::{Packet, SyncSnapshot};
use crate::protocol::{PackCommand, Peer, SerialCommand};
use crate::state::{DeviceState, StreamMode, SystemMode};

/// 1 = no, 2 = yes, as carried in the snapshot.
fn yes_no(b: bool) -> u8 {
    if b {
        2
    } else {
        1
    }
}

/// Runtime state as seen by a freshly attached wand.
pub fn snapshot(s: &DeviceState) -> SyncSnapshot {
    SyncSnapshot {
        system_mode: match s.system_mode {
            SystemMode::SuperHero => 1,
            SystemMode::Original => 2,
        },
        ion_arm_switch: yes_no(s.red_switch_on()),
        cyclotron_lid: yes_no(s.inputs.cyclotron_lid_on),
        system_year: s.era.code(),
        pack_on: yes_no(s.pack_on),
        power_level: s.power_level.get(),
        stream_mode: s.stream_mode.code(),
        vibration_enabled: yes_no(s.vibration_switch_on),
        master_volume: s.volume.master(),
        effects_volume: s.volume.effects(),
        music_volume: s.volume.music(),
        master_muted: yes_no(s.volume.is_muted()),
        current_music_track: s.music.current(),
        repeat_music_track: yes_no(s.music.is_looping()),
    }
}

impl PackCore {
    fn serial1_sync(&mut self, op: SerialCommand) {
        self.sync_send(Peer::Serial1, Packet::command(op));
    }

    fn serial1_sync_value(&mut self, op: SerialCommand, value: u16) {
        self.sync_send(Peer::Serial1, Packet::command_with(op, value));
    }

    /// Serial1 device asked to sync. Ignored while one is already outstanding.
    pub(crate) fn start_serial1_sync(&mut self) {
        if !self.serial1.begin_sync(self.now) {
            tracing::debug!("serial1 sync already in progress");
            return;
        }
        tracing::info!("serial1 syncing");

        self.serial1_sync(SerialCommand::SyncStart);
        self.serial1_sync(SerialCommand::PackConnected);
        self.serial1_sync(if self.wand.is_connected() {
            SerialCommand::WandConnected
        } else {
            SerialCommand::WandDisconnected
        });

        // Mode before era: era handling differs in Original mode.
        self.serial1_sync(match self.state.system_mode {
            SystemMode::SuperHero => SerialCommand::ModeSuperHero,
            SystemMode::Original => SerialCommand::ModeOriginal,
        });
        self.serial1_sync(self.state.era.serial_year());
        self.serial1_sync(if self.state.inputs.ion_arm_switch {
            SerialCommand::ModeOriginalRedSwitchOn
        } else {
            SerialCommand::ModeOriginalRedSwitchOff
        });

        if self.state.alarm_active() {
            self.serial1_sync(SerialCommand::AlarmOn);
        }
        self.serial1_sync(if self.state.pack_on {
            SerialCommand::PackOn
        } else {
            SerialCommand::PackOff
        });
        self.serial1_sync(self.state.power_level.serial_command());

        let cyclotron = self.state.spectral_cyclotron;
        let colour = [cyclotron.hue, cyclotron.sat, 0];
        if self.state.stream_mode == StreamMode::SpectralCustom {
            self.sync_send(
                Peer::Serial1,
                Packet::message(SerialCommand::SpectralCustomMode, colour),
            );
        } else {
            self.serial1_sync(self.state.stream_mode.serial_command());
        }
        self.sync_send(
            Peer::Serial1,
            Packet::message(SerialCommand::SpectralColourData, colour),
        );

        self.serial1_sync(if self.state.barrel_extended {
            SerialCommand::BarrelExtended
        } else {
            SerialCommand::BarrelRetracted
        });
        self.serial1_sync(if self.state.inputs.cyclotron_lid_on {
            SerialCommand::CyclotronLidOn
        } else {
            SerialCommand::CyclotronLidOff
        });

        let track = self.state.music.current();
        self.serial1_sync_value(
            if self.state.music.is_playing() {
                SerialCommand::MusicIsPlaying
            } else {
                SerialCommand::MusicIsNotPlaying
            },
            track,
        );
        self.serial1_sync(if self.state.music.is_paused() {
            SerialCommand::MusicIsPaused
        } else {
            SerialCommand::MusicIsNotPaused
        });
        self.serial1_sync(if self.state.music.is_looping() {
            SerialCommand::MusicRepeat
        } else {
            SerialCommand::MusicNoRepeat
        });
        self.serial1_sync_value(SerialCommand::MusicTrackCountSync, self.state.music.count());
        self.sync_send(
            Peer::Serial1,
            Packet::message(SerialCommand::VolumeSync, self.state.volume.snapshot()),
        );

        self.serial1.complete_sync(self.now);
        tracing::info!("serial1 connected");
        self.serial1_sync(SerialCommand::SyncEnd);
    }

    /// Wand asked to sync. Ignored while one is already outstanding; the link
    /// stays Syncing until the wand reports Synchronized.
    pub(crate) fn start_wand_sync(&mut self) {
        if !self.wand.begin_sync(self.now) {
            tracing::debug!("wand sync already in progress");
            return;
        }
        tracing::info!("wand syncing");

        self.restart(Sound::WandSync);
        self.sync_send(Peer::Wand, Packet::command(PackCommand::SyncStart));

        // A new wand starts from a clean slate.
        if self.state.overheating {
            self.finish_overheat();
        }
        if self.state.spectral_lights_on && !self.state.pack_on {
            self.spectral_lights_off();
        }

        let snap = snapshot(&self.state);
        if self.state.stream_mode == StreamMode::Proton {
            if self.state.cyclotron_colour_toggle {
                self.lights(Lights::CyclotronColourReset);
            }
            if self.state.pack_on {
                self.lights(Lights::PowercellRedraw);
            }
            self.lights(Lights::SwitchPanelUpdate);
        }
        self.sync_send(Peer::Wand, Packet::Sync(snap));
        if self.state.alarm_active() {
            self.sync_send(Peer::Wand, Packet::command(PackCommand::AlarmOn));
        }
        self.sync_send(Peer::Wand, Packet::command(PackCommand::SyncEnd));
    }
}
