//! Command dispatch. Each cluster lives in its own file as an `impl PackCore` block
//! whose handler returns `false` for commands it does not own.

mod firing;
mod leds;
mod link;
mod mirror;
mod music;
mod power;
mod prefs;
mod prompts;
mod settings;
mod spectral;
mod stream;
mod volume;

use crate::core::PackCore;
use crate::mash::MashVerdict;
use crate::packet::Packet;
use crate::protocol::{SerialCommand, WandCommand};

impl PackCore {
    pub(crate) fn on_wand_packet(&mut self, packet: Packet) {
        let connected = self.wand.is_connected();
        if connected {
            self.wand.touch(self.now);
        }
        match packet {
            Packet::Command { opcode, value } => self.on_wand_command(opcode, value),
            Packet::WandPrefs(prefs) if connected => self.relay_wand_prefs(prefs),
            Packet::SmokePrefs(prefs) if connected => self.relay_wand_smoke_prefs(prefs),
            other => tracing::trace!(kind = ?other.kind(), connected, "ignoring wand packet"),
        }
    }

    fn on_wand_command(&mut self, opcode: u8, value: u16) {
        let cmd = match WandCommand::try_from(opcode) {
            Ok(cmd) => cmd,
            Err(e) => {
                tracing::debug!(error = %e, value, "wand command ignored");
                return;
            }
        };
        if !cmd.is_link_control() && !self.wand.is_connected() {
            tracing::trace!(?cmd, "wand not connected, command ignored");
            return;
        }
        tracing::debug!(?cmd, value, "wand command");

        if cmd.is_firing() {
            match self.mash.register(self.now) {
                MashVerdict::Allowed => {}
                MashVerdict::Tripped => {
                    self.trip_lockout();
                    return;
                }
                MashVerdict::Locked => {
                    tracing::warn!(?cmd, "firing rejected during lockout");
                    return;
                }
            }
        }

        let handled = self.wand_link_command(cmd)
            || self.wand_power_command(cmd)
            || self.wand_stream_command(cmd)
            || self.wand_firing_command(cmd)
            || self.wand_volume_command(cmd)
            || self.wand_music_command(cmd, value)
            || self.wand_spectral_command(cmd)
            || self.wand_led_command(cmd)
            || self.wand_settings_command(cmd)
            || self.wand_mirror_command(cmd, value)
            || self.wand_prompt_command(cmd);
        if !handled {
            tracing::debug!(?cmd, "no pack action for wand command");
        }
    }

    pub(crate) fn on_serial1_packet(&mut self, packet: Packet) {
        let connected = self.serial1.is_connected();
        if connected {
            self.serial1.touch(self.now);
        }
        match packet {
            Packet::Command { opcode, value } => self.on_serial1_command(opcode, value),
            Packet::PackPrefs(prefs) if connected => self.apply_pack_prefs(&prefs),
            Packet::WandPrefs(prefs) if connected => self.forward_wand_prefs(prefs),
            Packet::SmokePrefs(prefs) if connected => self.apply_serial1_smoke_prefs(prefs),
            other => tracing::trace!(kind = ?other.kind(), connected, "ignoring serial1 packet"),
        }
    }

    fn on_serial1_command(&mut self, opcode: u8, value: u16) {
        let cmd = match SerialCommand::try_from(opcode) {
            Ok(cmd) => cmd,
            Err(e) => {
                tracing::debug!(error = %e, value, "serial1 command ignored");
                return;
            }
        };
        if self.serial1_link_command(cmd) {
            return;
        }
        if !self.serial1.is_connected() {
            tracing::trace!(?cmd, "serial1 not connected, command ignored");
            return;
        }
        tracing::debug!(?cmd, value, "serial1 command");

        let handled = self.serial1_power_command(cmd)
            || self.serial1_volume_command(cmd)
            || self.serial1_music_command(cmd, value)
            || self.serial1_prefs_command(cmd);
        if !handled {
            tracing::debug!(?cmd, "no pack action for serial1 command");
        }
    }
}
