//! Fixed-layout records carried in frame bodies.
//!
//! Every record is a flat run of `u8`/`u16` fields. bincode's default options
//! (fixed-width integers, little-endian) lay them out with no padding, so the
//! encoded size equals the sum of the field widths.

use serde::{Deserialize, Serialize};

use crate::protocol::PacketKind;

/// Opcode plus an optional 16-bit value (music track numbers need more than a byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub start: u8,
    pub opcode: u8,
    pub value: u16,
    pub end: u8,
}

/// Opcode plus three small data bytes (colour/saturation pairs, volume triples).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub start: u8,
    pub opcode: u8,
    pub data: [u8; 3],
    pub end: u8,
}

/// Pack configuration exchanged with the serial1 device. Booleans travel as 0/1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackPrefs {
    pub default_system_mode: u8,
    pub default_year_theme: u8,
    pub current_year_theme: u8,
    pub default_system_volume: u8,
    pub pack_vibration: u8,
    pub ribbon_cable_alarm: u8,
    pub cyclotron_direction: u8,
    pub demo_light_mode: u8,
    pub proton_stream_effects: u8,
    pub overheat_strobe: u8,
    pub overheat_sync_to_fan: u8,
    pub overheat_lights_off: u8,
    // Cyclotron lid.
    pub cyclotron_count: u8,
    pub cyclotron_hue: u8,
    pub cyclotron_sat: u8,
    pub cyclotron_center_led: u8,
    pub cyclotron_sim_ring: u8,
    // Inner cyclotron.
    pub inner_panel: u8,
    pub cake_count: u8,
    pub cake_hue: u8,
    pub cake_sat: u8,
    pub cake_grb: u8,
    pub cavity_count: u8,
    pub vg_cyclotron: u8,
    // Power cell.
    pub powercell_count: u8,
    pub powercell_hue: u8,
    pub powercell_sat: u8,
    pub vg_powercell: u8,
}

/// Wand configuration. The pack never interprets it; it only relays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WandPrefs {
    pub led_count: u8,
    pub led_hue: u8,
    pub led_sat: u8,
    pub spectral_modes: u8,
    pub spectral_holiday: u8,
    pub overheat_enabled: u8,
    pub default_firing_mode: u8,
    pub vibration: u8,
    pub sounds_to_pack: u8,
    pub quick_venting: u8,
    pub auto_vent_light: u8,
    pub beep_loop: u8,
    pub boot_error: u8,
    pub default_year_wand: u8,
    pub default_year_cts: u8,
    pub invert_bargraph: u8,
    pub bargraph_overheat_blink: u8,
    pub bargraph_idle_animation: u8,
    pub bargraph_fire_animation: u8,
}

/// Smoke settings; the first half belongs to the pack, the second half to the wand.
/// Arrays are indexed by power level minus one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmokePrefs {
    pub smoke_enabled: u8,
    pub continuous: [u8; 5],
    /// Seconds.
    pub duration: [u8; 5],
    pub overheat_level: [u8; 5],
    pub overheat_delay: [u8; 5],
}

/// Full runtime state sent to a wand during synchronization.
/// Flags use 1 = off/no and 2 = on/yes; 0 never appears on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSnapshot {
    pub system_mode: u8,
    pub ion_arm_switch: u8,
    pub cyclotron_lid: u8,
    pub system_year: u8,
    pub pack_on: u8,
    pub power_level: u8,
    pub stream_mode: u8,
    pub vibration_enabled: u8,
    pub master_volume: u8,
    pub effects_volume: u8,
    pub music_volume: u8,
    pub master_muted: u8,
    pub current_music_track: u16,
    pub repeat_music_track: u8,
}

/// A decoded frame with its sentinels already validated and stripped.
/// Opcodes stay raw so that commands from newer peers still reach dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    Command { opcode: u8, value: u16 },
    Message { opcode: u8, data: [u8; 3] },
    PackPrefs(PackPrefs),
    WandPrefs(WandPrefs),
    SmokePrefs(SmokePrefs),
    Sync(SyncSnapshot),
}

impl Packet {
    pub fn command(opcode: impl Into<u8>) -> Self {
        Packet::Command {
            opcode: opcode.into(),
            value: 0,
        }
    }

    pub fn command_with(opcode: impl Into<u8>, value: u16) -> Self {
        Packet::Command {
            opcode: opcode.into(),
            value,
        }
    }

    pub fn message(opcode: impl Into<u8>, data: [u8; 3]) -> Self {
        Packet::Message {
            opcode: opcode.into(),
            data,
        }
    }

    pub fn kind(&self) -> PacketKind {
        match self {
            Packet::Command { .. } => PacketKind::Command,
            Packet::Message { .. } => PacketKind::Message,
            Packet::PackPrefs(_) => PacketKind::PackPrefs,
            Packet::WandPrefs(_) => PacketKind::WandPrefs,
            Packet::SmokePrefs(_) => PacketKind::SmokePrefs,
            Packet::Sync(_) => PacketKind::Sync,
        }
    }

    /// Opcode byte for command and message packets.
    pub fn opcode(&self) -> Option<u8> {
        match self {
            Packet::Command { opcode, .. } | Packet::Message { opcode, .. } => Some(*opcode),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded_len<T: Serialize>(value: &T) -> usize {
        bincode::serialize(value).unwrap().len()
    }

    #[test]
    fn records_encode_without_padding() {
        let cmd = CommandRecord {
            start: 1,
            opcode: 2,
            value: 0x0304,
            end: 5,
        };
        assert_eq!(bincode::serialize(&cmd).unwrap(), vec![1, 2, 0x04, 0x03, 5]);
        let msg = MessageRecord {
            start: 1,
            opcode: 2,
            data: [7, 8, 9],
            end: 3,
        };
        assert_eq!(encoded_len(&msg), 6);
        assert_eq!(encoded_len(&PackPrefs::default()), 28);
        assert_eq!(encoded_len(&WandPrefs::default()), 19);
        assert_eq!(encoded_len(&SmokePrefs::default()), 21);
        assert_eq!(encoded_len(&SyncSnapshot::default()), 15);
    }

    #[test]
    fn constructors_tag_the_kind() {
        assert_eq!(Packet::command(3u8).kind(), PacketKind::Command);
        assert_eq!(Packet::message(3u8, [0; 3]).kind(), PacketKind::Message);
        assert_eq!(Packet::Sync(SyncSnapshot::default()).kind(), PacketKind::Sync);
        assert_eq!(Packet::command_with(9u8, 501).opcode(), Some(9));
        assert_eq!(Packet::WandPrefs(WandPrefs::default()).opcode(), None);
    }
}
