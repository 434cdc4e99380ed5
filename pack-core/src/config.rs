//! Core tunables. Plain serde data; hosts embed it in their own config file.

use serde::Deserialize;

use crate::timer::Millis;

/// Timing, volume and lockout parameters for [`crate::PackCore`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Silence from a connected wand before it is considered gone (default 8000).
    #[serde(default = "default_wand_disconnect_delay_ms")]
    pub wand_disconnect_delay_ms: Millis,
    /// Silence from the serial1 device before it is considered gone (default 3000).
    /// The pack probes it every half of this.
    #[serde(default = "default_serial1_handshake_delay_ms")]
    pub serial1_handshake_delay_ms: Millis,
    /// Percent per volume step (default 5).
    #[serde(default = "default_volume_step")]
    pub volume_step: u8,
    /// Gain in dB at 0 % (default -60).
    #[serde(default = "default_min_gain")]
    pub min_gain: i16,
    /// Gain in dB used for mute, below the 0 % gain (default -70).
    #[serde(default = "default_abs_min_gain")]
    pub abs_min_gain: i16,
    /// Starting master volume in percent (default 100).
    #[serde(default = "default_master_volume")]
    pub master_volume: u8,
    #[serde(default = "default_effects_volume")]
    pub effects_volume: u8,
    #[serde(default = "default_music_volume")]
    pub music_volume: u8,
    /// dB under the effects gain for mirrored wand beeps.
    #[serde(default = "default_wand_beep_level")]
    pub wand_beep_level: i16,
    /// dB under the effects gain for mirrored wand idle ramps.
    #[serde(default = "default_wand_idle_level")]
    pub wand_idle_level: i16,
    #[serde(default = "default_mash_window_ms")]
    pub mash_window_ms: Millis,
    /// Firing triggers tolerated inside the window; one more trips the lockout.
    #[serde(default = "default_mash_max")]
    pub mash_max: u8,
    #[serde(default = "default_mash_cooldown_ms")]
    pub mash_cooldown_ms: Millis,
    /// Overheat sequence length before venting completes (default 4000).
    #[serde(default = "default_overheat_delay_ms")]
    pub overheat_delay_ms: Millis,
    /// Firing time before smoke at each power level.
    #[serde(default = "default_smoke_timer_ms")]
    pub smoke_timer_ms: [Millis; 5],
    /// Overheat smoke duration at each power level.
    #[serde(default = "default_overheat_length_ms")]
    pub overheat_length_ms: [Millis; 5],
    /// Music tracks on the pack's storage; tracks are numbered from 500.
    #[serde(default)]
    pub music_track_count: u16,
}

fn default_wand_disconnect_delay_ms() -> Millis {
    8_000
}
fn default_serial1_handshake_delay_ms() -> Millis {
    3_000
}
fn default_volume_step() -> u8 {
    5
}
fn default_min_gain() -> i16 {
    -60
}
fn default_abs_min_gain() -> i16 {
    -70
}
fn default_master_volume() -> u8 {
    100
}
fn default_effects_volume() -> u8 {
    100
}
fn default_music_volume() -> u8 {
    100
}
fn default_wand_beep_level() -> i16 {
    10
}
fn default_wand_idle_level() -> i16 {
    15
}
fn default_mash_window_ms() -> Millis {
    2_000
}
fn default_mash_max() -> u8 {
    7
}
fn default_mash_cooldown_ms() -> Millis {
    3_000
}
fn default_overheat_delay_ms() -> Millis {
    4_000
}
fn default_smoke_timer_ms() -> [Millis; 5] {
    [30_000, 15_000, 10_000, 7_500, 5_000]
}
fn default_overheat_length_ms() -> [Millis; 5] {
    [6_000; 5]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wand_disconnect_delay_ms: default_wand_disconnect_delay_ms(),
            serial1_handshake_delay_ms: default_serial1_handshake_delay_ms(),
            volume_step: default_volume_step(),
            min_gain: default_min_gain(),
            abs_min_gain: default_abs_min_gain(),
            master_volume: default_master_volume(),
            effects_volume: default_effects_volume(),
            music_volume: default_music_volume(),
            wand_beep_level: default_wand_beep_level(),
            wand_idle_level: default_wand_idle_level(),
            mash_window_ms: default_mash_window_ms(),
            mash_max: default_mash_max(),
            mash_cooldown_ms: default_mash_cooldown_ms(),
            overheat_delay_ms: default_overheat_delay_ms(),
            smoke_timer_ms: default_smoke_timer_ms(),
            overheat_length_ms: default_overheat_length_ms(),
            music_track_count: 0,
        }
    }
}
