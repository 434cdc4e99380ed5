//! Preference blobs exchanged with the serial1 device.
//!
//! Building a blob reads runtime state; applying one writes runtime state only.
//! Nothing here touches storage: persistence needs an explicit save command.

use crate::action::{Lights, Smoke, Sound};
use crate::core::PackCore;
use crate::packet::{PackPrefs, SmokePrefs};
use crate::protocol::{PackCommand, SerialCommand};
use crate::state::{DefaultEra, DeviceState, Era, SpectralColour, StreamMode, SystemMode, VibrationMode};

const CYCLOTRON_COUNTS: [u8; 4] = [12, 20, 36, 40];
const INNER_CYCLOTRON_COUNTS: [u8; 6] = [12, 23, 24, 26, 35, 36];
const POWERCELL_COUNTS: [u8; 2] = [13, 15];
const MAX_CAVITY_LEDS: u8 = 30;

fn flag(b: bool) -> u8 {
    u8::from(b)
}

/// Current pack settings as served to the serial1 device.
pub fn pack_prefs(s: &DeviceState) -> PackPrefs {
    PackPrefs {
        default_system_mode: match s.system_mode {
            SystemMode::SuperHero => 0,
            SystemMode::Original => 1,
        },
        default_year_theme: s.default_era.to_prefs(),
        current_year_theme: s.era.to_prefs(),
        default_system_volume: s.volume.default_master(),
        pack_vibration: s.vibration_default.to_prefs(),
        ribbon_cable_alarm: flag(s.use_ribbon_cable),
        cyclotron_direction: flag(s.clockwise),
        demo_light_mode: flag(s.demo_light_mode),
        proton_stream_effects: flag(s.stream_effects),
        overheat_strobe: flag(s.overheat_strobe),
        overheat_sync_to_fan: flag(s.overheat_sync_to_fan),
        overheat_lights_off: flag(s.overheat_lights_off),
        cyclotron_count: s.cyclotron_leds,
        cyclotron_hue: s.spectral_cyclotron.hue,
        cyclotron_sat: s.spectral_cyclotron.sat,
        cyclotron_center_led: if s.cyclotron_single_led { 1 } else { 3 },
        cyclotron_sim_ring: flag(s.cyclotron_simulate_ring),
        inner_panel: flag(s.inner_panel),
        cake_count: s.inner_cyclotron_leds,
        cake_hue: s.spectral_inner.hue,
        cake_sat: s.spectral_inner.sat,
        cake_grb: flag(s.grb_inner_cyclotron),
        cavity_count: s.cavity_leds,
        vg_cyclotron: flag(s.cyclotron_colour_toggle),
        powercell_count: s.powercell_leds,
        powercell_hue: s.spectral_powercell.hue,
        powercell_sat: s.spectral_powercell.sat,
        vg_powercell: flag(s.powercell_colour_toggle),
    }
}

/// Smoke settings, durations converted to whole seconds.
pub fn smoke_prefs(s: &DeviceState) -> SmokePrefs {
    let mut p = SmokePrefs {
        smoke_enabled: flag(s.smoke_enabled),
        overheat_level: s.overheat_level,
        overheat_delay: s.overheat_delay_s,
        ..SmokePrefs::default()
    };
    for i in 0..5 {
        p.continuous[i] = flag(s.continuous_smoke[i]);
        p.duration[i] = u8::try_from(s.overheat_length_ms[i] / 1000).unwrap_or(u8::MAX);
    }
    p
}

/// Copy smoke settings into runtime state. Seconds become milliseconds.
pub fn apply_smoke_prefs(s: &mut DeviceState, p: &SmokePrefs) {
    s.smoke_enabled = p.smoke_enabled != 0;
    for i in 0..5 {
        s.continuous_smoke[i] = p.continuous[i] != 0;
        s.overheat_length_ms[i] = u64::from(p.duration[i]) * 1000;
    }
    s.overheat_level = p.overheat_level;
    s.overheat_delay_s = p.overheat_delay;
}

fn colour(hue: u8, sat: u8) -> SpectralColour {
    SpectralColour {
        hue: hue.clamp(1, 254),
        sat: sat.clamp(1, 254),
    }
}

impl PackCore {
    /// Apply a pack preference blob from the serial1 device, announcing the
    /// resulting mode and era to both peers.
    pub(crate) fn apply_pack_prefs(&mut self, p: &PackPrefs) {
        if p.default_system_mode == 1 {
            self.state.system_mode = SystemMode::Original;
            self.to_wand(PackCommand::ModeOriginal);
            self.to_serial1(SerialCommand::ModeOriginal);
            if !self.wand.is_connected() && self.state.stream_mode != StreamMode::Proton {
                self.state.stream_mode = StreamMode::Proton;
                self.to_serial1(SerialCommand::ProtonMode);
            }
            if self.state.inputs.ion_arm_switch {
                self.to_wand(PackCommand::ModeOriginalRedSwitchOn);
                self.to_serial1(SerialCommand::ModeOriginalRedSwitchOn);
            } else {
                self.to_wand(PackCommand::ModeOriginalRedSwitchOff);
                self.to_serial1(SerialCommand::ModeOriginalRedSwitchOff);
            }
        } else {
            self.state.system_mode = SystemMode::SuperHero;
            self.to_wand(PackCommand::ModeSuperHero);
            self.to_serial1(SerialCommand::ModeSuperHero);
            self.to_wand(PackCommand::ModeOriginalRedSwitchOff);
            self.to_serial1(SerialCommand::ModeOriginalRedSwitchOff);
        }

        if let Some(default_era) = DefaultEra::from_prefs(p.default_year_theme) {
            self.state.default_era = default_era;
        }

        if let Some(era) = Era::from_prefs(p.current_year_theme) {
            self.state.era = era;
            self.state.era_temp = era;
            self.state.era_override = true;
            self.to_wand(era.wand_year());
            self.to_serial1(era.serial_year());
        }

        let vibration = VibrationMode::from_prefs(p.pack_vibration).unwrap_or_default();
        self.state.vibration_default = vibration;
        self.apply_vibration_mode(vibration);

        let s = &mut self.state;
        s.volume.set_default_master(p.default_system_volume);
        s.use_ribbon_cable = p.ribbon_cable_alarm != 0;
        s.clockwise = p.cyclotron_direction != 0;
        s.demo_light_mode = p.demo_light_mode != 0;
        s.stream_effects = p.proton_stream_effects != 0;
        s.overheat_strobe = p.overheat_strobe != 0;
        s.overheat_sync_to_fan = p.overheat_sync_to_fan != 0;
        s.overheat_lights_off = p.overheat_lights_off != 0;

        if CYCLOTRON_COUNTS.contains(&p.cyclotron_count) {
            s.cyclotron_leds = p.cyclotron_count;
        }
        s.spectral_cyclotron = colour(p.cyclotron_hue, p.cyclotron_sat);
        s.cyclotron_single_led = p.cyclotron_center_led == 1;
        s.cyclotron_simulate_ring = p.cyclotron_sim_ring != 0;

        s.inner_panel = p.inner_panel != 0;
        if INNER_CYCLOTRON_COUNTS.contains(&p.cake_count) {
            s.inner_cyclotron_leds = p.cake_count;
        }
        s.spectral_inner = colour(p.cake_hue, p.cake_sat);
        s.grb_inner_cyclotron = p.cake_grb != 0;
        s.cavity_leds = p.cavity_count.min(MAX_CAVITY_LEDS);
        s.cyclotron_colour_toggle = p.vg_cyclotron != 0;

        if POWERCELL_COUNTS.contains(&p.powercell_count) {
            s.powercell_leds = p.powercell_count;
        }
        s.spectral_powercell = colour(p.powercell_hue, p.powercell_sat);
        s.powercell_colour_toggle = p.vg_powercell != 0;

        self.lights(Lights::LedCountsChanged);
        self.smoke(Smoke::ResetContinuous);
        self.lights(Lights::CyclotronReset);
        self.lights(Lights::InnerCyclotronReset);
        self.restart(Sound::VentDry);
    }
}
