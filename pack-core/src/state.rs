//! Authoritative pack runtime state.

use crate::action::{DimZone, Voice};
use crate::config::Config;
use crate::music::Music;
use crate::packet::WandPrefs;
use crate::protocol::{PackCommand, SerialCommand};
use crate::volume::Volume;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemMode {
    #[default]
    SuperHero,
    /// Era-accurate behaviour gated by the ion arm (red) switch.
    Original,
}

/// Year theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Era {
    Y1984,
    Y1989,
    #[default]
    Afterlife,
    FrozenEmpire,
}

impl Era {
    /// 1984 -> 1989 -> Afterlife -> Frozen Empire -> 1984.
    pub fn next(self) -> Self {
        match self {
            Era::Y1984 => Era::Y1989,
            Era::Y1989 => Era::Afterlife,
            Era::Afterlife => Era::FrozenEmpire,
            Era::FrozenEmpire => Era::Y1984,
        }
    }

    /// 1..=4, as carried in the sync snapshot.
    pub fn code(self) -> u8 {
        match self {
            Era::Y1984 => 1,
            Era::Y1989 => 2,
            Era::Afterlife => 3,
            Era::FrozenEmpire => 4,
        }
    }

    /// Preference blob encoding: 2..=5 (1 means "toggle switch" for defaults).
    pub fn from_prefs(value: u8) -> Option<Self> {
        match value {
            2 => Some(Era::Y1984),
            3 => Some(Era::Y1989),
            4 => Some(Era::Afterlife),
            5 => Some(Era::FrozenEmpire),
            _ => None,
        }
    }

    pub fn to_prefs(self) -> u8 {
        self.code() + 1
    }

    /// Is this one of the two "modern" eras?
    pub fn is_modern(self) -> bool {
        matches!(self, Era::Afterlife | Era::FrozenEmpire)
    }

    pub fn voice(self) -> Voice {
        match self {
            Era::Y1984 => Voice::Era1984,
            Era::Y1989 => Voice::Era1989,
            Era::Afterlife => Voice::Afterlife,
            Era::FrozenEmpire => Voice::FrozenEmpire,
        }
    }

    /// Wand command announcing a cycled (not yet applied) era.
    pub fn wand_mode(self) -> PackCommand {
        match self {
            Era::Y1984 => PackCommand::Mode1984,
            Era::Y1989 => PackCommand::Mode1989,
            Era::Afterlife => PackCommand::ModeAfterlife,
            Era::FrozenEmpire => PackCommand::ModeFrozenEmpire,
        }
    }

    /// Wand command applying an era.
    pub fn wand_year(self) -> PackCommand {
        match self {
            Era::Y1984 => PackCommand::Year1984,
            Era::Y1989 => PackCommand::Year1989,
            Era::Afterlife => PackCommand::YearAfterlife,
            Era::FrozenEmpire => PackCommand::YearFrozenEmpire,
        }
    }

    pub fn serial_year(self) -> SerialCommand {
        match self {
            Era::Y1984 => SerialCommand::Year1984,
            Era::Y1989 => SerialCommand::Year1989,
            Era::Afterlife => SerialCommand::YearAfterlife,
            Era::FrozenEmpire => SerialCommand::YearFrozenEmpire,
        }
    }
}

/// Persisted power-on era.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultEra {
    /// Follow the hardware year toggle switch.
    #[default]
    ToggleSwitch,
    Fixed(Era),
}

impl DefaultEra {
    pub fn to_prefs(self) -> u8 {
        match self {
            DefaultEra::ToggleSwitch => 1,
            DefaultEra::Fixed(era) => era.to_prefs(),
        }
    }

    pub fn from_prefs(value: u8) -> Option<Self> {
        match value {
            1 => Some(DefaultEra::ToggleSwitch),
            other => Era::from_prefs(other).map(DefaultEra::Fixed),
        }
    }
}

/// Wand power level, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PowerLevel(u8);

impl PowerLevel {
    pub const MIN: PowerLevel = PowerLevel(1);
    pub const MAX: PowerLevel = PowerLevel(5);

    pub fn new(level: u8) -> Option<Self> {
        (1..=5).contains(&level).then_some(PowerLevel(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into per-level tables.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    pub fn serial_command(self) -> SerialCommand {
        match self.0 {
            1 => SerialCommand::PowerLevel1,
            2 => SerialCommand::PowerLevel2,
            3 => SerialCommand::PowerLevel3,
            4 => SerialCommand::PowerLevel4,
            _ => SerialCommand::PowerLevel5,
        }
    }
}

impl Default for PowerLevel {
    fn default() -> Self {
        PowerLevel::MIN
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamMode {
    #[default]
    Proton,
    Slime,
    Stasis,
    Meson,
    Spectral,
    Holiday,
    SpectralCustom,
}

impl StreamMode {
    /// 1..=7, as carried in the sync snapshot.
    pub fn code(self) -> u8 {
        match self {
            StreamMode::Proton => 1,
            StreamMode::Slime => 2,
            StreamMode::Stasis => 3,
            StreamMode::Meson => 4,
            StreamMode::Spectral => 5,
            StreamMode::Holiday => 6,
            StreamMode::SpectralCustom => 7,
        }
    }

    pub fn serial_command(self) -> SerialCommand {
        match self {
            StreamMode::Proton => SerialCommand::ProtonMode,
            StreamMode::Slime => SerialCommand::SlimeMode,
            StreamMode::Stasis => SerialCommand::StasisMode,
            StreamMode::Meson => SerialCommand::MesonMode,
            StreamMode::Spectral => SerialCommand::SpectralMode,
            StreamMode::Holiday => SerialCommand::HolidayMode,
            StreamMode::SpectralCustom => SerialCommand::SpectralCustomMode,
        }
    }
}

/// Persisted pack vibration behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VibrationMode {
    Always,
    FiringOnly,
    None,
    /// Follow the hardware vibration switch.
    #[default]
    Default,
}

impl VibrationMode {
    pub fn to_prefs(self) -> u8 {
        match self {
            VibrationMode::Always => 1,
            VibrationMode::FiringOnly => 2,
            VibrationMode::None => 3,
            VibrationMode::Default => 4,
        }
    }

    pub fn from_prefs(value: u8) -> Option<Self> {
        match value {
            1 => Some(VibrationMode::Always),
            2 => Some(VibrationMode::FiringOnly),
            3 => Some(VibrationMode::None),
            4 => Some(VibrationMode::Default),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CtsStatus {
    #[default]
    NotFiring,
    Firing1984,
    Firing2021,
}

/// Custom spectral colour for one LED zone. Both bytes stay within `1..=254`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpectralColour {
    pub hue: u8,
    pub sat: u8,
}

impl Default for SpectralColour {
    fn default() -> Self {
        Self { hue: 1, sat: 254 }
    }
}

impl SpectralColour {
    /// Desaturate first; walk the hue down only while fully saturated.
    pub fn decrease(&mut self) {
        if self.hue > 1 && self.sat > 253 {
            self.hue -= 1;
        } else {
            self.hue = 1;
            self.sat = self.sat.saturating_sub(1).max(1);
        }
    }

    /// Saturate first, then walk the hue up. `bump_sat_at_end` also pushes
    /// saturation once the hue is maxed (all zones except the power cell).
    pub fn increase(&mut self, bump_sat_at_end: bool) {
        if self.sat < 254 {
            self.sat += 1;
        } else if self.hue < 253 {
            self.hue += 1;
        } else {
            self.hue = 254;
            if bump_sat_at_end {
                self.sat = self.sat.saturating_add(1).min(254);
            }
        }
    }
}

/// Hardware inputs sampled by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inputs {
    /// Ion arm (red) switch on.
    pub ion_arm_switch: bool,
    /// Pack vibration switch on.
    pub vibration_switch: bool,
    pub ribbon_cable_attached: bool,
    pub cyclotron_lid_on: bool,
}

impl Default for Inputs {
    fn default() -> Self {
        Self {
            ion_arm_switch: false,
            vibration_switch: true,
            ribbon_cable_attached: true,
            cyclotron_lid_on: true,
        }
    }
}

/// Everything the dispatch engine reads and writes. Owned by [`crate::PackCore`].
#[derive(Debug, Clone)]
pub struct DeviceState {
    pub system_mode: SystemMode,
    pub era: Era,
    /// Era shown while cycling in the wand menu; committed by the year commands.
    pub era_temp: Era,
    pub default_era: DefaultEra,
    /// A menu-selected era overrides the hardware toggle switch.
    pub era_override: bool,
    pub pack_on: bool,
    pub power_level: PowerLevel,
    pub stream_mode: StreamMode,
    pub barrel_extended: bool,
    pub wand_on: bool,

    pub wand_firing: bool,
    pub firing_intensify: bool,
    pub firing_alt: bool,
    pub intensify_sound: bool,
    pub alt_sound: bool,
    pub cts: CtsStatus,
    pub overheating: bool,
    pub venting: bool,

    pub volume: Volume,
    pub music: Music,

    pub vibration_enabled: bool,
    pub vibration_firing: bool,
    /// Software override of the vibration switch.
    pub vibration_switch_on: bool,
    pub vibration_default: VibrationMode,

    pub smoke_enabled: bool,
    pub continuous_smoke: [bool; 5],
    pub overheat_length_ms: [u64; 5],
    /// Wand-owned overheat settings carried in the smoke blob.
    pub overheat_level: [u8; 5],
    pub overheat_delay_s: [u8; 5],

    pub stream_effects: bool,
    pub demo_light_mode: bool,
    pub overheat_strobe: bool,
    pub overheat_lights_off: bool,
    pub overheat_sync_to_fan: bool,
    pub use_ribbon_cable: bool,

    pub clockwise: bool,
    pub cyclotron_single_led: bool,
    pub cyclotron_simulate_ring: bool,
    pub inner_panel: bool,
    pub grb_inner_cyclotron: bool,
    pub cyclotron_colour_toggle: bool,
    pub powercell_colour_toggle: bool,
    pub cyclotron_leds: u8,
    pub inner_cyclotron_leds: u8,
    pub cavity_leds: u8,
    pub powercell_leds: u8,
    pub spectral_lights_on: bool,
    pub spectral_cyclotron: SpectralColour,
    pub spectral_inner: SpectralColour,
    pub spectral_powercell: SpectralColour,
    pub dim_target: DimZone,
    /// Brightness in percent, indexed by [`DimZone`].
    pub dimming: [u8; 4],

    pub inputs: Inputs,
    /// Last wand preference blob seen; served to the serial1 device on request.
    pub wand_prefs: WandPrefs,
}

impl DeviceState {
    pub fn new(cfg: &Config) -> Self {
        Self {
            system_mode: SystemMode::SuperHero,
            era: Era::Afterlife,
            era_temp: Era::Afterlife,
            default_era: DefaultEra::ToggleSwitch,
            era_override: false,
            pack_on: false,
            power_level: PowerLevel::MIN,
            stream_mode: StreamMode::Proton,
            barrel_extended: false,
            wand_on: false,
            wand_firing: false,
            firing_intensify: false,
            firing_alt: false,
            intensify_sound: false,
            alt_sound: false,
            cts: CtsStatus::NotFiring,
            overheating: false,
            venting: false,
            volume: Volume::new(cfg),
            music: Music::new(cfg.music_track_count),
            vibration_enabled: true,
            vibration_firing: false,
            vibration_switch_on: true,
            vibration_default: VibrationMode::Default,
            smoke_enabled: true,
            continuous_smoke: [false; 5],
            overheat_length_ms: cfg.overheat_length_ms,
            overheat_level: [0; 5],
            overheat_delay_s: [0; 5],
            stream_effects: true,
            demo_light_mode: false,
            overheat_strobe: false,
            overheat_lights_off: false,
            overheat_sync_to_fan: false,
            use_ribbon_cable: false,
            clockwise: false,
            cyclotron_single_led: false,
            cyclotron_simulate_ring: true,
            inner_panel: false,
            grb_inner_cyclotron: false,
            cyclotron_colour_toggle: true,
            powercell_colour_toggle: true,
            cyclotron_leds: 12,
            inner_cyclotron_leds: 35,
            cavity_leds: 0,
            powercell_leds: 13,
            spectral_lights_on: false,
            spectral_cyclotron: SpectralColour::default(),
            spectral_inner: SpectralColour::default(),
            spectral_powercell: SpectralColour::default(),
            dim_target: DimZone::Cyclotron,
            dimming: [100; 4],
            inputs: Inputs::default(),
            wand_prefs: WandPrefs::default(),
        }
    }

    /// Ribbon cable alarm: enabled and the cable is unplugged.
    pub fn alarm_active(&self) -> bool {
        self.use_ribbon_cable && !self.inputs.ribbon_cable_attached
    }

    /// Red switch reported for Original mode; always off in Super Hero mode.
    pub fn red_switch_on(&self) -> bool {
        self.system_mode == SystemMode::Original && self.inputs.ion_arm_switch
    }

    pub fn any_firing(&self) -> bool {
        self.wand_firing || self.cts != CtsStatus::NotFiring
    }
}

pub(crate) fn dim_index(zone: DimZone) -> usize {
    match zone {
        DimZone::Cyclotron => 0,
        DimZone::InnerCyclotron => 1,
        DimZone::CyclotronPanel => 2,
        DimZone::Powercell => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_cycle_wraps() {
        let mut era = Era::Y1984;
        for _ in 0..4 {
            era = era.next();
        }
        assert_eq!(era, Era::Y1984);
        assert_eq!(Era::FrozenEmpire.next(), Era::Y1984);
    }

    #[test]
    fn prefs_encodings() {
        assert_eq!(DefaultEra::from_prefs(1), Some(DefaultEra::ToggleSwitch));
        assert_eq!(DefaultEra::from_prefs(5), Some(DefaultEra::Fixed(Era::FrozenEmpire)));
        assert_eq!(DefaultEra::from_prefs(9), None);
        assert_eq!(Era::Y1989.to_prefs(), 3);
        assert_eq!(VibrationMode::from_prefs(2), Some(VibrationMode::FiringOnly));
        assert_eq!(VibrationMode::Default.to_prefs(), 4);
    }

    #[test]
    fn power_level_bounds() {
        assert_eq!(PowerLevel::new(0), None);
        assert_eq!(PowerLevel::new(6), None);
        assert_eq!(PowerLevel::new(3).map(PowerLevel::index), Some(2));
        assert_eq!(PowerLevel::MAX.serial_command(), SerialCommand::PowerLevel5);
    }

    #[test]
    fn spectral_decrease_desaturates_before_hue() {
        let mut c = SpectralColour { hue: 3, sat: 254 };
        c.decrease();
        assert_eq!(c, SpectralColour { hue: 2, sat: 254 });
        let mut c = SpectralColour { hue: 3, sat: 200 };
        c.decrease();
        assert_eq!(c, SpectralColour { hue: 1, sat: 199 });
        let mut c = SpectralColour { hue: 1, sat: 1 };
        c.decrease();
        assert_eq!(c, SpectralColour { hue: 1, sat: 1 });
    }

    #[test]
    fn spectral_increase_saturates_first() {
        let mut c = SpectralColour { hue: 10, sat: 100 };
        c.increase(true);
        assert_eq!(c, SpectralColour { hue: 10, sat: 101 });
        let mut c = SpectralColour { hue: 10, sat: 254 };
        c.increase(true);
        assert_eq!(c.hue, 11);
        let mut c = SpectralColour { hue: 253, sat: 254 };
        c.increase(false);
        assert_eq!(c, SpectralColour { hue: 254, sat: 254 });
    }

    #[test]
    fn alarm_needs_feature_and_unplugged_cable() {
        let mut s = DeviceState::new(&Config::default());
        s.inputs.ribbon_cable_attached = false;
        assert!(!s.alarm_active());
        s.use_ribbon_cable = true;
        assert!(s.alarm_active());
    }
}
