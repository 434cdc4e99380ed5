//! Power, operating mode, era and power level.

use crate::action::{Action, Power, Sound, Voice};
use crate::core::PackCore;
use crate::protocol::{PackCommand, SerialCommand, WandCommand};
use crate::state::{DefaultEra, Era, PowerLevel, SystemMode};

const ERA_VOICES: [Voice; 5] = [
    Voice::Era1984,
    Voice::Era1989,
    Voice::Afterlife,
    Voice::FrozenEmpire,
    Voice::YearModeDefault,
];

const MODE_VOICES: [Voice; 2] = [Voice::ModeSuperHero, Voice::ModeOriginal];

impl PackCore {
    pub(super) fn wand_power_command(&mut self, cmd: WandCommand) -> bool {
        match cmd {
            WandCommand::On => {
                self.state.wand_on = true;
                self.pack_activate();
                self.to_serial1(SerialCommand::WandOn);
            }
            WandCommand::Off => {
                self.state.wand_on = false;
                self.pack_shutdown();
                self.to_serial1(SerialCommand::WandOff);
                self.to_serial1(SerialCommand::OverheatingFinished);
            }
            WandCommand::BarrelExtended => {
                self.state.barrel_extended = true;
                self.to_serial1(SerialCommand::BarrelExtended);
            }
            WandCommand::BarrelRetracted => {
                self.state.barrel_extended = false;
                self.to_serial1(SerialCommand::BarrelRetracted);
            }
            WandCommand::ModeToggle => self.toggle_system_mode(),
            WandCommand::YearModesCycle => {
                self.state.era_override = true;
                self.toggle_year_modes();
            }
            WandCommand::YearModesCycleEeprom => self.cycle_default_year(),
            WandCommand::PowerLevel1 => self.set_power_level(PowerLevel::MIN),
            WandCommand::PowerLevel2 => self.set_power_level_n(2),
            WandCommand::PowerLevel3 => self.set_power_level_n(3),
            WandCommand::PowerLevel4 => self.set_power_level_n(4),
            WandCommand::PowerLevel5 => self.set_power_level(PowerLevel::MAX),
            _ => return false,
        }
        true
    }

    pub(super) fn serial1_power_command(&mut self, cmd: SerialCommand) -> bool {
        match cmd {
            SerialCommand::TurnPackOn => self.pack_activate(),
            SerialCommand::TurnPackOff => self.pack_shutdown(),
            SerialCommand::WarningCancelled => self.to_wand(PackCommand::WarningCancelled),
            SerialCommand::ManualOverheat => self.to_wand(PackCommand::ManualOverheat),
            _ => return false,
        }
        true
    }

    /// Start the boot sequence unless already on. A menu-selected era takes effect now.
    fn pack_activate(&mut self) {
        if self.state.pack_on {
            return;
        }
        self.state.pack_on = true;
        if self.state.era_override && self.state.era != self.state.era_temp {
            let era = self.state.era_temp;
            self.state.era = era;
            self.to_wand(era.wand_year());
            self.to_serial1(era.serial_year());
        }
        self.emit(Action::Power(Power::Activate));
        self.to_serial1(SerialCommand::PackOn);
    }

    fn pack_shutdown(&mut self) {
        if !self.state.pack_on {
            return;
        }
        self.state.pack_on = false;
        self.emit(Action::Power(Power::Shutdown));
        self.to_serial1(SerialCommand::PackOff);
    }

    fn toggle_system_mode(&mut self) {
        match self.state.system_mode {
            SystemMode::Original => {
                self.state.system_mode = SystemMode::SuperHero;
                self.voice(&MODE_VOICES, Voice::ModeSuperHero);
                self.to_wand(PackCommand::SoundSuperHero);
                self.to_wand(PackCommand::ModeSuperHero);
                self.to_serial1(SerialCommand::ModeSuperHero);
            }
            SystemMode::SuperHero => {
                self.state.system_mode = SystemMode::Original;
                self.voice(&MODE_VOICES, Voice::ModeOriginal);
                self.to_wand(PackCommand::SoundModeOriginal);
                self.to_wand(PackCommand::ModeOriginal);
                self.to_serial1(SerialCommand::ModeOriginal);
            }
        }
    }

    /// Advance the menu era; it is applied at the next power-up.
    fn toggle_year_modes(&mut self) {
        self.restart(Sound::BeepsBargraph);
        let era = self.state.era_temp.next();
        self.state.era_temp = era;
        self.voice(&ERA_VOICES, era.voice());
        self.to_wand(era.wand_mode());
    }

    /// Persisted default era: cycles through the four eras, then back to the toggle switch.
    fn cycle_default_year(&mut self) {
        if !self.state.era_override {
            self.toggle_year_modes();
            self.state.era_override = true;
        } else if self.state.era_temp == Era::FrozenEmpire {
            self.state.era_override = false;
            self.voice(&ERA_VOICES, Voice::YearModeDefault);
            self.to_wand(PackCommand::YearModeDefault);
            self.state.default_era = DefaultEra::ToggleSwitch;
        } else {
            self.toggle_year_modes();
        }

        if self.state.era_override {
            self.state.default_era = DefaultEra::Fixed(self.state.era_temp);
        }
    }

    fn set_power_level_n(&mut self, level: u8) {
        if let Some(level) = PowerLevel::new(level) {
            self.set_power_level(level);
        }
    }

    /// A running smoke timer restarts with the new level's duration; firing continues.
    fn set_power_level(&mut self, level: PowerLevel) {
        self.state.power_level = level;
        if self.state.wand_firing && self.smoke_timer.is_armed() {
            let ms = self.cfg.smoke_timer_ms[level.index()];
            self.smoke_timer.arm(self.now, ms);
        }
        self.to_serial1(level.serial_command());
    }
}

#[cfg(test)]
mod tests {
    use crate::action::{Action, Audio, Power, Sound, Voice};
    use crate::core::PackCore;
    use crate::packet::Packet;
    use crate::protocol::{PackCommand, Peer, WandCommand};
    use crate::state::{DefaultEra, Era};

    fn connected() -> PackCore {
        let mut core = PackCore::default();
        core.on_packet(Peer::Wand, Packet::command(WandCommand::Handshake), 0);
        core
    }

    fn wand(core: &mut PackCore, cmd: WandCommand) -> Vec<Action> {
        core.on_packet(Peer::Wand, Packet::command(cmd), 10)
    }

    #[test]
    fn wand_on_activates_pack_once() {
        let mut core = connected();
        let out = wand(&mut core, WandCommand::On);
        assert!(out.contains(&Action::Power(Power::Activate)));
        assert!(core.state().pack_on);
        let out = wand(&mut core, WandCommand::On);
        assert!(!out.contains(&Action::Power(Power::Activate)));
    }

    #[test]
    fn year_cycle_stops_other_era_voices_first() {
        let mut core = connected();
        let out = wand(&mut core, WandCommand::YearModesCycle);
        assert_eq!(core.state().era_temp, Era::FrozenEmpire);
        assert_eq!(core.state().era, Era::Afterlife);
        let voice = Sound::Voice(Voice::FrozenEmpire);
        let play = out
            .iter()
            .position(|a| matches!(a, Action::Audio(Audio::Play(c)) if c.sound == voice))
            .unwrap();
        let stops = out[..play]
            .iter()
            .filter(|a| matches!(a, Action::Audio(Audio::Stop(Sound::Voice(_)))))
            .count();
        assert_eq!(stops, 5);
        assert!(out.contains(&Action::Send(Peer::Wand, Packet::command(PackCommand::ModeFrozenEmpire))));
    }

    #[test]
    fn cycled_era_applies_at_power_up() {
        let mut core = connected();
        wand(&mut core, WandCommand::YearModesCycle);
        let out = wand(&mut core, WandCommand::On);
        assert_eq!(core.state().era, Era::FrozenEmpire);
        assert!(out.contains(&Action::Send(Peer::Wand, Packet::command(PackCommand::YearFrozenEmpire))));
    }

    #[test]
    fn default_year_cycle_returns_to_toggle_switch() {
        let mut core = connected();
        wand(&mut core, WandCommand::YearModesCycleEeprom);
        assert_eq!(core.state().default_era, DefaultEra::Fixed(Era::FrozenEmpire));
        wand(&mut core, WandCommand::YearModesCycleEeprom);
        assert_eq!(core.state().default_era, DefaultEra::ToggleSwitch);
        assert!(!core.state().era_override);
        wand(&mut core, WandCommand::YearModesCycleEeprom);
        assert_eq!(core.state().default_era, DefaultEra::Fixed(Era::Y1984));
    }

    #[test]
    fn power_level_is_recorded() {
        let mut core = connected();
        wand(&mut core, WandCommand::PowerLevel4);
        assert_eq!(core.state().power_level.get(), 4);
    }
}
