//! LED configuration: brightness, LED counts, colour order, direction, storage.

use crate::action::{Action, DimZone, Lights, Sound, Store, Voice};
use crate::core::PackCore;
use crate::protocol::{PackCommand, WandCommand};
use crate::state::dim_index;

const DIMMING_STEP: u8 = 10;

const DIMMING_VOICES: [Voice; 4] = [
    Voice::CyclotronBrightness,
    Voice::InnerCyclotronBrightness,
    Voice::InnerCyclotronPanelBrightness,
    Voice::PowercellBrightness,
];

const STORAGE_VOICES: [Voice; 2] = [Voice::EepromSave, Voice::EepromErase];

impl PackCore {
    pub(super) fn wand_led_command(&mut self, cmd: WandCommand) -> bool {
        use WandCommand::*;
        match cmd {
            DimmingToggle => self.cycle_dim_target(),
            DimmingIncrease => self.adjust_dimming(true),
            DimmingDecrease => self.adjust_dimming(false),

            ToggleInnerCyclotronLeds => self.cycle_inner_cyclotron_leds(),
            TogglePowercellLeds => self.cycle_powercell_leds(),
            ToggleCyclotronLeds => self.cycle_cyclotron_leds(),
            ToggleRgbInnerCyclotronLeds => {
                let grb = !self.state.grb_inner_cyclotron;
                self.state.grb_inner_cyclotron = grb;
                self.announce(
                    grb,
                    (Voice::GrbInnerCyclotron, PackCommand::GrbInnerCyclotronLeds),
                    (Voice::RgbInnerCyclotron, PackCommand::RgbInnerCyclotronLeds),
                );
                if self.state.spectral_lights_on {
                    self.spectral_lights_on();
                }
            }
            CyclotronDirectionToggle => {
                let clockwise = !self.state.clockwise;
                self.state.clockwise = clockwise;
                self.restart(if clockwise { Sound::Beeps } else { Sound::BeepsAlt });
                self.announce(
                    clockwise,
                    (Voice::CyclotronClockwise, PackCommand::CyclotronClockwise),
                    (Voice::CyclotronCounterClockwise, PackCommand::CyclotronCounterClockwise),
                );
            }
            CyclotronLedToggle => {
                let single = !self.state.cyclotron_single_led;
                self.state.cyclotron_single_led = single;
                self.announce(
                    single,
                    (Voice::SingleLed, PackCommand::CyclotronSingleLed),
                    (Voice::ThreeLed, PackCommand::CyclotronThreeLed),
                );
            }
            CyclotronSimulateRingToggle => {
                let ring = !self.state.cyclotron_simulate_ring;
                self.state.cyclotron_simulate_ring = ring;
                self.announce(
                    ring,
                    (Voice::CyclotronSimulateRingEnabled, PackCommand::CyclotronSimulateRingEnabled),
                    (Voice::CyclotronSimulateRingDisabled, PackCommand::CyclotronSimulateRingDisabled),
                );
            }
            VideoGameModeColourToggle => self.cycle_video_game_colours(),

            ClearConfigEepromSettings => self.storage(Voice::EepromErase, Store::ClearConfig),
            SaveConfigEepromSettings => self.storage(Voice::EepromSave, Store::SaveConfig),
            ClearLedEepromSettings => self.storage(Voice::EepromErase, Store::ClearLeds),
            SaveLedEepromSettings => self.storage(Voice::EepromSave, Store::SaveLeds),
            EepromLedMenu => self.menu_prompt(Voice::EepromLedMenu),
            EepromConfigMenu => self.menu_prompt(Voice::EepromConfigMenu),
            _ => return false,
        }
        true
    }

    fn cycle_dim_target(&mut self) {
        let (next, voice, cmd) = match self.state.dim_target {
            DimZone::Cyclotron => (
                DimZone::InnerCyclotron,
                Voice::InnerCyclotronBrightness,
                PackCommand::InnerCyclotronDimming,
            ),
            DimZone::InnerCyclotron => (
                DimZone::CyclotronPanel,
                Voice::InnerCyclotronPanelBrightness,
                PackCommand::CyclotronPanelDimming,
            ),
            DimZone::CyclotronPanel => (
                DimZone::Powercell,
                Voice::PowercellBrightness,
                PackCommand::PowercellDimming,
            ),
            DimZone::Powercell => (
                DimZone::Cyclotron,
                Voice::CyclotronBrightness,
                PackCommand::CyclotronDimming,
            ),
        };
        self.state.dim_target = next;
        self.voice(&DIMMING_VOICES, voice);
        self.to_wand(cmd);
    }

    fn adjust_dimming(&mut self, up: bool) {
        let zone = self.state.dim_target;
        let level = &mut self.state.dimming[dim_index(zone)];
        let at_limit = if up { *level >= 100 } else { *level == 0 };
        if at_limit {
            self.restart(Sound::BeepsAlt);
            return;
        }
        *level = if up {
            level.saturating_add(DIMMING_STEP).min(100)
        } else {
            level.saturating_sub(DIMMING_STEP)
        };
        let percent = *level;
        self.lights(Lights::Dimming { zone, percent });
        self.to_wand_value(PackCommand::Dimming, u16::from(percent));
        self.restart(Sound::Beeps);
    }

    fn cycle_inner_cyclotron_leds(&mut self) {
        let (count, cmd) = match self.state.inner_cyclotron_leds {
            12 => (23, PackCommand::InnerCyclotronLeds23),
            23 => (24, PackCommand::InnerCyclotronLeds24),
            24 => (26, PackCommand::InnerCyclotronLeds26),
            26 => (35, PackCommand::InnerCyclotronLeds35),
            35 => (36, PackCommand::InnerCyclotronLeds36),
            36 => (12, PackCommand::InnerCyclotronLeds12),
            _ => (35, PackCommand::InnerCyclotronLeds35),
        };
        let old = self.state.inner_cyclotron_leds;
        self.state.inner_cyclotron_leds = count;
        self.stop(Voice::InnerCyclotron(old));
        self.play(Voice::InnerCyclotron(count));
        self.to_wand(cmd);
        self.led_counts_changed();
    }

    fn cycle_powercell_leds(&mut self) {
        let (count, cmd) = match self.state.powercell_leds {
            13 => (15, PackCommand::PowercellLeds15),
            _ => (13, PackCommand::PowercellLeds13),
        };
        let old = self.state.powercell_leds;
        self.state.powercell_leds = count;
        self.stop(Voice::Powercell(old));
        self.play(Voice::Powercell(count));
        self.to_wand(cmd);
        self.led_counts_changed();
    }

    fn cycle_cyclotron_leds(&mut self) {
        let (count, cmd) = match self.state.cyclotron_leds {
            12 => (40, PackCommand::CyclotronLeds40),
            40 => (36, PackCommand::CyclotronLeds36),
            36 => (20, PackCommand::CyclotronLeds20),
            20 => (12, PackCommand::CyclotronLeds12),
            _ => (40, PackCommand::CyclotronLeds40),
        };
        let old = self.state.cyclotron_leds;
        self.state.cyclotron_leds = count;
        self.stop(Voice::Cyclotron(old));
        self.play(Voice::Cyclotron(count));
        self.to_wand(cmd);
        self.lights(Lights::CyclotronReset);
        self.led_counts_changed();
    }

    fn led_counts_changed(&mut self) {
        self.lights(Lights::LedCountsChanged);
        if self.state.spectral_lights_on {
            self.spectral_lights_off();
            self.spectral_lights_on();
        }
    }

    /// Both zones -> none -> power cell only -> cyclotron only -> both.
    fn cycle_video_game_colours(&mut self) {
        let s = &mut self.state;
        let (cyclotron, powercell, voice, cmd) = match (s.cyclotron_colour_toggle, s.powercell_colour_toggle) {
            (true, true) => (
                false,
                false,
                Voice::VideoGameColoursDisabled,
                PackCommand::VideoGameModeColoursDisabled,
            ),
            (false, false) => (
                false,
                true,
                Voice::VideoGameColoursPowercellEnabled,
                PackCommand::VideoGameModePowerCellEnabled,
            ),
            (false, true) => (
                true,
                false,
                Voice::VideoGameColoursCyclotronEnabled,
                PackCommand::VideoGameModeCyclotronEnabled,
            ),
            (true, false) => (
                true,
                true,
                Voice::VideoGameColoursEnabled,
                PackCommand::VideoGameModeColoursEnabled,
            ),
        };
        s.cyclotron_colour_toggle = cyclotron;
        s.powercell_colour_toggle = powercell;
        self.voice(
            &[
                Voice::VideoGameColoursDisabled,
                Voice::VideoGameColoursPowercellEnabled,
                Voice::VideoGameColoursCyclotronEnabled,
                Voice::VideoGameColoursEnabled,
            ],
            voice,
        );
        self.to_wand(cmd);
        self.lights(Lights::CyclotronColourReset);
        if self.state.pack_on {
            self.lights(Lights::PowercellRedraw);
        }
    }

    fn storage(&mut self, voice: Voice, store: Store) {
        tracing::info!(?store, "storage request from wand");
        self.voice(&STORAGE_VOICES, voice);
        self.emit(Action::Store(store));
    }

    fn menu_prompt(&mut self, voice: Voice) {
        self.restart(Sound::BeepsBargraph);
        self.restart(voice);
    }
}

#[cfg(test)]
mod tests {
    use crate::action::{Action, DimZone, Lights, Store};
    use crate::core::PackCore;
    use crate::packet::Packet;
    use crate::protocol::{PackCommand, Peer, WandCommand};

    fn connected() -> PackCore {
        let mut core = PackCore::default();
        core.on_packet(Peer::Wand, Packet::command(WandCommand::Handshake), 0);
        core
    }

    fn wand(core: &mut PackCore, cmd: WandCommand) -> Vec<Action> {
        core.on_packet(Peer::Wand, Packet::command(cmd), 5)
    }

    #[test]
    fn inner_cyclotron_count_cycles_and_wraps() {
        let mut core = connected();
        assert_eq!(core.state().inner_cyclotron_leds, 35);
        wand(&mut core, WandCommand::ToggleInnerCyclotronLeds);
        assert_eq!(core.state().inner_cyclotron_leds, 36);
        let out = wand(&mut core, WandCommand::ToggleInnerCyclotronLeds);
        assert_eq!(core.state().inner_cyclotron_leds, 12);
        assert!(out.contains(&Action::Send(Peer::Wand, Packet::command(PackCommand::InnerCyclotronLeds12))));
        assert!(out.contains(&Action::Lights(Lights::LedCountsChanged)));
    }

    #[test]
    fn cyclotron_count_cycle() {
        let mut core = connected();
        let mut seen = Vec::new();
        for _ in 0..4 {
            wand(&mut core, WandCommand::ToggleCyclotronLeds);
            seen.push(core.state().cyclotron_leds);
        }
        assert_eq!(seen, vec![40, 36, 20, 12]);
    }

    #[test]
    fn dimming_steps_within_bounds() {
        let mut core = connected();
        let out = wand(&mut core, WandCommand::DimmingDecrease);
        assert!(out.contains(&Action::Lights(Lights::Dimming {
            zone: DimZone::Cyclotron,
            percent: 90
        })));
        wand(&mut core, WandCommand::DimmingIncrease);
        let out = wand(&mut core, WandCommand::DimmingIncrease);
        assert_eq!(core.state().dimming[0], 100);
        assert!(!out.iter().any(|a| matches!(a, Action::Lights(Lights::Dimming { .. }))));
    }

    #[test]
    fn dim_target_cycles_through_zones() {
        let mut core = connected();
        for expected in [
            DimZone::InnerCyclotron,
            DimZone::CyclotronPanel,
            DimZone::Powercell,
            DimZone::Cyclotron,
        ] {
            wand(&mut core, WandCommand::DimmingToggle);
            assert_eq!(core.state().dim_target, expected);
        }
    }

    #[test]
    fn save_is_explicit() {
        let mut core = connected();
        let out = wand(&mut core, WandCommand::SaveLedEepromSettings);
        assert!(out.contains(&Action::Store(Store::SaveLeds)));
        let out = wand(&mut core, WandCommand::ToggleCyclotronLeds);
        assert!(!out.iter().any(|a| matches!(a, Action::Store(_))));
    }

    #[test]
    fn video_game_colours_cycle_back_to_both() {
        let mut core = connected();
        for _ in 0..4 {
            wand(&mut core, WandCommand::VideoGameModeColourToggle);
        }
        assert!(core.state().cyclotron_colour_toggle);
        assert!(core.state().powercell_colour_toggle);
    }
}
