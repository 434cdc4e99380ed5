//! Feature toggles set from the wand menu: vibration, smoke and overheat lighting.

use crate::action::{Action, Smoke, Sound, Voice};
use crate::core::PackCore;
use crate::protocol::{PackCommand, WandCommand};
use crate::state::VibrationMode;

const VIBRATION_PULSE_MS: u16 = 250;

const WAND_VIBRATION_VOICES: [Voice; 4] = [
    Voice::WandVibrationEnabled,
    Voice::WandVibrationFiringEnabled,
    Voice::WandVibrationDisabled,
    Voice::WandVibrationDefault,
];

const PACK_VIBRATION_VOICES: [Voice; 4] = [
    Voice::PackVibrationEnabled,
    Voice::PackVibrationFiringEnabled,
    Voice::PackVibrationDisabled,
    Voice::PackVibrationDefault,
];

const MENU_LEVELS: [Sound; 5] = [
    Sound::Level1,
    Sound::Level2,
    Sound::Level3,
    Sound::Level4,
    Sound::Level5,
];

const FIRING_MENU_VOICES: [Voice; 3] = [
    Voice::VideoGameModes,
    Voice::CrossTheStreams,
    Voice::CrossTheStreamsMix,
];

const CONTINUOUS_SMOKE: [(PackCommand, PackCommand); 5] = [
    (PackCommand::ContinuousSmoke1Enabled, PackCommand::ContinuousSmoke1Disabled),
    (PackCommand::ContinuousSmoke2Enabled, PackCommand::ContinuousSmoke2Disabled),
    (PackCommand::ContinuousSmoke3Enabled, PackCommand::ContinuousSmoke3Disabled),
    (PackCommand::ContinuousSmoke4Enabled, PackCommand::ContinuousSmoke4Disabled),
    (PackCommand::ContinuousSmoke5Enabled, PackCommand::ContinuousSmoke5Disabled),
];

impl PackCore {
    pub(super) fn wand_settings_command(&mut self, cmd: WandCommand) -> bool {
        use WandCommand::*;
        match cmd {
            VibrationEnabled => self.wand_vibration_prompt(Voice::WandVibrationEnabled),
            VibrationFiringEnabled => self.wand_vibration_prompt(Voice::WandVibrationFiringEnabled),
            VibrationDisabled => self.wand_vibration_prompt(Voice::WandVibrationDisabled),
            VibrationDefault => {
                self.wand_vibration_prompt(Voice::WandVibrationDefault);
                if self.state.inputs.vibration_switch {
                    self.to_wand(PackCommand::VibrationEnabled);
                } else {
                    self.to_wand(PackCommand::VibrationDisabled);
                }
            }
            VibrationCycleToggle => self.cycle_pack_vibration(),
            VibrationCycleToggleEeprom => self.cycle_default_vibration(),

            SmokeToggle => {
                let on = !self.state.smoke_enabled;
                self.state.smoke_enabled = on;
                self.announce(
                    on,
                    (Voice::SmokeEnabled, PackCommand::SmokeEnabled),
                    (Voice::SmokeDisabled, PackCommand::SmokeDisabled),
                );
            }
            ContinuousSmokeToggle1 => self.toggle_continuous_smoke(1),
            ContinuousSmokeToggle2 => self.toggle_continuous_smoke(2),
            ContinuousSmokeToggle3 => self.toggle_continuous_smoke(3),
            ContinuousSmokeToggle4 => self.toggle_continuous_smoke(4),
            ContinuousSmokeToggle5 => self.toggle_continuous_smoke(5),

            ProtonStreamImpactToggle => {
                let on = !self.state.stream_effects;
                self.state.stream_effects = on;
                self.announce(
                    on,
                    (Voice::ProtonMixEffectsEnabled, PackCommand::ProtonStreamImpactEnabled),
                    (Voice::ProtonMixEffectsDisabled, PackCommand::ProtonStreamImpactDisabled),
                );
            }
            DemoLightModeToggle => {
                let on = !self.state.demo_light_mode;
                self.state.demo_light_mode = on;
                self.announce(
                    on,
                    (Voice::DemoLightModeEnabled, PackCommand::DemoLightModeEnabled),
                    (Voice::DemoLightModeDisabled, PackCommand::DemoLightModeDisabled),
                );
            }
            OverheatStrobeToggle => {
                let on = !self.state.overheat_strobe;
                self.state.overheat_strobe = on;
                self.announce(
                    on,
                    (Voice::OverheatStrobeEnabled, PackCommand::OverheatStrobeEnabled),
                    (Voice::OverheatStrobeDisabled, PackCommand::OverheatStrobeDisabled),
                );
            }
            OverheatLightsOffToggle => {
                let on = !self.state.overheat_lights_off;
                self.state.overheat_lights_off = on;
                self.announce(
                    on,
                    (Voice::OverheatLightsOffEnabled, PackCommand::OverheatLightsOffEnabled),
                    (Voice::OverheatLightsOffDisabled, PackCommand::OverheatLightsOffDisabled),
                );
            }
            OverheatSyncToFanToggle => {
                let on = !self.state.overheat_sync_to_fan;
                self.state.overheat_sync_to_fan = on;
                self.announce(
                    on,
                    (Voice::OverheatFanSyncEnabled, PackCommand::OverheatSyncFanEnabled),
                    (Voice::OverheatFanSyncDisabled, PackCommand::OverheatSyncFanDisabled),
                );
            }

            MenuLevel1 => self.menu_level(0),
            MenuLevel2 => self.menu_level(1),
            MenuLevel3 => self.menu_level(2),
            MenuLevel4 => self.menu_level(3),
            MenuLevel5 => self.menu_level(4),

            VideoGameMode => self.firing_menu_prompt(Voice::VideoGameModes),
            CrossTheStreams => self.firing_menu_prompt(Voice::CrossTheStreams),
            CrossTheStreamsMix => self.firing_menu_prompt(Voice::CrossTheStreamsMix),
            _ => return false,
        }
        true
    }

    fn wand_vibration_prompt(&mut self, voice: Voice) {
        self.restart(Sound::BeepsAlt);
        self.voice(&WAND_VIBRATION_VOICES, voice);
    }

    /// Runtime pack vibration: on -> firing only -> off -> on.
    fn cycle_pack_vibration(&mut self) {
        let s = &mut self.state;
        let (voice, cmd) = if !s.vibration_switch_on {
            s.vibration_switch_on = true;
            s.vibration_firing = false;
            (Voice::PackVibrationEnabled, PackCommand::PackVibrationEnabled)
        } else if !s.vibration_firing {
            s.vibration_firing = true;
            (Voice::PackVibrationFiringEnabled, PackCommand::PackVibrationFiringEnabled)
        } else {
            s.vibration_switch_on = false;
            s.vibration_firing = false;
            (Voice::PackVibrationDisabled, PackCommand::PackVibrationDisabled)
        };
        self.voice(&PACK_VIBRATION_VOICES, voice);
        self.to_wand(cmd);
        if self.state.vibration_switch_on {
            self.emit(Action::Vibrate { ms: VIBRATION_PULSE_MS });
        }
    }

    /// Persisted pack vibration: always -> firing only -> never -> follow the switch.
    fn cycle_default_vibration(&mut self) {
        let (next, voice, cmd) = match self.state.vibration_default {
            VibrationMode::Always => (
                VibrationMode::FiringOnly,
                Voice::PackVibrationFiringEnabled,
                PackCommand::PackVibrationFiringEnabled,
            ),
            VibrationMode::FiringOnly => (
                VibrationMode::None,
                Voice::PackVibrationDisabled,
                PackCommand::PackVibrationDisabled,
            ),
            VibrationMode::None => (
                VibrationMode::Default,
                Voice::PackVibrationDefault,
                PackCommand::PackVibrationDefault,
            ),
            VibrationMode::Default => (
                VibrationMode::Always,
                Voice::PackVibrationEnabled,
                PackCommand::PackVibrationEnabled,
            ),
        };
        self.state.vibration_default = next;
        self.apply_vibration_mode(next);
        self.voice(&PACK_VIBRATION_VOICES, voice);
        self.to_wand(cmd);
        if self.state.vibration_switch_on {
            self.emit(Action::Vibrate { ms: VIBRATION_PULSE_MS });
        }
    }

    pub(crate) fn apply_vibration_mode(&mut self, mode: VibrationMode) {
        let s = &mut self.state;
        let (on, firing) = match mode {
            VibrationMode::Always => (true, false),
            VibrationMode::FiringOnly => (true, true),
            VibrationMode::None => (false, false),
            VibrationMode::Default => (s.inputs.vibration_switch, false),
        };
        s.vibration_enabled = on;
        s.vibration_switch_on = on;
        s.vibration_firing = firing;
    }

    /// `level` is 1..=5.
    fn toggle_continuous_smoke(&mut self, level: u8) {
        let idx = usize::from(level - 1);
        let on = !self.state.continuous_smoke[idx];
        self.state.continuous_smoke[idx] = on;
        let (enabled, disabled) = CONTINUOUS_SMOKE[idx];
        self.announce(
            on,
            (Voice::ContinuousSmokeEnabled(level), enabled),
            (Voice::ContinuousSmokeDisabled(level), disabled),
        );
        self.smoke(Smoke::ResetContinuous);
    }

    fn menu_level(&mut self, idx: usize) {
        for sound in MENU_LEVELS {
            self.stop(sound);
        }
        self.play(MENU_LEVELS[idx]);
    }

    fn firing_menu_prompt(&mut self, voice: Voice) {
        self.play(Sound::Click);
        self.voice(&FIRING_MENU_VOICES, voice);
    }
}

#[cfg(test)]
mod tests {
    use crate::action::{Action, Audio, Cue, Smoke, Sound, Voice};
    use crate::core::PackCore;
    use crate::packet::Packet;
    use crate::protocol::{PackCommand, Peer, WandCommand};
    use crate::state::VibrationMode;

    fn connected() -> PackCore {
        let mut core = PackCore::default();
        core.on_packet(Peer::Wand, Packet::command(WandCommand::Handshake), 0);
        core
    }

    fn wand(core: &mut PackCore, cmd: WandCommand) -> Vec<Action> {
        core.on_packet(Peer::Wand, Packet::command(cmd), 5)
    }

    #[test]
    fn smoke_toggle_announces_new_state() {
        let mut core = connected();
        let out = wand(&mut core, WandCommand::SmokeToggle);
        assert!(!core.state().smoke_enabled);
        assert!(out.contains(&Action::Audio(Audio::Play(Cue::new(Sound::Voice(Voice::SmokeDisabled))))));
        assert!(out.contains(&Action::Send(Peer::Wand, Packet::command(PackCommand::SmokeDisabled))));
    }

    #[test]
    fn continuous_smoke_is_per_level() {
        let mut core = connected();
        let out = wand(&mut core, WandCommand::ContinuousSmokeToggle3);
        assert_eq!(core.state().continuous_smoke, [false, false, true, false, false]);
        assert!(out.contains(&Action::Smoke(Smoke::ResetContinuous)));
        assert!(out.contains(&Action::Send(
            Peer::Wand,
            Packet::command(PackCommand::ContinuousSmoke3Enabled)
        )));
    }

    #[test]
    fn runtime_vibration_cycles_three_states() {
        let mut core = connected();
        let out = wand(&mut core, WandCommand::VibrationCycleToggle);
        assert!(core.state().vibration_firing);
        assert!(out.contains(&Action::Vibrate { ms: 250 }));
        wand(&mut core, WandCommand::VibrationCycleToggle);
        assert!(!core.state().vibration_switch_on);
        wand(&mut core, WandCommand::VibrationCycleToggle);
        assert!(core.state().vibration_switch_on);
        assert!(!core.state().vibration_firing);
    }

    #[test]
    fn default_vibration_cycle_follows_switch_last() {
        let mut core = connected();
        let mut seen = Vec::new();
        for _ in 0..4 {
            wand(&mut core, WandCommand::VibrationCycleToggleEeprom);
            seen.push(core.state().vibration_default);
        }
        assert_eq!(
            seen,
            vec![
                VibrationMode::Always,
                VibrationMode::FiringOnly,
                VibrationMode::None,
                VibrationMode::Default
            ]
        );
    }

    #[test]
    fn menu_level_stops_the_others() {
        let mut core = connected();
        let out = wand(&mut core, WandCommand::MenuLevel2);
        assert_eq!(out.len(), 6);
        assert_eq!(out[5], Action::Audio(Audio::Play(Cue::new(Sound::Level2))));
    }
}
