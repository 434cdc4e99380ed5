//! Preference transfer between the serial1 device, the pack and the wand.

use crate::action::{Action, Smoke, Sound, Store, Voice};
use crate::core::PackCore;
use crate::packet::{Packet, SmokePrefs, WandPrefs};
use crate::prefs::{apply_smoke_prefs, pack_prefs, smoke_prefs};
use crate::protocol::{PackCommand, SerialCommand};

impl PackCore {
    pub(super) fn serial1_prefs_command(&mut self, cmd: SerialCommand) -> bool {
        match cmd {
            SerialCommand::RequestPreferencesPack => {
                let prefs = pack_prefs(&self.state);
                self.to_serial1_packet(Packet::PackPrefs(prefs));
            }
            SerialCommand::RequestPreferencesWand => self.to_wand(PackCommand::SendPreferencesWand),
            SerialCommand::RequestPreferencesSmoke => {
                if self.wand.is_connected() {
                    self.to_wand(PackCommand::SendPreferencesSmoke);
                } else {
                    let prefs = smoke_prefs(&self.state);
                    self.to_serial1_packet(Packet::SmokePrefs(prefs));
                }
            }
            SerialCommand::SaveEepromSettingsPack => {
                self.emit(Action::Store(Store::SaveLeds));
                self.emit(Action::Store(Store::SaveConfig));
                self.restart(Voice::EepromSave);
            }
            SerialCommand::SaveEepromSettingsWand => {
                self.to_wand(PackCommand::SaveEepromWand);
                self.restart(Voice::EepromSave);
            }
            _ => return false,
        }
        true
    }

    /// Wand answered a preference request; the serial1 device asked for it.
    pub(super) fn relay_wand_prefs(&mut self, prefs: WandPrefs) {
        self.state.wand_prefs = prefs;
        self.to_serial1_packet(Packet::WandPrefs(prefs));
    }

    /// The wand owns the overheat half of the smoke blob; the pack fills in the rest.
    pub(super) fn relay_wand_smoke_prefs(&mut self, prefs: SmokePrefs) {
        self.state.overheat_level = prefs.overheat_level;
        self.state.overheat_delay_s = prefs.overheat_delay;
        let merged = smoke_prefs(&self.state);
        self.to_serial1_packet(Packet::SmokePrefs(merged));
    }

    pub(super) fn forward_wand_prefs(&mut self, prefs: WandPrefs) {
        self.state.wand_prefs = prefs;
        self.to_wand_packet(Packet::WandPrefs(prefs));
        self.restart(Sound::VentDry);
    }

    pub(super) fn apply_serial1_smoke_prefs(&mut self, prefs: SmokePrefs) {
        apply_smoke_prefs(&mut self.state, &prefs);
        self.smoke(Smoke::ResetContinuous);
        self.to_wand_packet(Packet::SmokePrefs(prefs));
        self.restart(Sound::VentSmoke);
    }
}

#[cfg(test)]
mod tests {
    use crate::action::{Action, Store};
    use crate::core::PackCore;
    use crate::packet::{Packet, PackPrefs, SmokePrefs, WandPrefs};
    use crate::protocol::{PackCommand, Peer, SerialCommand, WandCommand};
    use crate::state::Era;

    fn serial1_only() -> PackCore {
        let mut core = PackCore::default();
        core.on_packet(Peer::Serial1, Packet::command(SerialCommand::Handshake), 0);
        core
    }

    fn serial1(core: &mut PackCore, packet: Packet) -> Vec<Action> {
        core.on_packet(Peer::Serial1, packet, 5)
    }

    #[test]
    fn smoke_request_without_wand_is_answered_locally() {
        let mut core = serial1_only();
        let out = serial1(&mut core, Packet::command(SerialCommand::RequestPreferencesSmoke));
        assert!(matches!(out.as_slice(), [Action::Send(Peer::Serial1, Packet::SmokePrefs(p))] if p.duration == [6; 5]));
    }

    #[test]
    fn applied_pack_prefs_are_not_saved() {
        let mut core = serial1_only();
        let prefs = PackPrefs {
            current_year_theme: Era::Y1989.to_prefs(),
            cyclotron_count: 36,
            cake_count: 99,
            ..PackPrefs::default()
        };
        let out = serial1(&mut core, Packet::PackPrefs(prefs));
        assert_eq!(core.state().era, Era::Y1989);
        assert_eq!(core.state().cyclotron_leds, 36);
        assert_eq!(core.state().inner_cyclotron_leds, 35);
        assert!(!out.iter().any(|a| matches!(a, Action::Store(_))));
    }

    #[test]
    fn save_request_persists_both_stores() {
        let mut core = serial1_only();
        let out = serial1(&mut core, Packet::command(SerialCommand::SaveEepromSettingsPack));
        assert!(out.contains(&Action::Store(Store::SaveLeds)));
        assert!(out.contains(&Action::Store(Store::SaveConfig)));
    }

    #[test]
    fn smoke_prefs_are_applied_and_forwarded() {
        let mut core = serial1_only();
        core.on_packet(Peer::Wand, Packet::command(WandCommand::Handshake), 0);
        let prefs = SmokePrefs {
            smoke_enabled: 1,
            duration: [3, 3, 3, 3, 9],
            ..SmokePrefs::default()
        };
        let out = serial1(&mut core, Packet::SmokePrefs(prefs));
        assert_eq!(core.state().overheat_length_ms[4], 9_000);
        assert!(out.contains(&Action::Send(Peer::Wand, Packet::SmokePrefs(prefs))));
    }

    #[test]
    fn wand_prefs_round_trip_through_the_pack() {
        let mut core = serial1_only();
        core.on_packet(Peer::Wand, Packet::command(WandCommand::Handshake), 0);
        let out = serial1(&mut core, Packet::command(SerialCommand::RequestPreferencesWand));
        assert_eq!(
            out,
            vec![Action::Send(Peer::Wand, Packet::command(PackCommand::SendPreferencesWand))]
        );
        let prefs = WandPrefs {
            led_count: 48,
            ..WandPrefs::default()
        };
        let out = core.on_packet(Peer::Wand, Packet::WandPrefs(prefs), 6);
        assert_eq!(out, vec![Action::Send(Peer::Serial1, Packet::WandPrefs(prefs))]);
        assert_eq!(core.state().wand_prefs.led_count, 48);
    }
}
