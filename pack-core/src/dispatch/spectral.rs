//! Custom spectral colours per LED zone.

use crate::action::Lights;
use crate::core::PackCore;
use crate::packet::Packet;
use crate::protocol::{SerialCommand, WandCommand};

#[derive(Debug, Clone, Copy)]
enum Zone {
    Cyclotron,
    Inner,
    Powercell,
}

impl PackCore {
    pub(super) fn wand_spectral_command(&mut self, cmd: WandCommand) -> bool {
        match cmd {
            WandCommand::SpectralLightsOn => self.spectral_lights_on(),
            WandCommand::SpectralLightsOff => self.spectral_lights_off(),
            WandCommand::SpectralCyclotronCustomIncrease => self.adjust_colour(Zone::Cyclotron, true),
            WandCommand::SpectralCyclotronCustomDecrease => self.adjust_colour(Zone::Cyclotron, false),
            WandCommand::SpectralInnerCyclotronCustomIncrease => self.adjust_colour(Zone::Inner, true),
            WandCommand::SpectralInnerCyclotronCustomDecrease => self.adjust_colour(Zone::Inner, false),
            WandCommand::SpectralPowercellCustomIncrease => self.adjust_colour(Zone::Powercell, true),
            WandCommand::SpectralPowercellCustomDecrease => self.adjust_colour(Zone::Powercell, false),
            _ => return false,
        }
        true
    }

    pub(crate) fn spectral_lights_on(&mut self) {
        self.state.spectral_lights_on = true;
        self.lights(Lights::SpectralOn);
    }

    pub(crate) fn spectral_lights_off(&mut self) {
        self.state.spectral_lights_on = false;
        self.lights(Lights::SpectralOff);
    }

    fn adjust_colour(&mut self, zone: Zone, up: bool) {
        let s = &mut self.state;
        let colour = match zone {
            Zone::Cyclotron => &mut s.spectral_cyclotron,
            Zone::Inner => &mut s.spectral_inner,
            Zone::Powercell => &mut s.spectral_powercell,
        };
        if up {
            // The power cell stops at full saturation once the hue is maxed.
            colour.increase(!matches!(zone, Zone::Powercell));
        } else {
            colour.decrease();
        }
        let c = *colour;
        self.spectral_lights_on();

        if let Zone::Cyclotron = zone {
            self.to_serial1_packet(Packet::message(SerialCommand::SpectralColourData, [c.hue, c.sat, 0]));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::action::{Action, Lights};
    use crate::core::PackCore;
    use crate::packet::Packet;
    use crate::protocol::{Peer, SerialCommand, WandCommand};
    use crate::state::SpectralColour;

    fn connected() -> PackCore {
        let mut core = PackCore::default();
        core.on_packet(Peer::Wand, Packet::command(WandCommand::Handshake), 0);
        core.on_packet(Peer::Serial1, Packet::command(SerialCommand::Handshake), 0);
        core
    }

    #[test]
    fn cyclotron_colour_is_reported_to_serial1() {
        let mut core = connected();
        core.state.spectral_cyclotron = SpectralColour { hue: 100, sat: 254 };
        let out = core.on_packet(Peer::Wand, Packet::command(WandCommand::SpectralCyclotronCustomDecrease), 5);
        assert_eq!(core.state().spectral_cyclotron, SpectralColour { hue: 99, sat: 254 });
        assert!(core.state().spectral_lights_on);
        assert!(out.contains(&Action::Lights(Lights::SpectralOn)));
        assert!(out.contains(&Action::Send(
            Peer::Serial1,
            Packet::message(SerialCommand::SpectralColourData, [99, 254, 0])
        )));
    }

    #[test]
    fn powercell_hue_stops_at_the_top() {
        let mut core = connected();
        core.state.spectral_powercell = SpectralColour { hue: 254, sat: 254 };
        let out = core.on_packet(Peer::Wand, Packet::command(WandCommand::SpectralPowercellCustomIncrease), 5);
        assert_eq!(core.state().spectral_powercell, SpectralColour { hue: 254, sat: 254 });
        assert!(!out.iter().any(|a| matches!(a, Action::Send(Peer::Serial1, _))));
    }

    #[test]
    fn lights_off_clears_the_flag() {
        let mut core = connected();
        core.on_packet(Peer::Wand, Packet::command(WandCommand::SpectralLightsOn), 5);
        core.on_packet(Peer::Wand, Packet::command(WandCommand::SpectralLightsOff), 6);
        assert!(!core.state().spectral_lights_on);
    }
}
