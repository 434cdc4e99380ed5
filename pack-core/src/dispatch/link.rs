//! Link control: sync requests, heartbeats, wand loss.

use crate::action::Sound;
use crate::core::PackCore;
use crate::protocol::{SerialCommand, WandCommand};
use crate::state::CtsStatus;

impl PackCore {
    pub(super) fn wand_link_command(&mut self, cmd: WandCommand) -> bool {
        match cmd {
            WandCommand::SyncNow => {
                self.stop_extra_wand_sounds();
                self.stop(Sound::AfterlifeBeepWand);
                self.start_wand_sync();
            }
            WandCommand::Handshake => {
                if self.wand.on_heartbeat(self.now) {
                    tracing::info!("wand connected by heartbeat");
                    self.wand_attached = true;
                    self.to_serial1(SerialCommand::WandConnected);
                }
            }
            WandCommand::Synchronized => {
                if self.wand.on_synchronized(self.now) {
                    tracing::info!("wand connected");
                    self.wand_attached = true;
                    self.to_serial1(SerialCommand::WandConnected);
                }
            }
            _ => return false,
        }
        true
    }

    /// Link commands from the serial1 device; handled in any link state.
    pub(super) fn serial1_link_command(&mut self, cmd: SerialCommand) -> bool {
        match cmd {
            SerialCommand::SyncStart => self.start_serial1_sync(),
            SerialCommand::Handshake => {
                if self.serial1.on_heartbeat(self.now) {
                    tracing::info!("serial1 connected by heartbeat");
                }
            }
            SerialCommand::SyncEnd => tracing::debug!("serial1 sync end"),
            _ => return false,
        }
        true
    }

    /// The wand went silent: drop everything that assumed it was there.
    pub(crate) fn on_wand_lost(&mut self) {
        self.wand_attached = false;
        self.stop_firing_loops();
        self.stop_firing_tails();
        self.stop(Sound::AfterlifeBeepWand);
        self.stop(Sound::PackBeepsOverheat);
        self.stop(Sound::Beep8);
        self.stop_extra_wand_sounds();
        if self.state.overheating {
            self.finish_overheat();
        }

        let s = &mut self.state;
        s.wand_on = false;
        s.wand_firing = false;
        s.firing_intensify = false;
        s.firing_alt = false;
        s.intensify_sound = false;
        s.alt_sound = false;
        s.cts = CtsStatus::NotFiring;
        self.smoke_timer.cancel();
        self.mash.reset();

        self.to_serial1(SerialCommand::WandDisconnected);
    }
}
