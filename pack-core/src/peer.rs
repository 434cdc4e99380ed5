//! Wand side of the pack link, enough to drive synchronization and keep-alives.
//!
//! Used by desktop hosts to simulate a wand and by tests to exercise the pack end to end.

use crate::packet::{Packet, SmokePrefs, SyncSnapshot, WandPrefs};
use crate::protocol::{PackCommand, Role, WandCommand};
use crate::timer::{Deadline, Millis};
use crate::wire::{FrameEncodeError, FrameReceiver, FrameSender};

/// Where the wand believes it stands with the pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MirrorState {
    #[default]
    Idle,
    /// Sync requested; collecting the snapshot.
    Syncing,
    /// Snapshot applied and confirmed; sending heartbeats.
    Synced,
}

pub struct WandMirror {
    state: MirrorState,
    rx: FrameReceiver,
    tx: FrameSender,
    snapshot: Option<SyncSnapshot>,
    alarm: bool,
    heartbeat_every: Millis,
    heartbeat: Deadline,
    prefs: WandPrefs,
    smoke: SmokePrefs,
    received: Vec<PackCommand>,
}

impl WandMirror {
    pub fn new(heartbeat_every: Millis) -> Self {
        Self {
            state: MirrorState::Idle,
            rx: FrameReceiver::new(Role::Pack),
            tx: FrameSender::new(Role::Wand),
            snapshot: None,
            alarm: false,
            heartbeat_every,
            heartbeat: Deadline::idle(),
            prefs: WandPrefs::default(),
            smoke: SmokePrefs::default(),
            received: Vec::new(),
        }
    }

    pub fn state(&self) -> MirrorState {
        self.state
    }

    pub fn is_synced(&self) -> bool {
        self.state == MirrorState::Synced
    }

    /// Last snapshot received from the pack.
    pub fn snapshot(&self) -> Option<&SyncSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn alarm(&self) -> bool {
        self.alarm
    }

    pub fn set_prefs(&mut self, prefs: WandPrefs, smoke: SmokePrefs) {
        self.prefs = prefs;
        self.smoke = smoke;
    }

    /// Pack commands seen since the last call, oldest first.
    pub fn drain_commands(&mut self) -> Vec<PackCommand> {
        std::mem::take(&mut self.received)
    }

    pub fn encode(&self, packet: &Packet) -> Result<Vec<u8>, FrameEncodeError> {
        self.tx.encode(packet)
    }

    /// Ask the pack for a full snapshot.
    pub fn request_sync(&mut self) -> Packet {
        self.state = MirrorState::Syncing;
        self.snapshot = None;
        self.heartbeat.cancel();
        Packet::command(WandCommand::SyncNow)
    }

    /// Bytes from the pack. Returns the replies to send, in order.
    pub fn on_bytes(&mut self, bytes: &[u8], now: Millis) -> Vec<Packet> {
        self.rx.push(bytes);
        let mut replies = Vec::new();
        while let Some(packet) = self.rx.try_receive() {
            replies.extend(self.on_packet(packet, now));
        }
        replies
    }

    pub fn on_packet(&mut self, packet: Packet, now: Millis) -> Vec<Packet> {
        match packet {
            Packet::Command { opcode, .. } => match PackCommand::try_from(opcode) {
                Ok(cmd) => self.on_command(cmd, now),
                Err(e) => {
                    tracing::debug!(error = %e, "wand mirror ignoring command");
                    Vec::new()
                }
            },
            Packet::Sync(snapshot) => {
                if self.state == MirrorState::Syncing {
                    self.snapshot = Some(snapshot);
                }
                Vec::new()
            }
            Packet::WandPrefs(prefs) => {
                self.prefs = prefs;
                Vec::new()
            }
            Packet::SmokePrefs(smoke) => {
                self.smoke = smoke;
                Vec::new()
            }
            other => {
                tracing::trace!(kind = ?other.kind(), "wand mirror ignoring packet");
                Vec::new()
            }
        }
    }

    fn on_command(&mut self, cmd: PackCommand, now: Millis) -> Vec<Packet> {
        match cmd {
            PackCommand::SyncStart => {
                self.state = MirrorState::Syncing;
                self.alarm = false;
                Vec::new()
            }
            PackCommand::AlarmOn => {
                self.alarm = true;
                Vec::new()
            }
            PackCommand::SyncEnd => {
                if self.state != MirrorState::Syncing || self.snapshot.is_none() {
                    tracing::debug!("sync end without a snapshot");
                    return Vec::new();
                }
                self.state = MirrorState::Synced;
                self.heartbeat.arm(now, self.heartbeat_every);
                vec![Packet::command(WandCommand::Synchronized)]
            }
            PackCommand::SendPreferencesWand => vec![Packet::WandPrefs(self.prefs)],
            PackCommand::SendPreferencesSmoke => vec![Packet::SmokePrefs(self.smoke)],
            other => {
                self.received.push(other);
                Vec::new()
            }
        }
    }

    /// Heartbeat while synced.
    pub fn tick(&mut self, now: Millis) -> Option<Packet> {
        if self.heartbeat.fire(now) {
            self.heartbeat.arm(now, self.heartbeat_every);
            return Some(Packet::command(WandCommand::Handshake));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_end_confirms_only_after_snapshot() {
        let mut w = WandMirror::new(1_000);
        w.request_sync();
        w.on_packet(Packet::command(PackCommand::SyncStart), 0);
        assert!(w.on_packet(Packet::command(PackCommand::SyncEnd), 0).is_empty());
        assert_eq!(w.state(), MirrorState::Syncing);

        w.on_packet(Packet::Sync(SyncSnapshot::default()), 0);
        let replies = w.on_packet(Packet::command(PackCommand::SyncEnd), 0);
        assert_eq!(replies, vec![Packet::command(WandCommand::Synchronized)]);
        assert!(w.is_synced());
    }

    #[test]
    fn heartbeats_follow_sync() {
        let mut w = WandMirror::new(1_000);
        assert_eq!(w.tick(5_000), None);
        w.request_sync();
        w.on_packet(Packet::Sync(SyncSnapshot::default()), 10);
        w.on_packet(Packet::command(PackCommand::SyncEnd), 10);
        assert_eq!(w.tick(1_009), None);
        assert_eq!(w.tick(1_010), Some(Packet::command(WandCommand::Handshake)));
        assert_eq!(w.tick(2_010), Some(Packet::command(WandCommand::Handshake)));
    }

    #[test]
    fn other_commands_are_recorded() {
        let mut w = WandMirror::new(1_000);
        w.on_packet(Packet::command(PackCommand::FiringLockout), 0);
        w.on_packet(Packet::command(PackCommand::VolumeIncrease), 0);
        assert_eq!(
            w.drain_commands(),
            vec![PackCommand::FiringLockout, PackCommand::VolumeIncrease]
        );
        assert!(w.drain_commands().is_empty());
    }
}
